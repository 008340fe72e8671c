//! Configuration validation.

use super::Config;
use crate::error::{MigrateError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Source validation
    if config.source.host.is_empty() {
        return Err(MigrateError::Config("source.host is required".into()));
    }
    if config.source.database.is_empty() {
        return Err(MigrateError::Config("source.database is required".into()));
    }
    if config.source.r#type != "mssql" {
        return Err(MigrateError::Config(format!(
            "source.type must be 'mssql', got '{}'",
            config.source.r#type
        )));
    }
    if config.source.user.is_empty() != config.source.password.is_empty() {
        return Err(MigrateError::Config(
            "source.user and source.password must be set together".into(),
        ));
    }

    // Target validation
    if config.target.path.is_empty() {
        return Err(MigrateError::Config("target.path is required".into()));
    }
    if config.target.r#type != "sqlite" {
        return Err(MigrateError::Config(format!(
            "target.type must be 'sqlite', got '{}'",
            config.target.r#type
        )));
    }

    Ok(())
}
