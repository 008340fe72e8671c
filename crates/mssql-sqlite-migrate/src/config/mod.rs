//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl SourceConfig {
    /// Build an ADO-style connection string for the source driver.
    ///
    /// Empty credentials select integrated security.
    pub fn connection_string(&self) -> String {
        if self.user.is_empty() && self.password.is_empty() {
            format!(
                "Data Source={};Initial Catalog={};Integrated Security=SSPI;",
                self.host.trim(),
                self.database.trim()
            )
        } else {
            format!(
                "Data Source={};Initial Catalog={};User ID={};Password={}",
                self.host.trim(),
                self.database.trim(),
                self.user.trim(),
                self.password.trim()
            )
        }
    }
}

impl TargetConfig {
    /// Build a connection string for the target driver from the file path
    /// and optional encryption password.
    pub fn connection_string(&self) -> String {
        match &self.password {
            Some(password) => format!("Data Source={};Password={}", self.path, password),
            None => format!("Data Source={}", self.path),
        }
    }
}
