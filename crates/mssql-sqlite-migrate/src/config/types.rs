//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source database configuration (SQL Server).
    pub source: SourceConfig,

    /// Target database configuration (SQLite).
    pub target: TargetConfig,

    /// Conversion behavior configuration.
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Source database (SQL Server) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Database type (always "mssql" for now).
    #[serde(default = "default_mssql")]
    pub r#type: String,

    /// Database host.
    pub host: String,

    /// Database name.
    pub database: String,

    /// Username. Empty together with password selects integrated security.
    #[serde(default)]
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Source schema qualifier (default: "dbo").
    #[serde(default = "default_dbo_schema")]
    pub schema: String,
}

/// Target database (SQLite) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Database type (always "sqlite" for now).
    #[serde(default = "default_sqlite")]
    pub r#type: String,

    /// Path of the database file to create.
    pub path: String,

    /// Password used to encrypt the file, when supported by the driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Conversion behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Tables to include (exact names, case-insensitive). Empty = all.
    #[serde(default)]
    pub include_tables: Vec<String>,

    /// Tables to exclude (exact names, case-insensitive).
    #[serde(default)]
    pub exclude_tables: Vec<String>,

    /// Create secondary indexes (default: true).
    #[serde(default = "default_true")]
    pub create_indexes: bool,

    /// Synthesize foreign-key emulation triggers (default: true).
    #[serde(default = "default_true")]
    pub create_triggers: bool,

    /// Carry views over to the target (default: true).
    #[serde(default = "default_true")]
    pub copy_views: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            include_tables: Vec::new(),
            exclude_tables: Vec::new(),
            create_indexes: true,
            create_triggers: true,
            copy_views: true,
        }
    }
}

impl MigrationConfig {
    /// Whether a table participates in the conversion under the configured
    /// include/exclude filters.
    pub fn table_selected(&self, name: &str) -> bool {
        if self
            .exclude_tables
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
        {
            return false;
        }
        self.include_tables.is_empty()
            || self
                .include_tables
                .iter()
                .any(|t| t.eq_ignore_ascii_case(name))
    }
}

fn default_mssql() -> String {
    "mssql".to_string()
}

fn default_sqlite() -> String {
    "sqlite".to_string()
}

fn default_dbo_schema() -> String {
    "dbo".to_string()
}

fn default_true() -> bool {
    true
}
