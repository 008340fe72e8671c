//! # mssql-sqlite-migrate
//!
//! Library for converting a SQL Server database schema and its data to a
//! SQLite database file.
//!
//! The target engine does not enforce declarative foreign keys by default,
//! expresses identity columns differently, and handles dates and booleans
//! through type affinity rather than strict types. This crate compiles an
//! in-memory schema description into everything the target side needs:
//!
//! - **DDL text** for tables, indexes, and views
//! - **Integrity-emulation triggers** replacing declarative foreign keys
//! - **A safe table-insertion order** derived from the foreign key graph
//! - **Per-value coercions** for copying rows between the two type systems
//!
//! Connectivity is deliberately out of scope: an external reader supplies
//! the [`DatabaseSchema`] and row streams, and an external executor runs the
//! generated statements in the order received.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mssql_sqlite_migrate::{Config, ConversionPlan, DatabaseSchema};
//!
//! fn main() -> mssql_sqlite_migrate::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let schema = DatabaseSchema::default(); // supplied by a schema reader
//!     let plan = ConversionPlan::build(&schema, &config)?;
//!     for statement in &plan.statements {
//!         println!("{}", statement.sql);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cast;
pub mod config;
pub mod core;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod orchestrator;
pub mod order;

// Re-exports for convenient access
pub use crate::config::{Config, MigrationConfig, SourceConfig, TargetConfig};
pub use crate::core::schema::{
    ColumnSchema, DatabaseSchema, ForeignKeySchema, IndexColumn, SchemaIndex, TableSchema,
    TriggerEvent, TriggerSchema, TriggerTiming, ViewSchema,
};
pub use crate::core::value::SqlValue;
pub use crate::dialect::{CoercionClass, StorageClass};
pub use crate::error::{MigrateError, Result};
pub use crate::orchestrator::{
    ConversionEvent, ConversionPlan, ConversionReport, ConversionSummary, Statement, StatementKind,
};
