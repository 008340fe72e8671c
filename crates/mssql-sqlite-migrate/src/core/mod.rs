//! Core abstractions shared by every stage of the conversion.
//!
//! - [`schema`]: table, column, key, index, trigger, and view metadata
//! - [`value`]: runtime SQL value representation
//! - [`identifier`]: quoting and name normalization
//! - [`index`]: parser for source catalog index descriptors

pub mod identifier;
pub mod index;
pub mod schema;
pub mod value;

// Re-export commonly used types for convenience
pub use index::parse_index_descriptor;
pub use schema::{
    ColumnSchema, DatabaseSchema, ForeignKeySchema, IndexColumn, SchemaIndex, TableSchema,
    TriggerEvent, TriggerSchema, TriggerTiming, ViewSchema,
};
pub use value::SqlValue;
