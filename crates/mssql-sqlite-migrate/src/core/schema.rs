//! Schema metadata types for tables, columns, keys, indexes, triggers, and views.
//!
//! These types are a database-agnostic snapshot of the source schema. They are
//! populated once per conversion run by an external schema reader, consumed
//! read-only by the builders, and discarded when the run completes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// Root aggregate for one conversion run: every table and view read from the
/// source database. Collection order carries no meaning; insertion order is
/// computed separately from the foreign key graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Base tables.
    pub tables: Vec<TableSchema>,

    /// Views, carried through as lightly rewritten SQL text.
    pub views: Vec<ViewSchema>,
}

impl DatabaseSchema {
    /// Look up a table by name (case-insensitive, SQL Server semantics).
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Table metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSchema {
    /// Source namespace qualifier (e.g. "dbo").
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Column definitions, in declared order.
    ///
    /// Order is semantically significant: it drives both DDL rendering and
    /// positional inserts.
    pub columns: Vec<ColumnSchema>,

    /// Primary key column names, in key order. May be empty.
    pub primary_key: Vec<String>,

    /// Foreign key constraints owned by this table.
    pub foreign_keys: Vec<ForeignKeySchema>,

    /// Non-primary-key indexes.
    pub indexes: Vec<SchemaIndex>,
}

impl TableSchema {
    /// Get the fully qualified source table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Verify the internal invariant that every primary key and foreign key
    /// column name refers to a declared column.
    pub fn check_invariants(&self) -> Result<()> {
        for pk in &self.primary_key {
            if self.column(pk).is_none() {
                return Err(MigrateError::SchemaExtraction(format!(
                    "table [{}] primary key references unknown column [{}]",
                    self.name, pk
                )));
            }
        }
        for fk in &self.foreign_keys {
            if self.column(&fk.column).is_none() {
                return Err(MigrateError::SchemaExtraction(format!(
                    "table [{}] foreign key references unknown column [{}]",
                    self.name, fk.column
                )));
            }
        }
        Ok(())
    }
}

/// Column metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,

    /// Canonical lower-case type token (e.g. "int", "varchar", "numeric",
    /// "datetime", "blob", "guid"), already reduced by
    /// [`reduce_type`](crate::dialect::reduce_type).
    pub col_type: String,

    /// Character/byte length; 0 means unspecified, -1 means max.
    pub length: i32,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Whether the column is an identity (auto-incrementing) column.
    pub is_identity: bool,

    /// Collation case sensitivity: `None` = unknown/engine default,
    /// `Some(false)` = case-insensitive comparison.
    pub is_case_sensitive: Option<bool>,

    /// Raw default-value expression as read from the source catalog,
    /// empty when the column has no default.
    pub default_value: String,
}

/// Foreign key metadata.
///
/// `is_nullable` mirrors the child column's nullability and decides how strict
/// the synthesized guard triggers are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForeignKeySchema {
    /// Owning (child) table name.
    pub table: String,

    /// Child column name.
    pub column: String,

    /// Referenced (parent) table name.
    pub foreign_table: String,

    /// Referenced (parent) column name.
    pub foreign_column: String,

    /// Whether deletes on the parent cascade to the child.
    pub cascade_on_delete: bool,

    /// Nullability of the child column.
    pub is_nullable: bool,
}

impl ForeignKeySchema {
    /// Whether the foreign key points back at its own table.
    pub fn is_self_referencing(&self) -> bool {
        self.table.eq_ignore_ascii_case(&self.foreign_table)
    }
}

/// Index metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaIndex {
    /// Index name as declared on the source.
    pub name: String,

    /// Whether the index is unique.
    pub is_unique: bool,

    /// Key columns in index order.
    pub columns: Vec<IndexColumn>,
}

/// One key column of an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexColumn {
    /// Column name.
    pub name: String,

    /// Sort direction; `false` renders a DESC suffix.
    pub is_ascending: bool,
}

/// Event a trigger fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerEvent::Insert => write!(f, "Insert"),
            TriggerEvent::Update => write!(f, "Update"),
            TriggerEvent::Delete => write!(f, "Delete"),
        }
    }
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerTiming {
    Before,
    After,
}

impl fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerTiming::Before => write!(f, "Before"),
            TriggerTiming::After => write!(f, "After"),
        }
    }
}

/// A synthesized trigger definition.
///
/// Ephemeral: generated from a foreign key, rendered to DDL text, never
/// persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSchema {
    /// Deterministic trigger name.
    pub name: String,

    /// Event the trigger fires on.
    pub event: TriggerEvent,

    /// Firing time relative to the event.
    pub timing: TriggerTiming,

    /// Single SQL statement forming the trigger body.
    pub body: String,

    /// Table the trigger is attached to.
    pub table: String,
}

/// View metadata: pass-through SQL text, lightly rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewSchema {
    /// View name.
    pub name: String,

    /// View definition SQL.
    pub sql: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_column(name: &str, col_type: &str) -> ColumnSchema {
        ColumnSchema {
            name: name.to_string(),
            col_type: col_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_name() {
        let table = TableSchema {
            schema: "dbo".to_string(),
            name: "Orders".to_string(),
            ..Default::default()
        };
        assert_eq!(table.full_name(), "dbo.Orders");
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let table = TableSchema {
            columns: vec![make_column("OrderId", "int")],
            ..Default::default()
        };
        assert!(table.column("orderid").is_some());
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_check_invariants_rejects_dangling_pk() {
        let table = TableSchema {
            name: "Orders".to_string(),
            columns: vec![make_column("OrderId", "int")],
            primary_key: vec!["Nope".to_string()],
            ..Default::default()
        };
        let err = table.check_invariants().unwrap_err();
        assert!(err.to_string().contains("[Nope]"));
    }

    #[test]
    fn test_check_invariants_rejects_dangling_fk_column() {
        let table = TableSchema {
            name: "Orders".to_string(),
            columns: vec![make_column("OrderId", "int")],
            foreign_keys: vec![ForeignKeySchema {
                table: "Orders".to_string(),
                column: "CustomerId".to_string(),
                foreign_table: "Customers".to_string(),
                foreign_column: "Id".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(table.check_invariants().is_err());
    }

    #[test]
    fn test_self_reference_detection() {
        let fk = ForeignKeySchema {
            table: "Employees".to_string(),
            foreign_table: "employees".to_string(),
            ..Default::default()
        };
        assert!(fk.is_self_referencing());
    }

    #[test]
    fn test_trigger_enum_display() {
        assert_eq!(TriggerEvent::Insert.to_string(), "Insert");
        assert_eq!(TriggerEvent::Delete.to_string(), "Delete");
        assert_eq!(TriggerTiming::Before.to_string(), "Before");
    }
}
