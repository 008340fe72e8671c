//! Parameterized insert templates for row copying.

use crate::core::identifier::{normalized_name, quote};
use crate::core::schema::TableSchema;
use crate::dialect::{storage_class_of, StorageClass};
use crate::error::Result;

/// A ready-to-prepare insert statement plus its parameter descriptions.
///
/// The caller binds one coerced value per parameter, positionally or by
/// name, and executes the statement once per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTemplate {
    /// Target table name.
    pub table: String,

    /// The INSERT statement text with named placeholders.
    pub sql: String,

    /// Parameter descriptions, in placeholder order.
    pub parameters: Vec<InsertParameter>,
}

/// One bind parameter of an [`InsertTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertParameter {
    /// Placeholder name, including the `@` prefix.
    pub name: String,

    /// Source column the parameter is bound from.
    pub column: String,

    /// Storage class the target will use for the bound value.
    pub storage_class: StorageClass,
}

/// Build the parameterized insert template for a table.
///
/// Parameter names are normalized column names; collisions after
/// normalization are disambiguated with underscore suffixes.
pub fn build_insert(table: &TableSchema) -> Result<InsertTemplate> {
    let mut sql = format!("INSERT INTO {} (", quote(&table.name));
    for (i, col) in table.columns.iter().enumerate() {
        sql.push_str(&quote(&col.name));
        if i < table.columns.len() - 1 {
            sql.push_str(", ");
        }
    }
    sql.push_str(") VALUES (");

    let mut taken: Vec<String> = Vec::with_capacity(table.columns.len());
    let mut parameters = Vec::with_capacity(table.columns.len());
    for (i, col) in table.columns.iter().enumerate() {
        let normalized = normalized_name(&col.name, &taken);
        let pname = format!("@{}", normalized);
        sql.push_str(&pname);
        if i < table.columns.len() - 1 {
            sql.push_str(", ");
        }

        parameters.push(InsertParameter {
            name: pname,
            column: col.name.clone(),
            storage_class: storage_class_of(&col.col_type)?,
        });
        taken.push(normalized);
    }
    sql.push(')');

    Ok(InsertTemplate {
        table: table.name.clone(),
        sql,
        parameters,
    })
}

/// Build the source-side SELECT that reads every column of a table in
/// declared order, matching the insert template's parameter order.
pub fn build_select(table: &TableSchema) -> String {
    let mut sql = String::from("SELECT ");
    for (i, col) in table.columns.iter().enumerate() {
        sql.push_str(&quote(&col.name));
        if i < table.columns.len() - 1 {
            sql.push_str(", ");
        }
    }
    sql.push_str(&format!(" FROM {}.{}", table.schema, quote(&table.name)));
    sql
}
