//! CREATE TABLE and CREATE INDEX rendering.
//!
//! All builders here are pure text transforms: identical input produces
//! byte-identical output. Identifiers are always bracket-quoted so reserved
//! words and embedded punctuation survive the trip.

use crate::core::identifier::quote;
use crate::core::schema::{ColumnSchema, SchemaIndex, TableSchema};
use crate::ddl::default_value;
use crate::dialect::is_integer_family;

/// Render the full DDL for a table: the CREATE TABLE statement followed by
/// one CREATE INDEX statement per index, in declared index order.
pub fn build_create_table(table: &TableSchema) -> String {
    let mut sql = build_table_ddl(table);
    for index in &table.indexes {
        sql.push_str(&build_create_index(&table.name, index));
        sql.push_str(";\n");
    }
    sql
}

/// Render the CREATE TABLE statement alone (no index statements).
pub fn build_table_ddl(table: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", quote(&table.name));

    let mut inline_pkey = false;
    for (i, col) in table.columns.iter().enumerate() {
        let (clause, is_inline) = build_column_clause(col, table);
        inline_pkey |= is_inline;
        sql.push_str(&clause);
        if i < table.columns.len() - 1 {
            sql.push_str(",\n");
        }
    }

    // A composite or non-inline primary key gets its own clause, but only if
    // no column already became an inline auto-increment key.
    if table.has_pk() && !inline_pkey {
        sql.push_str(",\n");
        sql.push_str("    PRIMARY KEY (");
        for (i, pk) in table.primary_key.iter().enumerate() {
            sql.push_str(&quote(pk));
            if i < table.primary_key.len() - 1 {
                sql.push_str(", ");
            }
        }
        sql.push_str(")\n");
    } else {
        sql.push('\n');
    }

    if !table.foreign_keys.is_empty() {
        sql.push_str(",\n");
        for (i, fk) in table.foreign_keys.iter().enumerate() {
            sql.push_str(&format!(
                "    FOREIGN KEY ({})\n        REFERENCES {}({})",
                quote(&fk.column),
                quote(&fk.foreign_table),
                quote(&fk.foreign_column)
            ));
            if i < table.foreign_keys.len() - 1 {
                sql.push_str(",\n");
            }
        }
    }

    sql.push_str("\n);\n");
    sql
}

/// Render a single column clause of the CREATE TABLE statement.
///
/// Returns the clause plus a flag saying whether the column became the
/// table's inline auto-increment primary key, which suppresses the separate
/// PRIMARY KEY clause.
fn build_column_clause(col: &ColumnSchema, table: &TableSchema) -> (String, bool) {
    let mut sql = format!("\t{}\t", quote(&col.name));
    let mut inline_pkey = false;

    if col.is_identity {
        // An identity column that is the table's sole primary-key column
        // renders as the target's auto-increment integer key; any other
        // identity column degrades to a plain integer.
        let is_sole_pk = table.primary_key.len() == 1
            && table.primary_key[0].eq_ignore_ascii_case(&col.name);
        if is_sole_pk && is_integer_family(&col.col_type) {
            sql.push_str("integer PRIMARY KEY AUTOINCREMENT");
            inline_pkey = true;
        } else {
            sql.push_str("integer");
        }
    } else {
        // The target derives type affinity from substrings of the declared
        // type name, so canonical tokens are rendered as-is.
        if col.col_type == "int" {
            sql.push_str("integer");
        } else {
            sql.push_str(&col.col_type);
        }
        if col.length > 0 {
            sql.push_str(&format!("({})", col.length));
        }
    }

    if !col.is_nullable {
        sql.push_str(" NOT NULL");
    }

    if col.is_case_sensitive == Some(false) {
        sql.push_str(" COLLATE NOCASE");
    }

    if let Some(defval) = default_value::normalize(&col.default_value) {
        sql.push_str(&format!(" DEFAULT {}", defval));
    }

    (sql, inline_pkey)
}

/// Render a CREATE INDEX statement.
///
/// The index name is prefixed with the owning table name to avoid
/// cross-table collisions in the target's flat index namespace.
pub fn build_create_index(table_name: &str, index: &SchemaIndex) -> String {
    let mut sql = String::from("CREATE ");
    if index.is_unique {
        sql.push_str("UNIQUE ");
    }
    sql.push_str(&format!(
        "INDEX {}\n",
        quote(&format!("{}_{}", table_name, index.name))
    ));
    sql.push_str(&format!("ON {}\n", quote(table_name)));
    sql.push('(');
    for (i, col) in index.columns.iter().enumerate() {
        sql.push_str(&quote(&col.name));
        if !col.is_ascending {
            sql.push_str(" DESC");
        }
        if i < index.columns.len() - 1 {
            sql.push_str(", ");
        }
    }
    sql.push(')');
    sql
}
