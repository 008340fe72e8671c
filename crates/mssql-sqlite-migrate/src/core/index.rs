//! Parser for index descriptors as reported by the source catalog.
//!
//! `sp_helpindex` describes an index as three strings: a name, a
//! comma-separated description (containing `unique` for unique indexes), and
//! a comma-separated key list where a descending key carries a `(-)` suffix.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::schema::{IndexColumn, SchemaIndex};
use crate::error::{MigrateError, Result};

static KEY_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z0-9_äöüÄÖÜß.][A-Za-z0-9_äöüÄÖÜß.\s]*?)\s*(?P<desc>\(-\))?$")
        .expect("key descriptor regex")
});

/// Parse one index descriptor into a [`SchemaIndex`].
///
/// A key part that does not parse yields
/// [`MigrateError::MalformedIndexDescriptor`]; callers skip the index and
/// proceed with table creation.
pub fn parse_index_descriptor(name: &str, description: &str, keys: &str) -> Result<SchemaIndex> {
    let is_unique = description
        .split(',')
        .any(|part| part.trim().contains("unique"));

    let mut columns = Vec::new();
    for part in keys.split(',') {
        let part = part.trim();
        let caps = KEY_RX
            .captures(part)
            .ok_or_else(|| MigrateError::malformed_index(name, part))?;

        columns.push(IndexColumn {
            name: caps["name"].to_string(),
            is_ascending: caps.name("desc").is_none(),
        });
    }

    Ok(SchemaIndex {
        name: name.to_string(),
        is_unique,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_unique_flag_from_description() {
        let idx = parse_index_descriptor(
            "IX_Orders_Number",
            "nonclustered, unique located on PRIMARY",
            "OrderNumber",
        )
        .unwrap();
        assert!(idx.is_unique);
        assert_eq!(idx.columns.len(), 1);
        assert_eq!(idx.columns[0].name, "OrderNumber");
        assert!(idx.columns[0].is_ascending);
    }

    #[test]
    fn test_parses_descending_suffix() {
        let idx = parse_index_descriptor(
            "IX_Orders_Date",
            "nonclustered located on PRIMARY",
            "CustomerId, OrderDate(-)",
        )
        .unwrap();
        assert!(!idx.is_unique);
        assert_eq!(idx.columns[0].name, "CustomerId");
        assert!(idx.columns[0].is_ascending);
        assert_eq!(idx.columns[1].name, "OrderDate");
        assert!(!idx.columns[1].is_ascending);
    }

    #[test]
    fn test_malformed_key_names_index_and_part() {
        let err = parse_index_descriptor("IX_Bad", "nonclustered", "Order#Id").unwrap_err();
        match err {
            MigrateError::MalformedIndexDescriptor { index, part } => {
                assert_eq!(index, "IX_Bad");
                assert_eq!(part, "Order#Id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
