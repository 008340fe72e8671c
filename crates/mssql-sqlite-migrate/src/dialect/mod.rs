//! Canonical type table shared by DDL rendering and value casting.
//!
//! A single lookup ([`classify`]) maps every canonical type token to both its
//! SQLite storage class and its runtime coercion class. The two views
//! ([`storage_class_of`], [`coercion_class_of`]) are derived from that one
//! table, so they cannot drift apart.
//!
//! The token vocabulary is closed. Anything outside it fails with
//! [`MigrateError::UnsupportedType`] rather than falling back silently: an
//! unmapped type would corrupt the target schema.

use crate::error::{MigrateError, Result};

/// SQLite storage class (type affinity category) for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    Integer,
    Real,
    Text,
    Blob,
}

/// Runtime value category a column's values are coerced through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoercionClass {
    Byte,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Guid,
    Binary,
    Boolean,
    DateTime,
    /// `sql_variant` payloads; cannot be coerced, aborts the row.
    Object,
}

/// Classify a canonical type token into its storage and coercion classes.
///
/// This is the single source of truth for the type vocabulary. Note that
/// SQLite derives affinity from substrings of the declared type name, which
/// is why most tokens are rendered into the DDL verbatim.
pub fn classify(token: &str) -> Result<(StorageClass, CoercionClass)> {
    use self::CoercionClass as C;
    use self::StorageClass as S;

    let classes = match token {
        "tinyint" => (S::Integer, C::Byte),
        "smallint" => (S::Integer, C::Int16),
        "int" => (S::Integer, C::Int32),
        "bigint" | "integer" => (S::Integer, C::Int64),
        "bit" => (S::Integer, C::Boolean),
        "nvarchar" | "varchar" | "text" | "ntext" | "char" | "nchar" | "xml" => {
            (S::Text, C::String)
        }
        "uniqueidentifier" | "guid" => (S::Text, C::Guid),
        "sql_variant" => (S::Text, C::Object),
        "timestamp" | "datetime" | "datetime2" | "date" | "time" | "datetimeoffset" => {
            (S::Text, C::DateTime)
        }
        "float" | "numeric" => (S::Real, C::Double),
        "real" => (S::Real, C::Float),
        "blob" => (S::Blob, C::Binary),
        other => return Err(MigrateError::unsupported_type(other)),
    };
    Ok(classes)
}

/// Map a canonical type token to its SQLite storage class.
pub fn storage_class_of(token: &str) -> Result<StorageClass> {
    classify(token).map(|(storage, _)| storage)
}

/// Map a canonical type token to its runtime coercion class.
pub fn coercion_class_of(token: &str) -> Result<CoercionClass> {
    classify(token).map(|(_, coercion)| coercion)
}

/// Whether the token belongs to the integer family eligible for an inline
/// auto-increment primary key.
pub fn is_integer_family(token: &str) -> bool {
    matches!(token, "tinyint" | "int" | "smallint" | "bigint" | "integer")
}

/// Raw SQL Server type names accepted from the source catalog.
const SOURCE_TYPES: &[&str] = &[
    "int",
    "smallint",
    "bit",
    "float",
    "real",
    "nvarchar",
    "varchar",
    "timestamp",
    "varbinary",
    "image",
    "text",
    "ntext",
    "bigint",
    "char",
    "numeric",
    "binary",
    "smalldatetime",
    "smallmoney",
    "money",
    "tinyint",
    "uniqueidentifier",
    "xml",
    "sql_variant",
    "datetime2",
    "date",
    "time",
    "decimal",
    "nchar",
    "datetime",
    "datetimeoffset",
];

/// Reduce a raw SQL Server type name to its canonical token.
///
/// External schema readers call this before populating
/// [`ColumnSchema::col_type`](crate::core::schema::ColumnSchema). Unknown
/// source types are a hard stop.
///
/// Not every name changes: SQLite assigns affinity by searching substrings of
/// the declared type, so e.g. everything containing "int" already lands on
/// INTEGER affinity.
pub fn reduce_type(raw: &str) -> Result<&'static str> {
    let lower = raw.to_lowercase();
    let idx = SOURCE_TYPES
        .iter()
        .position(|t| *t == lower)
        .ok_or_else(|| MigrateError::unsupported_type(raw))?;

    let reduced = match SOURCE_TYPES[idx] {
        "timestamp" => "blob",
        "datetime" | "smalldatetime" | "date" | "datetime2" | "time" => "datetime",
        "decimal" => "numeric",
        "money" | "smallmoney" => "numeric",
        "binary" | "varbinary" | "image" => "blob",
        "tinyint" => "smallint",
        "bigint" => "integer",
        "sql_variant" => "blob",
        "xml" => "varchar",
        "uniqueidentifier" => "guid",
        "ntext" => "text",
        "nchar" => "char",
        other => other,
    };
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every token the DDL builder and value caster may see.
    const CANONICAL_TOKENS: &[&str] = &[
        "tinyint",
        "smallint",
        "int",
        "bigint",
        "integer",
        "bit",
        "nvarchar",
        "varchar",
        "text",
        "ntext",
        "char",
        "nchar",
        "xml",
        "uniqueidentifier",
        "guid",
        "sql_variant",
        "timestamp",
        "datetime",
        "datetime2",
        "date",
        "time",
        "datetimeoffset",
        "float",
        "numeric",
        "real",
        "blob",
    ];

    #[test]
    fn test_totality_over_closed_vocabulary() {
        for token in CANONICAL_TOKENS {
            assert!(
                storage_class_of(token).is_ok(),
                "no storage class for {token}"
            );
            assert!(
                coercion_class_of(token).is_ok(),
                "no coercion class for {token}"
            );
        }
    }

    #[test]
    fn test_storage_families() {
        for token in ["tinyint", "int", "smallint", "bigint", "bit", "integer"] {
            assert_eq!(storage_class_of(token).unwrap(), StorageClass::Integer);
        }
        for token in ["float", "real", "numeric"] {
            assert_eq!(storage_class_of(token).unwrap(), StorageClass::Real);
        }
        for token in ["nvarchar", "guid", "datetime", "sql_variant", "xml"] {
            assert_eq!(storage_class_of(token).unwrap(), StorageClass::Text);
        }
        assert_eq!(storage_class_of("blob").unwrap(), StorageClass::Blob);
    }

    #[test]
    fn test_coercion_classes() {
        assert_eq!(coercion_class_of("tinyint").unwrap(), CoercionClass::Byte);
        assert_eq!(coercion_class_of("int").unwrap(), CoercionClass::Int32);
        assert_eq!(coercion_class_of("integer").unwrap(), CoercionClass::Int64);
        assert_eq!(coercion_class_of("bit").unwrap(), CoercionClass::Boolean);
        assert_eq!(coercion_class_of("numeric").unwrap(), CoercionClass::Double);
        assert_eq!(coercion_class_of("real").unwrap(), CoercionClass::Float);
        assert_eq!(coercion_class_of("guid").unwrap(), CoercionClass::Guid);
        assert_eq!(
            coercion_class_of("sql_variant").unwrap(),
            CoercionClass::Object
        );
    }

    #[test]
    fn test_unknown_token_fails_naming_offender() {
        let err = storage_class_of("geography").unwrap_err();
        assert!(matches!(
            err,
            MigrateError::UnsupportedType { ref type_name } if type_name == "geography"
        ));
    }

    #[test]
    fn test_reduce_type() {
        assert_eq!(reduce_type("timestamp").unwrap(), "blob");
        assert_eq!(reduce_type("DATETIME2").unwrap(), "datetime");
        assert_eq!(reduce_type("smalldatetime").unwrap(), "datetime");
        assert_eq!(reduce_type("decimal").unwrap(), "numeric");
        assert_eq!(reduce_type("money").unwrap(), "numeric");
        assert_eq!(reduce_type("varbinary").unwrap(), "blob");
        assert_eq!(reduce_type("tinyint").unwrap(), "smallint");
        assert_eq!(reduce_type("bigint").unwrap(), "integer");
        assert_eq!(reduce_type("uniqueidentifier").unwrap(), "guid");
        assert_eq!(reduce_type("xml").unwrap(), "varchar");
        assert_eq!(reduce_type("int").unwrap(), "int");
        assert_eq!(reduce_type("varchar").unwrap(), "varchar");
    }

    #[test]
    fn test_reduce_type_rejects_unknown_source_type() {
        assert!(reduce_type("hierarchyid").is_err());
    }

    #[test]
    fn test_reduced_tokens_stay_inside_the_vocabulary() {
        for raw in SOURCE_TYPES {
            let reduced = reduce_type(raw).unwrap();
            assert!(
                classify(reduced).is_ok(),
                "reduction of {raw} left the vocabulary: {reduced}"
            );
        }
    }
}
