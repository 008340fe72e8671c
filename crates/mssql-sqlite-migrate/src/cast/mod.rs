//! Per-value coercion between the source and target type systems.
//!
//! [`cast_value`] adjusts a single runtime value read from the source so the
//! target's parameter binding accepts it. The coercion is driven entirely by
//! the column's coercion class from the canonical type table, never by the
//! value itself.

use std::borrow::Cow;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::schema::ColumnSchema;
use crate::core::value::SqlValue;
use crate::dialect::{coercion_class_of, CoercionClass};
use crate::error::{MigrateError, Result};

/// Coerce one source value into the representation the target expects for
/// the given column.
///
/// NULL maps to NULL unconditionally. Values already in the target
/// representation pass through unchanged. A value that cannot be coerced
/// fails with [`MigrateError::UnsupportedCoercion`], which aborts only the
/// current row.
pub fn cast_value<'a>(value: SqlValue<'a>, column: &ColumnSchema) -> Result<SqlValue<'a>> {
    if value.is_null() {
        return Ok(SqlValue::Null);
    }

    match coercion_class_of(&column.col_type)? {
        CoercionClass::Byte => Ok(match value {
            SqlValue::I16(v) => SqlValue::U8(v as u8),
            SqlValue::I32(v) => SqlValue::U8(v as u8),
            SqlValue::I64(v) => SqlValue::U8(v as u8),
            SqlValue::Decimal(v) => SqlValue::U8(truncate_decimal(&column.name, v)? as u8),
            other => other,
        }),

        CoercionClass::Int16 => Ok(match value {
            SqlValue::U8(v) => SqlValue::I16(v as i16),
            SqlValue::I32(v) => SqlValue::I16(v as i16),
            SqlValue::I64(v) => SqlValue::I16(v as i16),
            SqlValue::Decimal(v) => SqlValue::I16(truncate_decimal(&column.name, v)? as i16),
            other => other,
        }),

        CoercionClass::Int32 => Ok(match value {
            SqlValue::U8(v) => SqlValue::I32(v as i32),
            SqlValue::I16(v) => SqlValue::I32(v as i32),
            SqlValue::I64(v) => SqlValue::I32(v as i32),
            SqlValue::Decimal(v) => SqlValue::I32(truncate_decimal(&column.name, v)? as i32),
            other => other,
        }),

        CoercionClass::Int64 => Ok(match value {
            SqlValue::U8(v) => SqlValue::I64(v as i64),
            SqlValue::I16(v) => SqlValue::I64(v as i64),
            SqlValue::I32(v) => SqlValue::I64(v as i64),
            SqlValue::Decimal(v) => SqlValue::I64(truncate_decimal(&column.name, v)?),
            other => other,
        }),

        CoercionClass::Float => Ok(match value {
            SqlValue::F64(v) => SqlValue::F32(v as f32),
            SqlValue::Decimal(v) => SqlValue::F32(decimal_to_f64(&column.name, v)? as f32),
            other => other,
        }),

        CoercionClass::Double => Ok(match value {
            SqlValue::F32(v) => SqlValue::F64(v as f64),
            SqlValue::Decimal(v) => SqlValue::F64(decimal_to_f64(&column.name, v)?),
            other => other,
        }),

        CoercionClass::String => Ok(match value {
            // Canonical 36-character hyphenated form.
            SqlValue::Uuid(v) => SqlValue::Text(Cow::Owned(v.to_string())),
            other => other,
        }),

        CoercionClass::Guid => Ok(match value {
            // A malformed identifier string becomes the all-zero identifier
            // instead of failing the whole row.
            SqlValue::Text(s) => SqlValue::Uuid(parse_string_as_guid(&s)),
            SqlValue::Bytes(b) => SqlValue::Uuid(parse_blob_as_guid(&b)),
            other => other,
        }),

        // The binding layer owns the representation for these.
        CoercionClass::Binary | CoercionClass::Boolean | CoercionClass::DateTime => Ok(value),

        CoercionClass::Object => Err(MigrateError::unsupported_coercion(
            &column.name,
            format!("values of type [{}] cannot be bound", column.col_type),
        )),
    }
}

/// Truncate a decimal toward zero into an i64.
fn truncate_decimal(column: &str, value: Decimal) -> Result<i64> {
    value.trunc().to_i64().ok_or_else(|| {
        MigrateError::unsupported_coercion(
            column,
            format!("decimal value {} out of integer range", value),
        )
    })
}

fn decimal_to_f64(column: &str, value: Decimal) -> Result<f64> {
    value.to_f64().ok_or_else(|| {
        MigrateError::unsupported_coercion(
            column,
            format!("decimal value {} not representable as float", value),
        )
    })
}

/// Parse a string as a GUID; malformed input yields the all-zero identifier.
pub fn parse_string_as_guid(value: &str) -> Uuid {
    Uuid::parse_str(value.trim()).unwrap_or_else(|_| Uuid::nil())
}

/// Parse a byte sequence as a GUID. Sequences shorter than 16 bytes are
/// zero-padded; longer ones are truncated.
pub fn parse_blob_as_guid(blob: &[u8]) -> Uuid {
    let mut data = [0u8; 16];
    let len = blob.len().min(16);
    data[..len].copy_from_slice(&blob[..len]);
    Uuid::from_bytes_le(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, col_type: &str) -> ColumnSchema {
        ColumnSchema {
            name: name.to_string(),
            col_type: col_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_null_maps_to_null_for_every_class() {
        for token in ["int", "real", "guid", "blob", "bit", "datetime", "sql_variant"] {
            let cast = cast_value(SqlValue::Null, &column("C", token)).unwrap();
            assert!(cast.is_null(), "null not preserved for {token}");
        }
    }

    #[test]
    fn test_integer_widening_and_narrowing() {
        let col = column("N", "int");
        assert_eq!(cast_value(SqlValue::I16(7), &col).unwrap(), SqlValue::I32(7));
        assert_eq!(
            cast_value(SqlValue::I64(90_000), &col).unwrap(),
            SqlValue::I32(90_000)
        );
        assert_eq!(cast_value(SqlValue::U8(3), &col).unwrap(), SqlValue::I32(3));

        let col64 = column("N", "integer");
        assert_eq!(
            cast_value(SqlValue::I32(42), &col64).unwrap(),
            SqlValue::I64(42)
        );
    }

    #[test]
    fn test_decimal_truncates_toward_zero() {
        let col = column("N", "int");
        let v = Decimal::new(10_55, 2); // 10.55
        assert_eq!(cast_value(SqlValue::Decimal(v), &col).unwrap(), SqlValue::I32(10));

        let neg = Decimal::new(-10_55, 2); // -10.55
        assert_eq!(
            cast_value(SqlValue::Decimal(neg), &col).unwrap(),
            SqlValue::I32(-10)
        );
    }

    #[test]
    fn test_float_width_conversion() {
        let real = column("R", "real");
        assert_eq!(
            cast_value(SqlValue::F64(1.5), &real).unwrap(),
            SqlValue::F32(1.5)
        );

        let double = column("D", "numeric");
        assert_eq!(
            cast_value(SqlValue::F32(2.5), &double).unwrap(),
            SqlValue::F64(2.5)
        );
        assert_eq!(
            cast_value(SqlValue::Decimal(Decimal::new(25, 1)), &double).unwrap(),
            SqlValue::F64(2.5)
        );
    }

    #[test]
    fn test_uuid_renders_as_canonical_text() {
        let col = column("S", "varchar");
        let id = Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap();
        match cast_value(SqlValue::Uuid(id), &col).unwrap() {
            SqlValue::Text(s) => {
                assert_eq!(s.len(), 36);
                assert_eq!(s.as_ref(), "6f9619ff-8b86-d011-b42d-00c04fc964ff");
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_guid_column_parses_text() {
        let col = column("G", "guid");
        let cast = cast_value(
            SqlValue::text_borrowed("6f9619ff-8b86-d011-b42d-00c04fc964ff"),
            &col,
        )
        .unwrap();
        assert_eq!(
            cast,
            SqlValue::Uuid(Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap())
        );
    }

    #[test]
    fn test_malformed_guid_string_becomes_nil() {
        let col = column("G", "guid");
        let cast = cast_value(SqlValue::text_borrowed("not-a-guid"), &col).unwrap();
        assert_eq!(cast, SqlValue::Uuid(Uuid::nil()));
    }

    #[test]
    fn test_guid_blob_padding_and_truncation() {
        let short = parse_blob_as_guid(&[1, 2, 3]);
        assert_eq!(short.to_bytes_le()[..3], [1, 2, 3]);
        assert!(short.to_bytes_le()[3..].iter().all(|b| *b == 0));

        let long: Vec<u8> = (0u8..32).collect();
        let truncated = parse_blob_as_guid(&long);
        assert_eq!(truncated.to_bytes_le().to_vec(), long[..16].to_vec());
    }

    #[test]
    fn test_passthrough_categories() {
        let cast = cast_value(SqlValue::Bool(true), &column("B", "bit")).unwrap();
        assert_eq!(cast, SqlValue::Bool(true));

        let cast = cast_value(SqlValue::bytes_borrowed(&[1, 2]), &column("B", "blob")).unwrap();
        assert_eq!(cast, SqlValue::Bytes(Cow::Borrowed(&[1u8, 2][..])));
    }

    #[test]
    fn test_object_category_aborts_the_row() {
        let err = cast_value(
            SqlValue::text_borrowed("anything"),
            &column("V", "sql_variant"),
        )
        .unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(err, MigrateError::UnsupportedCoercion { .. }));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let err = cast_value(SqlValue::I32(1), &column("X", "geography")).unwrap_err();
        assert!(err.is_fatal());
    }
}
