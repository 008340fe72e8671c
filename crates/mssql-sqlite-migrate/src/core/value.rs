//! SQL value types for database-agnostic row transfer.
//!
//! This module provides the runtime value representation that flows from the
//! source row reader, through the value caster, into the target parameter
//! binding layer.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// SQL value enum for type-safe row handling with efficient memory usage.
///
/// Uses `Cow` for string and byte data to enable zero-copy transfers when
/// possible, reducing allocation overhead while streaming large tables.
///
/// # Lifetime
///
/// The `'a` lifetime allows borrowing from source buffers during read
/// operations. For owned data that outlives the source buffer, use
/// [`SqlValue::into_owned`].
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// NULL. Maps to a target NULL unconditionally.
    Null,

    /// Boolean value (source `bit`).
    Bool(bool),

    /// 8-bit unsigned integer (source `tinyint`).
    U8(u8),

    /// 16-bit signed integer (smallint).
    I16(i16),

    /// 32-bit signed integer (int).
    I32(i32),

    /// 64-bit signed integer (bigint).
    I64(i64),

    /// 32-bit floating point (real).
    F32(f32),

    /// 64-bit floating point (float).
    F64(f64),

    /// Fixed-point decimal (decimal/numeric/money).
    Decimal(Decimal),

    /// Text data with zero-copy support.
    Text(Cow<'a, str>),

    /// Binary data with zero-copy support.
    Bytes(Cow<'a, [u8]>),

    /// GUID value.
    Uuid(Uuid),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),

    /// Timestamp with timezone offset.
    DateTimeOffset(DateTime<FixedOffset>),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    ///
    /// This clones any borrowed data, making the value independent of
    /// the original source buffer.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null => SqlValue::Null,
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::U8(v) => SqlValue::U8(v),
            SqlValue::I16(v) => SqlValue::I16(v),
            SqlValue::I32(v) => SqlValue::I32(v),
            SqlValue::I64(v) => SqlValue::I64(v),
            SqlValue::F32(v) => SqlValue::F32(v),
            SqlValue::F64(v) => SqlValue::F64(v),
            SqlValue::Decimal(v) => SqlValue::Decimal(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
            SqlValue::Bytes(v) => SqlValue::Bytes(Cow::Owned(v.into_owned())),
            SqlValue::Uuid(v) => SqlValue::Uuid(v),
            SqlValue::DateTime(v) => SqlValue::DateTime(v),
            SqlValue::DateTimeOffset(v) => SqlValue::DateTimeOffset(v),
            SqlValue::Date(v) => SqlValue::Date(v),
            SqlValue::Time(v) => SqlValue::Time(v),
        }
    }

    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Create a text value from a borrowed string slice.
    #[must_use]
    pub fn text_borrowed(s: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(s))
    }

    /// Create a text value from an owned String.
    #[must_use]
    pub fn text_owned(s: String) -> SqlValue<'static> {
        SqlValue::Text(Cow::Owned(s))
    }

    /// Create a bytes value from a borrowed byte slice.
    #[must_use]
    pub fn bytes_borrowed(b: &'a [u8]) -> Self {
        SqlValue::Bytes(Cow::Borrowed(b))
    }

    /// Create a bytes value from an owned Vec<u8>.
    #[must_use]
    pub fn bytes_owned(b: Vec<u8>) -> SqlValue<'static> {
        SqlValue::Bytes(Cow::Owned(b))
    }
}

// From implementations for common types
impl From<bool> for SqlValue<'static> {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<u8> for SqlValue<'static> {
    fn from(v: u8) -> Self {
        SqlValue::U8(v)
    }
}

impl From<i16> for SqlValue<'static> {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}

impl From<i32> for SqlValue<'static> {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue<'static> {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f32> for SqlValue<'static> {
    fn from(v: f32) -> Self {
        SqlValue::F32(v)
    }
}

impl From<f64> for SqlValue<'static> {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<Decimal> for SqlValue<'static> {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue<'static> {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for SqlValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        SqlValue::Bytes(Cow::Borrowed(v))
    }
}

impl From<Uuid> for SqlValue<'static> {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<NaiveDateTime> for SqlValue<'static> {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for SqlValue<'static> {
    fn from(v: DateTime<FixedOffset>) -> Self {
        SqlValue::DateTimeOffset(v)
    }
}

impl From<NaiveDate> for SqlValue<'static> {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue<'static> {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}
