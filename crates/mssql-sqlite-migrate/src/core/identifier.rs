//! Identifier validation, quoting, and normalization.
//!
//! SQL identifiers cannot be passed as bound parameters, so dynamic DDL has
//! to splice them into statement text. All identifiers rendered by this crate
//! go through [`quote`], which bracket-quotes in the target engine's syntax
//! and escapes embedded closing brackets.

use crate::error::{MigrateError, Result};

/// Maximum identifier length (SQL Server limit, stricter than SQLite's).
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier before it is spliced into generated SQL.
///
/// Rejects empty identifiers, identifiers containing null bytes, and
/// identifiers exceeding the maximum length.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MigrateError::Config(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(MigrateError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(MigrateError::Config(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Bracket-quote an identifier, doubling any embedded closing bracket.
///
/// Bracket quoting tolerates reserved words and embedded punctuation and is
/// accepted by both engines involved in the conversion.
pub fn quote(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Normalize a column name into something usable as a bind-parameter name.
///
/// Non-alphanumeric characters become underscores; if the result collides
/// with an already-taken name, underscores are appended until it is unique.
pub fn normalized_name(name: &str, taken: &[String]) -> String {
    let mut result: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    while taken.iter().any(|t| t == &result) {
        result.push('_');
    }
    result
}
