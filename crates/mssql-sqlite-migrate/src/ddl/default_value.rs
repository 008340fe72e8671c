//! Default-value normalization.
//!
//! Source default expressions arrive wrapped in layers of parentheses, with
//! national-character markers, and sometimes as function calls that mean
//! nothing to the target engine. [`normalize`] turns a raw expression into a
//! DEFAULT clause value the target accepts, or decides it has to be dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static NATIONAL_RX: Lazy<Regex> = Lazy::new(|| Regex::new(r"N'([^']*)'").expect("national regex"));

static WRAPPED_NATIONAL_RX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(N('.*')\)").expect("wrapped national regex"));

/// Normalize a raw default-value expression for the target dialect.
///
/// In order: strips all layers of redundant parenthesization, drops a
/// national-character string marker (keeping the quotes), rewrites the
/// source's current-timestamp builtin, and finally accepts only values that
/// are single-quoted strings or numeric literals. Anything else is rejected
/// rather than copied verbatim, because source-dialect expressions (function
/// calls, casts) are not guaranteed valid in the target dialect.
pub fn normalize(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let stripped = strip_parens(raw);
    let value = if stripped.len() >= 3 && stripped.starts_with("N'") && stripped.ends_with('\'') {
        stripped[1..].to_string()
    } else {
        stripped.to_string()
    };

    if value.to_uppercase().contains("GETDATE") {
        return Some("(CURRENT_TIMESTAMP)".to_string());
    }

    if is_valid_default(&value) {
        Some(value)
    } else {
        None
    }
}

/// Strip every layer of full parenthesization: `(((1)))` becomes `1`.
///
/// Only an outer pair that wraps the whole string is removed; `(1)(2)` is
/// left alone.
pub fn strip_parens(value: &str) -> &str {
    let mut current = value;
    while is_fully_parenthesized(current) {
        current = &current[1..current.len() - 1];
    }
    current
}

fn is_fully_parenthesized(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
        return false;
    }

    // The paren opened at index 0 must be the one closed at the end.
    let mut depth = 0i32;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 && i != bytes.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Discard the national-character prefix if present: `N'sometext'` yields the
/// inner text `sometext`. Values without the marker pass through unchanged.
pub fn discard_national(value: &str) -> String {
    match NATIONAL_RX.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => value.to_string(),
    }
}

/// Check whether a DEFAULT clause value is valid by the target's standards:
/// a single-quoted string literal or a numeric literal.
pub fn is_valid_default(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if is_single_quoted(value) {
        return true;
    }
    value.parse::<f64>().is_ok()
}

/// Check whether the trimmed value starts and ends with a single quote.
pub fn is_single_quoted(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.starts_with('\'') && value.ends_with('\'')
}

/// Canonicalize boolean literal defaults for integer-boolean columns:
/// `('False')` becomes `(0)` and `('True')` becomes `(1)`.
///
/// Applied by the schema reader before normalization, and only when the
/// column's storage class is integer.
pub fn canonicalize_boolean_default(raw: &str, col_type: &str) -> String {
    if col_type == "bit" || col_type == "int" {
        match raw {
            "('False')" => return "(0)".to_string(),
            "('True')" => return "(1)".to_string(),
            _ => {}
        }
    }
    raw.to_string()
}

/// Reader-side cleanup of a raw catalog default string.
///
/// If the string contains a quoted span, that span (quotes included) is
/// extracted; otherwise all parentheses are dropped and the remainder is
/// re-wrapped in a single pair.
pub fn fix_default_value(col_default: &str) -> String {
    let trimmed = col_default.trim();

    let first = trimmed.find('\'');
    let last = trimmed.rfind('\'');
    if let (Some(first), Some(last)) = (first, last) {
        if last > first {
            return trimmed[first..=last].to_string();
        }
    }

    let inner: String = trimmed.chars().filter(|c| *c != '(' && *c != ')').collect();
    if inner.is_empty() {
        inner
    } else {
        format!("({})", inner)
    }
}

/// Unwrap a `(N'...')` catalog default into its quoted literal.
pub fn adjust_default_value(value: &str) -> String {
    match WRAPPED_NATIONAL_RX.captures(value) {
        Some(caps) => caps[1].to_string(),
        None => value.to_string(),
    }
}
