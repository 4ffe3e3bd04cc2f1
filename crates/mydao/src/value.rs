//! Scalar values and MySQL literal rendering.
//!
//! [`Value`] is the single carrier for everything bound into a condition or
//! assignment. Rendering happens in exactly one place ([`Value::to_literal`]):
//! numerics, booleans and NULL interpolate unquoted, everything else goes
//! through string escaping and single quotes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// A scalar value bound into a statement.
///
/// # Example
/// ```ignore
/// use mydao::Value;
///
/// assert_eq!(Value::from(42).to_literal(), "42");
/// assert_eq!(Value::from("O'Hara").to_literal(), "'O''Hara'");
/// assert_eq!(Value::Null.to_literal(), "NULL");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean, rendered as `1` / `0`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Text, escaped and single-quoted on render
    Str(String),
    /// Calendar date, rendered as `'YYYY-MM-DD'`
    Date(NaiveDate),
    /// Date and time, rendered as `'YYYY-MM-DD HH:MM:SS'`
    DateTime(NaiveDateTime),
    /// JSON document, rendered as an escaped string literal
    Json(serde_json::Value),
}

impl Value {
    /// Check for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check whether the value interpolates unquoted.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_)
        )
    }

    /// Numeric view of the value, if it has one.
    ///
    /// Strings are parsed so that text-protocol executors returning
    /// `"12.5"` for an aggregate still produce a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer view of the value, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Borrow the text content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as a MySQL literal fragment.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Str(s) => quote_str(s),
            Value::Date(d) => quote_str(&d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => quote_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Value::Json(j) => quote_str(&j.to_string()),
        }
    }

    /// Textual form used when a value becomes a result-map key.
    ///
    /// No quotes, no escaping; NULL maps to the empty string so every row
    /// still gets a key.
    pub fn key_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Json(j) => j.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Escape a string and wrap it in single quotes.
///
/// Quote characters are doubled; backslash, double quote, NUL, newline,
/// carriage return and Ctrl-Z get backslash escapes. This is the sole
/// injection defense for string literals.
fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x1a' => out.push_str("\\Z"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

// ==================== Conversions ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64);

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(v as u64)
            }
        })*
    };
}

impl_from_uint!(u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_literals() {
        assert_eq!(Value::Null.to_literal(), "NULL");
        assert_eq!(Value::from(true).to_literal(), "1");
        assert_eq!(Value::from(false).to_literal(), "0");
        assert_eq!(Value::from(42i32).to_literal(), "42");
        assert_eq!(Value::from(-7i64).to_literal(), "-7");
        assert_eq!(Value::from(42u64).to_literal(), "42");
        assert_eq!(Value::from(1.5f64).to_literal(), "1.5");
        assert_eq!(Value::from("abc").to_literal(), "'abc'");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(Value::from("O'Hara").to_literal(), "'O''Hara'");
        assert_eq!(Value::from("a\\b").to_literal(), "'a\\\\b'");
        assert_eq!(Value::from("line1\nline2").to_literal(), "'line1\\nline2'");
        assert_eq!(Value::from("cr\rhere").to_literal(), "'cr\\rhere'");
        assert_eq!(Value::from("say \"hi\"").to_literal(), "'say \\\"hi\\\"'");
        assert_eq!(Value::from("nul\0byte").to_literal(), "'nul\\0byte'");
        assert_eq!(Value::from("eof\x1amark").to_literal(), "'eof\\Zmark'");
    }

    /// Parse a rendered literal back the way a MySQL tokenizer would.
    fn unquote(literal: &str) -> String {
        let body = literal
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .expect("not a quoted literal");
        let mut out = String::new();
        let mut chars = body.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\'' => {
                    // doubled quote
                    assert_eq!(chars.next(), Some('\''));
                    out.push('\'');
                }
                '\\' => match chars.next() {
                    Some('0') => out.push('\0'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('Z') => out.push('\x1a'),
                    Some(other) => out.push(other),
                    None => panic!("dangling escape"),
                },
                other => out.push(other),
            }
        }
        out
    }

    #[test]
    fn test_escape_round_trip() {
        let inputs = [
            "O'Hara",
            "a\\b",
            "1'; DROP TABLE oc_order; --",
            "mixed '\\\" \n\r\0\x1a end",
            "plain",
            "",
        ];
        for input in inputs {
            let rendered = Value::from(input).to_literal();
            assert_eq!(unquote(&rendered), input, "round-trip of {input:?}");
        }
    }

    #[test]
    fn test_date_literals() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::from(d).to_literal(), "'2024-03-09'");
        let dt = d.and_hms_opt(13, 5, 7).unwrap();
        assert_eq!(Value::from(dt).to_literal(), "'2024-03-09 13:05:07'");
    }

    #[test]
    fn test_json_literal() {
        let j = serde_json::json!({"a": 1});
        assert_eq!(Value::from(j).to_literal(), "'{\\\"a\\\":1}'");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5i32)), Value::Int(5));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::from(3i32).as_f64(), Some(3.0));
        assert_eq!(Value::from("12.5").as_f64(), Some(12.5));
        assert_eq!(Value::from(" 8 ").as_f64(), Some(8.0));
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::from("abc").as_f64(), None);
    }

    #[test]
    fn test_key_string() {
        assert_eq!(Value::from(1i32).key_string(), "1");
        assert_eq!(Value::from("x").key_string(), "x");
        assert_eq!(Value::Null.key_string(), "");
    }
}
