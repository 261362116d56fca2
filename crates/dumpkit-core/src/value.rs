//! Scalar values carried by dump rows

use serde::{Serialize, Serializer};
use std::fmt;

/// A single literal from an `INSERT ... VALUES` tuple
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl SqlValue {
    /// Coerce an unquoted literal
    ///
    /// Empty text and `NULL` (any case) are absent values. Text containing a
    /// `.` is tried as a float, anything else as an integer; text that does
    /// not parse stays a string (`CURRENT_TIMESTAMP`, `0x1F`, `1e5`).
    pub fn coerce_bare(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("NULL") {
            return SqlValue::Null;
        }

        if text.contains('.') {
            return match text.parse::<f64>() {
                Ok(f) if f.is_finite() => SqlValue::Float(f),
                _ => SqlValue::Str(text.to_string()),
            };
        }

        match text.parse::<i64>() {
            Ok(i) => SqlValue::Int(i),
            Err(_) => SqlValue::Str(text.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// String payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Renders without quotes; `Null` renders as the empty string.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => Ok(()),
            SqlValue::Int(i) => write!(f, "{}", i),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Str(s) => f.write_str(s),
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_none(),
            SqlValue::Int(i) => serializer.serialize_i64(*i),
            SqlValue::Float(x) => serializer.serialize_f64(*x),
            SqlValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Str(s.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Int(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_case_insensitive() {
        assert_eq!(SqlValue::coerce_bare("NULL"), SqlValue::Null);
        assert_eq!(SqlValue::coerce_bare("null"), SqlValue::Null);
        assert_eq!(SqlValue::coerce_bare(" NuLl "), SqlValue::Null);
        assert_eq!(SqlValue::coerce_bare(""), SqlValue::Null);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(SqlValue::coerce_bare("42"), SqlValue::Int(42));
        assert_eq!(SqlValue::coerce_bare("-7"), SqlValue::Int(-7));
        assert_eq!(SqlValue::coerce_bare("3.25"), SqlValue::Float(3.25));
    }

    #[test]
    fn test_unparseable_stays_string() {
        assert_eq!(
            SqlValue::coerce_bare("CURRENT_TIMESTAMP"),
            SqlValue::Str("CURRENT_TIMESTAMP".to_string())
        );
        assert_eq!(
            SqlValue::coerce_bare("1.2.3"),
            SqlValue::Str("1.2.3".to_string())
        );
        assert_eq!(
            SqlValue::coerce_bare("99999999999999999999"),
            SqlValue::Str("99999999999999999999".to_string())
        );
    }

    #[test]
    fn test_json_shape() {
        let values = vec![
            SqlValue::Int(1),
            SqlValue::Str("a,b".to_string()),
            SqlValue::Null,
            SqlValue::Float(0.5),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,"a,b",null,0.5]"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(SqlValue::Null.to_string(), "");
        assert_eq!(SqlValue::Int(5).to_string(), "5");
        assert_eq!(SqlValue::from("publish").to_string(), "publish");
    }
}
