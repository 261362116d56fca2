//! Row filters of the form `column=value`

use crate::errors::{DumpError, Result};
use crate::record::Record;
use crate::value::SqlValue;
use std::str::FromStr;

/// Keeps records whose `column` renders exactly as `expected`
///
/// Float columns also match any `expected` that parses to the same number,
/// so `1.0`, `1` and `1e0` all select a stored `1.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub expected: String,
}

impl RowFilter {
    pub fn new(column: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expected: expected.into(),
        }
    }

    /// A missing column never matches; `NULL` matches an empty `expected`.
    pub fn matches(&self, record: &Record) -> bool {
        match record.get(&self.column) {
            None => false,
            Some(SqlValue::Float(x)) => self
                .expected
                .trim()
                .parse::<f64>()
                .map_or_else(|_| x.to_string() == self.expected, |e| e == *x),
            Some(value) => value.to_string() == self.expected,
        }
    }
}

impl FromStr for RowFilter {
    type Err = DumpError;

    fn from_str(expr: &str) -> Result<Self> {
        let (column, expected) = expr.split_once('=').ok_or_else(|| DumpError::InvalidFilter {
            expr: expr.to_string(),
            reason: "expected COLUMN=VALUE".to_string(),
        })?;

        let column = column.trim();
        if column.is_empty() {
            return Err(DumpError::InvalidFilter {
                expr: expr.to_string(),
                reason: "column name is empty".to_string(),
            });
        }

        Ok(RowFilter::new(column, expected))
    }
}

/// True when every filter matches
pub fn matches_all(filters: &[RowFilter], record: &Record) -> bool {
    filters.iter().all(|f| f.matches(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(status: &str, kind: &str) -> Record {
        let columns = vec![
            "ID".to_string(),
            "post_status".to_string(),
            "post_type".to_string(),
        ];
        Record::from_tuple(&columns, vec![SqlValue::Int(1), status.into(), kind.into()]).unwrap()
    }

    #[test]
    fn test_parse_filter() {
        let f: RowFilter = "post_status=publish".parse().unwrap();
        assert_eq!(f, RowFilter::new("post_status", "publish"));

        let with_equals: RowFilter = "guid=a=b".parse().unwrap();
        assert_eq!(with_equals.expected, "a=b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            "post_status".parse::<RowFilter>(),
            Err(DumpError::InvalidFilter { .. })
        ));
        assert!("=publish".parse::<RowFilter>().is_err());
    }

    #[test]
    fn test_filters_are_anded() {
        let filters = vec![
            RowFilter::new("post_status", "publish"),
            RowFilter::new("post_type", "post"),
        ];

        assert!(matches_all(&filters, &post("publish", "post")));
        assert!(!matches_all(&filters, &post("publish", "page")));
        assert!(!matches_all(&filters, &post("draft", "post")));
    }

    #[test]
    fn test_numeric_values_compare_by_rendering() {
        let f = RowFilter::new("ID", "1");
        assert!(f.matches(&post("publish", "post")));
    }

    #[test]
    fn test_float_values_compare_numerically() {
        let columns = vec!["r".to_string()];
        let rated = Record::from_tuple(&columns, vec![SqlValue::Float(1.0)]).unwrap();

        assert!(RowFilter::new("r", "1.0").matches(&rated));
        assert!(RowFilter::new("r", "1").matches(&rated));
        assert!(RowFilter::new("r", "1.00").matches(&rated));
        assert!(!RowFilter::new("r", "1.5").matches(&rated));
        assert!(!RowFilter::new("r", "one").matches(&rated));
    }

    #[test]
    fn test_missing_column_never_matches() {
        let f = RowFilter::new("post_author", "");
        assert!(!f.matches(&post("publish", "post")));
    }
}
