//! Records: tuples zipped onto column names

use crate::errors::{DumpError, Result};
use crate::tokenizer::Tuple;
use crate::value::SqlValue;
use indexmap::IndexMap;
use serde::Serialize;

/// One row as an ordered column → value map
///
/// Serializes as a flat JSON object with keys in schema order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, SqlValue>,
}

impl Record {
    /// Zip a tuple onto column names
    ///
    /// The counts must agree exactly; a short or long tuple is rejected with
    /// `ColumnMismatch` instead of being padded or truncated. A column list
    /// naming the same column twice is rejected with `DuplicateColumn`.
    pub fn from_tuple(columns: &[String], tuple: Tuple) -> Result<Self> {
        if columns.len() != tuple.len() {
            return Err(DumpError::ColumnMismatch {
                expected: columns.len(),
                actual: tuple.len(),
            });
        }

        let fields: IndexMap<String, SqlValue> = columns.iter().cloned().zip(tuple).collect();
        // fewer keys than columns means a name repeated
        if fields.len() != columns.len() {
            check_unique_columns(columns)?;
        }
        Ok(Self { fields })
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields.get(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SqlValue)> {
        self.fields.iter()
    }

    /// Apply `f` to every string value in place
    pub fn map_strings<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        for value in self.fields.values_mut() {
            if let SqlValue::Str(s) = value {
                if let Some(replaced) = f(s) {
                    *s = replaced;
                }
            }
        }
    }
}

/// Reject a column list that names any column more than once
pub fn check_unique_columns(columns: &[String]) -> Result<()> {
    for (i, column) in columns.iter().enumerate() {
        if columns[..i].contains(column) {
            return Err(DumpError::DuplicateColumn {
                column: column.clone(),
            });
        }
    }
    Ok(())
}
