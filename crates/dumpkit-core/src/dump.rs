//! In-memory dump file and table extraction
//!
//! A [`Dump`] holds the whole export as text. Extraction for a table is one
//! pass over its `INSERT` statements:
//!
//! 1. resolve column names (explicit override, statement column list, or
//!    `CREATE TABLE`);
//! 2. tokenize each values block into tuples;
//! 3. zip tuples onto columns, dropping count mismatches;
//! 4. decode HTML entities and apply row filters;
//! 5. stop once `limit` records are kept.

use crate::ddl::{self, TableSchema};
use crate::errors::{DumpError, Result};
use crate::filter::{matches_all, RowFilter};
use crate::html::decode_entities;
use crate::record::{check_unique_columns, Record};
use crate::statements::{insert_blocks, statement_spans};
use crate::tokenizer::scan_tuples;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Options controlling one table extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Column names to use instead of any found in the dump
    pub columns: Option<Vec<String>>,
    /// Records must match every filter
    pub filters: Vec<RowFilter>,
    /// Decode HTML entities in string values before filtering
    pub unescape_html: bool,
    /// Stop after this many records are kept
    pub limit: Option<usize>,
}

/// Counters collected during one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub table: String,
    /// `INSERT` statements found for the table
    pub statements: usize,
    /// Tuples produced by the tokenizer
    pub tuples: usize,
    /// Records written out
    pub kept: usize,
    /// Tuples dropped because their value count differed from the column count
    pub mismatched: usize,
    /// Records rejected by row filters
    pub filtered_out: usize,
    /// Statements whose last tuple never closed
    pub unterminated: usize,
}

/// Records of one table plus how they were obtained
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub schema: TableSchema,
    pub records: Vec<Record>,
    pub report: ExtractReport,
}

/// A dump file loaded into memory
#[derive(Debug, Clone)]
pub struct Dump {
    source: Option<PathBuf>,
    text: String,
    statements: Vec<Range<usize>>,
}

impl Dump {
    /// Read a dump file
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; old
    /// exports regularly mix encodings.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| DumpError::io(path, e))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    valid_up_to = e.utf8_error().valid_up_to(),
                    "Dump is not valid UTF-8, replacing invalid bytes"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let dump = Self::with_source(Some(path.to_path_buf()), text);
        tracing::debug!(
            path = %path.display(),
            bytes = dump.text.len(),
            statements = dump.statements.len(),
            "Loaded dump"
        );
        Ok(dump)
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_source(None, text.into())
    }

    fn with_source(source: Option<PathBuf>, text: String) -> Self {
        let statements = statement_spans(&text);
        Self {
            source,
            text,
            statements,
        }
    }

    /// Path the dump was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-level statements, without their terminating `;`
    pub fn statements(&self) -> Vec<&str> {
        self.statements
            .iter()
            .map(|span| &self.text[span.clone()])
            .collect()
    }

    /// Tables created in the dump, in order of appearance
    pub fn tables(&self) -> Vec<String> {
        ddl::list_tables(&self.statements())
    }

    /// Column layout of `table` from its `CREATE TABLE` statement
    pub fn schema(&self, table: &str) -> Option<TableSchema> {
        ddl::table_schema(&self.statements(), table)
    }

    /// Extract the records of one table
    ///
    /// # Errors
    ///
    /// - `TableNotFound` when the dump neither creates nor inserts into `table`
    /// - `MissingColumns` when rows exist but no column names can be resolved
    /// - `InvalidInput` when `columns` is given but empty or `limit` is zero
    /// - `DuplicateColumn` when the override or a statement's column list
    ///   repeats a name
    pub fn extract(&self, table: &str, options: &ExtractOptions) -> Result<Extraction> {
        let started = Instant::now();
        log_op_start!("extract", table = table);

        match self.extract_inner(table, options) {
            Ok(extraction) => {
                let report = &extraction.report;
                log_op_end!(
                    "extract",
                    duration_ms = started.elapsed().as_millis() as u64,
                    table = table,
                    statements = report.statements,
                    tuples = report.tuples,
                    kept = report.kept,
                    mismatched = report.mismatched,
                );
                Ok(extraction)
            }
            Err(err) => {
                log_op_error!(
                    "extract",
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    table = table,
                );
                Err(err)
            }
        }
    }

    fn extract_inner(&self, table: &str, options: &ExtractOptions) -> Result<Extraction> {
        if options.columns.as_ref().is_some_and(|c| c.is_empty()) {
            return Err(DumpError::InvalidInput {
                reason: "column override is empty".to_string(),
            });
        }
        if options.limit == Some(0) {
            return Err(DumpError::InvalidInput {
                reason: "limit must be greater than zero".to_string(),
            });
        }

        if let Some(forced) = &options.columns {
            check_unique_columns(forced)?;
        }

        let statements = self.statements();
        let declared = ddl::table_schema(&statements, table);
        let default_columns: Option<Vec<String>> = options
            .columns
            .clone()
            .or_else(|| declared.as_ref().map(|s| s.columns.clone()));

        let blocks = insert_blocks(&statements, table);
        if blocks.is_empty() {
            if declared.is_none() {
                return Err(DumpError::TableNotFound {
                    table: table.to_string(),
                });
            }
            tracing::warn!(table, "No INSERT statements for table");
        }

        let mut report = ExtractReport {
            table: table.to_string(),
            statements: blocks.len(),
            ..ExtractReport::default()
        };
        let mut records = Vec::new();
        let mut used_columns: Option<Vec<String>> = None;

        'blocks: for (index, block) in blocks.into_iter().enumerate() {
            let columns: &[String] = match (&options.columns, &block.columns, &default_columns) {
                (Some(forced), _, _) => forced,
                (None, Some(listed), _) => listed,
                (None, None, Some(declared)) => declared,
                (None, None, None) => {
                    return Err(DumpError::MissingColumns {
                        table: table.to_string(),
                    })
                }
            };
            if options.columns.is_none() && block.columns.is_some() {
                check_unique_columns(columns)?;
            }
            if used_columns.is_none() {
                used_columns = Some(columns.to_vec());
            }

            let scan = scan_tuples(block.values);
            if scan.unterminated {
                report.unterminated += 1;
                tracing::warn!(table, statement = index, "Statement ends inside a tuple");
            }
            report.tuples += scan.tuples.len();

            for tuple in scan.tuples {
                let mut record = match Record::from_tuple(columns, tuple) {
                    Ok(record) => record,
                    Err(DumpError::ColumnMismatch { expected, actual }) => {
                        report.mismatched += 1;
                        tracing::warn!(
                            table,
                            statement = index,
                            expected,
                            actual,
                            "Record has {} fields, expected {}",
                            actual,
                            expected
                        );
                        continue;
                    }
                    Err(other) => return Err(other),
                };

                if options.unescape_html {
                    record.map_strings(|s| match decode_entities(s) {
                        Cow::Owned(decoded) => Some(decoded),
                        Cow::Borrowed(_) => None,
                    });
                }

                if !matches_all(&options.filters, &record) {
                    report.filtered_out += 1;
                    continue;
                }

                records.push(record);
                report.kept += 1;
                if options.limit.is_some_and(|limit| report.kept >= limit) {
                    break 'blocks;
                }
            }
        }

        Ok(Extraction {
            schema: TableSchema::new(
                table,
                used_columns.or(default_columns).unwrap_or_default(),
            ),
            records,
            report,
        })
    }
}
