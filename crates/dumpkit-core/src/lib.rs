//! dumpkit core - parsing legacy MySQL dumps without a database
//!
//! This crate provides:
//! - A tuple tokenizer for `INSERT ... VALUES` blocks with MySQL escapes
//! - `CREATE TABLE` inspection for column names
//! - Records (tuples mapped onto columns), row filters and entity decoding
//! - The structured error and logging facilities shared by the workspace

pub mod ddl;
pub mod dump;
pub mod errors;
pub mod filter;
pub mod html;
pub mod logging_facility;
pub mod record;
pub mod report;
pub mod statements;
pub mod tokenizer;
pub mod value;

pub use dumpkit_core_types as core_types;

// Re-export commonly used types
pub use ddl::TableSchema;
pub use dump::{Dump, ExtractOptions, ExtractReport, Extraction};
pub use errors::{DumpError, ExError, ExErrorKind, Result};
pub use filter::RowFilter;
pub use record::Record;
pub use tokenizer::{parse_tuples, scan_tuples, Tuple, TupleScan};
pub use value::SqlValue;
