use std::path::Path;
use thiserror::Error;

/// Result type alias using DumpError
pub type Result<T> = std::result::Result<T, DumpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that scripts wrapping the CLI and
/// tests can match on instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Validation
    InvalidInput,
    InvalidFilter,
    InvalidJob,
    NotFound,
    MissingColumns,
    ColumnMismatch,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidFilter => "ERR_INVALID_FILTER",
            ExErrorKind::InvalidJob => "ERR_INVALID_JOB",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingColumns => "ERR_MISSING_COLUMNS",
            ExErrorKind::ColumnMismatch => "ERR_COLUMN_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus the context an operator needs to find
/// the problem in a multi-gigabyte dump: which operation, which table, which
/// file.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    path: Option<String>,
    job: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            path: None,
            job: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.display().to_string());
        self
    }

    /// Add job name context
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the table context, if any
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the job context, if any
    pub fn job(&self) -> Option<&str> {
        self.job.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(job) = &self.job {
            write!(f, " (job: {})", job)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for dump parsing and extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DumpError {
    /// Dump file could not be read
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Neither a CREATE TABLE nor any INSERT mentions the table
    #[error("Table not found in dump: {table}")]
    TableNotFound { table: String },

    /// INSERT rows exist but no column names are known for them
    #[error("No column definition for table {table}")]
    MissingColumns { table: String },

    /// A column name appears twice in one column list
    #[error("Duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// Tuple value count differs from the column count
    #[error("Record has {actual} fields, expected {expected}")]
    ColumnMismatch { expected: usize, actual: usize },

    /// A `column=value` filter expression could not be parsed
    #[error("Invalid filter expression '{expr}': {reason}")]
    InvalidFilter { expr: String, reason: String },

    /// Caller-provided options are unusable
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DumpError {
    /// Build an IO error tagged with the offending path
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        DumpError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from DumpError to ExError
impl From<DumpError> for ExError {
    fn from(err: DumpError) -> Self {
        match err {
            DumpError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_op("read_dump")
                .with_path(Path::new(&path))
                .with_message(message),

            DumpError::TableNotFound { table } => ExError::new(ExErrorKind::NotFound)
                .with_op("locate_table")
                .with_table(table)
                .with_message("Table not found in dump"),

            DumpError::MissingColumns { table } => ExError::new(ExErrorKind::MissingColumns)
                .with_op("resolve_columns")
                .with_table(table)
                .with_message("No CREATE TABLE and no column list for INSERT rows"),

            DumpError::DuplicateColumn { column } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("resolve_columns")
                .with_message(format!("Duplicate column '{}'", column)),

            DumpError::ColumnMismatch { expected, actual } => {
                ExError::new(ExErrorKind::ColumnMismatch)
                    .with_op("map_record")
                    .with_message(format!(
                        "Record has {} fields, expected {}",
                        actual, expected
                    ))
            }

            DumpError::InvalidFilter { expr, reason } => ExError::new(ExErrorKind::InvalidFilter)
                .with_op("parse_filter")
                .with_message(format!("'{}': {}", expr, reason)),

            DumpError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            DumpError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to DumpError
impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        DumpError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::MissingColumns, "ERR_MISSING_COLUMNS"),
            (ExErrorKind::ColumnMismatch, "ERR_COLUMN_MISMATCH"),
            (ExErrorKind::InvalidJob, "ERR_INVALID_JOB"),
            (ExErrorKind::Io, "ERR_IO"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("locate_table")
            .with_table("wp_posts")
            .with_message("Table not found in dump");

        assert_eq!(
            err.to_string(),
            "[ERR_NOT_FOUND] in operation 'locate_table': Table not found in dump (table: wp_posts)"
        );
    }

    #[test]
    fn test_duplicate_column_is_invalid_input() {
        let ex: ExError = DumpError::DuplicateColumn {
            column: "title".to_string(),
        }
        .into();

        assert_eq!(ex.code(), "ERR_INVALID_INPUT");
        assert_eq!(ex.op(), Some("resolve_columns"));
        assert!(ex.message().contains("'title'"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let ex: ExError = DumpError::io(Path::new("backup/c1faq.sql"), io).into();

        assert_eq!(ex.kind(), ExErrorKind::Io);
        assert_eq!(ex.path(), Some("backup/c1faq.sql"));
    }
}
