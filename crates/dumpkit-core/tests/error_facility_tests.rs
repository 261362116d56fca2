use dumpkit_core::errors::{DumpError, ExError, ExErrorKind};
use std::path::Path;

#[test]
fn test_table_not_found_verifiable_by_kind() {
    let err = DumpError::TableNotFound {
        table: "wp_posts".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.table(), Some("wp_posts"));
    assert_eq!(ex_err.op(), Some("locate_table"));
}

#[test]
fn test_missing_columns_distinct_from_not_found() {
    let ex_err: ExError = DumpError::MissingColumns {
        table: "orphans".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingColumns);
    assert_ne!(ex_err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_column_mismatch_message() {
    let ex_err: ExError = DumpError::ColumnMismatch {
        expected: 23,
        actual: 22,
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_COLUMN_MISMATCH");
    assert!(ex_err.message().contains("22 fields, expected 23"));
}

#[test]
fn test_io_error_keeps_path() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let ex_err: ExError = DumpError::io(Path::new("/srv/backup.sql"), io).into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.path(), Some("/srv/backup.sql"));
    assert!(ex_err.to_string().starts_with("[ERR_IO]"));
}

#[test]
fn test_invalid_filter_kind() {
    let err = "no_equals".parse::<dumpkit_core::RowFilter>().unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidFilter);
}

#[test]
fn test_error_kind_codes_unique() {
    let kinds = [
        ExErrorKind::InvalidInput,
        ExErrorKind::InvalidFilter,
        ExErrorKind::InvalidJob,
        ExErrorKind::NotFound,
        ExErrorKind::MissingColumns,
        ExErrorKind::ColumnMismatch,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Internal,
    ];
    let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}
