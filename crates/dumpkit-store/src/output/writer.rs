//! Record serialization and file output

#![allow(clippy::result_large_err)]

use crate::errors::{serialization_error, Result};
use crate::output::{atomic_write, sha256_hex};
use dumpkit_core::Record;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct Envelope<'a> {
    count: usize,
    records: &'a [Record],
}

/// Result of writing one output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

/// Pretty-print records as JSON with two-space indentation
///
/// With `envelope` set the list is wrapped as `{"count": N, "records": [...]}`.
/// Non-ASCII text is written as-is. The output ends with a newline.
pub fn render_records(records: &[Record], envelope: bool) -> Result<Vec<u8>> {
    let rendered = if envelope {
        serde_json::to_vec_pretty(&Envelope {
            count: records.len(),
            records,
        })
    } else {
        serde_json::to_vec_pretty(records)
    };

    let mut bytes = rendered.map_err(|e| serialization_error("render_records", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Render records and write them atomically to `path`
pub fn write_records(path: &Path, records: &[Record], envelope: bool) -> Result<WrittenOutput> {
    let bytes = render_records(records, envelope)?;
    atomic_write(path, &bytes)?;

    let written = WrittenOutput {
        path: path.to_path_buf(),
        bytes: bytes.len(),
        sha256: sha256_hex(&bytes),
    };
    tracing::debug!(
        path = %written.path.display(),
        bytes = written.bytes,
        sha256 = %written.sha256,
        "Wrote output"
    );
    Ok(written)
}
