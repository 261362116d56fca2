//! Locating `INSERT ... VALUES` statements for one table

use regex::Regex;
use std::ops::Range;

/// The values part of one `INSERT` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertBlock<'a> {
    /// Explicit column list, when the statement names its columns
    pub columns: Option<Vec<String>>,
    /// Raw text after `VALUES`, up to (not including) the terminating `;`
    pub values: &'a str,
}

/// Byte ranges of the top-level statements in `dump`
///
/// Statements end at a `;` outside quotes and comments. Each range starts at
/// the statement's first token, so leading whitespace and `--`, `#` or
/// `/* */` comments are excluded, and stops before the `;`. Comment-only
/// statements such as mysqldump's `/*!40101 SET ... */;` produce no range.
pub fn statement_spans(dump: &str) -> Vec<Range<usize>> {
    let bytes = dump.as_bytes();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                start.get_or_insert(i);
                i = skip_quoted(bytes, i);
                end = i;
                continue;
            }
            b'-' if bytes.get(i + 1) == Some(&b'-')
                && bytes.get(i + 2).map_or(true, |c| c.is_ascii_whitespace()) =>
            {
                i = line_end(bytes, i);
                continue;
            }
            b'#' => {
                i = line_end(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = comment_end(bytes, i + 2);
                continue;
            }
            b';' => {
                if let Some(s) = start.take() {
                    spans.push(s..i);
                }
            }
            c if c.is_ascii_whitespace() => {}
            _ => {
                start.get_or_insert(i);
                end = i + 1;
            }
        }
        i += 1;
    }

    if let Some(s) = start {
        spans.push(s..end);
    }
    spans
}

/// Top-level statements of `dump` as text, see [`statement_spans`]
pub fn split_statements(dump: &str) -> Vec<&str> {
    statement_spans(dump)
        .into_iter()
        .map(|span| &dump[span])
        .collect()
}

/// Index just past the quote that closes the one at `open`
fn skip_quoted(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut j = open + 1;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b'\\' && quote != b'`' {
            j += 2;
            continue;
        }
        if b == quote {
            if bytes.get(j + 1) == Some(&quote) {
                j += 2;
                continue;
            }
            return j + 1;
        }
        j += 1;
    }
    bytes.len()
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

fn comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |p| from + p + 2)
}

/// All `INSERT [IGNORE] INTO <table> [(cols)] VALUES ...` blocks for `table`
///
/// Only statements that begin with `INSERT` count, so statement text quoted
/// inside another row never matches. Statements for other tables, including
/// ones whose name merely starts with `table`, are not returned.
pub fn insert_blocks<'a>(statements: &[&'a str], table: &str) -> Vec<InsertBlock<'a>> {
    let pattern = format!(
        r"(?i)^INSERT\s+(?:IGNORE\s+)?INTO\s+`?{}`?\s*(?:\(([^)]*)\))?\s*VALUES\s*",
        regex::escape(table)
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(table, error = %e, "Could not build INSERT pattern");
            return Vec::new();
        }
    };

    statements
        .iter()
        .copied()
        .filter_map(|statement| {
            let caps = re.captures(statement)?;
            let header = caps.get(0)?;
            Some(InsertBlock {
                columns: caps.get(1).map(|m| parse_column_list(m.as_str())),
                values: &statement[header.end()..],
            })
        })
        .collect()
}

fn parse_column_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|c| c.trim().trim_matches('`').trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}
