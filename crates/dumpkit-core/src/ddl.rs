//! `CREATE TABLE` inspection
//!
//! Column names come from the table definition body. Index and constraint
//! clauses share the body with columns and are skipped by their leading
//! keyword.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static CREATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?`?([A-Za-z0-9_$]+)`?\s*\(")
        .expect("static regex")
});

static LEADING_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:`([^`]+)`|([A-Za-z0-9_$]+))").expect("static regex"));

const NON_COLUMN_PREFIXES: &[&str] = &[
    "PRIMARY KEY",
    "UNIQUE",
    "KEY",
    "INDEX",
    "FULLTEXT",
    "SPATIAL",
    "CONSTRAINT",
    "FOREIGN KEY",
    "CHECK",
];

/// Ordered column names of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<String>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Names of all tables created by `statements`, in order of first appearance
///
/// Only statements that begin with `CREATE TABLE` count.
pub fn list_tables(statements: &[&str]) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();
    for caps in statements.iter().filter_map(|s| CREATE_TABLE_RE.captures(s)) {
        let name = &caps[1];
        if !tables.iter().any(|t| t == name) {
            tables.push(name.to_string());
        }
    }
    tables
}

/// Column layout of `table` from its `CREATE TABLE` statement
///
/// Returns `None` when no statement defines the table.
pub fn table_schema(statements: &[&str], table: &str) -> Option<TableSchema> {
    let body = statements.iter().find_map(|statement| {
        let caps = CREATE_TABLE_RE.captures(statement)?;
        let header = caps.get(0)?;
        (&caps[1] == table).then(|| enclosed_body(&statement[header.end()..]))
    })?;

    let mut columns: Vec<String> = Vec::new();
    for definition in split_top_level(body) {
        if let Some(column) = column_name(definition.trim()) {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    Some(TableSchema::new(table, columns))
}

fn column_name(definition: &str) -> Option<String> {
    if definition.is_empty() {
        return None;
    }

    let upper = definition.to_ascii_uppercase();
    let is_clause = NON_COLUMN_PREFIXES.iter().any(|p| {
        upper.starts_with(p)
            && !upper[p.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if is_clause {
        return None;
    }

    let caps = LEADING_IDENT_RE.captures(definition)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Text up to the paren that closes an already-opened `(`
///
/// Quote-aware so that `DEFAULT ')'` or `COMMENT 'a (b'` do not end the body.
/// Without a closing paren the rest of the input is returned.
fn enclosed_body(rest: &str) -> &str {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in rest.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &rest[..i];
                }
            }
            _ => {}
        }
    }
    rest
}

/// Split on commas that are outside parens and quotes
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
