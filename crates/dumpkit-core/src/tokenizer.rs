//! Tuple tokenizer for `INSERT ... VALUES` blocks
//!
//! Turns `(1,'a,b',NULL),(2,'it\'s',3.5)` into typed tuples with a single
//! character scan. The scanner tracks three pieces of state:
//!
//! - paren depth: 0 between tuples, 1 inside a tuple, >1 inside a nested
//!   expression such as `POINT(1,2)`;
//! - the open quote character, if any;
//! - the text of the current field (quoted literal and bare text kept apart).
//!
//! Nothing here rejects input. Unbalanced quotes or parens produce whatever
//! the scan reaches; a final tuple that never closes is dropped and flagged
//! on the returned [`TupleScan`].

use crate::value::SqlValue;
use std::iter::Peekable;
use std::str::Chars;

/// One parenthesised value list
pub type Tuple = Vec<SqlValue>;

/// Result of scanning a values block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TupleScan {
    pub tuples: Vec<Tuple>,
    /// Input ended inside a tuple; the partial tuple was discarded
    pub unterminated: bool,
}

/// Parse every tuple in `block`
///
/// # Example
///
/// ```
/// use dumpkit_core::tokenizer::parse_tuples;
/// use dumpkit_core::value::SqlValue;
///
/// let tuples = parse_tuples("(1,'a,b',NULL)");
/// assert_eq!(
///     tuples,
///     vec![vec![SqlValue::Int(1), SqlValue::from("a,b"), SqlValue::Null]]
/// );
/// ```
pub fn parse_tuples(block: &str) -> Vec<Tuple> {
    scan_tuples(block).tuples
}

/// Parse every tuple in `block`, reporting an unterminated trailing tuple
pub fn scan_tuples(block: &str) -> TupleScan {
    let mut scanner = Scanner::default();
    let mut chars = block.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(quote) = scanner.quote {
            scanner.in_string(c, quote, &mut chars);
            continue;
        }

        match c {
            '(' if scanner.depth == 0 => scanner.depth = 1,
            '(' => {
                scanner.depth += 1;
                scanner.push_bare(c);
            }
            ')' if scanner.depth == 1 => {
                scanner.depth = 0;
                scanner.end_tuple();
            }
            ')' if scanner.depth > 1 => {
                scanner.depth -= 1;
                scanner.push_bare(c);
            }
            ',' if scanner.depth == 1 => scanner.end_field(),
            '\'' | '"' if scanner.depth >= 1 => {
                scanner.quote = Some(c);
                if scanner.depth == 1 {
                    scanner.field.quoted = true;
                } else {
                    scanner.push_bare(c);
                }
            }
            _ if scanner.depth >= 1 => scanner.push_bare(c),
            // between tuples: separators, whitespace, stray text
            _ => {}
        }
    }

    TupleScan {
        unterminated: scanner.depth > 0,
        tuples: scanner.tuples,
    }
}

#[derive(Default)]
struct Field {
    literal: String,
    bare: String,
    quoted: bool,
}

impl Field {
    fn is_blank(&self) -> bool {
        !self.quoted && self.bare.trim().is_empty()
    }

    fn into_value(self) -> SqlValue {
        if self.quoted {
            SqlValue::Str(self.literal)
        } else {
            SqlValue::coerce_bare(&self.bare)
        }
    }
}

#[derive(Default)]
struct Scanner {
    depth: usize,
    quote: Option<char>,
    field: Field,
    current: Tuple,
    tuples: Vec<Tuple>,
}

impl Scanner {
    fn push_bare(&mut self, c: char) {
        self.field.bare.push(c);
    }

    fn end_field(&mut self) {
        let field = std::mem::take(&mut self.field);
        self.current.push(field.into_value());
    }

    fn end_tuple(&mut self) {
        // `()` carries no values at all
        if self.current.is_empty() && self.field.is_blank() {
            self.field = Field::default();
            return;
        }
        self.end_field();
        self.tuples.push(std::mem::take(&mut self.current));
    }

    fn in_string(&mut self, c: char, quote: char, chars: &mut Peekable<Chars<'_>>) {
        // Inside a nested expression the literal is opaque text of that expression
        if self.depth > 1 {
            self.push_bare(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    self.push_bare(next);
                }
            } else if c == quote {
                if chars.peek() == Some(&quote) {
                    chars.next();
                    self.push_bare(quote);
                } else {
                    self.quote = None;
                }
            }
            return;
        }

        if c == '\\' {
            match chars.next() {
                Some(next) => push_escape(&mut self.field.literal, next),
                None => self.field.literal.push('\\'),
            }
        } else if c == quote {
            if chars.peek() == Some(&quote) {
                chars.next();
                self.field.literal.push(quote);
            } else {
                self.quote = None;
            }
        } else {
            self.field.literal.push(c);
        }
    }
}

/// Resolve a MySQL backslash escape; unknown escapes keep their backslash
fn push_escape(out: &mut String, escaped: char) {
    match escaped {
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        't' => out.push('\t'),
        '0' => out.push('\0'),
        'b' => out.push('\u{8}'),
        'Z' => out.push('\u{1A}'),
        '\'' | '"' | '\\' => out.push(escaped),
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}
