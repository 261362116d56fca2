//! HTML entity decoding for text pulled out of CMS tables
//!
//! Named references resolve against the full HTML5 table from `htmlize`,
//! including the legacy names that may omit their `;`. Numeric references
//! follow the HTML5 replacement rules: the C1 range maps through
//! Windows-1252, while NUL, surrogates and out-of-range code points become
//! U+FFFD.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+);?|#[xX]([0-9a-fA-F]+);?|[a-zA-Z][a-zA-Z0-9]{0,31};?)")
        .expect("static regex")
});

/// Windows-1252 characters for references in `0x80..=0x9F`
const C1_REMAP: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2c6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8d}', '\u{17d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2dc}', '\u{2122}', '\u{161}', '\u{203a}', '\u{153}', '\u{9d}', '\u{17e}', '\u{178}',
];

/// Decode named entities and numeric character references
///
/// Unknown names are left untouched. Text without `&` is borrowed as-is.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_RE.replace_all(text, |caps: &Captures<'_>| {
        if let Some(dec) = caps.get(1) {
            return numeric(dec.as_str().parse::<u32>().ok());
        }
        if let Some(hex) = caps.get(2) {
            return numeric(u32::from_str_radix(hex.as_str(), 16).ok());
        }
        // each reference is decoded on its own so output is never re-read
        htmlize::unescape(&caps[0]).into_owned()
    })
}

/// Replacement text for a numeric reference; `None` means the digits overflowed
fn numeric(code: Option<u32>) -> String {
    let replaced = match code {
        Some(0x0d) => '\r',
        Some(c @ 0x80..=0x9f) => C1_REMAP[(c - 0x80) as usize],
        Some(c) => match char::from_u32(c) {
            Some(ch) if c != 0 => ch,
            _ => char::REPLACEMENT_CHARACTER,
        },
        None => char::REPLACEMENT_CHARACTER,
    };
    replaced.to_string()
}
