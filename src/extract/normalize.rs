//! Cell text normalization.

use unicode_normalization::UnicodeNormalization;

use crate::model::Value;

/// Typographic opening double quote.
pub(crate) const LEFT_QUOTE: char = '\u{201C}';
/// Typographic closing double quote.
pub(crate) const RIGHT_QUOTE: char = '\u{201D}';

// The curly quotes' UTF-8 bytes re-decoded as cp1252 by a broken
// text-encoding round trip. 0x9D has no cp1252 mapping and survives as
// the C1 control character.
const MOJIBAKE_LEFT: &str = "\u{e2}\u{20ac}\u{153}";
const MOJIBAKE_RIGHT: &str = "\u{e2}\u{20ac}\u{9d}";

const QUOTE_CHARS: &[char] = &['"', LEFT_QUOTE, RIGHT_QUOTE];
const QUOTE_AND_BRACE_CHARS: &[char] = &['"', LEFT_QUOTE, RIGHT_QUOTE, '{', '}'];

/// Canonicalize raw cell text: Unicode NFC normalization, mojibake
/// curly-quote repair, and surrounding-whitespace trim.
///
/// Never fails; returns a (possibly empty) string.
pub fn canonicalize(raw: &str) -> String {
    let text: String = raw.nfc().collect();
    let text = if text.contains(MOJIBAKE_LEFT) || text.contains(MOJIBAKE_RIGHT) {
        text.replace(MOJIBAKE_LEFT, "\u{201C}")
            .replace(MOJIBAKE_RIGHT, "\u{201D}")
    } else {
        text
    };
    text.trim().to_string()
}

/// Clean a cell value: canonicalize, then strip decorative quotes from
/// both ends. Placeholder-oriented extraction also strips braces.
pub fn clean_value(raw: &str, strip_braces: bool) -> String {
    let text = canonicalize(raw);
    let stripped = if strip_braces {
        text.trim_matches(QUOTE_AND_BRACE_CHARS)
    } else {
        text.trim_matches(QUOTE_CHARS)
    };
    stripped.trim().to_string()
}

/// Split a cell into its logical values.
///
/// Embedded newlines separate entries; blank lines are not entries.
pub fn split_values(raw: &str, strip_braces: bool) -> Value {
    let mut entries: Vec<String> = raw
        .split('\n')
        .map(|line| clean_value(line, strip_braces))
        .filter(|line| !line.is_empty())
        .collect();
    match entries.len() {
        0 => Value::Single(String::new()),
        1 => Value::Single(entries.remove(0)),
        _ => Value::Multi(entries),
    }
}
