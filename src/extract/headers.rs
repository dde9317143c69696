//! Header marker detection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize;

/// How header cells are recognized within a table.
///
/// Each mode corresponds to one textual convention for naming columns;
/// the mode applies uniformly to every table in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderMode {
    /// The first row's cells are headers regardless of content
    #[default]
    FirstRow,
    /// Cells wrapped in typographic double quotes are headers
    Quoted,
    /// Cells of the form `{Name}` are headers
    Placeholder,
    /// Cells of the form `Key: value` carry their own header
    Colon,
}

impl std::str::FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-row" | "first_row" | "positional" => Ok(HeaderMode::FirstRow),
            "quoted" => Ok(HeaderMode::Quoted),
            "placeholder" | "braced" => Ok(HeaderMode::Placeholder),
            "colon" => Ok(HeaderMode::Colon),
            other => Err(format!("unknown header mode: {other}")),
        }
    }
}

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^{}]*)\}$").expect("placeholder pattern"));

/// Interpret a cell as a quoted header marker.
///
/// The cell must begin and end with the curly quote pair after
/// canonicalization (which also repairs the mojibake forms).
pub(crate) fn quoted_header(raw: &str) -> Option<String> {
    let text = normalize::canonicalize(raw);
    if text.chars().count() < 2 {
        return None;
    }
    if !text.starts_with(normalize::LEFT_QUOTE) || !text.ends_with(normalize::RIGHT_QUOTE) {
        return None;
    }
    Some(normalize::clean_value(&text, false))
}

/// Interpret a cell as a brace placeholder marker, yielding the enclosed
/// substring.
pub(crate) fn placeholder_header(raw: &str) -> Option<String> {
    let text = normalize::canonicalize(raw);
    let captures = PLACEHOLDER_RE.captures(&text)?;
    Some(captures[1].trim().to_string())
}

/// Split a `Key: value` cell into its header and raw value text.
///
/// Returns `None` when the cell has no colon or an empty key.
pub(crate) fn colon_pair(raw: &str) -> Option<(String, String)> {
    let text = normalize::clean_value(raw, false);
    let (key, value) = text.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_header() {
        assert_eq!(
            quoted_header("\u{201C}Name\u{201D}"),
            Some("Name".to_string())
        );
        assert_eq!(quoted_header("Name"), None);
        assert_eq!(quoted_header("\u{201C}Name"), None);
        assert_eq!(quoted_header("\"Name\""), None);
    }

    #[test]
    fn test_quoted_header_mojibake() {
        let corrupted = "\u{e2}\u{20ac}\u{153}Name\u{e2}\u{20ac}\u{9d}";
        assert_eq!(quoted_header(corrupted), Some("Name".to_string()));
    }

    #[test]
    fn test_placeholder_header() {
        assert_eq!(placeholder_header("{ItemID}"), Some("ItemID".to_string()));
        assert_eq!(placeholder_header(" {ItemID} "), Some("ItemID".to_string()));
        assert_eq!(placeholder_header("{a}{b}"), None);
        assert_eq!(placeholder_header("ItemID"), None);
        assert_eq!(placeholder_header("{nested{x}}"), None);
    }

    #[test]
    fn test_colon_pair() {
        assert_eq!(
            colon_pair("Section: A"),
            Some(("Section".to_string(), "A".to_string()))
        );
        assert_eq!(
            colon_pair("\"Section: B\""),
            Some(("Section".to_string(), "B".to_string()))
        );
        assert_eq!(
            colon_pair("Time: 10:30"),
            Some(("Time".to_string(), "10:30".to_string()))
        );
        assert_eq!(colon_pair("no marker here"), None);
        assert_eq!(colon_pair(": orphan"), None);
    }

    #[test]
    fn test_header_mode_from_str() {
        assert_eq!("first-row".parse::<HeaderMode>(), Ok(HeaderMode::FirstRow));
        assert_eq!("quoted".parse::<HeaderMode>(), Ok(HeaderMode::Quoted));
        assert_eq!(
            "placeholder".parse::<HeaderMode>(),
            Ok(HeaderMode::Placeholder)
        );
        assert_eq!("colon".parse::<HeaderMode>(), Ok(HeaderMode::Colon));
        assert!("csv".parse::<HeaderMode>().is_err());
    }
}
