//! JSON output of the raw records.

use crate::error::{Error, Result};
use crate::model::Record;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonFormat {
    /// Human-readable, indented
    Pretty,
    /// Single line
    Compact,
}

/// Serialize records to JSON.
pub fn to_json(records: &[Record], format: JsonFormat) -> Result<String> {
    if records.is_empty() {
        return Err(Error::NoRecords);
    }
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(records)?,
        JsonFormat::Compact => serde_json::to_string(records)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_compact() {
        let records = vec![Record::from_pairs([("Name", "Alpha")])];
        let json = to_json(&records, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"Name":"Alpha"}]"#);
    }

    #[test]
    fn test_to_json_empty_is_error() {
        let result = to_json(&[], JsonFormat::Pretty);
        assert!(matches!(result, Err(Error::NoRecords)));
    }
}
