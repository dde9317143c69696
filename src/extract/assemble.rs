//! Row assembly policies.

use serde::{Deserialize, Serialize};

use crate::model::{Record, Value};

/// How header/value pairs accumulate into records.
///
/// The source systems disagreed on repeated-header semantics, so the
/// choice is an explicit policy rather than a guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Each non-blank data row becomes one record
    #[default]
    PerRow,
    /// One record per table; a later value replaces an earlier one
    Overwrite,
    /// One record per table; repeated headers grow a list
    Append,
    /// A repeated header closes the current record and starts a new one
    SectionSplit,
}

impl std::str::FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "per-row" | "per_row" | "row" => Ok(RowPolicy::PerRow),
            "overwrite" => Ok(RowPolicy::Overwrite),
            "append" | "list" => Ok(RowPolicy::Append),
            "section-split" | "section_split" | "section" => Ok(RowPolicy::SectionSplit),
            other => Err(format!("unknown row policy: {other}")),
        }
    }
}

/// Accumulates header/value pairs into records under a [`RowPolicy`].
///
/// Flush points: end of each source row (`PerRow`), a section boundary
/// (`SectionSplit`), and the end of the owning table. Records with no
/// non-empty value are never emitted.
#[derive(Debug)]
pub(crate) struct RowAssembler {
    policy: RowPolicy,
    current: Record,
    records: Vec<Record>,
}

impl RowAssembler {
    pub(crate) fn new(policy: RowPolicy) -> Self {
        Self {
            policy,
            current: Record::new(),
            records: Vec::new(),
        }
    }

    /// Add one header/value pair from the current row.
    pub(crate) fn push(&mut self, header: &str, value: Value) {
        match self.policy {
            RowPolicy::PerRow | RowPolicy::Overwrite => self.current.insert(header, value),
            RowPolicy::Append => {
                // blank values would pollute accumulated lists
                if !value.is_blank() {
                    self.current.append(header, value);
                }
            }
            RowPolicy::SectionSplit => {
                if self.current.contains(header) {
                    self.flush();
                }
                self.current.insert(header, value);
            }
        }
    }

    /// Mark the end of a source row.
    pub(crate) fn end_row(&mut self) {
        if self.policy == RowPolicy::PerRow {
            self.flush();
        }
    }

    /// Mark the end of the owning table and return the records.
    pub(crate) fn finish(mut self) -> Vec<Record> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if self.current.has_values() {
            self.records.push(std::mem::take(&mut self.current));
        } else {
            self.current = Record::new();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(header: &str, value: &str) -> (String, Value) {
        (header.to_string(), Value::Single(value.to_string()))
    }

    #[test]
    fn test_per_row_flushes_each_row() {
        let mut assembler = RowAssembler::new(RowPolicy::PerRow);
        let (h, v) = pair("Name", "Alpha");
        assembler.push(&h, v);
        assembler.end_row();
        let (h, v) = pair("Name", "Beta");
        assembler.push(&h, v);
        assembler.end_row();

        let records = assembler.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(&Value::Single("Alpha".into())));
        assert_eq!(records[1].get("Name"), Some(&Value::Single("Beta".into())));
    }

    #[test]
    fn test_overwrite_keeps_last() {
        let mut assembler = RowAssembler::new(RowPolicy::Overwrite);
        for value in ["Alpha", "Beta"] {
            let (h, v) = pair("Name", value);
            assembler.push(&h, v);
            assembler.end_row();
        }

        let records = assembler.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Name"), Some(&Value::Single("Beta".into())));
    }

    #[test]
    fn test_append_grows_list() {
        let mut assembler = RowAssembler::new(RowPolicy::Append);
        for value in ["Alpha", "Beta"] {
            let (h, v) = pair("Name", value);
            assembler.push(&h, v);
            assembler.end_row();
        }

        let records = assembler.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("Name"),
            Some(&Value::Multi(vec!["Alpha".into(), "Beta".into()]))
        );
    }

    #[test]
    fn test_section_split_on_repeat() {
        let mut assembler = RowAssembler::new(RowPolicy::SectionSplit);
        for value in ["A", "B"] {
            let (h, v) = pair("Section", value);
            assembler.push(&h, v);
        }

        let records = assembler.finish();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Section"), Some(&Value::Single("A".into())));
        assert_eq!(records[1].get("Section"), Some(&Value::Single("B".into())));
    }

    #[test]
    fn test_append_ignores_blank_values() {
        let mut assembler = RowAssembler::new(RowPolicy::Append);
        for value in ["Alpha", "", "Beta"] {
            let (h, v) = pair("Name", value);
            assembler.push(&h, v);
        }

        let records = assembler.finish();
        assert_eq!(
            records[0].get("Name"),
            Some(&Value::Multi(vec!["Alpha".into(), "Beta".into()]))
        );
    }

    #[test]
    fn test_empty_records_never_emitted() {
        let mut assembler = RowAssembler::new(RowPolicy::PerRow);
        let (h, v) = pair("Name", "");
        assembler.push(&h, v);
        assembler.end_row();

        assert!(assembler.finish().is_empty());
    }
}
