//! Table-to-record extraction.
//!
//! Walks each table's cells, resolves headers by the configured marker
//! policy, and assembles data cells into records. The header set is fixed
//! once detected within a table and resets for the next table.

mod assemble;
mod headers;
mod normalize;
mod options;

pub use assemble::RowPolicy;
pub use headers::HeaderMode;
pub use normalize::{canonicalize, clean_value, split_values};
pub use options::ExtractOptions;

use crate::model::{Document, Record, Table};

use assemble::RowAssembler;

/// Extract records from every table in the document.
pub fn extract_records(doc: &Document, options: &ExtractOptions) -> Vec<Record> {
    let mut records = Vec::new();
    for table in &doc.tables {
        extract_table(table, options, &mut records);
    }
    log::debug!(
        "extracted {} records from {} tables",
        records.len(),
        doc.table_count()
    );
    records
}

/// Extract records from a single table, appending to `out`.
pub fn extract_table(table: &Table, options: &ExtractOptions, out: &mut Vec<Record>) {
    match options.header_mode {
        HeaderMode::FirstRow => extract_first_row(table, options, out),
        HeaderMode::Quoted | HeaderMode::Placeholder => extract_marked(table, options, out),
        HeaderMode::Colon => extract_colon(table, options, out),
    }
}

/// Positional strategy: the first row names the columns.
fn extract_first_row(table: &Table, options: &ExtractOptions, out: &mut Vec<Record>) {
    let Some((first, body)) = table.rows.split_first() else {
        return;
    };
    let headers: Vec<String> = first
        .cells
        .iter()
        .map(|cell| normalize::clean_value(&cell.text, false))
        .collect();
    if headers.iter().all(String::is_empty) {
        return;
    }

    let mut assembler = RowAssembler::new(options.row_policy);
    for row in body {
        if row.is_blank() {
            continue;
        }
        // zip truncates on both sides: surplus headers get no value,
        // surplus cells get no header
        for (header, cell) in headers.iter().zip(&row.cells) {
            if header.is_empty() {
                continue;
            }
            assembler.push(header, normalize::split_values(&cell.text, false));
        }
        assembler.end_row();
    }
    out.extend(assembler.finish());
}

/// Marker strategies: headers accumulate positionally by column index as
/// marker cells are encountered, and data cells pair with the header at
/// their own index. Relies on header cells appearing before their data.
fn extract_marked(table: &Table, options: &ExtractOptions, out: &mut Vec<Record>) {
    let placeholder = options.header_mode == HeaderMode::Placeholder;
    let mut headers: Vec<String> = Vec::new();
    let mut assembler = RowAssembler::new(options.row_policy);

    for row in &table.rows {
        if row.is_blank() {
            continue;
        }
        for (index, cell) in row.cells.iter().enumerate() {
            let marker = if placeholder {
                // a braced cell in an already-headered column is data
                if index >= headers.len() {
                    headers::placeholder_header(&cell.text)
                } else {
                    None
                }
            } else {
                headers::quoted_header(&cell.text)
            };

            if let Some(label) = marker {
                if !label.is_empty() {
                    headers.push(label);
                }
                continue;
            }
            if index >= headers.len() {
                continue;
            }
            assembler.push(&headers[index], normalize::split_values(&cell.text, placeholder));
        }
        assembler.end_row();
    }
    out.extend(assembler.finish());
}

/// Colon strategy: each `Key: value` cell carries its own header. Since
/// rows have no positional meaning here, the per-row policy degenerates
/// and repeats mark section boundaries instead.
fn extract_colon(table: &Table, options: &ExtractOptions, out: &mut Vec<Record>) {
    let policy = match options.row_policy {
        RowPolicy::PerRow => RowPolicy::SectionSplit,
        other => other,
    };
    let mut assembler = RowAssembler::new(policy);
    for row in &table.rows {
        for cell in &row.cells {
            let Some((key, value)) = headers::colon_pair(&cell.text) else {
                continue;
            };
            assembler.push(&key, normalize::split_values(&value, false));
        }
    }
    out.extend(assembler.finish());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn doc(tables: Vec<Table>) -> Document {
        let mut doc = Document::new();
        for table in tables {
            doc.add_table(table);
        }
        doc
    }

    #[test]
    fn test_first_row_headers() {
        let table = Table::from_rows([
            ["Name", "Status"],
            ["Alpha", "Pass"],
            ["Beta", "Fail"],
        ]);
        let records = extract_records(&doc(vec![table]), &ExtractOptions::default());

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record::from_pairs([("Name", "Alpha"), ("Status", "Pass")])
        );
        assert_eq!(
            records[1],
            Record::from_pairs([("Name", "Beta"), ("Status", "Fail")])
        );
    }

    #[test]
    fn test_blank_rows_skipped() {
        let table = Table::from_rows([["Name"], ["Alpha"], [""], ["Beta"]]);
        let records = extract_records(&doc(vec![table]), &ExtractOptions::default());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_surplus_cells_dropped() {
        let mut table = Table::from_rows([["Name", "Status"]]);
        table.add_row(crate::model::TableRow::from_strings(["Alpha", "Pass", "extra"]));
        let records = extract_records(&doc(vec![table]), &ExtractOptions::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 2);
    }

    #[test]
    fn test_surplus_headers_ignored() {
        let mut table = Table::from_rows([["Name", "Status", "Ghost"]]);
        table.add_row(crate::model::TableRow::from_strings(["Alpha", "Pass"]));
        let records = extract_records(&doc(vec![table]), &ExtractOptions::default());

        assert_eq!(records.len(), 1);
        assert!(records[0].get("Ghost").is_none());
    }

    #[test]
    fn test_quoted_markers() {
        let table = Table::from_rows([
            ["\u{201C}Name\u{201D}", "\u{201C}Status\u{201D}"],
            ["Alpha", "Pass"],
        ]);
        let options = ExtractOptions::new().quoted();
        let records = extract_records(&doc(vec![table]), &options);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Record::from_pairs([("Name", "Alpha"), ("Status", "Pass")])
        );
    }

    #[test]
    fn test_placeholder_markers() {
        let table = Table::from_rows([["{ItemID}"], ["{42}"]]);
        let options = ExtractOptions::new().placeholder();
        let records = extract_records(&doc(vec![table]), &options);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0], Record::from_pairs([("ItemID", "42")]));
    }

    #[test]
    fn test_colon_sections() {
        let table = Table::from_rows([["Section: A"], ["Section: B"]]);
        let options = ExtractOptions::new().colon();
        let records = extract_records(&doc(vec![table]), &options);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::from_pairs([("Section", "A")]));
        assert_eq!(records[1], Record::from_pairs([("Section", "B")]));
    }

    #[test]
    fn test_headers_reset_per_table() {
        let first = Table::from_rows([["Name"], ["Alpha"]]);
        let second = Table::from_rows([["Status"], ["Pass"]]);
        let records = extract_records(&doc(vec![first, second]), &ExtractOptions::default());

        assert_eq!(records.len(), 2);
        assert!(records[0].get("Status").is_none());
        assert!(records[1].get("Name").is_none());
    }

    #[test]
    fn test_newline_cell_becomes_multi_value() {
        let table = Table::from_rows([["Items"], ["one\ntwo\nthree"]]);
        let records = extract_records(&doc(vec![table]), &ExtractOptions::default());

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("Items"),
            Some(&Value::Multi(vec![
                "one".into(),
                "two".into(),
                "three".into()
            ]))
        );
    }

    #[test]
    fn test_empty_document() {
        let records = extract_records(&Document::new(), &ExtractOptions::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let table = Table::from_rows([["Name", "Status"], ["Alpha", "Pass"]]);
        let document = doc(vec![table]);
        let options = ExtractOptions::default();

        let first = extract_records(&document, &options);
        let second = extract_records(&document, &options);
        assert_eq!(first, second);
    }
}
