//! Shared grid layout for the tabular writers.

use indexmap::IndexSet;

use crate::model::Record;

use super::{ExportOptions, ListStyle};

/// Column headers: the union of all record keys in first-seen order.
pub(crate) fn column_order(records: &[Record]) -> Vec<String> {
    let mut columns: IndexSet<&str> = IndexSet::new();
    for record in records {
        for header in record.headers() {
            columns.insert(header);
        }
    }
    columns.into_iter().map(str::to_string).collect()
}

/// Lay records out as a header row plus one cell row per record.
pub(crate) fn grid(records: &[Record], options: &ExportOptions) -> (Vec<String>, Vec<Vec<String>>) {
    let columns = column_order(records);
    match &options.list_style {
        ListStyle::Join(delimiter) => {
            let rows = records
                .iter()
                .map(|record| {
                    columns
                        .iter()
                        .map(|column| {
                            record
                                .get(column)
                                .map(|value| value.joined(delimiter))
                                .unwrap_or_default()
                        })
                        .collect()
                })
                .collect();
            (columns, rows)
        }
        ListStyle::Expand => expand_grid(records, &columns),
    }
}

/// Expand list values into parallel columns sized to the widest record.
fn expand_grid(records: &[Record], columns: &[String]) -> (Vec<String>, Vec<Vec<String>>) {
    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            records
                .iter()
                .filter_map(|record| record.get(column))
                .map(|value| value.len())
                .max()
                .unwrap_or(1)
                .max(1)
        })
        .collect();

    let mut header_row = Vec::new();
    for (column, width) in columns.iter().zip(&widths) {
        header_row.push(column.clone());
        for ordinal in 2..=*width {
            header_row.push(format!("{column} ({ordinal})"));
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(header_row.len());
            for (column, width) in columns.iter().zip(&widths) {
                let mut written = 0;
                if let Some(value) = record.get(column) {
                    for entry in value.entries().take(*width) {
                        cells.push(entry.to_string());
                        written += 1;
                    }
                }
                cells.resize(cells.len() + width - written, String::new());
            }
            cells
        })
        .collect();

    (header_row, rows)
}
