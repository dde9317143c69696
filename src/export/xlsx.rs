//! XLSX output.

use rust_xlsxwriter::Workbook;

use crate::error::{Error, Result};
use crate::model::Record;

use super::{layout, ExportOptions};

/// Serialize records to a single-sheet XLSX workbook.
///
/// Row/column semantics match the CSV writer. Exporting zero records is
/// an error (`Error::NoRecords`).
pub fn to_xlsx(records: &[Record], options: &ExportOptions) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(Error::NoRecords);
    }

    let (header_row, rows) = layout::grid(records, options);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in header_row.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }
    for (index, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(index as u32 + 1, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
