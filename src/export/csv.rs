//! CSV output.

use crate::error::{Error, Result};
use crate::model::Record;

use super::{layout, ExportOptions};

/// Serialize records to CSV bytes.
///
/// The header row is the union of all record keys in first-seen order;
/// each record becomes one row. Exporting zero records is an error
/// (`Error::NoRecords`) so no empty file is ever produced.
pub fn to_csv(records: &[Record], options: &ExportOptions) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Err(Error::NoRecords);
    }

    let (header_row, rows) = layout::grid(records, options);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header_row)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| Error::Export(err.to_string()))
}
