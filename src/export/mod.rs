//! Export module for writing records to tabular formats.
//!
//! All writers share one grid layout: column set = union of record keys
//! in first-seen order, one row per record.

mod csv;
mod json;
mod layout;
mod options;
mod xlsx;

pub use self::csv::to_csv;
pub use self::json::{to_json, JsonFormat};
pub use self::options::{ExportOptions, ListStyle};
pub use self::xlsx::to_xlsx;
