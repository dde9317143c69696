//! # untab
//!
//! Heuristic extraction of tabular key/value data from Word documents.
//!
//! This library opens a `.docx` container, walks its tables, pairs header
//! cells with data cells by a selectable marker heuristic, and exports the
//! resulting records as CSV, XLSX, or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untab::{parse_file, extract_records, export, ExtractOptions};
//!
//! fn main() -> untab::Result<()> {
//!     // Parse a Word document
//!     let doc = parse_file("report.docx")?;
//!
//!     // Extract records (first row of each table names the columns)
//!     let records = extract_records(&doc, &ExtractOptions::default());
//!
//!     // Convert to CSV
//!     let csv = export::to_csv(&records, &Default::default())?;
//!     std::fs::write("report.csv", csv)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Selectable header heuristics**: first-row, quoted-marker,
//!   brace-placeholder, `key: value` colon cells
//! - **Selectable row assembly**: per-row, overwrite, append,
//!   section-split
//! - **Multiple output formats**: CSV, XLSX, JSON
//! - **Mojibake repair**: curly quotes corrupted by encoding mismatches
//!   are recognized as header markers

pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use detect::{detect_container_from_bytes, detect_container_from_path, is_docx, is_docx_bytes};
pub use error::{Error, Result};
pub use export::{ExportOptions, JsonFormat, ListStyle};
pub use extract::{extract_records, ExtractOptions, HeaderMode, RowPolicy};
pub use model::{Document, Metadata, Record, Table, TableCell, TableRow, Value};
pub use parser::{DocxParser, ErrorMode, ParseOptions};

use std::io::Read;
use std::path::Path;

/// Parse a .docx file and return its tables.
///
/// # Example
///
/// ```no_run
/// use untab::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Tables: {}", doc.table_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a .docx file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a .docx document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a .docx document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = DocxParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a .docx document from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Extract records from a .docx file with default heuristics.
///
/// Returns an empty vector when the document has no usable table data;
/// use the one-shot converters for the typed empty-input error.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let doc = parse_file(path)?;
    Ok(extract_records(&doc, &ExtractOptions::default()))
}

/// Extract records from in-memory .docx bytes with default heuristics.
pub fn extract_bytes(data: &[u8]) -> Result<Vec<Record>> {
    let doc = parse_bytes(data)?;
    Ok(extract_records(&doc, &ExtractOptions::default()))
}

/// Convert a .docx file straight to CSV bytes with default options.
///
/// # Example
///
/// ```no_run
/// use untab::to_csv;
///
/// let csv = to_csv("report.docx").unwrap();
/// std::fs::write("report.csv", csv).unwrap();
/// ```
pub fn to_csv<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Untab::new().parse(path)?.to_csv()
}

/// Convert a .docx file straight to XLSX bytes with default options.
pub fn to_xlsx<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Untab::new().parse(path)?.to_xlsx()
}

/// Builder for parsing, extracting, and exporting in one pass.
///
/// # Example
///
/// ```no_run
/// use untab::{HeaderMode, RowPolicy, Untab};
///
/// let csv = Untab::new()
///     .with_header_mode(HeaderMode::Quoted)
///     .with_row_policy(RowPolicy::Append)
///     .lenient()
///     .parse("report.docx")?
///     .to_csv()?;
/// # Ok::<(), untab::Error>(())
/// ```
pub struct Untab {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    export_options: ExportOptions,
}

impl Untab {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            extract_options: ExtractOptions::default(),
            export_options: ExportOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Cap the number of tables read.
    pub fn with_max_tables(mut self, max: usize) -> Self {
        self.parse_options = self.parse_options.with_max_tables(max);
        self
    }

    /// Set the header detection mode.
    pub fn with_header_mode(mut self, mode: HeaderMode) -> Self {
        self.extract_options = self.extract_options.with_header_mode(mode);
        self
    }

    /// Set the row assembly policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.extract_options = self.extract_options.with_row_policy(policy);
        self
    }

    /// Join list values with the given delimiter on export.
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.export_options = self.export_options.with_list_delimiter(delimiter);
        self
    }

    /// Expand list values into parallel columns on export.
    pub fn expand_lists(mut self) -> Self {
        self.export_options = self.export_options.expand_lists();
        self
    }

    /// Parse a .docx file and extract records.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntabResult> {
        let parser = DocxParser::open_with_options(path, self.parse_options)?;
        self.finish(parser.parse()?)
    }

    /// Parse a .docx document from bytes and extract records.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UntabResult> {
        let parser = DocxParser::from_bytes_with_options(data, self.parse_options)?;
        self.finish(parser.parse()?)
    }

    fn finish(self, document: Document) -> Result<UntabResult> {
        let records = extract_records(&document, &self.extract_options);
        Ok(UntabResult {
            document,
            records,
            export_options: self.export_options,
        })
    }
}

impl Default for Untab {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing and extracting one document.
pub struct UntabResult {
    /// The parsed document
    document: Document,
    /// Extracted records
    records: Vec<Record>,
    /// Export options to use
    export_options: ExportOptions,
}

impl UntabResult {
    /// Get the parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the extracted records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the result, returning the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Convert to CSV bytes.
    ///
    /// Fails with `Error::EmptyInput` when the document yielded no records.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        self.ensure_records()?;
        export::to_csv(&self.records, &self.export_options)
    }

    /// Convert to XLSX bytes.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        self.ensure_records()?;
        export::to_xlsx(&self.records, &self.export_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        self.ensure_records()?;
        export::to_json(&self.records, format)
    }

    fn ensure_records(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untab_builder() {
        let untab = Untab::new()
            .lenient()
            .with_header_mode(HeaderMode::Quoted)
            .with_row_policy(RowPolicy::SectionSplit)
            .expand_lists();

        assert!(matches!(
            untab.parse_options.error_mode,
            parser::ErrorMode::Lenient
        ));
        assert_eq!(untab.extract_options.header_mode, HeaderMode::Quoted);
        assert_eq!(untab.extract_options.row_policy, RowPolicy::SectionSplit);
        assert_eq!(untab.export_options.list_style, ListStyle::Expand);
    }

    #[test]
    fn test_untab_builder_default() {
        let untab = Untab::default();
        assert_eq!(untab.extract_options.header_mode, HeaderMode::FirstRow);
        assert_eq!(untab.extract_options.row_policy, RowPolicy::PerRow);
    }

    #[test]
    fn test_parse_bytes_empty_data() {
        let result = parse_bytes(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bytes_unknown_magic() {
        let result = parse_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_untab_builder_parse_invalid_bytes() {
        let result = Untab::new().parse_bytes(b"not a docx");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_result_is_typed_empty_input() {
        let result = UntabResult {
            document: Document::new(),
            records: Vec::new(),
            export_options: ExportOptions::default(),
        };
        assert!(matches!(result.to_csv(), Err(Error::EmptyInput)));
        assert!(matches!(result.to_xlsx(), Err(Error::EmptyInput)));
    }
}
