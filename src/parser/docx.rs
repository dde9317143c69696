//! Word container parsing.
//!
//! The Office Open XML container itself is the `docx-rs` crate's concern;
//! this module reduces its tree to the text-level table model.

use std::fs;
use std::io::Read;
use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{Document, Table, TableCell, TableRow};

use super::{ErrorMode, ParseOptions};

/// Parser facade over the docx container reader.
pub struct DocxParser {
    data: Vec<u8>,
    source: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a .docx file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a .docx file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let source = path
            .as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        let data = fs::read(path)?;
        detect::detect_container_from_bytes(&data)?;
        Ok(Self {
            data,
            source,
            options,
        })
    }

    /// Create a parser from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from in-memory bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        detect::detect_container_from_bytes(data)?;
        Ok(Self {
            data: data.to_vec(),
            source: None,
            options,
        })
    }

    /// Create a parser from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from any reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        detect::detect_container_from_bytes(&data)?;
        Ok(Self {
            data,
            source: None,
            options,
        })
    }

    /// Parse the container into a table-level document.
    pub fn parse(&self) -> Result<Document> {
        let docx =
            docx_rs::read_docx(&self.data).map_err(|err| Error::DocxParse(err.to_string()))?;

        let mut doc = Document::new();
        doc.metadata.source = self.source.clone();

        for child in docx.document.children {
            let DocumentChild::Table(table) = child else {
                continue;
            };
            if self.options.max_tables > 0 && doc.tables.len() >= self.options.max_tables {
                log::debug!("table limit {} reached, ignoring the rest", self.options.max_tables);
                break;
            }
            match convert_table(*table) {
                Ok(converted) => doc.add_table(converted),
                Err(err) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(err),
                    ErrorMode::Lenient => {
                        log::warn!("skipping table: {err}");
                        doc.metadata.skipped_tables += 1;
                    }
                },
            }
        }

        doc.metadata.table_count = doc.tables.len();
        Ok(doc)
    }
}

fn convert_table(table: docx_rs::Table) -> Result<Table> {
    let mut out = Table::new();
    for row in table.rows {
        let TableChild::TableRow(row) = row;
        let mut cells = Vec::with_capacity(row.cells.len());
        for cell in row.cells {
            let TableRowChild::TableCell(cell) = cell;
            cells.push(convert_cell(cell)?);
        }
        out.add_row(TableRow::new(cells));
    }
    Ok(out)
}

fn convert_cell(cell: docx_rs::TableCell) -> Result<TableCell> {
    let mut paragraphs = Vec::new();
    for content in cell.children {
        match content {
            TableCellContent::Paragraph(paragraph) => paragraphs.push(paragraph_text(*paragraph)),
            TableCellContent::Table(_) => {
                return Err(Error::DocxParse(
                    "nested table inside a cell".to_string(),
                ));
            }
            other => log::trace!("ignoring cell content: {other:?}"),
        }
    }
    // paragraph boundaries become value separators downstream
    Ok(TableCell::text(paragraphs.join("\n")))
}

fn paragraph_text(paragraph: docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in paragraph.children {
        let ParagraphChild::Run(run) = child else {
            continue;
        };
        for run_child in run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Break(_) => text.push('\n'),
                RunChild::Tab(_) => text.push(' '),
                other => log::trace!("ignoring run content: {other:?}"),
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_non_container() {
        let result = DocxParser::from_bytes(b"not a docx at all");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_from_bytes_empty_data() {
        let result = DocxParser::from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_garbage_zip_is_parse_failure() {
        // Correct magic, broken archive: detection passes, parsing fails
        let parser = DocxParser::from_bytes(b"PK\x03\x04garbagegarbage").unwrap();
        let result = parser.parse();
        assert!(matches!(result, Err(Error::DocxParse(_))));
    }
}
