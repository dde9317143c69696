//! Document-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// A parsed Word document, reduced to its tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (source name, counts)
    pub metadata: Metadata,

    /// Tables in document order
    pub tables: Vec<Table>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            tables: Vec::new(),
        }
    }

    /// Get the number of tables in the document.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Add a table to the document.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Check if the document has any tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Table::row_count).sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name, when parsed from a path
    pub source: Option<String>,

    /// Number of tables found in the container
    pub table_count: usize,

    /// Number of tables skipped during lenient parsing
    pub skipped_tables: usize,
}
