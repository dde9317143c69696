//! Export options and configuration.

/// How list-valued fields are written to tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStyle {
    /// Join entries into one delimited cell
    Join(String),
    /// Expand entries into parallel columns: `Header`, `Header (2)`, ...
    Expand,
}

impl Default for ListStyle {
    fn default() -> Self {
        ListStyle::Join("; ".to_string())
    }
}

/// Options for exporting records.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// List-valued field handling
    pub list_style: ListStyle,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list style.
    pub fn with_list_style(mut self, style: ListStyle) -> Self {
        self.list_style = style;
        self
    }

    /// Join list values with the given delimiter.
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_style = ListStyle::Join(delimiter.into());
        self
    }

    /// Expand list values into parallel columns.
    pub fn expand_lists(mut self) -> Self {
        self.list_style = ListStyle::Expand;
        self
    }
}
