//! Extraction options and configuration.

use super::{HeaderMode, RowPolicy};

/// Options controlling the table-to-record heuristics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Header detection policy
    pub header_mode: HeaderMode,

    /// Row assembly policy
    pub row_policy: RowPolicy,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header detection mode.
    pub fn with_header_mode(mut self, mode: HeaderMode) -> Self {
        self.header_mode = mode;
        self
    }

    /// Set the row assembly policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Use quoted-marker header detection.
    pub fn quoted(self) -> Self {
        self.with_header_mode(HeaderMode::Quoted)
    }

    /// Use placeholder-marker header detection.
    pub fn placeholder(self) -> Self {
        self.with_header_mode(HeaderMode::Placeholder)
    }

    /// Use colon-marker header detection.
    pub fn colon(self) -> Self {
        self.with_header_mode(HeaderMode::Colon)
    }
}
