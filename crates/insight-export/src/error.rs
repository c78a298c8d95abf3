//! Error types for report export

use std::path::PathBuf;

/// Export failure
///
/// Never fatal to a session: callers log it and surface an alert.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Report has nothing to render
    #[error("report is empty: {0}")]
    EmptyReport(String),

    /// Document could not be serialised into its container format
    #[error("failed to package document: {0}")]
    Package(String),

    /// Bytes could not be written to their destination
    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination rejected the document
    #[error("document sink unavailable: {0}")]
    SinkUnavailable(String),
}

impl ExportError {
    /// Whether retrying the same export could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Save { .. } | Self::SinkUnavailable(_))
    }
}
