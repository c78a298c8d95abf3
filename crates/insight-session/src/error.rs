//! Error types for the session layer
//!
//! None of these end a session. Index errors come from stale or mistyped
//! user input, export errors are surfaced through the alert port, and
//! illegal transitions are logged and ignored.

use insight_export::ExportError;
use std::path::PathBuf;

/// Session operation failure
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Recommendation index out of range
    #[error("no recommendation at position {0}")]
    UnknownRecommendation(usize),

    /// Filter tag index out of range
    #[error("no filter tag at position {0}")]
    UnknownFilterTag(usize),

    /// Panel index out of range
    #[error("no panel at position {0}")]
    UnknownPanel(usize),

    /// Strategy card index out of range
    #[error("no strategy card at position {0}")]
    UnknownStrategy(usize),

    /// Operation needs the all-panels view to be visible
    #[error("the all-panels view is not visible")]
    AllPanelsHidden,

    /// Download requested with no strategy selected
    #[error("no strategy report selected")]
    NothingToExport,

    /// Document export failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Transition outside a machine's allowed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    #[error("illegal {machine} transition: {from} -> {to}")]
    IllegalTransition {
        machine: &'static str,
        from: String,
        to: String,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`crate::SessionConfig`]
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
