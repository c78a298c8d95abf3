//! Ports between the controller and whatever renders it
//!
//! The controller never talks to a view directly. It reports every logical
//! transition to a [`SessionObserver`] after the state has been updated, and
//! raises user-facing failures through an [`AlertSink`].

use crate::state::{ModalKind, SessionState};
use std::path::PathBuf;

/// One logical transition of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Query text replaced without searching
    QueryEdited,
    /// Search dispatched; results arrive after the latency
    SearchStarted { query: String },
    /// Result bundle swapped in
    SearchCompleted { total_count: usize },
    /// Everything result-derived reset
    Cleared,
    /// Entity mounted in a modal, open flag still false
    ModalSelected(ModalKind),
    /// Open flag set
    ModalOpened(ModalKind),
    /// Open flag cleared, entity still mounted
    ModalClosing(ModalKind),
    /// Entity dropped
    ModalCleared(ModalKind),
    AllPanelsShown,
    AllPanelsExiting,
    AllPanelsHidden,
    /// Inline selection inside the all-panels view changed
    AllPanelsPicked { panel_id: String },
    ExportSaved { path: PathBuf },
    ExportFailed { reason: String },
}

/// Receives every committed transition
pub trait SessionObserver: Send + Sync {
    fn on_change(&self, change: &SessionChange, state: &SessionState);
}

/// Non-blocking user-visible alert
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_change(&self, _change: &SessionChange, _state: &SessionState) {}
}

/// Alert sink that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "User alert");
    }
}
