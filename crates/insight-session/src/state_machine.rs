//! Session sub-state machines
//!
//! Three independent machines run side by side: the search lifecycle, one
//! modal machine per modal family, and the all-panels overlay. Each phase
//! type lists its legal successors; [`validate_transition`] rejects the rest.

use crate::error::StateMachineError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Phase type of one machine
pub trait Phase: Copy + Eq + Debug + 'static {
    /// Machine name used in errors and logs
    const MACHINE: &'static str;

    /// Phases reachable from `self` in one step
    fn allowed_transitions(self) -> &'static [Self];
}

/// Search lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchPhase {
    /// No results; nothing searched since the last clear
    #[default]
    Idle,
    /// Waiting for the simulated latency to elapse
    Searching,
    /// Results of the latest search are in place
    Ready,
}

impl Phase for SearchPhase {
    const MACHINE: &'static str = "search";

    fn allowed_transitions(self) -> &'static [Self] {
        use SearchPhase::*;
        match self {
            Idle => &[Searching],
            Searching => &[Searching, Ready, Idle],
            Ready => &[Searching, Idle],
        }
    }
}

/// Detail modal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModalPhase {
    /// Nothing selected
    #[default]
    Closed,
    /// Entity mounted, open flag not yet set
    Opening,
    /// Entity mounted and open flag set
    Open,
    /// Open flag cleared, entity still mounted for the exit animation
    Closing,
}

impl Phase for ModalPhase {
    const MACHINE: &'static str = "modal";

    fn allowed_transitions(self) -> &'static [Self] {
        use ModalPhase::*;
        match self {
            Closed => &[Opening],
            Opening => &[Opening, Open, Closing],
            Open => &[Open, Closing],
            Closing => &[Opening, Closed],
        }
    }
}

/// Full panel list overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OverlayPhase {
    #[default]
    Hidden,
    Visible,
    /// Still mounted, carrying the exit marker
    Exiting,
}

impl Phase for OverlayPhase {
    const MACHINE: &'static str = "all-panels";

    fn allowed_transitions(self) -> &'static [Self] {
        use OverlayPhase::*;
        match self {
            Hidden => &[Visible],
            Visible => &[Exiting],
            Exiting => &[Visible, Hidden],
        }
    }
}

/// Validates a state transition.
///
/// Illegal transitions are reported as errors; with the `strict-debug`
/// feature they panic instead.
pub fn validate_transition<P: Phase>(from: P, to: P) -> Result<(), StateMachineError> {
    if from.allowed_transitions().contains(&to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!(
            "Illegal {} transition attempted: {:?} -> {:?}",
            P::MACHINE,
            from,
            to
        );

        Err(StateMachineError::IllegalTransition {
            machine: P::MACHINE,
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        })
    }
}

/// Move `slot` to `to` if legal; logs and keeps the old phase otherwise
pub fn apply_transition<P: Phase>(slot: &mut P, to: P) -> bool {
    match validate_transition(*slot, to) {
        Ok(()) => {
            tracing::trace!(machine = P::MACHINE, from = ?*slot, to = ?to, "Transition");
            *slot = to;
            true
        }
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}
