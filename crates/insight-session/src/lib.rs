//! Panel Insight Session
//!
//! Client-side session around the result pipeline:
//! - [`SessionController`] owns the session state and mediates every action
//! - Search, modal and overlay lifecycles are explicit state machines
//! - Delayed steps run through a cancelable [`DeferredQueue`]
//! - [`SessionRuntime`] drives a controller on tokio time
//!
//! # Example
//!
//! ```rust
//! use insight_session::{SessionConfig, SessionController};
//! use std::time::Duration;
//!
//! let mut session = SessionController::new(SessionConfig::new().with_seed(1));
//! session.search("30대 직장인 20명");
//! assert!(session.state().is_loading());
//!
//! session.advance(Duration::from_millis(1_500));
//! assert_eq!(session.state().results().total_count, 20);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod runtime;
pub mod scheduler;
pub mod state;
pub mod state_machine;

pub use config::SessionConfig;
pub use controller::{SearchDispatch, SessionController};
pub use error::{ConfigError, SessionError, StateMachineError};
pub use ports::{AlertSink, LogAlertSink, NoopObserver, SessionChange, SessionObserver};
pub use runtime::{SessionCommand, SessionRuntime};
pub use scheduler::{DeferredQueue, ScheduleToken};
pub use state::{AllPanelsState, ModalKind, ModalState, OpenStep, SessionState};
pub use state_machine::{validate_transition, ModalPhase, OverlayPhase, Phase, SearchPhase};

/// Common imports
pub mod prelude {
    pub use crate::{
        ModalKind, SessionChange, SessionCommand, SessionConfig, SessionController,
        SessionError, SessionObserver, SessionRuntime, SessionState,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
