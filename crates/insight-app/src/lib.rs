//! Panel Insight terminal front end
//!
//! Stand-in for a view layer: renders session state as text and turns typed
//! lines into session commands.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod render;
pub mod repl;

pub use render::{ConsoleAlerts, TextObserver};
pub use repl::{parse_line, ReplCommand, ReplError};
