//! Async driver
//!
//! Runs a [`SessionController`] on the tokio runtime: commands arrive over
//! an mpsc channel, and the loop sleeps until either the next command or the
//! next deferred deadline. The controller is only touched from this one
//! task, so no locking is involved.

use crate::controller::SessionController;
use crate::error::SessionError;
use crate::state::SessionState;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

/// User action forwarded to the controller
#[derive(Debug)]
pub enum SessionCommand {
    SetQuery(String),
    /// Search with the current query text
    Submit,
    Search(String),
    Clear,
    AddRecommendation(usize),
    RemoveFilterTag(usize),
    OpenSamplePanel(usize),
    ClosePanel,
    OpenStrategy(usize),
    CloseStrategy,
    ShowAllPanels,
    HideAllPanels,
    PickInAllPanels(usize),
    Download,
    /// Reply with a snapshot of the state
    Inspect(oneshot::Sender<SessionState>),
}

/// Owns a controller for the lifetime of a command channel
#[derive(Debug)]
pub struct SessionRuntime {
    controller: SessionController,
}

impl SessionRuntime {
    #[must_use]
    pub fn new(controller: SessionController) -> Self {
        Self { controller }
    }

    /// Process commands until every sender is dropped, then hand the
    /// controller back
    pub async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) -> SessionController {
        let started = Instant::now();
        let base = self.controller.now();
        tracing::debug!("Session runtime started");

        loop {
            let wake = self
                .controller
                .next_deadline()
                .map(|deadline| started + deadline.saturating_sub(base));

            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.controller.advance_to(base + started.elapsed());
                    self.apply(command);
                }
                () = sleep_until(wake) => {
                    self.controller.advance_to(base + started.elapsed());
                }
            }
        }

        tracing::debug!(pending = self.controller.pending_tasks(), "Session runtime stopped");
        self.controller
    }

    fn apply(&mut self, command: SessionCommand) {
        let c = &mut self.controller;
        let result = match command {
            SessionCommand::SetQuery(query) => {
                c.set_query(query);
                Ok(())
            }
            SessionCommand::Submit => {
                c.submit();
                Ok(())
            }
            SessionCommand::Search(query) => {
                c.search(query);
                Ok(())
            }
            SessionCommand::Clear => {
                c.clear();
                Ok(())
            }
            SessionCommand::AddRecommendation(index) => c.add_recommendation(index).map(drop),
            SessionCommand::RemoveFilterTag(index) => c.remove_filter_tag_at(index).map(drop),
            SessionCommand::OpenSamplePanel(index) => c.open_sample_panel(index),
            SessionCommand::ClosePanel => {
                c.close_panel_modal();
                Ok(())
            }
            SessionCommand::OpenStrategy(index) => c.open_strategy_card(index),
            SessionCommand::CloseStrategy => {
                c.close_strategy_modal();
                Ok(())
            }
            SessionCommand::ShowAllPanels => {
                c.open_all_panels_view();
                Ok(())
            }
            SessionCommand::HideAllPanels => {
                c.close_all_panels_view();
                Ok(())
            }
            SessionCommand::PickInAllPanels(index) => c.select_in_all_panels(index),
            SessionCommand::Download => c.download_report().map(drop),
            SessionCommand::Inspect(reply) => {
                // Receiver gone means the asker stopped waiting
                let _ = reply.send(c.state().clone());
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            // Already logged and alerted by the controller
            Err(SessionError::Export(_)) => {}
            Err(SessionError::NothingToExport) => {
                tracing::debug!("Download requested with no strategy selected");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Command rejected");
                c.raise_alert(&e.to_string());
            }
        }
    }
}

async fn sleep_until(wake: Option<Instant>) {
    match wake {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
