//! Session controller
//!
//! Single owner of [`SessionState`]. Every user action is a named method
//! here; every delayed step (search latency, modal staging, overlay exit) is
//! an entry in a [`DeferredQueue`] whose token is remembered per slot, so
//! re-entering a transition cancels the callback of the one it replaces.
//!
//! The controller does not own a clock. Callers move time forward with
//! [`SessionController::advance`]; [`crate::SessionRuntime`] does that
//! against tokio time.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::ports::{AlertSink, LogAlertSink, NoopObserver, SessionChange, SessionObserver};
use crate::scheduler::{DeferredQueue, ScheduleToken};
use crate::state::{ModalKind, OpenStep, SessionState};
use crate::state_machine::{apply_transition, SearchPhase};
use insight_core::{
    query_edit, FilterTag, PanelRecord, Recommendation, ResultAssembler, ResultBundle,
    StrategyReport,
};
use insight_export::{
    export_to, file_name_for, DirectorySink, DocumentSink, DocxExporter, ReportExporter,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// What [`SessionController::search`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDispatch {
    /// Empty query with no active tags; session reset to idle
    Cleared,
    /// Results will land at the token's deadline
    Scheduled(ScheduleToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    SearchCompleted { query: String },
    ModalOpened(ModalKind),
    ModalCleared(ModalKind),
    OverlayHidden,
}

/// Token of the live task per slot
#[derive(Debug, Default)]
struct PendingTasks {
    search: Option<ScheduleToken>,
    panel_modal: Option<ScheduleToken>,
    strategy_modal: Option<ScheduleToken>,
    overlay: Option<ScheduleToken>,
}

impl PendingTasks {
    fn modal(&mut self, kind: ModalKind) -> &mut Option<ScheduleToken> {
        match kind {
            ModalKind::Panel => &mut self.panel_modal,
            ModalKind::Strategy => &mut self.strategy_modal,
        }
    }
}

/// Mediates every user action against the session state
pub struct SessionController {
    config: SessionConfig,
    assembler: ResultAssembler,
    rng: StdRng,
    state: SessionState,
    queue: DeferredQueue<Deferred>,
    pending: PendingTasks,
    observer: Arc<dyn SessionObserver>,
    alerts: Arc<dyn AlertSink>,
    exporter: Arc<dyn ReportExporter>,
    sink: Arc<dyn DocumentSink>,
}

impl SessionController {
    /// Controller with DOCX export into the working directory
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let assembler = ResultAssembler::new()
            .with_sample_size(config.sample_size)
            .with_panel_limit(config.panel_limit);

        Self {
            config,
            assembler,
            rng,
            state: SessionState::default(),
            queue: DeferredQueue::new(),
            pending: PendingTasks::default(),
            observer: Arc::new(NoopObserver),
            alerts: Arc::new(LogAlertSink),
            exporter: Arc::new(DocxExporter::new()),
            sink: Arc::new(DirectorySink::new(".")),
        }
    }

    /// With a custom result pipeline
    #[must_use]
    pub fn with_assembler(mut self, assembler: ResultAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn with_alert_sink(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = alerts;
        self
    }

    #[must_use]
    pub fn with_exporter(mut self, exporter: Arc<dyn ReportExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    #[must_use]
    pub fn with_document_sink(mut self, sink: Arc<dyn DocumentSink>) -> Self {
        self.sink = sink;
        self
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Position of the controller's clock
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Deadline of the next deferred step, if any
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    /// Number of deferred steps waiting
    #[inline]
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    // ---- search ----

    /// Replace the query text without searching
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.notify(&SessionChange::QueryEdited);
    }

    /// Search with the current query text
    pub fn submit(&mut self) -> SearchDispatch {
        let query = self.state.query.clone();
        self.search(query)
    }

    /// Start a search
    ///
    /// An empty query with no active filter tags clears the session instead.
    /// A search already in flight is superseded: its completion never fires.
    pub fn search(&mut self, query: impl Into<String>) -> SearchDispatch {
        let query = query.into();
        if query.is_empty() && self.state.filter_tags().is_empty() {
            self.clear();
            return SearchDispatch::Cleared;
        }

        if let Some(stale) = self.pending.search.take() {
            if self.queue.cancel(stale) {
                tracing::debug!("Superseded in-flight search");
            }
        }

        apply_transition(&mut self.state.phase, SearchPhase::Searching);
        self.state.is_searched = true;
        self.state.query.clone_from(&query);
        tracing::info!(query = %query, "Query dispatched");

        let token = self.queue.schedule(
            self.config.search_latency(),
            Deferred::SearchCompleted {
                query: query.clone(),
            },
        );
        self.pending.search = Some(token);
        self.notify(&SessionChange::SearchStarted { query });
        SearchDispatch::Scheduled(token)
    }

    /// Reset every result-derived field and return to idle
    pub fn clear(&mut self) {
        if let Some(stale) = self.pending.search.take() {
            self.queue.cancel(stale);
        }
        if self.state.phase != SearchPhase::Idle {
            apply_transition(&mut self.state.phase, SearchPhase::Idle);
        }
        self.state.query.clear();
        self.state.is_searched = false;
        self.state.results = ResultBundle::default();
        tracing::info!("Session cleared");
        self.notify(&SessionChange::Cleared);
    }

    // ---- conditions ----

    /// Append the recommendation's fragment to the query and search again
    ///
    /// Returns false, without searching, when the fragment is already part
    /// of the query.
    pub fn add_condition_from_recommendation(&mut self, recommendation: &Recommendation) -> bool {
        let fragment = recommendation.action.data.fragment();
        let Some(query) = query_edit::append_condition(&self.state.query, fragment) else {
            tracing::debug!(fragment, "Condition already present");
            return false;
        };
        tracing::info!(recommendation = %recommendation.id, fragment, "Adding condition");
        self.search(query);
        true
    }

    /// [`Self::add_condition_from_recommendation`] by position in the results
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownRecommendation`] when out of range.
    pub fn add_recommendation(&mut self, index: usize) -> Result<bool, SessionError> {
        let recommendation = self
            .state
            .results
            .recommendations
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownRecommendation(index))?;
        Ok(self.add_condition_from_recommendation(&recommendation))
    }

    /// Cut the tag's fragment out of the query and search again
    pub fn remove_filter_tag(&mut self, tag: &FilterTag) -> SearchDispatch {
        let query = query_edit::remove_condition(&self.state.query, &tag.query_part);
        tracing::info!(tag = %tag, query = %query, "Removing filter tag");
        self.search(query)
    }

    /// [`Self::remove_filter_tag`] by position among the active tags
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownFilterTag`] when out of range.
    pub fn remove_filter_tag_at(&mut self, index: usize) -> Result<SearchDispatch, SessionError> {
        let tag = self
            .state
            .filter_tags()
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownFilterTag(index))?;
        Ok(self.remove_filter_tag(&tag))
    }

    // ---- modals ----

    /// Mount `panel` in the detail modal; open flag follows after the open delay
    pub fn open_panel_modal(&mut self, panel: PanelRecord) {
        let step = self.state.panel_modal.begin_open(panel);
        self.after_open(ModalKind::Panel, step);
    }

    /// Open the sample panel at `index`
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownPanel`] when out of range.
    pub fn open_sample_panel(&mut self, index: usize) -> Result<(), SessionError> {
        let panel = self
            .state
            .results
            .sample_panels
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownPanel(index))?;
        self.open_panel_modal(panel);
        Ok(())
    }

    /// Clear the open flag; the panel is dropped after the close delay
    pub fn close_panel_modal(&mut self) {
        let closing = self.state.panel_modal.begin_close();
        self.after_close(ModalKind::Panel, closing);
    }

    /// Mount `strategy` in the strategy modal
    pub fn open_strategy_modal(&mut self, strategy: StrategyReport) {
        let step = self.state.strategy_modal.begin_open(strategy);
        self.after_open(ModalKind::Strategy, step);
    }

    /// Open the strategy card at `index`
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownStrategy`] when out of range.
    pub fn open_strategy_card(&mut self, index: usize) -> Result<(), SessionError> {
        let strategy = self
            .state
            .results
            .strategy_cards
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownStrategy(index))?;
        self.open_strategy_modal(strategy);
        Ok(())
    }

    pub fn close_strategy_modal(&mut self) {
        let closing = self.state.strategy_modal.begin_close();
        self.after_close(ModalKind::Strategy, closing);
    }

    fn after_open(&mut self, kind: ModalKind, step: OpenStep) {
        // Any pending step of this modal belongs to the transition being replaced
        self.cancel_modal_task(kind);
        self.notify(&SessionChange::ModalSelected(kind));
        if step == OpenStep::Staged {
            let token = self
                .queue
                .schedule(self.config.modal_open_delay(), Deferred::ModalOpened(kind));
            *self.pending.modal(kind) = Some(token);
        }
    }

    fn after_close(&mut self, kind: ModalKind, closing: bool) {
        if !closing {
            tracing::debug!(?kind, "Close requested on a modal that is not open");
            return;
        }
        self.cancel_modal_task(kind);
        self.notify(&SessionChange::ModalClosing(kind));
        let token = self
            .queue
            .schedule(self.config.modal_close_delay(), Deferred::ModalCleared(kind));
        *self.pending.modal(kind) = Some(token);
    }

    fn cancel_modal_task(&mut self, kind: ModalKind) {
        if let Some(stale) = self.pending.modal(kind).take() {
            if self.queue.cancel(stale) {
                tracing::debug!(?kind, "Cancelled superseded modal step");
            }
        }
    }

    // ---- all-panels view ----

    /// Show the full panel list; re-entering during the exit window keeps it
    pub fn open_all_panels_view(&mut self) {
        if let Some(stale) = self.pending.overlay.take() {
            self.queue.cancel(stale);
        }
        if self.state.all_panels.show() {
            self.notify(&SessionChange::AllPanelsShown);
        }
    }

    /// Mark the view as exiting; it becomes hidden after the exit delay
    pub fn close_all_panels_view(&mut self) {
        if !self.state.all_panels.begin_exit() {
            tracing::debug!("All-panels view is not visible");
            return;
        }
        self.notify(&SessionChange::AllPanelsExiting);
        let token = self
            .queue
            .schedule(self.config.overlay_exit_delay(), Deferred::OverlayHidden);
        self.pending.overlay = Some(token);
    }

    /// Show the panel at `index` of the full list inline
    ///
    /// # Errors
    /// Returns [`SessionError::AllPanelsHidden`] unless the view is visible
    /// and not exiting, or [`SessionError::UnknownPanel`] when out of range.
    pub fn select_in_all_panels(&mut self, index: usize) -> Result<(), SessionError> {
        if !self.state.all_panels.is_visible() || self.state.all_panels.is_exiting() {
            return Err(SessionError::AllPanelsHidden);
        }
        let panel = self
            .state
            .results
            .full_panel_list
            .get(index)
            .cloned()
            .ok_or(SessionError::UnknownPanel(index))?;
        let panel_id = panel.id.clone();
        self.state.all_panels.pick(panel);
        self.notify(&SessionChange::AllPanelsPicked { panel_id });
        Ok(())
    }

    // ---- export ----

    /// Export the report of the strategy shown in the strategy modal
    ///
    /// # Errors
    /// Returns [`SessionError::NothingToExport`] when no strategy is selected,
    /// and [`SessionError::Export`] when rendering or saving fails. Failures
    /// of the latter kind are also raised through the alert port.
    pub fn download_report(&mut self) -> Result<PathBuf, SessionError> {
        let Some(strategy) = self.state.strategy_modal.selected() else {
            return Err(SessionError::NothingToExport);
        };
        let file_name = file_name_for(&self.config.export_file_name, self.exporter.as_ref());

        match export_to(
            self.exporter.as_ref(),
            self.sink.as_ref(),
            &strategy.report,
            &file_name,
        ) {
            Ok(path) => {
                tracing::info!(strategy = %strategy.id, path = %path.display(), "Report exported");
                self.notify(&SessionChange::ExportSaved { path: path.clone() });
                Ok(path)
            }
            Err(e) => {
                tracing::error!(strategy = %strategy.id, error = %e, "Report export failed");
                self.alerts
                    .alert(&format!("전략 제안서를 생성하지 못했습니다: {e}"));
                self.notify(&SessionChange::ExportFailed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    // ---- clock ----

    /// Move the clock forward by `elapsed`, firing everything that falls due
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.queue.now() + elapsed;
        self.advance_to(target)
    }

    /// Move the clock to `target`, firing due steps in deadline order
    ///
    /// Returns how many steps fired.
    pub fn advance_to(&mut self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some((token, event)) = self.queue.pop_due(target) {
            if self.dispatch(token, event) {
                fired += 1;
            }
        }
        self.queue.advance_clock(target);
        fired
    }

    /// Fire everything still queued
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.queue.next_deadline() {
            fired += self.advance_to(deadline);
        }
        fired
    }

    fn dispatch(&mut self, token: ScheduleToken, event: Deferred) -> bool {
        let slot = match &event {
            Deferred::SearchCompleted { .. } => &mut self.pending.search,
            Deferred::ModalOpened(kind) | Deferred::ModalCleared(kind) => self.pending.modal(*kind),
            Deferred::OverlayHidden => &mut self.pending.overlay,
        };
        if *slot != Some(token) {
            tracing::debug!(?event, "Dropped stale deferred step");
            return false;
        }
        *slot = None;

        match event {
            Deferred::SearchCompleted { query } => self.complete_search(&query),
            Deferred::ModalOpened(kind) => {
                let opened = match kind {
                    ModalKind::Panel => self.state.panel_modal.finish_open(),
                    ModalKind::Strategy => self.state.strategy_modal.finish_open(),
                };
                if opened {
                    self.notify(&SessionChange::ModalOpened(kind));
                }
            }
            Deferred::ModalCleared(kind) => {
                let cleared = match kind {
                    ModalKind::Panel => self.state.panel_modal.finish_close(),
                    ModalKind::Strategy => self.state.strategy_modal.finish_close(),
                };
                if cleared {
                    self.notify(&SessionChange::ModalCleared(kind));
                }
            }
            Deferred::OverlayHidden => {
                if self.state.all_panels.finish_exit() {
                    self.notify(&SessionChange::AllPanelsHidden);
                }
            }
        }
        true
    }

    fn complete_search(&mut self, query: &str) {
        let results = self.assembler.assemble(query, &mut self.rng);
        let total_count = results.total_count;
        // Swap the whole bundle at once
        self.state.results = results;
        apply_transition(&mut self.state.phase, SearchPhase::Ready);
        tracing::debug!(total_count, "Search completed");
        self.notify(&SessionChange::SearchCompleted { total_count });
    }

    /// Show `message` through the alert port
    pub fn raise_alert(&self, message: &str) {
        self.alerts.alert(message);
    }

    fn notify(&self, change: &SessionChange) {
        self.observer.on_change(change, &self.state);
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("now", &self.queue.now())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::{ModalPhase, OverlayPhase};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn controller() -> SessionController {
        SessionController::new(SessionConfig::new().with_seed(7))
    }

    #[test]
    fn search_lands_after_latency() {
        let mut c = controller();
        assert!(matches!(c.search("운동"), SearchDispatch::Scheduled(_)));
        assert!(c.state().is_loading());
        assert!(c.state().is_searched());
        assert_eq!(c.state().results().total_count, 0);

        assert_eq!(c.advance(ms(1_499)), 0);
        assert!(c.state().is_loading());

        assert_eq!(c.advance(ms(1)), 1);
        assert_eq!(c.state().phase(), SearchPhase::Ready);
        assert_eq!(c.state().results().total_count, 100);
        assert!(c.state().has_presentable_results());
    }

    #[test]
    fn empty_query_without_tags_clears() {
        let mut c = controller();
        c.search("운동");
        c.settle();
        assert!(c.state().has_presentable_results());

        c.clear();
        assert_eq!(c.search(""), SearchDispatch::Cleared);
        assert_eq!(c.state().phase(), SearchPhase::Idle);
        assert!(!c.state().is_searched());
        assert!(c.state().results().is_empty());
    }

    #[test]
    fn empty_query_with_tags_still_searches() {
        let mut c = controller();
        c.search("30대");
        c.settle();
        assert_eq!(c.state().filter_tags().len(), 1);

        assert!(matches!(c.search(""), SearchDispatch::Scheduled(_)));
        c.settle();
        assert_eq!(c.state().results().total_count, 100);
        assert!(c.state().filter_tags().is_empty());
    }

    #[test]
    fn research_supersedes_in_flight_search() {
        let mut c = controller();
        c.search("10명");
        c.advance(ms(1_000));
        c.search("20명");
        assert_eq!(c.pending_tasks(), 1);

        // The first search would have landed here
        assert_eq!(c.advance(ms(500)), 0);
        assert!(c.state().is_loading());

        c.advance(ms(1_000));
        assert_eq!(c.state().results().total_count, 20);
    }

    #[test]
    fn clear_cancels_pending_search() {
        let mut c = controller();
        c.search("운동");
        c.clear();
        assert_eq!(c.settle(), 0);
        assert_eq!(c.state().phase(), SearchPhase::Idle);
        assert!(c.state().results().is_empty());
    }

    #[test]
    fn duplicate_recommendation_is_a_noop() {
        let mut c = controller();
        c.search("포인트/캐시백 좋아하는 사람");
        c.settle();
        let before = c.state().query().to_string();
        assert!(!c.add_recommendation(0).unwrap());
        assert_eq!(c.state().query(), before);
        assert!(!c.state().is_loading());
    }

    #[test]
    fn index_errors() {
        let mut c = controller();
        assert!(matches!(c.add_recommendation(0), Err(SessionError::UnknownRecommendation(0))));
        assert!(matches!(c.remove_filter_tag_at(3), Err(SessionError::UnknownFilterTag(3))));
        assert!(matches!(c.open_sample_panel(0), Err(SessionError::UnknownPanel(0))));
        assert!(matches!(c.open_strategy_card(0), Err(SessionError::UnknownStrategy(0))));
        assert!(matches!(c.select_in_all_panels(0), Err(SessionError::AllPanelsHidden)));
    }

    #[test]
    fn reopening_while_closing_keeps_new_entity() {
        let mut c = controller();
        c.search("운동");
        c.settle();
        c.open_sample_panel(0).unwrap();
        c.settle();
        c.close_panel_modal();
        c.advance(ms(100));
        c.open_sample_panel(1).unwrap();

        // The stale clear from the close must not drop the new panel
        c.settle();
        let modal = c.state().panel_modal();
        assert_eq!(modal.phase(), ModalPhase::Open);
        assert_eq!(
            modal.selected().map(|p| p.id.as_str()),
            Some(c.state().results().sample_panels[1].id.as_str())
        );
    }

    #[test]
    fn close_during_opening_never_opens() {
        let mut c = controller();
        c.search("운동하는 직장인");
        c.settle();
        c.open_strategy_card(0).unwrap();
        c.close_strategy_modal();
        c.settle();
        assert_eq!(c.state().strategy_modal().phase(), ModalPhase::Closed);
        assert!(c.state().strategy_modal().selected().is_none());
    }

    #[test]
    fn modal_families_are_independent() {
        let mut c = controller();
        c.search("운동하는 직장인");
        c.settle();
        c.open_sample_panel(0).unwrap();
        c.open_strategy_card(0).unwrap();
        c.settle();
        assert!(c.state().panel_modal().is_open());
        assert!(c.state().strategy_modal().is_open());
    }

    #[test]
    fn all_panels_exit_window() {
        let mut c = controller();
        c.search("5명");
        c.settle();
        c.open_all_panels_view();
        c.select_in_all_panels(4).unwrap();
        c.close_all_panels_view();

        assert_eq!(c.state().all_panels().phase(), OverlayPhase::Exiting);
        assert!(matches!(c.select_in_all_panels(0), Err(SessionError::AllPanelsHidden)));

        c.advance(ms(299));
        assert!(c.state().all_panels().is_visible());
        c.advance(ms(1));
        assert!(!c.state().all_panels().is_visible());
        assert!(c.state().all_panels().selected().is_none());
    }

    #[test]
    fn configured_exit_window_is_honoured() {
        let mut c = SessionController::new(
            SessionConfig::new()
                .with_seed(7)
                .with_overlay_exit_delay(ms(50)),
        );
        c.open_all_panels_view();
        c.close_all_panels_view();
        c.advance(ms(49));
        assert!(c.state().all_panels().is_exiting());
        c.advance(ms(1));
        assert_eq!(c.state().all_panels().phase(), OverlayPhase::Hidden);
    }

    #[test]
    fn reopening_all_panels_during_exit_cancels_hide() {
        let mut c = controller();
        c.open_all_panels_view();
        c.close_all_panels_view();
        c.advance(ms(100));
        c.open_all_panels_view();
        c.settle();
        assert_eq!(c.state().all_panels().phase(), OverlayPhase::Visible);
    }

    #[test]
    fn download_without_selection_is_an_error() {
        let mut c = controller();
        assert!(matches!(c.download_report(), Err(SessionError::NothingToExport)));
    }
}
