//! Session state
//!
//! Everything the view layer renders lives in [`SessionState`]. It is only
//! mutated by [`crate::SessionController`]; everyone else gets `&SessionState`.

use crate::state_machine::{apply_transition, ModalPhase, OverlayPhase, SearchPhase};
use insight_core::{FilterTag, PanelRecord, ResultBundle, StrategyReport};

/// Which modal family an event concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    Panel,
    Strategy,
}

/// Result of asking a modal to show an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStep {
    /// Entity mounted; open flag must follow after the open delay
    Staged,
    /// Modal was already open; entity swapped in place
    Swapped,
}

/// Modal with a two-phase open and close
///
/// `selected` is always `Some` while the modal is open. It may also be
/// `Some` while closed, during the opening and closing windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState<T> {
    selected: Option<T>,
    phase: ModalPhase,
}

impl<T> ModalState<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: None,
            phase: ModalPhase::Closed,
        }
    }

    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// The open flag seen by the view
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// Whether the view should mount the modal at all
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.selected.is_some()
    }

    pub(crate) fn begin_open(&mut self, entity: T) -> OpenStep {
        if self.phase == ModalPhase::Open {
            self.selected = Some(entity);
            return OpenStep::Swapped;
        }
        apply_transition(&mut self.phase, ModalPhase::Opening);
        self.selected = Some(entity);
        OpenStep::Staged
    }

    pub(crate) fn finish_open(&mut self) -> bool {
        self.phase == ModalPhase::Opening && apply_transition(&mut self.phase, ModalPhase::Open)
    }

    /// False when there is nothing to close
    pub(crate) fn begin_close(&mut self) -> bool {
        matches!(self.phase, ModalPhase::Open | ModalPhase::Opening)
            && apply_transition(&mut self.phase, ModalPhase::Closing)
    }

    pub(crate) fn finish_close(&mut self) -> bool {
        if self.phase == ModalPhase::Closing && apply_transition(&mut self.phase, ModalPhase::Closed)
        {
            self.selected = None;
            true
        } else {
            false
        }
    }
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Full panel list overlay, with its own inline selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllPanelsState {
    phase: OverlayPhase,
    selected: Option<PanelRecord>,
}

impl AllPanelsState {
    #[inline]
    #[must_use]
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Mounted, including the exit window
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.phase != OverlayPhase::Hidden
    }

    /// Carrying the exit-animation marker
    #[inline]
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.phase == OverlayPhase::Exiting
    }

    /// Panel shown inline beside the list; `None` renders a placeholder
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<&PanelRecord> {
        self.selected.as_ref()
    }

    pub(crate) fn show(&mut self) -> bool {
        self.phase != OverlayPhase::Visible && apply_transition(&mut self.phase, OverlayPhase::Visible)
    }

    pub(crate) fn begin_exit(&mut self) -> bool {
        self.phase == OverlayPhase::Visible && apply_transition(&mut self.phase, OverlayPhase::Exiting)
    }

    pub(crate) fn finish_exit(&mut self) -> bool {
        if self.phase == OverlayPhase::Exiting && apply_transition(&mut self.phase, OverlayPhase::Hidden)
        {
            self.selected = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn pick(&mut self, panel: PanelRecord) {
        self.selected = Some(panel);
    }
}

/// Client-visible session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(crate) query: String,
    pub(crate) phase: SearchPhase,
    pub(crate) is_searched: bool,
    pub(crate) results: ResultBundle,
    pub(crate) panel_modal: ModalState<PanelRecord>,
    pub(crate) strategy_modal: ModalState<StrategyReport>,
    pub(crate) all_panels: AllPanelsState,
}

impl SessionState {
    /// Text currently in the search box
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    /// A search was issued since the last clear
    #[inline]
    #[must_use]
    pub fn is_searched(&self) -> bool {
        self.is_searched
    }

    /// Bundle of the latest completed search
    #[inline]
    #[must_use]
    pub fn results(&self) -> &ResultBundle {
        &self.results
    }

    #[inline]
    #[must_use]
    pub fn filter_tags(&self) -> &[FilterTag] {
        &self.results.filter_tags
    }

    /// Whether the result section should be shown
    #[must_use]
    pub fn has_presentable_results(&self) -> bool {
        self.is_searched && !self.is_loading() && self.results.total_count > 0
    }

    #[inline]
    #[must_use]
    pub fn panel_modal(&self) -> &ModalState<PanelRecord> {
        &self.panel_modal
    }

    #[inline]
    #[must_use]
    pub fn strategy_modal(&self) -> &ModalState<StrategyReport> {
        &self.strategy_modal
    }

    #[inline]
    #[must_use]
    pub fn all_panels(&self) -> &AllPanelsState {
        &self.all_panels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_two_phase_open_and_close() {
        let mut m = ModalState::new();
        assert_eq!(m.begin_open(1), OpenStep::Staged);
        assert!(m.is_mounted() && !m.is_open());
        assert!(m.finish_open());
        assert!(m.is_open());

        assert!(m.begin_close());
        assert!(!m.is_open());
        assert_eq!(m.selected(), Some(&1));
        assert!(m.finish_close());
        assert_eq!(m.selected(), None);
        assert_eq!(m.phase(), ModalPhase::Closed);
    }

    #[test]
    fn modal_swaps_entity_when_already_open() {
        let mut m = ModalState::new();
        m.begin_open("a");
        m.finish_open();
        assert_eq!(m.begin_open("b"), OpenStep::Swapped);
        assert!(m.is_open());
        assert_eq!(m.selected(), Some(&"b"));
    }

    #[test]
    fn closing_a_closed_modal_is_a_noop() {
        let mut m: ModalState<u8> = ModalState::new();
        assert!(!m.begin_close());
        assert!(!m.finish_close());
        assert!(!m.finish_open());
    }

    #[test]
    fn overlay_exit_clears_inline_selection() {
        let mut o = AllPanelsState::default();
        assert!(o.show());
        assert!(!o.show());
        o.pick(PanelRecord {
            id: "P-10000".into(),
            age: 30,
            gender: "남성".into(),
            location: "서울 강남구".into(),
            job: "학생".into(),
            interests: vec!["운동".into()],
            bio: String::new(),
        });
        assert!(o.begin_exit());
        assert!(o.is_visible() && o.is_exiting());
        assert!(o.selected().is_some());
        assert!(o.finish_exit());
        assert!(!o.is_visible());
        assert!(o.selected().is_none());
    }
}
