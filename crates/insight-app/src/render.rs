//! Text rendering of session state

use insight_core::{PanelRecord, ResultBundle, StrategyReport};
use insight_export::render_text;
use insight_session::{AlertSink, ModalKind, SessionChange, SessionObserver, SessionState};
use std::fmt::Write as _;

/// Rows of the full panel list printed before eliding the rest
pub const LIST_PREVIEW: usize = 20;

/// One-line panel summary
#[must_use]
pub fn panel_line(panel: &PanelRecord) -> String {
    format!(
        "{} | {}세 {} | {} | {}",
        panel.id, panel.age, panel.gender, panel.location, panel.job
    )
}

/// Panel detail card
#[must_use]
pub fn render_panel(panel: &PanelRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[패널 상세] {}", panel.id);
    let _ = writeln!(out, "  나이: {}세", panel.age);
    let _ = writeln!(out, "  성별: {}", panel.gender);
    let _ = writeln!(out, "  지역: {}", panel.location);
    let _ = writeln!(out, "  직업: {}", panel.job);
    let _ = writeln!(out, "  관심사: {}", panel.interests.join(", "));
    let _ = write!(out, "  소개: {}", panel.bio);
    out
}

/// Strategy card header followed by its full report
#[must_use]
pub fn render_strategy(strategy: &StrategyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[전략 상세] {}", strategy.strategy_name);
    let _ = writeln!(out, "  핵심 타겟: {}", strategy.core_target);
    let _ = writeln!(out, "  전략 유형: {}", strategy.strategy_type);
    let _ = writeln!(out, "  키워드: {}", strategy.keywords);
    let _ = writeln!(out, "  기대 효과: {}", strategy.effect);
    let _ = writeln!(out);
    out.push_str(&render_text(&strategy.report));
    let _ = write!(out, "\n(:download 로 워드 문서 저장)");
    out
}

/// Result section; numbering is 1-based to match the REPL commands
#[must_use]
pub fn render_bundle(bundle: &ResultBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "검색 결과: 총 {}명 ({})", bundle.total_count, bundle.query_type);

    if !bundle.filter_tags.is_empty() {
        let tags: Vec<String> = bundle
            .filter_tags
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("[{}] {tag}", i + 1))
            .collect();
        let _ = writeln!(out, "필터: {}", tags.join("  "));
    }

    if !bundle.sample_panels.is_empty() {
        let _ = writeln!(out, "샘플 패널:");
        for (i, panel) in bundle.sample_panels.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, panel_line(panel));
        }
    }

    if !bundle.recommendations.is_empty() {
        let _ = writeln!(out, "추천 인사이트:");
        for (i, rec) in bundle.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", i + 1, rec.text);
            let _ = writeln!(out, "      {}", rec.action.button_text);
        }
    }

    if !bundle.strategy_cards.is_empty() {
        let _ = writeln!(out, "전략 카드:");
        for (i, card) in bundle.strategy_cards.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {} | {} | {}",
                i + 1,
                card.strategy_name,
                card.strategy_type,
                card.core_target
            );
        }
    }
    out.trim_end().to_string()
}

/// Full panel list view with its inline detail pane
#[must_use]
pub fn render_all_panels(state: &SessionState) -> String {
    let list = &state.results().full_panel_list;
    let mut out = String::new();
    let _ = writeln!(out, "[전체 패널] 총 {}명", state.results().total_count);
    for (i, panel) in list.iter().take(LIST_PREVIEW).enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, panel_line(panel));
    }
    if list.len() > LIST_PREVIEW {
        let _ = writeln!(out, "  ... 외 {}명 (:pick N 으로 선택)", list.len() - LIST_PREVIEW);
    }
    match state.all_panels().selected() {
        Some(panel) => out.push_str(&render_panel(panel)),
        None => out.push_str("  패널을 선택하면 상세 정보가 표시됩니다."),
    }
    out
}

/// Snapshot for `:state`
#[must_use]
pub fn render_state(state: &SessionState) -> String {
    if state.all_panels().is_visible() {
        return render_all_panels(state);
    }

    let mut out = String::new();
    let _ = writeln!(out, "쿼리: {:?}", state.query());
    let _ = writeln!(out, "상태: {:?}", state.phase());
    if state.has_presentable_results() {
        let _ = writeln!(out, "{}", render_bundle(state.results()));
    } else if state.is_searched() && !state.is_loading() {
        let _ = writeln!(out, "조건에 맞는 패널이 없습니다.");
    }
    if let Some(panel) = state.panel_modal().selected() {
        let _ = writeln!(out, "패널 모달: {} ({:?})", panel.id, state.panel_modal().phase());
    }
    if let Some(strategy) = state.strategy_modal().selected() {
        let _ = writeln!(
            out,
            "전략 모달: {} ({:?})",
            strategy.strategy_name,
            state.strategy_modal().phase()
        );
    }
    out.trim_end().to_string()
}

/// What to print for a change, if anything
#[must_use]
pub fn render_change(change: &SessionChange, state: &SessionState) -> Option<String> {
    match change {
        SessionChange::SearchStarted { query } => Some(format!("검색 중... {query:?}")),
        SessionChange::SearchCompleted { .. } => Some(render_bundle(state.results())),
        SessionChange::Cleared => Some("검색 결과를 초기화했습니다.".to_string()),
        SessionChange::ModalOpened(ModalKind::Panel) => {
            state.panel_modal().selected().map(render_panel)
        }
        SessionChange::ModalOpened(ModalKind::Strategy) => {
            state.strategy_modal().selected().map(render_strategy)
        }
        SessionChange::AllPanelsShown | SessionChange::AllPanelsPicked { .. } => {
            Some(render_all_panels(state))
        }
        SessionChange::AllPanelsHidden => Some("전체 패널 보기를 닫았습니다.".to_string()),
        SessionChange::ExportSaved { path } => Some(format!("저장 완료: {}", path.display())),
        SessionChange::QueryEdited
        | SessionChange::ModalSelected(_)
        | SessionChange::ModalClosing(_)
        | SessionChange::ModalCleared(_)
        | SessionChange::AllPanelsExiting
        | SessionChange::ExportFailed { .. } => None,
    }
}

/// Observer printing changes to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct TextObserver;

impl SessionObserver for TextObserver {
    fn on_change(&self, change: &SessionChange, state: &SessionState) {
        if let Some(text) = render_change(change, state) {
            println!("{text}");
        }
    }
}

/// Alerts on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}
