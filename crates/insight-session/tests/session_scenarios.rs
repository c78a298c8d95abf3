//! End-to-end session behaviour against the controller's virtual clock

mod common;

use common::{CollectingAlerts, RecordingObserver};
use insight_core::QueryType;
use insight_export::ExportError;
use insight_session::{
    ModalKind, ModalPhase, SearchPhase, SessionChange, SessionConfig, SessionController,
    SessionError,
};
use insight_test_utils::{sample_panel, FailingExporter, MemorySink, UnavailableSink, QUERY_CORPUS};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn session() -> SessionController {
    SessionController::new(SessionConfig::new().with_seed(11))
}

fn searched(query: &str) -> SessionController {
    let mut c = session();
    c.search(query);
    c.settle();
    c
}

#[test]
fn test_office_workers_who_exercise() {
    let c = searched("30대 직장인 중 운동에 관심 있는 사람 100명");
    let results = c.state().results();

    let tags: Vec<(&str, &str)> = results
        .filter_tags
        .iter()
        .map(|t| (t.label.as_str(), t.value.as_str()))
        .collect();
    assert_eq!(tags, vec![("나이", "30-39세"), ("직업", "직장인"), ("관심사", "운동")]);
    assert_eq!(results.total_count, 100);
    assert_eq!(results.query_type, QueryType::Base);
    assert_eq!(results.strategy_cards.len(), 1);
    assert_eq!(results.sample_panels.len(), 3);
    assert_eq!(results.full_panel_list.len(), 100);
}

#[test]
fn test_cashback_and_chatbot_together() {
    let c = searched("포인트/캐시백 AI 챗봇");
    let results = c.state().results();
    assert_eq!(results.total_count, 30);
    assert_eq!(results.query_type, QueryType::Both);
    assert_eq!(results.recommendations.len(), 2);
}

#[test]
fn test_recommendation_appends_and_researches() {
    let mut c = searched("운동");
    assert!(c.add_recommendation(0).unwrap());
    assert_eq!(c.state().query(), "운동, 포인트/캐시백");
    assert!(c.state().is_loading());

    c.settle();
    assert_eq!(c.state().results().query_type, QueryType::Cashback);
    assert_eq!(c.state().results().total_count, 45);
}

#[test]
fn test_removing_age_tag_collapses_separators() {
    let mut c = searched("30대, 직장인");
    assert_eq!(c.state().filter_tags()[0].label, "나이");

    c.remove_filter_tag_at(0).unwrap();
    assert_eq!(c.state().query(), "직장인");
    c.settle();

    let labels: Vec<&str> = c.state().filter_tags().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["직업"]);
}

#[test]
fn test_removing_a_tag_leaves_other_conditions_as_written() {
    let mut c = searched("30대, ai  챗봇");
    assert_eq!(c.state().filter_tags().len(), 1);
    assert_eq!(c.state().results().total_count, 100);

    c.remove_filter_tag_at(0).unwrap();
    assert_eq!(c.state().query(), "ai  챗봇");
    c.settle();

    assert!(c.state().filter_tags().is_empty());
    assert_eq!(c.state().results().total_count, 100);
    assert_eq!(c.state().results().query_type, QueryType::Base);
}

#[test]
fn test_removing_the_last_tag_still_searches() {
    let mut c = searched("30대");
    c.remove_filter_tag_at(0).unwrap();
    assert_eq!(c.state().query(), "");
    // Tags were active when the empty query went out, so this is a search
    assert_eq!(c.state().phase(), SearchPhase::Searching);
    c.settle();
    assert!(c.state().filter_tags().is_empty());
    assert_eq!(c.state().results().total_count, 100);
}

#[test]
fn test_corpus_counts_survive_the_session() {
    for &(query, count, query_type) in QUERY_CORPUS {
        if query.is_empty() {
            continue;
        }
        let c = searched(query);
        assert_eq!(c.state().results().total_count, count, "{query}");
        assert_eq!(c.state().results().query_type, query_type, "{query}");
    }
}

#[test]
fn test_panel_modal_stages_entity_before_open_flag() {
    let observer = Arc::new(RecordingObserver::default());
    let mut c = session().with_observer(observer.clone());

    c.open_panel_modal(sample_panel("P-12345"));
    c.advance(ms(20));
    c.close_panel_modal();
    c.advance(ms(300));

    let snapshots = observer.snapshots();
    let changes: Vec<SessionChange> = snapshots.iter().map(|(c, _)| c.clone()).collect();
    assert_eq!(
        changes,
        vec![
            SessionChange::ModalSelected(ModalKind::Panel),
            SessionChange::ModalOpened(ModalKind::Panel),
            SessionChange::ModalClosing(ModalKind::Panel),
            SessionChange::ModalCleared(ModalKind::Panel),
        ]
    );

    let (_, selected) = &snapshots[0];
    assert!(selected.panel_modal().is_mounted() && !selected.panel_modal().is_open());
    let (_, opened) = &snapshots[1];
    assert!(opened.panel_modal().is_open());
    let (_, closing) = &snapshots[2];
    assert!(closing.panel_modal().is_mounted() && !closing.panel_modal().is_open());
    let (_, cleared) = &snapshots[3];
    assert!(!cleared.panel_modal().is_mounted());
}

#[test]
fn test_quick_open_close_never_leaves_a_stale_modal() {
    let observer = Arc::new(RecordingObserver::default());
    let mut c = session().with_observer(observer.clone());

    c.open_panel_modal(sample_panel("P-10001"));
    c.close_panel_modal();
    c.open_panel_modal(sample_panel("P-10002"));
    c.close_panel_modal();
    c.advance(ms(1_000));

    assert_eq!(c.state().panel_modal().phase(), ModalPhase::Closed);
    assert!(c.state().panel_modal().selected().is_none());
    assert!(!observer.changes().contains(&SessionChange::ModalOpened(ModalKind::Panel)));
    assert_eq!(c.pending_tasks(), 0);
}

#[test]
fn test_selecting_while_open_swaps_in_place() {
    let mut c = session();
    c.open_panel_modal(sample_panel("P-10001"));
    c.settle();
    c.open_panel_modal(sample_panel("P-10002"));
    assert!(c.state().panel_modal().is_open());
    assert_eq!(c.pending_tasks(), 0);
    assert_eq!(c.state().panel_modal().selected().map(|p| p.id.as_str()), Some("P-10002"));
}

#[test]
fn test_strategy_download_goes_to_the_sink() {
    let sink = Arc::new(MemorySink::new());
    let mut c = searched("운동하는 직장인").with_document_sink(sink.clone());

    c.open_strategy_card(0).unwrap();
    let path = c.download_report().unwrap();

    assert_eq!(sink.file_names(), vec!["AI_전략_제안서_초안.docx".to_string()]);
    assert!(path.ends_with("AI_전략_제안서_초안.docx"));
    let bytes = sink.bytes_of("AI_전략_제안서_초안.docx").unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_export_failure_alerts_and_keeps_the_session() {
    let alerts = Arc::new(CollectingAlerts::default());
    let sink = Arc::new(MemorySink::new());
    let mut c = searched("운동하는 직장인")
        .with_exporter(Arc::new(FailingExporter))
        .with_document_sink(sink.clone())
        .with_alert_sink(alerts.clone());
    c.open_strategy_card(0).unwrap();
    c.settle();
    let before = c.state().clone();

    let err = c.download_report().unwrap_err();
    assert!(matches!(err, SessionError::Export(ExportError::Package(_))));
    assert_eq!(alerts.messages().len(), 1);
    assert!(sink.is_empty());
    assert_eq!(c.state(), &before);
}

#[test]
fn test_unavailable_sink_is_reported() {
    let alerts = Arc::new(CollectingAlerts::default());
    let mut c = searched("운동하는 직장인")
        .with_document_sink(Arc::new(UnavailableSink))
        .with_alert_sink(alerts.clone());
    c.open_strategy_card(0).unwrap();

    assert!(matches!(
        c.download_report(),
        Err(SessionError::Export(ExportError::SinkUnavailable(_)))
    ));
    assert_eq!(alerts.messages().len(), 1);
}

#[test]
fn test_download_without_strategy_is_silent() {
    let alerts = Arc::new(CollectingAlerts::default());
    let mut c = session().with_alert_sink(alerts.clone());
    assert!(matches!(c.download_report(), Err(SessionError::NothingToExport)));
    assert!(alerts.messages().is_empty());
}

#[test]
fn test_config_file_drives_timings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "search_latency_ms = 50\nmodal_open_delay_ms = 5\nseed = 3\n").unwrap();

    let mut c = SessionController::new(SessionConfig::load(&path).unwrap());
    c.search("운동");
    c.advance(ms(49));
    assert!(c.state().is_loading());
    c.advance(ms(1));
    assert!(!c.state().is_loading());

    c.open_sample_panel(0).unwrap();
    c.advance(ms(5));
    assert!(c.state().panel_modal().is_open());
}
