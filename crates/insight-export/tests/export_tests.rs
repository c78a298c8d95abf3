use insight_core::catalog::health_coach_strategy;
use insight_core::ReportDocument;
use insight_export::{
    export_to, file_name_for, DirectorySink, DocumentSink, DocxExporter, ExportError,
    ReportExporter, TextExporter, DEFAULT_FILE_NAME,
};
use pretty_assertions::assert_eq;

#[test]
fn test_docx_export_is_a_zip_package() {
    let report = health_coach_strategy().report;
    let bytes = DocxExporter::new().export(&report).unwrap();

    assert!(bytes.len() > 1_000);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_docx_export_handles_ragged_tables() {
    let mut report = health_coach_strategy().report;
    report.insight_table.rows.push(vec!["only one cell".into()]);
    report.summary_table.rows.clear();

    assert!(DocxExporter::new().with_font("Noto Sans KR").export(&report).is_ok());
}

#[test]
fn test_title_only_report_still_exports() {
    let report = ReportDocument {
        project_name: "제목만 있는 보고서".into(),
        ..ReportDocument::default()
    };
    assert!(DocxExporter::new().export(&report).is_ok());
}

#[test]
fn test_directory_sink_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path().join("nested"));

    let path = export_to(
        &DocxExporter::new(),
        &sink,
        &health_coach_strategy().report,
        DEFAULT_FILE_NAME,
    )
    .unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), DEFAULT_FILE_NAME);
    let written = std::fs::read(&path).unwrap();
    assert_eq!(&written[..2], b"PK");
}

#[test]
fn test_directory_sink_reports_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();

    // a regular file cannot act as a directory
    let sink = DirectorySink::new(&blocker);
    let err = sink.save("out.docx", b"data").unwrap_err();
    assert!(matches!(err, ExportError::Save { .. }));
    assert!(err.is_retryable());
}

#[test]
fn test_file_name_follows_exporter_extension() {
    assert_eq!(
        file_name_for(DEFAULT_FILE_NAME, &TextExporter),
        "AI_전략_제안서_초안.txt"
    );
    assert_eq!(
        file_name_for(DEFAULT_FILE_NAME, &DocxExporter::new()),
        DEFAULT_FILE_NAME
    );
}
