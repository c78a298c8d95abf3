//! Plain-text rendering of strategy reports
//!
//! Used by the terminal front end for the strategy detail view, and as a
//! lightweight export format.

use crate::error::ExportError;
use crate::ReportExporter;
use insight_core::{ReportBlock, ReportDocument, TableBlock};
use std::fmt::Write as _;

/// Exporter producing UTF-8 text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl ReportExporter for TextExporter {
    fn export(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        Ok(render_text(report).into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Render a report as indented text
#[must_use]
pub fn render_text(report: &ReportDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.title());
    if !report.project_subtitle.is_empty() {
        let _ = writeln!(out, "{}", report.project_subtitle);
    }

    for section in report.sections() {
        let _ = writeln!(out, "\n{} {}", section.number, section.title);
        for block in &section.blocks {
            match block {
                ReportBlock::Paragraph(text) => {
                    let _ = writeln!(out, "  {text}");
                }
                ReportBlock::Highlight(text) => {
                    let _ = writeln!(out, "  ** {text} **");
                }
                ReportBlock::Numbered(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let _ = writeln!(out, "  {}. {item}", i + 1);
                    }
                }
                ReportBlock::Table(table) => render_table(&mut out, table),
            }
        }
    }
    out
}

fn render_table(out: &mut String, table: &TableBlock) {
    if table.has_header() {
        let _ = writeln!(out, "  | {} |", table.headers.join(" | "));
        let _ = writeln!(
            out,
            "  |{}|",
            vec!["---"; table.headers.len()].join("|")
        );
    }
    for row in &table.rows {
        let _ = writeln!(out, "  | {} |", row.join(" | "));
    }
}
