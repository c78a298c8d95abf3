//! Word (.docx) rendering of strategy reports
//!
//! Layout: centered bold title, centered subtitle in a "Subtitle" paragraph
//! style, then one "N title" heading per section followed by its blocks.
//! Tables get a bold header row when the block defines one.

use crate::error::ExportError;
use crate::ReportExporter;
use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType, Table, TableCell, TableRow,
    WidthType,
};
use insight_core::{ReportBlock, ReportDocument, TableBlock};
use std::io::Cursor;

/// Font applied to East Asian text by default
pub const DEFAULT_FONT: &str = "맑은 고딕";

const SUBTITLE_STYLE: &str = "Subtitle";
const HIGHLIGHT_COLOR: &str = "14213D";
const SUBTITLE_COLOR: &str = "777777";

// run sizes are in half-points
const TITLE_SIZE: usize = 48;
const SUBTITLE_SIZE: usize = 28;
const HEADING_SIZE: usize = 32;
const HIGHLIGHT_SIZE: usize = 26;
const BODY_SIZE: usize = 22;

/// Usable page width in twentieths of a point
const TABLE_WIDTH_TWIPS: usize = 9_000;

/// Exporter producing `.docx` bytes
#[derive(Debug, Clone)]
pub struct DocxExporter {
    font: String,
}

impl DocxExporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
        }
    }

    /// Use another default East Asian font
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    fn build(&self, report: &ReportDocument) -> Docx {
        let mut docx = Docx::new()
            .default_fonts(RunFonts::new().east_asia(self.font.as_str()))
            .add_style(
                Style::new(SUBTITLE_STYLE, StyleType::Paragraph)
                    .name(SUBTITLE_STYLE)
                    .size(SUBTITLE_SIZE)
                    .color(SUBTITLE_COLOR),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(report.title()).bold().size(TITLE_SIZE))
                    .align(AlignmentType::Center),
            )
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(report.project_subtitle.as_str()))
                    .style(SUBTITLE_STYLE)
                    .align(AlignmentType::Center),
            );

        for section in report.sections() {
            docx = docx.add_paragraph(heading(section.number, section.title));
            for block in &section.blocks {
                docx = match block {
                    ReportBlock::Paragraph(text) => docx.add_paragraph(body(text)),
                    ReportBlock::Highlight(text) => docx.add_paragraph(
                        Paragraph::new().add_run(
                            Run::new()
                                .add_text(*text)
                                .bold()
                                .size(HIGHLIGHT_SIZE)
                                .color(HIGHLIGHT_COLOR),
                        ),
                    ),
                    ReportBlock::Numbered(items) => items
                        .iter()
                        .enumerate()
                        .fold(docx, |d, (i, item)| {
                            d.add_paragraph(body(&format!("{}. {item}", i + 1)))
                        }),
                    ReportBlock::Table(table) => docx.add_table(render_table(table)),
                };
            }
        }
        docx
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter for DocxExporter {
    fn export(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        if report.sections().iter().all(|s| s.blocks.iter().all(block_is_blank))
            && report.project_name.trim().is_empty()
        {
            return Err(ExportError::EmptyReport(
                "no title and no section content".to_string(),
            ));
        }

        let mut buf = Cursor::new(Vec::new());
        self.build(report)
            .build()
            .pack(&mut buf)
            .map_err(|e| ExportError::Package(e.to_string()))?;

        let bytes = buf.into_inner();
        tracing::debug!(bytes = bytes.len(), "Rendered docx document");
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}

fn block_is_blank(block: &ReportBlock<'_>) -> bool {
    match block {
        ReportBlock::Paragraph(t) | ReportBlock::Highlight(t) => t.trim().is_empty(),
        ReportBlock::Numbered(items) => items.is_empty(),
        ReportBlock::Table(t) => t.rows.is_empty() && t.headers.is_empty(),
    }
}

fn heading(number: usize, title: &str) -> Paragraph {
    Paragraph::new()
        .add_run(
            Run::new()
                .add_text(format!("{number} {title}"))
                .bold()
                .size(HEADING_SIZE),
        )
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE))
}

fn cell(text: &str, bold: bool) -> TableCell {
    let run = Run::new().add_text(text).size(BODY_SIZE);
    let run = if bold { run.bold() } else { run };
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}

fn render_table(table: &TableBlock) -> Table {
    let columns = table.column_count().max(1);

    let mut rows = Vec::with_capacity(table.rows.len() + 1);
    if table.has_header() {
        rows.push(TableRow::new(
            table.headers.iter().map(|h| cell(h, true)).collect(),
        ));
    }
    for row in &table.rows {
        let mut cells: Vec<TableCell> = row.iter().map(|c| cell(c, false)).collect();
        // ragged rows are padded so every row spans the grid
        cells.resize_with(columns, || cell("", false));
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
        .set_grid(vec![TABLE_WIDTH_TWIPS / columns; columns])
        .width(TABLE_WIDTH_TWIPS, WidthType::Dxa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_report_is_rejected() {
        let err = DocxExporter::new()
            .export(&ReportDocument::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyReport(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn blank_block_detection() {
        assert!(block_is_blank(&ReportBlock::Paragraph("  ")));
        assert!(!block_is_blank(&ReportBlock::Highlight("x")));
    }
}
