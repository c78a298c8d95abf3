//! Strategy report payload
//!
//! The report is a fixed set of named fields. Renderers never look at the
//! fields directly; they walk [`ReportDocument::sections`], which lays the
//! fields out as numbered sections of typed blocks.

use serde::{Deserialize, Serialize};

/// Table with an optional header row
///
/// An empty `headers` vector means the first column acts as the row header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Build a table from string slices
    #[must_use]
    pub fn new(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    /// Number of columns, taken from the header or the widest row
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }
}

/// Renderable unit inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock<'a> {
    /// Body prose
    Paragraph(&'a str),
    /// Emphasised one-liner
    Highlight(&'a str),
    /// Items rendered as `1. item`, `2. item`, ...
    Numbered(&'a [String]),
    Table(&'a TableBlock),
}

/// Numbered section of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection<'a> {
    pub number: usize,
    pub title: &'static str,
    pub blocks: Vec<ReportBlock<'a>>,
}

/// Full strategy proposal document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportDocument {
    pub project_name: String,
    pub project_subtitle: String,
    /// Two columns: field name, value
    pub summary_table: TableBlock,
    pub problem_definition: String,
    pub core_value_highlight: String,
    pub core_value_text: String,
    /// Three columns: metric, figure, meaning
    pub insight_table: TableBlock,
    /// Two columns: item, description
    pub service_table: TableBlock,
    pub strategy_proposal: Vec<String>,
    /// Three columns: party, quantitative, qualitative
    pub effect_table: TableBlock,
}

impl ReportDocument {
    /// Title used when the project name is blank
    pub const FALLBACK_TITLE: &'static str = "AI 헬스 코치 (가칭)";

    /// Title to render
    #[must_use]
    pub fn title(&self) -> &str {
        if self.project_name.trim().is_empty() {
            Self::FALLBACK_TITLE
        } else {
            &self.project_name
        }
    }

    /// Fields laid out in presentation order
    #[must_use]
    pub fn sections(&self) -> Vec<ReportSection<'_>> {
        let layout: [(&'static str, Vec<ReportBlock<'_>>); 7] = [
            ("프로젝트 요약", vec![ReportBlock::Table(&self.summary_table)]),
            (
                "문제 정의",
                vec![ReportBlock::Paragraph(&self.problem_definition)],
            ),
            (
                "핵심 가치",
                vec![
                    ReportBlock::Highlight(&self.core_value_highlight),
                    ReportBlock::Paragraph(&self.core_value_text),
                ],
            ),
            ("인사이트 근거", vec![ReportBlock::Table(&self.insight_table)]),
            ("서비스 개요", vec![ReportBlock::Table(&self.service_table)]),
            (
                "전략 제안",
                vec![ReportBlock::Numbered(&self.strategy_proposal)],
            ),
            ("기대 효과", vec![ReportBlock::Table(&self.effect_table)]),
        ];

        layout
            .into_iter()
            .enumerate()
            .map(|(i, (title, blocks))| ReportSection {
                number: i + 1,
                title,
                blocks,
            })
            .collect()
    }
}
