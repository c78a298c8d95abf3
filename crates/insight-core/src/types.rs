//! Core types for Panel Insight
//!
//! Defines the records exchanged between the pipeline stages:
//! - Filter tags extracted from a query
//! - Synthetic panel records
//! - Recommendations and strategy cards
//! - The assembled result bundle

use crate::report::ReportDocument;
use serde::{Deserialize, Serialize};

/// Interest-profile classification of a query
///
/// Drives the shape of the generated panel list and the result count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// No special interest keywords
    #[default]
    Base,
    /// Cashback keyword only
    Cashback,
    /// Chatbot keyword only
    Chatbot,
    /// Both cashback and chatbot keywords
    Both,
}

impl QueryType {
    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Base => "base",
            QueryType::Cashback => "cashback",
            QueryType::Chatbot => "chatbot",
            QueryType::Both => "both",
        }
    }

    /// Interests every panel of this classification starts with
    #[must_use]
    pub fn base_interests(&self) -> &'static [&'static str] {
        match self {
            QueryType::Base => &["운동"],
            QueryType::Cashback => &["운동", "포인트/캐시백"],
            QueryType::Chatbot => &["운동", "AI 챗봇"],
            QueryType::Both => &["운동", "포인트/캐시백", "AI 챗봇"],
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured condition derived from the query text
///
/// `query_part` is the literal fragment whose presence produced the tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterTag {
    /// Display label (e.g. "나이")
    pub label: String,
    /// Display value (e.g. "30-39세")
    pub value: String,
    /// Fragment of the query this tag stands for
    pub query_part: String,
}

impl FilterTag {
    /// Create a new tag
    #[inline]
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        query_part: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            query_part: query_part.into(),
        }
    }
}

impl std::fmt::Display for FilterTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Result of interpreting a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub filter_tags: Vec<FilterTag>,
    pub total_count: usize,
    pub query_type: QueryType,
}

/// Synthetic survey respondent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRecord {
    /// `P-` followed by five random digits; not unique
    pub id: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub job: String,
    /// Ordered, duplicate-free
    pub interests: Vec<String>,
    pub bio: String,
}

/// Payload of a recommendation's "add condition" action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    /// Condition category ("interest", "lifestyle")
    pub kind: String,
    pub value: String,
    /// Fragment appended to the query when the action is taken
    pub query_part: String,
}

impl ActionData {
    /// Fragment to append, falling back to the value
    #[must_use]
    pub fn fragment(&self) -> &str {
        if self.query_part.is_empty() {
            &self.value
        } else {
            &self.query_part
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationAction {
    pub button_text: String,
    pub data: ActionData,
}

/// Static insight offered next to every non-empty result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub text: String,
    pub action: RecommendationAction,
}

/// Canned marketing strategy card with its full report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub id: String,
    pub strategy_name: String,
    pub core_target: String,
    pub strategy_type: String,
    pub keywords: String,
    pub effect: String,
    /// Opaque to everything but the renderers and the exporter
    pub report: ReportDocument,
}

/// Everything a single search produces
///
/// Replaced wholesale on every search; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultBundle {
    pub total_count: usize,
    pub query_type: QueryType,
    pub filter_tags: Vec<FilterTag>,
    /// Leading slice of `full_panel_list`
    pub sample_panels: Vec<PanelRecord>,
    pub recommendations: Vec<Recommendation>,
    pub strategy_cards: Vec<StrategyReport>,
    pub full_panel_list: Vec<PanelRecord>,
}

impl ResultBundle {
    /// True when the search matched nobody
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
