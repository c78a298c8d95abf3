//! Query interpretation
//!
//! Turns free text into filter tags, a target count and a [`QueryType`].
//! Every rule is a plain substring test on the lowercased query; rules are
//! independent of one another, so a query can yield any subset of tags.
//! Interpretation never fails: anything unrecognised lands on the default
//! branch (100 panels, [`QueryType::Base`]).

use crate::types::{FilterTag, Interpretation, QueryType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword marking the cashback interest
pub const CASHBACK_KEYWORD: &str = "포인트/캐시백";
/// Keyword marking the chatbot lifestyle (matched lowercased)
pub const CHATBOT_KEYWORD: &str = "ai 챗봇";

/// Count used when the query names none
pub const DEFAULT_COUNT: usize = 100;
pub const BOTH_COUNT: usize = 30;
pub const CASHBACK_COUNT: usize = 45;
pub const CHATBOT_COUNT: usize = 60;

static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*명").expect("count pattern is a valid regex"));

/// Single keyword-to-tag rule
#[derive(Debug, Clone, Copy)]
struct TagRule {
    keyword: &'static str,
    label: &'static str,
    value: &'static str,
    query_part: &'static str,
}

const TAG_RULES: [TagRule; 5] = [
    TagRule {
        keyword: "30대",
        label: "나이",
        value: "30-39세",
        query_part: "30대",
    },
    TagRule {
        keyword: "직장인",
        label: "직업",
        value: "직장인",
        query_part: "직장인",
    },
    TagRule {
        keyword: "운동",
        label: "관심사",
        value: "운동",
        query_part: "운동",
    },
    TagRule {
        keyword: CASHBACK_KEYWORD,
        label: "추가 관심사",
        value: "포인트/캐시백",
        query_part: "포인트/캐시백",
    },
    TagRule {
        keyword: CHATBOT_KEYWORD,
        label: "추가 라이프스타일",
        value: "AI 챗봇 사용자",
        query_part: "AI 챗봇",
    },
];

/// Keyword-driven query interpreter
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryInterpreter;

impl QueryInterpreter {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Interpret a raw query
    #[must_use]
    pub fn interpret(&self, query: &str) -> Interpretation {
        let lower = query.to_lowercase();

        let filter_tags = self.extract_tags(&lower);
        let (total_count, query_type) = self.resolve_count(query, &lower);

        tracing::debug!(
            tags = filter_tags.len(),
            total_count,
            query_type = %query_type,
            "Interpreted query"
        );

        Interpretation {
            filter_tags,
            total_count,
            query_type,
        }
    }

    fn extract_tags(&self, lower: &str) -> Vec<FilterTag> {
        TAG_RULES
            .iter()
            .filter(|rule| lower.contains(rule.keyword))
            .map(|rule| FilterTag::new(rule.label, rule.value, rule.query_part))
            .collect()
    }

    /// First matching branch wins
    fn resolve_count(&self, query: &str, lower: &str) -> (usize, QueryType) {
        let cashback = lower.contains(CASHBACK_KEYWORD);
        let chatbot = lower.contains(CHATBOT_KEYWORD);

        if cashback && chatbot {
            (BOTH_COUNT, QueryType::Both)
        } else if cashback {
            (CASHBACK_COUNT, QueryType::Cashback)
        } else if chatbot {
            (CHATBOT_COUNT, QueryType::Chatbot)
        } else if let Some(n) = explicit_count(query) {
            (n, QueryType::Base)
        } else {
            (DEFAULT_COUNT, QueryType::Base)
        }
    }
}

/// Number in the first `<N>명` occurrence, if it fits in `usize`
#[must_use]
pub fn explicit_count(query: &str) -> Option<usize> {
    let caps = COUNT_PATTERN.captures(query)?;
    let digits = caps.get(1)?.as_str();
    match digits.parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::debug!("Ignoring unparseable count {digits:?}: {e}");
            None
        }
    }
}
