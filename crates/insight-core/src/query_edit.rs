//! Query text editing
//!
//! Conditions inside a query are comma-separated segments. Adding a
//! condition appends a segment; removing one cuts every case-insensitive
//! occurrence of its fragment and then tidies the commas around the cut,
//! so the result never has leading, trailing or doubled commas. Text inside
//! the remaining segments is left as written.

use regex::{Regex, RegexBuilder};

/// Segment separator as written into the query
pub const SEPARATOR: &str = ", ";

/// Literal, case-insensitive pattern for a condition fragment
fn fragment_pattern(fragment: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(fragment))
        .case_insensitive(true)
        .build()
        .map_err(|e| tracing::debug!(error = %e, "Fragment {fragment:?} not usable as a pattern"))
        .ok()
}

/// Whether `fragment` occurs in `query`, ignoring case
#[must_use]
pub fn contains_condition(query: &str, fragment: &str) -> bool {
    !fragment.is_empty() && fragment_pattern(fragment).is_some_and(|re| re.is_match(query))
}

/// Query with `fragment` appended, or `None` when it is already present
#[must_use]
pub fn append_condition(query: &str, fragment: &str) -> Option<String> {
    let fragment = fragment.trim();
    if fragment.is_empty() || contains_condition(query, fragment) {
        return None;
    }
    let base = query.trim();
    if base.is_empty() {
        Some(fragment.to_string())
    } else {
        Some(format!("{base}{SEPARATOR}{fragment}"))
    }
}

/// Query with every occurrence of `fragment` removed
///
/// A fragment made only of separators or whitespace removes nothing.
#[must_use]
pub fn remove_condition(query: &str, fragment: &str) -> String {
    if fragment.chars().all(|c| c == ',' || c.is_whitespace()) {
        return query.trim().to_string();
    }
    let Some(pattern) = fragment_pattern(fragment) else {
        return query.trim().to_string();
    };
    if !pattern.is_match(query) {
        tracing::debug!("Fragment {fragment:?} not present in query; leaving it unchanged");
        return query.trim().to_string();
    }

    let mut text = tidy_separators(&pattern.replace_all(query, ","));
    // joining segments can recreate the fragment; each pass removes at
    // least one non-separator character so this terminates
    while pattern.is_match(&text) {
        text = tidy_separators(&pattern.replace_all(&text, ","));
    }
    text
}

/// Trim each comma segment and drop the empty ones
///
/// Whitespace inside a segment is kept as is.
#[must_use]
pub fn tidy_separators(text: &str) -> String {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_adds_separator() {
        assert_eq!(
            append_condition("운동", "포인트/캐시백").as_deref(),
            Some("운동, 포인트/캐시백")
        );
    }

    #[test]
    fn append_is_noop_when_present_ignoring_case() {
        assert_eq!(append_condition("운동 ai 챗봇", "AI 챗봇"), None);
    }

    #[test]
    fn append_to_blank_query_has_no_leading_separator() {
        assert_eq!(append_condition("  ", "AI 챗봇").as_deref(), Some("AI 챗봇"));
    }

    #[test]
    fn remove_leading_condition() {
        assert_eq!(remove_condition("30대, 직장인", "30대"), "직장인");
    }

    #[test]
    fn remove_middle_condition_collapses_separators() {
        assert_eq!(
            remove_condition("운동, 포인트/캐시백, AI 챗봇", "포인트/캐시백"),
            "운동, AI 챗봇"
        );
    }

    #[test]
    fn remove_trailing_condition_ignoring_case() {
        assert_eq!(remove_condition("운동, ai 챗봇", "AI 챗봇"), "운동");
    }

    #[test]
    fn remove_every_occurrence() {
        let out = remove_condition("운동 좋아하는 운동 마니아", "운동");
        assert!(!out.contains("운동"));
        assert_eq!(out, "좋아하는, 마니아");
    }

    #[test]
    fn remove_last_condition_leaves_empty_query() {
        assert_eq!(remove_condition(" 30대 ", "30대"), "");
    }

    #[test]
    fn missing_fragment_leaves_query_unchanged() {
        assert_eq!(remove_condition("30대 직장인 ", "운동"), "30대 직장인");
    }

    #[test]
    fn separator_only_fragment_is_ignored() {
        assert_eq!(remove_condition("a, b", ", "), "a, b");
    }

    #[test]
    fn remove_keeps_spacing_inside_other_segments() {
        assert_eq!(remove_condition("30대, ai  챗봇", "30대"), "ai  챗봇");
        assert_eq!(
            remove_condition("운동,  직장인   50명 ,AI 챗봇", "ai 챗봇"),
            "운동, 직장인   50명"
        );
    }

    #[test]
    fn contains_matches_mixed_case_inside_hangul() {
        assert!(contains_condition("포인트/캐시백 Ai 챗봇 사용자", "AI 챗봇"));
        assert!(!contains_condition("30대 직장인", "운동"));
        assert!(!contains_condition("abc", ""));
    }

    #[test]
    fn fragment_is_matched_literally() {
        assert_eq!(remove_condition("a.c, abc", "a.c"), "abc");
    }
}
