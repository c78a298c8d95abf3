//! Canned strategy reports and recommendations
//!
//! The strategy catalog is a list of entries, each pairing a trigger with the
//! report it yields. Selection keeps catalog order and returns every entry
//! whose trigger fires.

use crate::report::{ReportDocument, TableBlock};
use crate::types::{ActionData, Recommendation, RecommendationAction, StrategyReport};

/// Queries shorter than this (in characters) never select a strategy
pub const MIN_STRATEGY_QUERY_CHARS: usize = 3;

/// Condition under which a catalog entry is offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Fires when the query contains any of the fragments (case-sensitive)
    AnyOf(Vec<String>),
    /// Fires when the query contains every fragment (case-sensitive)
    AllOf(Vec<String>),
}

impl Trigger {
    /// Convenience constructor for [`Trigger::AnyOf`]
    #[must_use]
    pub fn any_of(fragments: &[&str]) -> Self {
        Self::AnyOf(fragments.iter().map(|f| (*f).to_string()).collect())
    }

    #[must_use]
    pub fn fires(&self, query: &str) -> bool {
        match self {
            Trigger::AnyOf(parts) => parts.iter().any(|p| query.contains(p.as_str())),
            Trigger::AllOf(parts) => parts.iter().all(|p| query.contains(p.as_str())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub trigger: Trigger,
    pub report: StrategyReport,
}

/// Strategy report catalog
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    entries: Vec<CatalogEntry>,
}

impl StrategyCatalog {
    /// Empty catalog
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Catalog shipped with the application
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty().with_entry(Trigger::any_of(&["운동", "직장인"]), health_coach_strategy())
    }

    /// Add an entry after the existing ones
    #[must_use]
    pub fn with_entry(mut self, trigger: Trigger, report: StrategyReport) -> Self {
        self.entries.push(CatalogEntry { trigger, report });
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whose triggers fire for `query`
    #[must_use]
    pub fn select(&self, query: &str) -> Vec<StrategyReport> {
        if query.chars().count() < MIN_STRATEGY_QUERY_CHARS {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| e.trigger.fires(query))
            .map(|e| e.report.clone())
            .collect()
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The fixed pair of insights offered with every non-empty result
#[must_use]
pub fn static_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            id: "rec-001".into(),
            text: "이 그룹은 평균보다 '포인트/캐시백 혜택' 선호도가 3.2배 높습니다.".into(),
            action: RecommendationAction {
                button_text: "+ '포인트/캐시백 선호' 조건 추가하기".into(),
                data: ActionData {
                    kind: "interest".into(),
                    value: "포인트/캐시백".into(),
                    query_part: "포인트/캐시백".into(),
                },
            },
        },
        Recommendation {
            id: "rec-002".into(),
            text: "이 그룹의 78%가 'AI 챗봇'을 주 3회 이상 사용합니다.".into(),
            action: RecommendationAction {
                button_text: "+ 'AI 챗봇 사용자' 조건 추가하기".into(),
                data: ActionData {
                    kind: "lifestyle".into(),
                    value: "ai_chatbot_user".into(),
                    query_part: "AI 챗봇".into(),
                },
            },
        },
    ]
}

/// Subscription health-coach proposal
#[must_use]
pub fn health_coach_strategy() -> StrategyReport {
    StrategyReport {
        id: "strategy-001".into(),
        strategy_name: "건강 구독 기반 AI 헬스 코치".into(),
        core_target: "30대 여성 직장인, 스마트워치 사용자".into(),
        strategy_type: "제품 전략".into(),
        keywords: "건강관리 / 구독 / 개인화".into(),
        effect: "지속적 고객 접점(ARR) 확보".into(),
        report: ReportDocument {
            project_name: "건강 구독 기반 AI 헬스 코치 서비스".into(),
            project_subtitle: "AI를 활용한 개인 맞춤형 루틴형 건강관리 제안서".into(),
            summary_table: TableBlock::new(
                &[],
                &[
                    &["프로젝트명", "AI 헬스 코치 (가칭)"],
                    &["타겟 고객", "수도권 30대 여성 직장인, 스마트워치 사용자, 건강 관심층"],
                    &["핵심 인사이트", "'꾸준함' 관련 키워드 사용률 2.3배 증가, 웰니스 소비 1.8배 상승"],
                    &["핵심 제안", "AI가 개인의 루틴 데이터를 분석해 지속 가능한 건강 습관을 디자인"],
                ],
            ),
            problem_definition: "바쁜 직장인들은 건강관리의 필요성을 인식하고 있으나, 지속적 실천과 맞춤형 루틴 관리의 부재로 실행률이 낮습니다. 기존 헬스케어 앱은 일시적 사용에 머무르고 있으며, 구독형 루틴 제공 서비스의 시장 공백이 존재합니다.".into(),
            core_value_highlight: "\"꾸준함을 디자인한다\"".into(),
            core_value_text: "데이터 기반 AI 분석으로 개인의 패턴에 최적화된 운동/영양/휴식 루틴을 자동 추천하여 건강한 습관을 형성하게 합니다.".into(),
            insight_table: TableBlock::new(
                &["지표", "수치", "의미"],
                &[
                    &["스마트워치 보유율", "64%", "건강 관련 데이터 수집 기반 확대"],
                    &["헬스 관련 소비 증가율", "+1.8배", "웰니스 산업 성장세 강화"],
                    &["'꾸준함' 키워드 검색량", "+2.3배", "지속 가능한 루틴화 욕구 증가"],
                    &["'홈트레이닝' 언급량", "+1.6배", "집중적 자기관리 트렌드 강화"],
                ],
            ),
            service_table: TableBlock::new(
                &["항목", "내용"],
                &[
                    &["서비스 형태", "AI 기반 건강 루틴 구독형 코칭 서비스"],
                    &["핵심 기능", "데이터 분석 / 루틴 자동 추천 / AI 피드백"],
                    &["차별점", "지속성 중심의 구독 + 개인화 루틴 추천 결합"],
                    &["구독 모델", "무료 베이직 / 유료 프리미엄 / 전문가 매칭"],
                ],
            ),
            strategy_proposal: vec![
                "스마트워치 연동형 MVP 출시".into(),
                "B2B 제휴 (직장인 복지 플랫폼 / 보험사 등)".into(),
                "AI 피드백 기능 및 목표 기반 루틴 강화".into(),
            ],
            effect_table: TableBlock::new(
                &["구분", "정량적 효과", "정성적 효과"],
                &[
                    &["사용자", "앱 유지율 +30%", "루틴화 및 건강 동기 부여"],
                    &["기업", "구독 매출 +15%", "브랜드 신뢰도 향상"],
                    &["사회", "건강 실천율 향상", "헬스케어 데이터 활성화"],
                ],
            ),
        },
    }
}
