//! Mock panel synthesis
//!
//! Every attribute except the identifier is a function of the record index
//! and the query classification:
//! - age cycles through 30..=39
//! - gender alternates by parity
//! - location and job cycle through fixed catalogs
//! - interests extend the classification's base set on index multiples
//!
//! The identifier is drawn from the caller's random source so tests can
//! seed it.

use crate::types::{PanelRecord, QueryType};
use indexmap::IndexSet;
use rand::Rng;

pub const JOBS: [&str; 8] = [
    "IT 기획자",
    "마케터",
    "디자이너",
    "개발자",
    "금융업",
    "데이터 분석가",
    "프리랜서",
    "학생",
];

pub const LOCATIONS: [&str; 6] = [
    "서울 강남구",
    "경기 성남시",
    "서울 마포구",
    "서울 서초구",
    "경기 판교",
    "서울 송파구",
];

pub const BASE_AGE: u32 = 30;

/// Interests appended when `index % divisor == 0`
const PERIODIC_INTERESTS: [(usize, &str); 3] = [(3, "재테크"), (4, "맛집탐방"), (5, "OTT시청")];

/// Generator for synthetic panel lists
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPanelFactory;

impl MockPanelFactory {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate exactly `count` records
    pub fn generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        query_type: QueryType,
        rng: &mut R,
    ) -> Vec<PanelRecord> {
        (0..count)
            .map(|i| self.panel_at(i, query_type, rng))
            .collect()
    }

    /// Record at position `index`
    pub fn panel_at<R: Rng + ?Sized>(
        &self,
        index: usize,
        query_type: QueryType,
        rng: &mut R,
    ) -> PanelRecord {
        let id = format!("P-{}", rng.gen_range(10_000..100_000));
        let job = JOBS[index % JOBS.len()];
        let interests = interests_at(index, query_type);
        let bio = format!("{job}입니다. {}에 관심이 많습니다.", interests.join(", "));

        PanelRecord {
            id,
            // index % 10 < 10, never truncates
            age: BASE_AGE + (index % 10) as u32,
            gender: if index % 2 == 0 { "남성" } else { "여성" }.to_string(),
            location: LOCATIONS[index % LOCATIONS.len()].to_string(),
            job: job.to_string(),
            interests,
            bio,
        }
    }
}

/// Ordered, duplicate-free interest list for a record
#[must_use]
pub fn interests_at(index: usize, query_type: QueryType) -> Vec<String> {
    let mut set: IndexSet<&str> = query_type.base_interests().iter().copied().collect();
    for (divisor, interest) in PERIODIC_INTERESTS {
        if index % divisor == 0 {
            set.insert(interest);
        }
    }
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn first_record_gets_every_periodic_interest() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = MockPanelFactory::new().panel_at(0, QueryType::Both, &mut rng);
        assert_eq!(
            p.interests,
            vec!["운동", "포인트/캐시백", "AI 챗봇", "재테크", "맛집탐방", "OTT시청"]
        );
        assert_eq!(p.age, 30);
        assert_eq!(p.gender, "남성");
        assert_eq!(p.location, "서울 강남구");
        assert_eq!(p.job, "IT 기획자");
        assert_eq!(
            p.bio,
            "IT 기획자입니다. 운동, 포인트/캐시백, AI 챗봇, 재테크, 맛집탐방, OTT시청에 관심이 많습니다."
        );
    }

    #[test]
    fn attributes_cycle_with_index() {
        let mut rng = StdRng::seed_from_u64(1);
        let list = MockPanelFactory::new().generate(25, QueryType::Base, &mut rng);
        assert_eq!(list[13].age, 33);
        assert_eq!(list[13].gender, "여성");
        assert_eq!(list[13].location, LOCATIONS[1]);
        assert_eq!(list[13].job, JOBS[5]);
        assert_eq!(list[7].interests, vec!["운동"]);
        assert_eq!(list[12].interests, vec!["운동", "재테크", "맛집탐방"]);
    }

    #[test]
    fn identifiers_follow_format_and_depend_on_seed() {
        let factory = MockPanelFactory::new();
        let a = factory.generate(5, QueryType::Base, &mut StdRng::seed_from_u64(3));
        let b = factory.generate(5, QueryType::Base, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        for p in &a {
            let digits = p.id.strip_prefix("P-").unwrap();
            assert_eq!(digits.len(), 5);
            let n: u32 = digits.parse().unwrap();
            assert!((10_000..100_000).contains(&n));
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(MockPanelFactory::new()
            .generate(0, QueryType::Chatbot, &mut rng)
            .is_empty());
    }
}
