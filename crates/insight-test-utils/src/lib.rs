//! Testing utilities for the Panel Insight workspace
//!
//! Shared fixtures and port doubles for the core, export and session crates.

#![allow(missing_docs)]

use insight_core::catalog::health_coach_strategy;
use insight_core::{PanelRecord, QueryType, ReportDocument, StrategyReport};
use insight_export::{DocumentSink, ExportError, ReportExporter};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

pub const SEED: u64 = 0x5eed;

/// Deterministic RNG for identifier draws
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Queries with their expected count and classification
pub const QUERY_CORPUS: &[(&str, usize, QueryType)] = &[
    ("30대 직장인 중 운동에 관심 있는 사람 100명", 100, QueryType::Base),
    ("포인트/캐시백 AI 챗봇", 30, QueryType::Both),
    ("운동, 포인트/캐시백", 45, QueryType::Cashback),
    ("ai 챗봇 쓰는 직장인 200명", 60, QueryType::Chatbot),
    ("서울 사는 20대 250명", 250, QueryType::Base),
    ("", 100, QueryType::Base),
];

/// Panel record with fixed field values
pub fn sample_panel(id: &str) -> PanelRecord {
    PanelRecord {
        id: id.to_string(),
        age: 34,
        gender: "여성".into(),
        location: "서울 마포구".into(),
        job: "IT 개발자".into(),
        interests: vec!["운동".into(), "재테크".into()],
        bio: "IT 개발자입니다. 운동, 재테크에 관심이 많습니다.".into(),
    }
}

/// The builtin strategy
pub fn sample_strategy() -> StrategyReport {
    health_coach_strategy()
}

/// Exporter that always fails to package
#[derive(Debug, Default)]
pub struct FailingExporter;

impl ReportExporter for FailingExporter {
    fn export(&self, _report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Package("simulated packaging failure".into()))
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}

/// Sink keeping saved documents in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// File names in save order
    pub fn file_names(&self) -> Vec<String> {
        self.saved.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn bytes_of(&self, file_name: &str) -> Option<Vec<u8>> {
        self.saved
            .lock()
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn len(&self) -> usize {
        self.saved.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.lock().is_empty()
    }
}

impl DocumentSink for MemorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        self.saved.lock().push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("memory").join(file_name))
    }
}

/// Sink that is never reachable
#[derive(Debug, Default)]
pub struct UnavailableSink;

impl DocumentSink for UnavailableSink {
    fn save(&self, _file_name: &str, _bytes: &[u8]) -> Result<PathBuf, ExportError> {
        Err(ExportError::SinkUnavailable("no download target".into()))
    }
}
