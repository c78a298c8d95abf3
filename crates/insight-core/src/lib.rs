//! Panel Insight Core
//!
//! The query-to-result pipeline:
//! - Interprets a natural-language audience description into filter tags,
//!   a target count and an interest classification
//! - Synthesises a matching mock panel list
//! - Selects canned strategy reports and static recommendations
//! - Edits query text when conditions are added or removed
//!
//! # Example
//!
//! ```rust
//! use insight_core::ResultAssembler;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let bundle = ResultAssembler::new().assemble("30대 직장인 50명", &mut rng);
//!
//! assert_eq!(bundle.total_count, 50);
//! assert_eq!(bundle.filter_tags.len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assembler;
pub mod catalog;
pub mod factory;
pub mod interpreter;
pub mod query_edit;
pub mod report;
pub mod types;

pub use assembler::ResultAssembler;
pub use catalog::{static_recommendations, StrategyCatalog, Trigger};
pub use factory::MockPanelFactory;
pub use interpreter::QueryInterpreter;
pub use report::{ReportBlock, ReportDocument, ReportSection, TableBlock};
pub use types::{
    ActionData, FilterTag, Interpretation, PanelRecord, QueryType, Recommendation,
    RecommendationAction, ResultBundle, StrategyReport,
};

/// Common imports
pub mod prelude {
    pub use crate::{
        FilterTag, PanelRecord, QueryType, Recommendation, ResultAssembler, ResultBundle,
        StrategyReport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
