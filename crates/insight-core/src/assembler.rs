//! Result assembly
//!
//! Runs the interpreter, the panel factory and the strategy catalog over one
//! query and packs their output into a [`ResultBundle`].

use crate::catalog::{static_recommendations, StrategyCatalog};
use crate::factory::MockPanelFactory;
use crate::interpreter::QueryInterpreter;
use crate::types::ResultBundle;
use rand::Rng;

/// Default number of sample panels shown next to the count
pub const DEFAULT_SAMPLE_SIZE: usize = 3;
/// Default cap on generated records
pub const DEFAULT_PANEL_LIMIT: usize = 10_000;

/// Mock search pipeline
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    interpreter: QueryInterpreter,
    factory: MockPanelFactory,
    catalog: StrategyCatalog,
    sample_size: usize,
    panel_limit: usize,
}

impl ResultAssembler {
    /// Assembler over the builtin catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            interpreter: QueryInterpreter::new(),
            factory: MockPanelFactory::new(),
            catalog: StrategyCatalog::builtin(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            panel_limit: DEFAULT_PANEL_LIMIT,
        }
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: StrategyCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Cap the generated list; `total_count` still reports the full figure
    #[must_use]
    pub fn with_panel_limit(mut self, panel_limit: usize) -> Self {
        self.panel_limit = panel_limit;
        self
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Produce the bundle for `query`
    ///
    /// Same query, same shape: count, tags and classification are fixed by
    /// the text; only panel identifiers depend on `rng`.
    pub fn assemble<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> ResultBundle {
        let interpretation = self.interpreter.interpret(query);

        let generated = interpretation.total_count.min(self.panel_limit);
        if generated < interpretation.total_count {
            tracing::warn!(
                requested = interpretation.total_count,
                generated,
                "Panel list truncated to configured limit"
            );
        }

        let full_panel_list = self
            .factory
            .generate(generated, interpretation.query_type, rng);
        let sample_panels = full_panel_list
            .iter()
            .take(self.sample_size)
            .cloned()
            .collect();

        let recommendations = if interpretation.total_count > 0 {
            static_recommendations()
        } else {
            Vec::new()
        };

        let strategy_cards = self.catalog.select(query);

        tracing::info!(
            total_count = interpretation.total_count,
            query_type = %interpretation.query_type,
            strategies = strategy_cards.len(),
            "Assembled result bundle"
        );

        ResultBundle {
            total_count: interpretation.total_count,
            query_type: interpretation.query_type,
            filter_tags: interpretation.filter_tags,
            sample_panels,
            recommendations,
            strategy_cards,
            full_panel_list,
        }
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}
