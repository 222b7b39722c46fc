//! Explanation engine: runs the strategies for one target and assembles the result

use crate::cache::{CacheOutcome, ExplanationCache};
use crate::config::ExplainConfig;
use crate::dedup::Deduplicator;
use crate::error::{ExplainError, ExplainResult};
use crate::path::{JustificationPath, QueryTarget};
use crate::strategy::{DirectStrategy, NativeStrategy, SearchContext, Strategy, StrategyRegistry};
use crate::trace::{DeepTracer, TRACE_SOURCE};
use fukurow_core::model::{Axiom, Individual, OwlIri};
use fukurow_dl::EntailmentOracle;
use fukurow_store::StatementStore;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Default priority of traced paths during deduplication
const TRACE_PRIORITY: i32 = 90;

/// Justification path discovery over one store and its oracle
pub struct ExplanationEngine<'a> {
    store: &'a dyn StatementStore,
    oracle: &'a dyn EntailmentOracle,
    config: ExplainConfig,
    registry: StrategyRegistry,
}

impl<'a> ExplanationEngine<'a> {
    /// Engine with the default configuration and every default strategy
    pub fn new(store: &'a dyn StatementStore, oracle: &'a dyn EntailmentOracle) -> Self {
        Self { store, oracle, config: ExplainConfig::default(), registry: StrategyRegistry::with_defaults() }
    }

    pub fn with_config(
        store: &'a dyn StatementStore,
        oracle: &'a dyn EntailmentOracle,
        config: ExplainConfig,
    ) -> ExplainResult<Self> {
        config.validate()?;
        Ok(Self { store, oracle, config, registry: StrategyRegistry::with_defaults() })
    }

    /// Replace the strategy set
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Paths explaining `individual rdf:type class`
    pub fn find_all_explanation_paths(&self, individual: &Individual, class: &OwlIri) -> Vec<JustificationPath> {
        self.explain(&QueryTarget::class_membership(individual, class))
    }

    /// Paths explaining `subject property object`
    pub fn find_property_assertion_paths(
        &self,
        subject: &Individual,
        property: &OwlIri,
        object: &Individual,
    ) -> Vec<JustificationPath> {
        self.explain(&QueryTarget::property_assertion(subject, property, object))
    }

    /// Paths for a fact statement. Schema statements are rejected.
    pub fn explain_statement(&self, axiom: &Axiom) -> ExplainResult<Vec<JustificationPath>> {
        if axiom.is_schema() {
            return Err(ExplainError::UnsupportedTarget(fukurow_core::format::axiom(axiom)));
        }
        let target = QueryTarget::from_axiom(axiom)?;
        Ok(self.explain(&target))
    }

    /// [`explain`](Self::explain) memoized in `cache` under the target's full-IRI key
    pub fn explain_cached(&self, target: &QueryTarget, cache: &ExplanationCache) -> CacheOutcome {
        cache.get_or_compute(&target.cache_key(), || self.explain(target))
    }

    /// All distinct justification paths for the target, simplest first.
    ///
    /// A target that is neither asserted nor entailed yields no paths.
    pub fn explain(&self, target: &QueryTarget) -> Vec<JustificationPath> {
        let ctx = SearchContext::new(self.store, self.oracle, &self.config);
        let statement = target.to_axiom();
        let asserted = ctx.is_asserted(&statement);

        if !asserted && !self.oracle.is_entailed(&statement) {
            debug!(target = %target, "Target neither asserted nor entailed");
            return Vec::new();
        }

        if asserted && self.config.short_circuit_direct {
            info!("Explained {}: asserted directly", target);
            return vec![JustificationPath::direct(statement, DirectStrategy::NAME)];
        }

        let mut candidates = self.run_strategies(target, &ctx);
        if self.config.deep_trace {
            let traced = DeepTracer::new(&ctx).trace(target);
            debug!(strategy = TRACE_SOURCE, paths = traced.len(), "Trace-back finished");
            candidates.extend(traced);
        }
        if self.config.fallback {
            let native = NativeStrategy;
            if native.can_explain(target) {
                candidates.extend(self.run_isolated(&native, target, &ctx));
            }
        }

        let found = candidates.len();
        let admissible: Vec<JustificationPath> = candidates.into_iter().filter(|p| self.admissible(p)).collect();
        let mut paths = Deduplicator::with_priorities(self.priorities()).dedupe(admissible);
        paths.sort_by_cached_key(|p| (p.complexity(), Deduplicator::signature(p)));

        info!("Explained {}: {} candidate paths, {} distinct", target, found, paths.len());
        paths
    }

    /// Effective priorities of every path producer, including trace-back and the fallback
    pub fn priorities(&self) -> BTreeMap<String, i32> {
        let mut priorities = self.registry.priorities(&self.config);
        priorities.insert(TRACE_SOURCE.to_string(), self.config.priority_for(TRACE_SOURCE, TRACE_PRIORITY));
        priorities.insert(
            NativeStrategy::NAME.to_string(),
            self.config.priority_for(NativeStrategy::NAME, NativeStrategy.priority()),
        );
        priorities
    }

    fn run_strategies(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> Vec<JustificationPath> {
        let applicable: Vec<&dyn Strategy> =
            self.registry.ordered(&self.config).into_iter().filter(|s| s.can_explain(target)).collect();

        if self.config.parallel {
            applicable
                .par_iter()
                .map(|strategy| self.run_isolated(*strategy, target, ctx))
                .collect::<Vec<_>>()
                .into_iter()
                .flatten()
                .collect()
        } else {
            applicable.iter().flat_map(|strategy| self.run_isolated(*strategy, target, ctx)).collect()
        }
    }

    /// Run one strategy; a failure contributes no paths
    fn run_isolated(
        &self,
        strategy: &dyn Strategy,
        target: &QueryTarget,
        ctx: &SearchContext<'_>,
    ) -> Vec<JustificationPath> {
        match strategy.explain(target, ctx) {
            Ok(mut paths) => {
                paths.truncate(self.config.max_paths_per_strategy);
                debug!(strategy = strategy.name(), paths = paths.len(), "Strategy finished");
                paths
            }
            Err(e) => {
                warn!("Strategy {} failed for {}: {}", strategy.name(), target, e);
                Vec::new()
            }
        }
    }

    fn admissible(&self, path: &JustificationPath) -> bool {
        !path.is_empty()
            && !(path.is_inferred() && path.complexity() < 2)
            && path.complexity() <= self.config.max_chain_length
    }
}
