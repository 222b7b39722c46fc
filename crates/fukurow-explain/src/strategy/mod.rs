//! Path-finding strategies, one per reasoning pattern

pub mod chain;
pub mod characteristic;
pub mod direct;
pub mod domain_range;
pub mod equivalence;
pub mod hierarchy;
pub mod inverse;
pub mod native;
pub mod restriction;

pub use chain::PropertyChainStrategy;
pub use characteristic::{
    AsymmetricStrategy, FunctionalStrategy, InverseFunctionalStrategy, IrreflexiveStrategy, ReflexiveStrategy,
    SymmetricStrategy, TransitiveStrategy,
};
pub use direct::DirectStrategy;
pub use domain_range::DomainRangeStrategy;
pub use equivalence::{EquivalentClassStrategy, EquivalentPropertyStrategy};
pub use hierarchy::{ClassHierarchyStrategy, SubPropertyStrategy};
pub use inverse::InversePropertyStrategy;
pub use native::NativeStrategy;
pub use restriction::{RestrictionKind, RestrictionStrategy};

use crate::config::ExplainConfig;
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::model::{Axiom, Individual, OwlIri, PropertyExpression};
use fukurow_dl::EntailmentOracle;
use fukurow_store::StatementStore;
use std::collections::{BTreeMap, BTreeSet};

/// Read-only collaborators shared by every strategy during one search
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub store: &'a dyn StatementStore,
    pub oracle: &'a dyn EntailmentOracle,
    pub config: &'a ExplainConfig,
}

impl<'a> SearchContext<'a> {
    pub fn new(store: &'a dyn StatementStore, oracle: &'a dyn EntailmentOracle, config: &'a ExplainConfig) -> Self {
        Self { store, oracle, config }
    }

    pub fn is_asserted(&self, axiom: &Axiom) -> bool {
        self.store.contains_statement(axiom)
    }

    /// Asserted or entailed
    pub fn holds(&self, axiom: &Axiom) -> bool {
        self.store.contains_statement(axiom) || self.oracle.is_entailed(axiom)
    }

    /// Named types of an individual, from the oracle and the store's assertions
    pub fn named_types(&self, individual: &Individual) -> BTreeSet<OwlIri> {
        let mut types = self.oracle.types_of(individual);
        for axiom in self.store.class_assertions_for(individual) {
            if let Axiom::ClassAssertion(class, _) = axiom {
                if let Some(iri) = class.as_named() {
                    types.insert(iri.clone());
                }
            }
        }
        types.retain(|iri| !iri.is_owl_thing());
        types
    }

    pub fn has_type(&self, individual: &Individual, class: &OwlIri) -> bool {
        class.is_owl_thing() || self.named_types(individual).contains(class)
    }

    /// Objects related to `individual` by `property`, asserted or entailed
    pub fn values(&self, individual: &Individual, property: &PropertyExpression) -> BTreeSet<Individual> {
        let mut values = self.oracle.property_values_of(individual, property);
        let (iri, inverted) = property.base();
        let asserted = if inverted {
            self.store.property_assertions_to(individual)
        } else {
            self.store.property_assertions_from(individual)
        };
        for axiom in asserted {
            if let Axiom::ObjectPropertyAssertion(p, s, o) = axiom.normalized() {
                if p.is_named(iri) {
                    values.insert(if inverted { s } else { o });
                }
            }
        }
        values
    }
}

/// One path-finding procedure specialized to a reasoning pattern.
///
/// Strategies hold no mutable state; the result depends only on the target
/// and the collaborators in the context.
pub trait Strategy: Send + Sync {
    /// Get the strategy name
    fn name(&self) -> &'static str;

    /// Get the strategy description
    fn description(&self) -> &'static str;

    /// Get the strategy priority (lower = preferred)
    fn priority(&self) -> i32 {
        100
    }

    /// Check if this strategy applies to the given target
    fn can_explain(&self, target: &QueryTarget) -> bool;

    /// Find justification paths for the target
    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>>;
}

/// Strategy registry
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    /// Registry holding every systematic strategy. The oracle-native fallback
    /// is run by the engine itself and is not part of it.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DirectStrategy));
        registry.register(Box::new(SubPropertyStrategy));
        registry.register(Box::new(InversePropertyStrategy));
        registry.register(Box::new(EquivalentPropertyStrategy));
        registry.register(Box::new(PropertyChainStrategy));
        registry.register(Box::new(EquivalentClassStrategy));
        registry.register(Box::new(ClassHierarchyStrategy));
        registry.register(Box::new(DomainRangeStrategy));
        registry.register(Box::new(TransitiveStrategy));
        registry.register(Box::new(SymmetricStrategy));
        registry.register(Box::new(FunctionalStrategy));
        registry.register(Box::new(InverseFunctionalStrategy));
        registry.register(Box::new(ReflexiveStrategy));
        registry.register(Box::new(AsymmetricStrategy));
        registry.register(Box::new(IrreflexiveStrategy));
        for kind in RestrictionKind::ALL {
            registry.register(Box::new(RestrictionStrategy::new(kind)));
        }
        registry
    }

    /// Register a strategy
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Strategy> {
        self.strategies.iter().find(|s| s.name() == name).map(|s| s.as_ref())
    }

    /// Strategies ordered by effective priority, then name
    pub fn ordered(&self, config: &ExplainConfig) -> Vec<&dyn Strategy> {
        let mut ordered: Vec<&dyn Strategy> = self.strategies.iter().map(|s| s.as_ref()).collect();
        ordered.sort_by_key(|s| (config.priority_for(s.name(), s.priority()), s.name()));
        ordered
    }

    /// Effective priority of every registered strategy
    pub fn priorities(&self, config: &ExplainConfig) -> BTreeMap<String, i32> {
        self.strategies
            .iter()
            .map(|s| (s.name().to_string(), config.priority_for(s.name(), s.priority())))
            .collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Reasoning type of the most frequent schema category in a statement set.
/// Ties go to the category seen first; no schema statement gives `fallback`.
pub(crate) fn dominant_reasoning_type(axioms: &[Axiom], fallback: ReasoningType) -> ReasoningType {
    let mut counts: Vec<(ReasoningType, usize)> = Vec::new();
    for reasoning_type in axioms.iter().filter_map(|ax| ReasoningType::from_kind(ax.kind())) {
        match counts.iter_mut().find(|(t, _)| *t == reasoning_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((reasoning_type, 1)),
        }
    }
    counts
        .iter()
        .fold(None::<(ReasoningType, usize)>, |best, &(t, n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((t, n)),
        })
        .map(|(t, _)| t)
        .unwrap_or(fallback)
}

/// Normalized property assertion over a possibly inverted property
pub(crate) fn assertion(property: &PropertyExpression, subject: &Individual, object: &Individual) -> Axiom {
    Axiom::ObjectPropertyAssertion(property.clone(), subject.clone(), object.clone()).normalized()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = StrategyRegistry::with_defaults();
        let config = ExplainConfig::default();
        let ordered = registry.ordered(&config);
        assert_eq!(ordered[0].name(), "direct");
        assert_eq!(ordered[1].name(), "sub_property");
        assert!(registry.get("class_hierarchy").is_some());
        assert!(registry.get("oracle_native").is_none());

        let config = config.with_priority("class_hierarchy", 0);
        assert_eq!(registry.ordered(&config)[0].name(), "class_hierarchy");
    }

    #[test]
    fn test_dominant_reasoning_type() {
        let axioms = vec![
            Axiom::class_assertion(&iri("Man"), &ind("john")),
            Axiom::subclass(&iri("Man"), &iri("Person")),
            Axiom::ObjectPropertyDomain(prop("hasChild"), class("Parent")),
            Axiom::ObjectPropertyRange(prop("hasChild"), class("Person")),
        ];
        assert_eq!(dominant_reasoning_type(&axioms, ReasoningType::OracleNative), ReasoningType::DomainRange);
        assert_eq!(
            dominant_reasoning_type(&axioms[..2], ReasoningType::OracleNative),
            ReasoningType::Subsumption
        );
        assert_eq!(
            dominant_reasoning_type(&axioms[..1], ReasoningType::OracleNative),
            ReasoningType::OracleNative
        );
    }

    #[test]
    fn test_context_merges_asserted_and_inferred_values() {
        let (store, kb) = knowledge_base(vec![
            Axiom::InverseProperties(prop("hasChild"), prop("hasParent")),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        assert!(ctx.values(&ind("bob"), &prop("hasParent")).contains(&ind("john")));
        let inverse = PropertyExpression::inverse_of(prop("hasChild"));
        assert!(ctx.values(&ind("bob"), &inverse).contains(&ind("john")));
    }
}
