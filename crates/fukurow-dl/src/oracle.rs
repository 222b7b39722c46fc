//! Entailment oracle interface

use fukurow_core::model::{Axiom, Individual, OwlIri, PropertyExpression};
use std::collections::BTreeSet;

/// Answers entailment questions about one knowledge base.
///
/// Results come back as ordered sets so that callers iterating over them
/// behave deterministically.
pub trait EntailmentOracle: Send + Sync {
    /// Whether the statement follows from the knowledge base
    fn is_entailed(&self, axiom: &Axiom) -> bool;

    /// Named types of the individual, asserted or inferred. `owl:Thing` is omitted.
    fn types_of(&self, individual: &Individual) -> BTreeSet<OwlIri>;

    /// Objects related to the individual by the property, asserted or inferred
    fn property_values_of(&self, individual: &Individual, property: &PropertyExpression) -> BTreeSet<Individual>;

    /// One native justification: a set of asserted statements entailing `axiom`
    fn justification(&self, _axiom: &Axiom) -> Option<Vec<Axiom>> {
        None
    }

    /// Convenience wrapper for named properties
    fn values_of(&self, individual: &Individual, property: &OwlIri) -> BTreeSet<Individual> {
        self.property_values_of(individual, &PropertyExpression::ObjectProperty(property.clone()))
    }

    fn has_type(&self, individual: &Individual, class: &OwlIri) -> bool {
        class.is_owl_thing() || self.types_of(individual).contains(class)
    }
}
