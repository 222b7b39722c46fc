//! Deep trace-back
//!
//! Strategies stop at the first inferred statement they meet. Trace-back keeps
//! replacing such a statement with the statements it was derived from until
//! only asserted ones are left, giving one end-to-end chain per target.

use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use crate::strategy::hierarchy::subclass_hops;
use crate::strategy::{dominant_reasoning_type, SearchContext};
use fukurow_core::format;
use fukurow_core::model::{Axiom, AxiomType, ClassExpression, Individual, OwlIri, PropertyExpression};
use fukurow_store::HierarchyDirection;
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Name under which traced paths are attributed
pub const TRACE_SOURCE: &str = "deep_trace";

pub struct DeepTracer<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    /// Sub-goals currently being resolved
    in_progress: HashSet<QueryTarget>,
}

impl<'c, 'a> DeepTracer<'c, 'a> {
    pub fn new(ctx: &'c SearchContext<'a>) -> Self {
        Self { ctx, in_progress: HashSet::new() }
    }

    /// End-to-end chains for the target, each ending in asserted statements only
    pub fn trace(&mut self, target: &QueryTarget) -> Vec<JustificationPath> {
        if self.ctx.is_asserted(&target.to_axiom()) {
            return Vec::new();
        }
        let paths = match target {
            QueryTarget::ClassMembership { individual, class } => {
                let mut paths = self.domain_range_traces(individual, class);
                paths.extend(self.subclass_traces(individual, class));
                paths
            }
            QueryTarget::PropertyAssertion { subject, property, object } => {
                self.property_trace(subject, property, object).into_iter().collect()
            }
        };
        debug!(target = %target, paths = paths.len(), "Deep trace finished");
        paths
    }

    fn domain_range_traces(&mut self, individual: &Individual, class: &OwlIri) -> Vec<JustificationPath> {
        let ctx = self.ctx;
        let target_class = ClassExpression::Named(class.clone());
        let mut paths = Vec::new();

        for (axiom_type, label) in [
            (AxiomType::ObjectPropertyDomain, "domain"),
            (AxiomType::ObjectPropertyRange, "range"),
        ] {
            for axiom in ctx.store.statements_of_kind(axiom_type) {
                let Some((property, (subject, object))) = usage(ctx, axiom, &target_class, individual) else {
                    continue;
                };
                let fact = Axiom::ObjectPropertyAssertion(property.clone(), subject.clone(), object.clone());
                if ctx.is_asserted(&fact) {
                    continue;
                }
                let Some(mut axioms) = self.resolve_edge(&fact, 1) else { continue };
                axioms.push(axiom.clone());

                let heading = if label == "domain" { "Deep domain trace" } else { "Deep range trace" };
                paths.push(traced(axioms, ReasoningType::DomainRange, |steps| {
                    format!("{}: {} {} via {} steps", heading, format::property(property), label, steps)
                }));
            }
        }
        paths
    }

    fn subclass_traces(&mut self, individual: &Individual, class: &OwlIri) -> Vec<JustificationPath> {
        let ctx = self.ctx;
        let types = ctx.named_types(individual);
        let mut paths = Vec::new();

        for (start, edges) in descendants(ctx, class) {
            if !types.contains(&start) {
                continue;
            }
            let membership = Axiom::class_assertion(&start, individual);
            if ctx.is_asserted(&membership) {
                continue;
            }
            let Some(mut axioms) = self.resolve_type(individual, &start, 1) else { continue };
            let steps = edges.len();
            axioms.extend(edges);

            let description = format!(
                "Deep subclass trace: {} → {} via {} steps",
                start.short_form(),
                class.short_form(),
                steps
            );
            paths.push(traced(axioms, ReasoningType::Subsumption, |_| description));
        }
        paths
    }

    fn property_trace(&mut self, subject: &Individual, property: &OwlIri, object: &Individual) -> Option<JustificationPath> {
        let fact = Axiom::property_assertion(property, subject, object);
        let axioms = self.resolve_edge(&fact, 1)?;
        if axioms.len() < 2 {
            return None;
        }
        let reasoning_type = dominant_reasoning_type(&axioms, ReasoningType::OracleNative);
        Some(traced(axioms, reasoning_type, |steps| {
            format!(
                "Deep property trace: {} {} {} via {} steps",
                subject.short_form(),
                property.short_form(),
                object.short_form(),
                steps
            )
        }))
    }

    /// Asserted statements establishing `individual rdf:type class`
    fn resolve_type(&mut self, individual: &Individual, class: &OwlIri, depth: usize) -> Option<Vec<Axiom>> {
        let membership = Axiom::class_assertion(class, individual);
        if self.ctx.is_asserted(&membership) {
            return Some(vec![membership]);
        }
        let goal = QueryTarget::class_membership(individual, class);
        if depth > self.ctx.config.max_depth || !self.in_progress.insert(goal.clone()) {
            return None;
        }
        let result = self
            .type_by_usage(individual, class, depth)
            .or_else(|| self.type_by_subclass(individual, class, depth))
            .or_else(|| self.ctx.oracle.justification(&membership));
        self.in_progress.remove(&goal);
        result
    }

    fn type_by_usage(&mut self, individual: &Individual, class: &OwlIri, depth: usize) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        let target_class = ClassExpression::Named(class.clone());
        let candidates = ctx
            .store
            .statements_of_kind(AxiomType::ObjectPropertyDomain)
            .into_iter()
            .chain(ctx.store.statements_of_kind(AxiomType::ObjectPropertyRange));
        for axiom in candidates {
            let Some((property, (subject, object))) = usage(ctx, axiom, &target_class, individual) else {
                continue;
            };
            let fact = Axiom::ObjectPropertyAssertion(property.clone(), subject, object);
            if let Some(mut axioms) = self.resolve_edge(&fact, depth + 1) {
                axioms.push(axiom.clone());
                return Some(axioms);
            }
        }
        None
    }

    fn type_by_subclass(&mut self, individual: &Individual, class: &OwlIri, depth: usize) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        for (sub, axiom) in subclass_hops(ctx, class) {
            if !ctx.has_type(individual, &sub) {
                continue;
            }
            if let Some(mut axioms) = self.resolve_type(individual, &sub, depth + 1) {
                axioms.push(axiom);
                return Some(axioms);
            }
        }
        None
    }

    /// Asserted statements establishing a property assertion
    fn resolve_edge(&mut self, fact: &Axiom, depth: usize) -> Option<Vec<Axiom>> {
        let fact = fact.normalized();
        if self.ctx.is_asserted(&fact) {
            return Some(vec![fact]);
        }
        let Axiom::ObjectPropertyAssertion(PropertyExpression::ObjectProperty(property), subject, object) = &fact
        else {
            return None;
        };
        let goal = QueryTarget::property_assertion(subject, property, object);
        if depth > self.ctx.config.max_depth || !self.in_progress.insert(goal.clone()) {
            return None;
        }
        let result = self
            .edge_by_sub_property(property, subject, object, depth)
            .or_else(|| self.edge_by_inverse(property, subject, object, depth))
            .or_else(|| self.edge_by_symmetry(property, subject, object, depth))
            .or_else(|| self.edge_by_transitivity(property, subject, object, depth))
            .or_else(|| self.ctx.oracle.justification(&fact));
        self.in_progress.remove(&goal);
        result
    }

    fn edge_by_sub_property(
        &mut self,
        property: &OwlIri,
        subject: &Individual,
        object: &Individual,
        depth: usize,
    ) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        for axiom in ctx.store.sub_property_axioms_for(property, HierarchyDirection::Super) {
            let Axiom::SubPropertyOf(sub, _) = axiom else { continue };
            let fact = Axiom::ObjectPropertyAssertion(sub.clone(), subject.clone(), object.clone());
            if !ctx.holds(&fact.normalized()) {
                continue;
            }
            if let Some(mut axioms) = self.resolve_edge(&fact, depth + 1) {
                axioms.push(axiom.clone());
                return Some(axioms);
            }
        }
        None
    }

    fn edge_by_inverse(
        &mut self,
        property: &OwlIri,
        subject: &Individual,
        object: &Individual,
        depth: usize,
    ) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        for axiom in ctx.store.inverse_axioms_for(property) {
            let Axiom::InverseProperties(a, b) = axiom else { continue };
            let other = if a.is_named(property) { b } else { a };
            let fact = Axiom::ObjectPropertyAssertion(other.clone(), object.clone(), subject.clone());
            if !ctx.holds(&fact.normalized()) {
                continue;
            }
            if let Some(mut axioms) = self.resolve_edge(&fact, depth + 1) {
                axioms.push(axiom.clone());
                return Some(axioms);
            }
        }
        None
    }

    fn edge_by_symmetry(
        &mut self,
        property: &OwlIri,
        subject: &Individual,
        object: &Individual,
        depth: usize,
    ) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        let symmetric = ctx.store.characteristic_axioms_for(property, AxiomType::SymmetricProperty).first().copied()?;
        let reverse = Axiom::property_assertion(property, object, subject);
        if !ctx.holds(&reverse) {
            return None;
        }
        let mut axioms = self.resolve_edge(&reverse, depth + 1)?;
        axioms.push(symmetric.clone());
        Some(axioms)
    }

    fn edge_by_transitivity(
        &mut self,
        property: &OwlIri,
        subject: &Individual,
        object: &Individual,
        depth: usize,
    ) -> Option<Vec<Axiom>> {
        let ctx = self.ctx;
        let transitive = ctx.store.characteristic_axioms_for(property, AxiomType::TransitiveProperty).first().copied()?;
        let named = PropertyExpression::ObjectProperty(property.clone());
        for middle in ctx.values(subject, &named) {
            if &middle == subject || &middle == object {
                continue;
            }
            let second = Axiom::property_assertion(property, &middle, object);
            if !ctx.holds(&second) {
                continue;
            }
            let first = Axiom::property_assertion(property, subject, &middle);
            let Some(mut axioms) = self.resolve_edge(&first, depth + 1) else { continue };
            let Some(rest) = self.resolve_edge(&second, depth + 1) else { continue };
            axioms.extend(rest);
            axioms.push(transitive.clone());
            return Some(axioms);
        }
        None
    }
}

/// The `(property, (subject, object))` use of `individual` licensed by a domain
/// or range axiom on `target_class`, first value in order
fn usage<'s>(
    ctx: &SearchContext<'s>,
    axiom: &'s Axiom,
    target_class: &ClassExpression,
    individual: &Individual,
) -> Option<(&'s PropertyExpression, (Individual, Individual))> {
    match axiom {
        Axiom::ObjectPropertyDomain(property, class) if class == target_class => {
            let value = ctx.values(individual, property).into_iter().next()?;
            Some((property, (individual.clone(), value)))
        }
        Axiom::ObjectPropertyRange(property, class) if class == target_class => {
            let inverse = PropertyExpression::inverse_of(property.clone());
            let value = ctx.values(individual, &inverse).into_iter().next()?;
            Some((property, (value, individual.clone())))
        }
        _ => None,
    }
}

/// Named classes below `class` with the shortest hop chain from each up to
/// `class`, bottom-up. Bounded by `trace_frontier` and `max_depth`.
fn descendants(ctx: &SearchContext<'_>, class: &OwlIri) -> Vec<(OwlIri, Vec<Axiom>)> {
    let mut reached = Vec::new();
    let mut seen = HashSet::from([class.clone()]);
    let mut queue: VecDeque<(OwlIri, Vec<Axiom>)> = VecDeque::from([(class.clone(), Vec::new())]);
    let mut expanded = 0usize;

    while let Some((node, edges)) = queue.pop_front() {
        expanded += 1;
        if expanded > ctx.config.trace_frontier {
            debug!(class = %class.short_form(), "Deep subclass trace hit frontier cap");
            break;
        }
        if edges.len() >= ctx.config.max_depth {
            continue;
        }
        for (sub, axiom) in subclass_hops(ctx, &node) {
            if !seen.insert(sub.clone()) {
                continue;
            }
            let mut chain = vec![axiom];
            chain.extend(edges.iter().cloned());
            reached.push((sub.clone(), chain.clone()));
            queue.push_back((sub, chain));
        }
    }
    reached
}

/// Traced path over the distinct statements; `describe` gets their count
fn traced(
    axioms: Vec<Axiom>,
    reasoning_type: ReasoningType,
    describe: impl FnOnce(usize) -> String,
) -> JustificationPath {
    let axioms: Vec<Axiom> = axioms.into_iter().unique_by(Axiom::normalized).collect();
    let description = describe(axioms.len());
    JustificationPath::new(axioms, description, reasoning_type, TRACE_SOURCE)
}
