//! Restriction strategies for classes defined by class expressions
//!
//! A named class `C` is "defined" by an expression `E` when the store holds
//! `EquivalentClasses(C, E)` or `SubClassOf(E, C)`. Each strategy handles one
//! outermost constructor of `E` and recursively verifies that the individual
//! satisfies it. Nested expressions of any constructor are verified by the
//! same procedure.

use super::{assertion, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::format;
use fukurow_core::model::{Axiom, AxiomType, ClassExpression, Individual, OwlIri, PropertyExpression};
use fukurow_store::HierarchyDirection;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionKind {
    Intersection,
    Union,
    /// Some-values-from and has-value
    Existential,
    Universal,
    /// Min cardinality
    Cardinality,
    /// Complement, proved through declared disjointness
    Complement,
}

impl RestrictionKind {
    pub const ALL: [RestrictionKind; 6] = [
        RestrictionKind::Intersection,
        RestrictionKind::Union,
        RestrictionKind::Existential,
        RestrictionKind::Universal,
        RestrictionKind::Cardinality,
        RestrictionKind::Complement,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RestrictionKind::Intersection => "intersection",
            RestrictionKind::Union => "union",
            RestrictionKind::Existential => "existential",
            RestrictionKind::Universal => "universal",
            RestrictionKind::Cardinality => "cardinality",
            RestrictionKind::Complement => "complement",
        }
    }

    pub fn reasoning_type(&self) -> ReasoningType {
        match self {
            RestrictionKind::Intersection => ReasoningType::Intersection,
            RestrictionKind::Union => ReasoningType::Union,
            RestrictionKind::Existential => ReasoningType::Existential,
            RestrictionKind::Universal => ReasoningType::Universal,
            RestrictionKind::Cardinality => ReasoningType::Cardinality,
            RestrictionKind::Complement => ReasoningType::Complement,
        }
    }

    /// Whether this kind handles the outermost constructor of `expr`
    pub fn matches(&self, expr: &ClassExpression) -> bool {
        matches!(
            (self, expr),
            (RestrictionKind::Intersection, ClassExpression::IntersectionOf(_))
                | (RestrictionKind::Union, ClassExpression::UnionOf(_))
                | (RestrictionKind::Existential, ClassExpression::SomeValuesFrom { .. })
                | (RestrictionKind::Existential, ClassExpression::HasValue { .. })
                | (RestrictionKind::Universal, ClassExpression::AllValuesFrom { .. })
                | (RestrictionKind::Cardinality, ClassExpression::MinCardinality { .. })
                | (RestrictionKind::Complement, ClassExpression::ComplementOf(_))
        )
    }
}

pub struct RestrictionStrategy {
    kind: RestrictionKind,
}

impl RestrictionStrategy {
    pub fn new(kind: RestrictionKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> RestrictionKind {
        self.kind
    }

    /// Defining expressions of `class` handled by this strategy, with the axiom stating each
    fn definitions<'s>(&self, ctx: &SearchContext<'s>, class: &OwlIri) -> Vec<(&'s ClassExpression, &'s Axiom)> {
        let named = ClassExpression::Named(class.clone());
        let mut out = Vec::new();
        for axiom in ctx.store.equivalence_axioms_for(&named) {
            for op in axiom.class_operands() {
                if self.kind.matches(op) {
                    out.push((op, axiom));
                }
            }
        }
        for axiom in ctx.store.subclass_axioms_for(&named, HierarchyDirection::Super) {
            if let Axiom::SubClassOf(sub, sup) = axiom {
                if sup == &named && self.kind.matches(sub) {
                    out.push((sub, axiom));
                }
            }
        }
        out
    }
}

impl Strategy for RestrictionStrategy {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn description(&self) -> &'static str {
        match self.kind {
            RestrictionKind::Intersection => "Membership in every conjunct of a defining intersection",
            RestrictionKind::Union => "Membership in one disjunct of a defining union",
            RestrictionKind::Existential => "A witnessing value for a defining existential restriction",
            RestrictionKind::Universal => "All values satisfying a defining universal restriction",
            RestrictionKind::Cardinality => "Enough witnesses for a defining min-cardinality restriction",
            RestrictionKind::Complement => "A type declared disjoint with a defining complement",
        }
    }

    fn priority(&self) -> i32 {
        60
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::ClassMembership { individual, class } = target else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for (expr, definition) in self.definitions(ctx, class) {
            let mut verifier = Verifier { ctx, in_progress: HashSet::new() };
            let Some((mut axioms, description)) = verifier.evaluate(individual, expr) else {
                continue;
            };
            axioms.push(definition.clone());
            paths.push(JustificationPath::new(axioms, description, self.kind.reasoning_type(), self.name()));
            if paths.len() >= ctx.config.max_paths_per_strategy {
                break;
            }
        }
        Ok(paths)
    }
}

/// Recursive membership check with an in-progress set keyed by
/// (individual, expression)
struct Verifier<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    in_progress: HashSet<(Individual, ClassExpression)>,
}

impl Verifier<'_, '_> {
    /// Top-level check of a defining expression. Returns the supporting
    /// statements and the path description.
    fn evaluate(&mut self, ind: &Individual, expr: &ClassExpression) -> Option<(Vec<Axiom>, String)> {
        let key = (ind.clone(), expr.clone());
        self.in_progress.insert(key.clone());
        let result = self.describe(ind, expr);
        self.in_progress.remove(&key);
        result
    }

    fn describe(&mut self, ind: &Individual, expr: &ClassExpression) -> Option<(Vec<Axiom>, String)> {
        match expr {
            ClassExpression::IntersectionOf(ops) => {
                let mut support = Vec::new();
                for op in ops {
                    support.extend(self.satisfy(ind, op, 1)?);
                }
                Some((support, "Intersection class: member of all components".to_string()))
            }
            ClassExpression::UnionOf(ops) => ops.iter().find_map(|op| {
                let support = self.satisfy(ind, op, 1)?;
                Some((support, format!("Union class: member of component '{}'", format::class(op))))
            }),
            ClassExpression::SomeValuesFrom { property, class } => {
                for v in self.ctx.values(ind, property) {
                    if let Some(mut support) = self.satisfy(&v, class, 1) {
                        support.insert(0, assertion(property, ind, &v));
                        let description = format!(
                            "Existential restriction: ∃{}.{} satisfied by {}",
                            format::property(property),
                            format::class(class),
                            v.short_form()
                        );
                        return Some((support, description));
                    }
                }
                None
            }
            ClassExpression::HasValue { property, individual } => {
                if !self.ctx.values(ind, property).contains(individual) {
                    return None;
                }
                let description = format!(
                    "Existential restriction: ∃{}.{{{}}} satisfied by {}",
                    format::property(property),
                    individual.short_form(),
                    individual.short_form()
                );
                Some((vec![assertion(property, ind, individual)], description))
            }
            ClassExpression::AllValuesFrom { property, class } => {
                let values = self.ctx.values(ind, property);
                if values.is_empty() {
                    debug!(individual = %ind.short_form(), "Top-level universal restriction holds only vacuously");
                    return None;
                }
                let mut support = Vec::new();
                for v in &values {
                    support.push(assertion(property, ind, v));
                    support.extend(self.satisfy(v, class, 1)?);
                }
                let description = format!(
                    "Universal restriction: ∀{}.{} satisfied by all {} values",
                    format::property(property),
                    format::class(class),
                    values.len()
                );
                Some((support, description))
            }
            ClassExpression::MinCardinality { cardinality, property, class } => {
                let (support, witnesses) = self.min_cardinality(ind, property, class.as_deref(), *cardinality, 1)?;
                let filler = class.as_deref().map(format::class).unwrap_or_else(|| "Thing".to_string());
                let description = format!(
                    "Cardinality restriction: ≥{} {}.{} satisfied by {} values",
                    cardinality,
                    format::property(property),
                    filler,
                    witnesses
                );
                Some((support, description))
            }
            ClassExpression::ComplementOf(inner) => {
                let excluded = inner.as_named()?;
                let support = self.disjoint_type(ind, excluded)?;
                let description = format!(
                    "Complement class: {} is disjoint from {}",
                    ind.short_form(),
                    excluded.short_form()
                );
                Some((support, description))
            }
            _ => None,
        }
    }

    /// Nested membership check. Universal restrictions may hold vacuously here.
    fn satisfy(&mut self, ind: &Individual, expr: &ClassExpression, depth: usize) -> Option<Vec<Axiom>> {
        if depth > self.ctx.config.max_depth {
            return None;
        }
        let key = (ind.clone(), expr.clone());
        if !self.in_progress.insert(key.clone()) {
            return None;
        }
        let result = self.check(ind, expr, depth);
        self.in_progress.remove(&key);
        result
    }

    fn check(&mut self, ind: &Individual, expr: &ClassExpression, depth: usize) -> Option<Vec<Axiom>> {
        match expr {
            ClassExpression::Thing => Some(Vec::new()),
            ClassExpression::Nothing => None,
            ClassExpression::Named(iri) if iri.is_owl_thing() => Some(Vec::new()),
            ClassExpression::Named(iri) => self
                .ctx
                .has_type(ind, iri)
                .then(|| vec![Axiom::class_assertion(iri, ind)]),
            ClassExpression::IntersectionOf(ops) => {
                let mut support = Vec::new();
                for op in ops {
                    support.extend(self.satisfy(ind, op, depth + 1)?);
                }
                Some(support)
            }
            ClassExpression::UnionOf(ops) => ops.iter().find_map(|op| self.satisfy(ind, op, depth + 1)),
            ClassExpression::ComplementOf(inner) => self.disjoint_type(ind, inner.as_named()?),
            ClassExpression::OneOf(members) => members.contains(ind).then(Vec::new),
            ClassExpression::SomeValuesFrom { property, class } => {
                for v in self.ctx.values(ind, property) {
                    if let Some(mut support) = self.satisfy(&v, class, depth + 1) {
                        support.insert(0, assertion(property, ind, &v));
                        return Some(support);
                    }
                }
                None
            }
            ClassExpression::HasValue { property, individual } => self
                .ctx
                .values(ind, property)
                .contains(individual)
                .then(|| vec![assertion(property, ind, individual)]),
            ClassExpression::AllValuesFrom { property, class } => {
                let mut support = Vec::new();
                for v in self.ctx.values(ind, property) {
                    support.push(assertion(property, ind, &v));
                    support.extend(self.satisfy(&v, class, depth + 1)?);
                }
                Some(support)
            }
            ClassExpression::MinCardinality { cardinality, property, class } => self
                .min_cardinality(ind, property, class.as_deref(), *cardinality, depth + 1)
                .map(|(support, _)| support),
            // upper bounds cannot be confirmed without a closed world
            ClassExpression::MaxCardinality { .. } | ClassExpression::ExactCardinality { .. } => None,
        }
    }

    /// Support for `≥n property.filler`, with the number of witnesses found
    fn min_cardinality(
        &mut self,
        ind: &Individual,
        property: &PropertyExpression,
        filler: Option<&ClassExpression>,
        cardinality: u32,
        depth: usize,
    ) -> Option<(Vec<Axiom>, usize)> {
        let mut support = Vec::new();
        let mut witnesses = 0usize;
        for v in self.ctx.values(ind, property) {
            let filler_support = match filler {
                Some(class) => match self.satisfy(&v, class, depth) {
                    Some(s) => s,
                    None => continue,
                },
                None => Vec::new(),
            };
            witnesses += 1;
            support.push(assertion(property, ind, &v));
            support.extend(filler_support);
        }
        (witnesses >= cardinality as usize).then_some((support, witnesses))
    }

    /// A named type of `ind` declared disjoint with `excluded`, with the
    /// membership and the disjointness statement
    fn disjoint_type(&self, ind: &Individual, excluded: &OwlIri) -> Option<Vec<Axiom>> {
        let excluded_expr = ClassExpression::Named(excluded.clone());
        let types = self.ctx.named_types(ind);
        for axiom in self.ctx.store.statements_of_kind(AxiomType::DisjointClasses) {
            let operands = axiom.class_operands();
            if !operands.contains(&&excluded_expr) {
                continue;
            }
            let found = operands
                .iter()
                .filter_map(|op| op.as_named())
                .find(|t| *t != excluded && types.contains(*t));
            if let Some(t) = found {
                return Some(vec![Axiom::class_assertion(t, ind), axiom.clone()]);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;
    use crate::strategy::fixtures::*;

    fn run(kind: RestrictionKind, axioms: Vec<Axiom>, who: &str, class: &str) -> Vec<JustificationPath> {
        let (store, kb) = knowledge_base(axioms);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);
        RestrictionStrategy::new(kind)
            .explain(&QueryTarget::class_membership(&ind(who), &iri(class)), &ctx)
            .unwrap()
    }

    #[test]
    fn test_intersection() {
        let paths = run(
            RestrictionKind::Intersection,
            vec![
                Axiom::EquivalentClasses(vec![
                    class("Mother"),
                    ClassExpression::IntersectionOf(vec![class("Woman"), class("Parent")]),
                ]),
                Axiom::class_assertion(&iri("Woman"), &ind("mary")),
                Axiom::class_assertion(&iri("Parent"), &ind("mary")),
            ],
            "mary",
            "Mother",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Intersection class: member of all components");
        assert_eq!(paths[0].complexity(), 3);
        assert_eq!(paths[0].reasoning_type(), ReasoningType::Intersection);
    }

    #[test]
    fn test_shared_witness_counted_once() {
        let paths = run(
            RestrictionKind::Intersection,
            vec![
                Axiom::EquivalentClasses(vec![
                    class("ProudParent"),
                    ClassExpression::IntersectionOf(vec![
                        ClassExpression::some(prop("hasChild"), class("Person")),
                        ClassExpression::some(prop("hasChild"), class("Happy")),
                    ]),
                ]),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
                Axiom::class_assertion(&iri("Person"), &ind("bob")),
                Axiom::class_assertion(&iri("Happy"), &ind("bob")),
            ],
            "john",
            "ProudParent",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].complexity(), 4);
        assert_eq!(paths[0].justifications().len(), paths[0].complexity());
        assert_eq!(paths[0].justifications()[0], "john hasChild bob");
    }

    #[test]
    fn test_union_names_the_component() {
        let paths = run(
            RestrictionKind::Union,
            vec![
                Axiom::SubClassOf(ClassExpression::UnionOf(vec![class("Man"), class("Woman")]), class("Person")),
                Axiom::class_assertion(&iri("Woman"), &ind("mary")),
            ],
            "mary",
            "Person",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Union class: member of component 'Woman'");
    }

    #[test]
    fn test_existential_and_has_value() {
        let axioms = vec![
            Axiom::EquivalentClasses(vec![
                class("Parent"),
                ClassExpression::some(prop("hasChild"), class("Person")),
            ]),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
            Axiom::class_assertion(&iri("Person"), &ind("bob")),
        ];
        let paths = run(RestrictionKind::Existential, axioms, "john", "Parent");
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Existential restriction: ∃hasChild.Person satisfied by bob");

        let axioms = vec![
            Axiom::SubClassOf(
                ClassExpression::HasValue { property: prop("knows"), individual: ind("alice") },
                class("FriendOfAlice"),
            ),
            Axiom::property_assertion(&iri("knows"), &ind("john"), &ind("alice")),
        ];
        assert_eq!(run(RestrictionKind::Existential, axioms, "john", "FriendOfAlice").len(), 1);
    }

    #[test]
    fn test_universal_requires_values_at_top_level() {
        let definition = Axiom::EquivalentClasses(vec![
            class("HappyParent"),
            ClassExpression::only(prop("hasChild"), class("Happy")),
        ]);
        let paths = run(
            RestrictionKind::Universal,
            vec![
                definition.clone(),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("ann")),
                Axiom::class_assertion(&iri("Happy"), &ind("bob")),
                Axiom::class_assertion(&iri("Happy"), &ind("ann")),
            ],
            "john",
            "HappyParent",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Universal restriction: ∀hasChild.Happy satisfied by all 2 values");

        let vacuous = run(
            RestrictionKind::Universal,
            vec![definition, Axiom::class_assertion(&iri("Person"), &ind("ted"))],
            "ted",
            "HappyParent",
        );
        assert!(vacuous.is_empty());
    }

    #[test]
    fn test_nested_universal_may_be_vacuous() {
        let paths = run(
            RestrictionKind::Existential,
            vec![
                Axiom::EquivalentClasses(vec![
                    class("GrandparentOfHappy"),
                    ClassExpression::some(
                        prop("hasChild"),
                        ClassExpression::only(prop("hasChild"), class("Happy")),
                    ),
                ]),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
            ],
            "john",
            "GrandparentOfHappy",
        );
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_min_cardinality() {
        let definition = Axiom::EquivalentClasses(vec![
            class("BigFamily"),
            ClassExpression::MinCardinality {
                cardinality: 2,
                property: prop("hasChild"),
                class: None,
            },
        ]);
        let paths = run(
            RestrictionKind::Cardinality,
            vec![
                definition.clone(),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("ann")),
            ],
            "john",
            "BigFamily",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Cardinality restriction: ≥2 hasChild.Thing satisfied by 2 values");

        let too_few = run(
            RestrictionKind::Cardinality,
            vec![definition, Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob"))],
            "john",
            "BigFamily",
        );
        assert!(too_few.is_empty());
    }

    #[test]
    fn test_complement_through_disjointness() {
        let paths = run(
            RestrictionKind::Complement,
            vec![
                Axiom::EquivalentClasses(vec![
                    class("NonMan"),
                    ClassExpression::ComplementOf(Box::new(class("Man"))),
                ]),
                Axiom::DisjointClasses(vec![class("Man"), class("Woman")]),
                Axiom::class_assertion(&iri("Woman"), &ind("mary")),
            ],
            "mary",
            "NonMan",
        );
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Complement class: mary is disjoint from Man");
        assert_eq!(paths[0].complexity(), 3);
    }

    #[test]
    fn test_kind_filters_definitions() {
        let paths = run(
            RestrictionKind::Union,
            vec![
                Axiom::EquivalentClasses(vec![
                    class("Parent"),
                    ClassExpression::some(prop("hasChild"), ClassExpression::Thing),
                ]),
                Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
            ],
            "john",
            "Parent",
        );
        assert!(paths.is_empty());
    }
}
