//! Bounded breadth-first search over class and property hierarchies

use super::{SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::model::{Axiom, ClassExpression, OwlIri, PropertyExpression};
use fukurow_store::HierarchyDirection;
use std::collections::VecDeque;
use tracing::debug;

/// Subclass chains from a type of the individual up to the target class
pub struct ClassHierarchyStrategy;

impl ClassHierarchyStrategy {
    pub const NAME: &'static str = "class_hierarchy";
}

impl Strategy for ClassHierarchyStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Subclass chains from a known type of the individual to the target class"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::ClassMembership { individual, class } = target else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for start in ctx.named_types(individual).into_iter().filter(|t| t != class) {
            for edges in hierarchy_chains(ctx, &start, class, superclass_hops) {
                let all_equivalence = edges.iter().all(|ax| matches!(ax, Axiom::EquivalentClasses(_)));
                let (description, reasoning_type) = if all_equivalence && edges.len() == 1 {
                    (
                        format!("Equivalent class: {} ≡ {}", start.short_form(), class.short_form()),
                        ReasoningType::EquivalentClass,
                    )
                } else if all_equivalence {
                    (
                        format!(
                            "Equivalent class chain: {} ≡ {} ({} steps)",
                            start.short_form(),
                            class.short_form(),
                            edges.len()
                        ),
                        ReasoningType::EquivalentClass,
                    )
                } else {
                    (
                        format!(
                            "Subclass reasoning: {} ⊑ {} ({} steps)",
                            start.short_form(),
                            class.short_form(),
                            edges.len()
                        ),
                        ReasoningType::Subsumption,
                    )
                };

                let mut axioms = vec![Axiom::class_assertion(&start, individual)];
                axioms.extend(edges);
                paths.push(JustificationPath::new(axioms, description, reasoning_type, Self::NAME));

                if paths.len() >= ctx.config.max_paths_per_strategy {
                    return Ok(paths);
                }
            }
        }
        Ok(paths)
    }
}

/// Sub-property chains from an asserted or entailed sub-property up to the target property
pub struct SubPropertyStrategy;

impl SubPropertyStrategy {
    pub const NAME: &'static str = "sub_property";
}

impl Strategy for SubPropertyStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Sub-property chains whose bottom property relates the same pair"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for (sub, edges) in descendants(ctx, property) {
            let fact = Axiom::property_assertion(&sub, subject, object);
            if !ctx.holds(&fact) {
                continue;
            }

            let all_equivalence = edges.iter().all(|ax| matches!(ax, Axiom::EquivalentProperties(_)));
            let (description, reasoning_type) = match (all_equivalence, edges.len()) {
                (true, 1) => (
                    format!("Equivalent property: {} ≡ {}", sub.short_form(), property.short_form()),
                    ReasoningType::EquivalentProperty,
                ),
                (true, n) => (
                    format!(
                        "Equivalent property chain: {} ≡ {} ({} steps)",
                        sub.short_form(),
                        property.short_form(),
                        n
                    ),
                    ReasoningType::EquivalentProperty,
                ),
                (false, 1) => (
                    format!("Sub-property reasoning: {} ⊑ {}", sub.short_form(), property.short_form()),
                    ReasoningType::SubProperty,
                ),
                (false, n) => (
                    format!(
                        "Sub-property reasoning: {} ⊑ {} ({} steps)",
                        sub.short_form(),
                        property.short_form(),
                        n
                    ),
                    ReasoningType::SubProperty,
                ),
            };

            // bottom-up: the fact, then the hops towards the target property
            let mut axioms = vec![fact];
            axioms.extend(edges.into_iter().rev());
            paths.push(JustificationPath::new(axioms, description, reasoning_type, Self::NAME));

            if paths.len() >= ctx.config.max_paths_per_strategy {
                break;
            }
        }
        Ok(paths)
    }
}

type Hops = fn(&SearchContext<'_>, &OwlIri) -> Vec<(OwlIri, Axiom)>;

/// Named superclasses one subclass or equivalence step above `class`
pub(crate) fn superclass_hops(ctx: &SearchContext<'_>, class: &OwlIri) -> Vec<(OwlIri, Axiom)> {
    let expr = ClassExpression::Named(class.clone());
    let mut hops = Vec::new();
    for axiom in ctx.store.subclass_axioms_for(&expr, HierarchyDirection::Sub) {
        if let Axiom::SubClassOf(_, ClassExpression::Named(sup)) = axiom {
            if !sup.is_owl_thing() {
                hops.push((sup.clone(), axiom.clone()));
            }
        }
    }
    hops.extend(equivalent_named(ctx, class));
    hops
}

/// Named subclasses one subclass or equivalence step below `class`
pub(crate) fn subclass_hops(ctx: &SearchContext<'_>, class: &OwlIri) -> Vec<(OwlIri, Axiom)> {
    let expr = ClassExpression::Named(class.clone());
    let mut hops = Vec::new();
    for axiom in ctx.store.subclass_axioms_for(&expr, HierarchyDirection::Super) {
        if let Axiom::SubClassOf(ClassExpression::Named(sub), _) = axiom {
            hops.push((sub.clone(), axiom.clone()));
        }
    }
    hops.extend(equivalent_named(ctx, class));
    hops
}

fn equivalent_named(ctx: &SearchContext<'_>, class: &OwlIri) -> Vec<(OwlIri, Axiom)> {
    let expr = ClassExpression::Named(class.clone());
    ctx.store
        .equivalence_axioms_for(&expr)
        .into_iter()
        .flat_map(|axiom| {
            axiom
                .class_operands()
                .into_iter()
                .filter_map(ClassExpression::as_named)
                .filter(|other| *other != class)
                .map(|other| (other.clone(), axiom.clone()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Every distinct chain of hops from `start` to `goal`, bounded by depth,
/// frontier and path caps. Chains are returned in discovery order.
pub(crate) fn hierarchy_chains(
    ctx: &SearchContext<'_>,
    start: &OwlIri,
    goal: &OwlIri,
    hops: Hops,
) -> Vec<Vec<Axiom>> {
    let mut chains = Vec::new();
    let mut queue: VecDeque<(OwlIri, Vec<OwlIri>, Vec<Axiom>)> =
        VecDeque::from([(start.clone(), vec![start.clone()], Vec::new())]);
    let mut expanded = 0usize;

    while let Some((node, on_path, edges)) = queue.pop_front() {
        expanded += 1;
        if expanded > ctx.config.max_frontier {
            debug!(start = %start.short_form(), goal = %goal.short_form(), "Hierarchy search hit frontier cap");
            break;
        }
        if edges.len() >= ctx.config.max_depth {
            continue;
        }

        for (next, axiom) in hops(ctx, &node) {
            if on_path.contains(&next) || edges.contains(&axiom) {
                continue;
            }
            let mut next_edges = edges.clone();
            next_edges.push(axiom);

            if &next == goal {
                chains.push(next_edges);
                if chains.len() >= ctx.config.max_paths_per_strategy {
                    return chains;
                }
                continue;
            }

            let mut next_path = on_path.clone();
            next_path.push(next.clone());
            queue.push_back((next, next_path, next_edges));
        }
    }
    chains
}

/// Named properties below `property` together with the hops from `property`
/// down to them, in breadth-first order
fn descendants(ctx: &SearchContext<'_>, property: &OwlIri) -> Vec<(OwlIri, Vec<Axiom>)> {
    let mut found = Vec::new();
    let mut queue: VecDeque<(OwlIri, Vec<OwlIri>, Vec<Axiom>)> =
        VecDeque::from([(property.clone(), vec![property.clone()], Vec::new())]);
    let mut expanded = 0usize;

    while let Some((node, on_path, edges)) = queue.pop_front() {
        expanded += 1;
        if expanded > ctx.config.max_frontier {
            debug!(property = %property.short_form(), "Sub-property search hit frontier cap");
            break;
        }
        if edges.len() >= ctx.config.max_depth {
            continue;
        }

        for (next, axiom) in sub_property_hops(ctx, &node) {
            if on_path.contains(&next) {
                continue;
            }
            let mut next_edges = edges.clone();
            next_edges.push(axiom);
            let mut next_path = on_path.clone();
            next_path.push(next.clone());

            found.push((next.clone(), next_edges.clone()));
            queue.push_back((next, next_path, next_edges));
        }
    }
    found
}

fn sub_property_hops(ctx: &SearchContext<'_>, property: &OwlIri) -> Vec<(OwlIri, Axiom)> {
    let mut hops = Vec::new();
    for axiom in ctx.store.sub_property_axioms_for(property, HierarchyDirection::Super) {
        if let Axiom::SubPropertyOf(PropertyExpression::ObjectProperty(sub), _) = axiom {
            hops.push((sub.clone(), axiom.clone()));
        }
    }
    for axiom in ctx.store.equivalent_property_axioms_for(property) {
        for other in axiom.property_operands().into_iter().filter_map(PropertyExpression::as_named) {
            if other != property {
                hops.push((other.clone(), axiom.clone()));
            }
        }
    }
    hops
}
