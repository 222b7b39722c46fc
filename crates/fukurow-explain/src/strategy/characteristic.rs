//! Property characteristic strategies
//!
//! Transitive, symmetric and reflexive properties produce new assertions.
//! Functional and inverse-functional ones are used together with a range or
//! domain axiom to explain class membership. Asymmetric and irreflexive
//! properties cannot produce anything on their own; their strategies confirm
//! the characteristic and attach it to the facts supporting the target.

use super::{assertion, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::format;
use fukurow_core::model::{Axiom, AxiomType, ClassExpression, Individual, OwlIri, PropertyExpression};
use tracing::debug;

/// The stored characteristic axiom of the given type for a property expression
fn declared<'s>(ctx: &SearchContext<'s>, axiom_type: AxiomType, property: &PropertyExpression) -> Option<&'s Axiom> {
    let wanted = property.simplified();
    ctx.store
        .statements_of_kind(axiom_type)
        .into_iter()
        .find(|ax| ax.normalized().property_operands().first() == Some(&&wanted))
}

pub struct TransitiveStrategy;

impl TransitiveStrategy {
    pub const NAME: &'static str = "transitive_property";
}

impl Strategy for TransitiveStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Two-step links through an intermediate of a transitive property"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };
        let Some(transitive) = ctx.store.characteristic_axioms_for(property, AxiomType::TransitiveProperty).first().copied()
        else {
            return Ok(Vec::new());
        };

        let named = PropertyExpression::ObjectProperty(property.clone());
        let mut paths = Vec::new();
        for middle in ctx.values(subject, &named) {
            if &middle == subject || &middle == object {
                continue;
            }
            let second = Axiom::property_assertion(property, &middle, object);
            if !ctx.holds(&second) {
                continue;
            }
            let axioms = vec![Axiom::property_assertion(property, subject, &middle), second, transitive.clone()];
            let description = format!("Transitive property reasoning via {}", middle.short_form());
            paths.push(JustificationPath::new(axioms, description, ReasoningType::TransitiveProperty, Self::NAME));
            if paths.len() >= ctx.config.max_paths_per_strategy {
                break;
            }
        }
        Ok(paths)
    }
}

pub struct SymmetricStrategy;

impl SymmetricStrategy {
    pub const NAME: &'static str = "symmetric_property";
}

impl Strategy for SymmetricStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "The reverse assertion of a symmetric property"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };
        if subject == object {
            return Ok(Vec::new());
        }
        let Some(symmetric) = ctx.store.characteristic_axioms_for(property, AxiomType::SymmetricProperty).first().copied()
        else {
            return Ok(Vec::new());
        };

        let reverse = Axiom::property_assertion(property, object, subject);
        if !ctx.holds(&reverse) {
            return Ok(Vec::new());
        }
        let description = format!("Symmetric property reasoning: {} is symmetric", property.short_form());
        Ok(vec![JustificationPath::new(
            vec![reverse, symmetric.clone()],
            description,
            ReasoningType::SymmetricProperty,
            Self::NAME,
        )])
    }
}

/// Explains `C(x)` when `x` is the value of a functional property with range `C`
pub struct FunctionalStrategy;

impl FunctionalStrategy {
    pub const NAME: &'static str = "functional_property";
}

impl Strategy for FunctionalStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Values of functional properties whose range is the target class"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::ClassMembership { individual, class } = target else {
            return Ok(Vec::new());
        };
        let target_class = ClassExpression::Named(class.clone());

        let mut paths = Vec::new();
        for range in ctx.store.statements_of_kind(AxiomType::ObjectPropertyRange) {
            let Axiom::ObjectPropertyRange(property, range_class) = range else { continue };
            if range_class != &target_class {
                continue;
            }
            let Some(functional) = declared(ctx, AxiomType::FunctionalProperty, property) else { continue };
            let inverse = PropertyExpression::inverse_of(property.clone());
            let Some(holder) = ctx.values(individual, &inverse).into_iter().next() else { continue };

            let axioms = vec![assertion(property, &holder, individual), functional.clone(), range.clone()];
            let description = format!(
                "Functional property reasoning: {} has range {}",
                format::property(property),
                class.short_form()
            );
            paths.push(JustificationPath::new(axioms, description, ReasoningType::FunctionalProperty, Self::NAME));
        }
        paths.truncate(ctx.config.max_paths_per_strategy);
        Ok(paths)
    }
}

/// Mirror of [`FunctionalStrategy`] for domains
pub struct InverseFunctionalStrategy;

impl InverseFunctionalStrategy {
    pub const NAME: &'static str = "inverse_functional_property";
}

impl Strategy for InverseFunctionalStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Subjects of inverse-functional properties whose domain is the target class"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::ClassMembership { individual, class } = target else {
            return Ok(Vec::new());
        };
        let target_class = ClassExpression::Named(class.clone());

        let mut paths = Vec::new();
        for domain in ctx.store.statements_of_kind(AxiomType::ObjectPropertyDomain) {
            let Axiom::ObjectPropertyDomain(property, domain_class) = domain else { continue };
            if domain_class != &target_class {
                continue;
            }
            let Some(inverse_functional) = declared(ctx, AxiomType::InverseFunctionalProperty, property) else {
                continue;
            };
            let Some(value) = ctx.values(individual, property).into_iter().next() else { continue };

            let axioms = vec![
                assertion(property, individual, &value),
                inverse_functional.clone(),
                domain.clone(),
            ];
            let description = format!(
                "Inverse functional property reasoning: {} has domain {}",
                format::property(property),
                class.short_form()
            );
            paths.push(JustificationPath::new(axioms, description, ReasoningType::FunctionalProperty, Self::NAME));
        }
        paths.truncate(ctx.config.max_paths_per_strategy);
        Ok(paths)
    }
}

/// Explains `p(x, x)` from the reflexivity axiom and a fact mentioning `x`
pub struct ReflexiveStrategy;

impl ReflexiveStrategy {
    pub const NAME: &'static str = "reflexive_property";
}

impl Strategy for ReflexiveStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Self-loops of reflexive properties"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        matches!(target, QueryTarget::PropertyAssertion { subject, object, .. } if subject == object)
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };
        if subject != object {
            return Ok(Vec::new());
        }
        let Some(reflexive) = ctx.store.characteristic_axioms_for(property, AxiomType::ReflexiveProperty).first().copied()
        else {
            return Ok(Vec::new());
        };
        let Some(witness) = witness_fact(ctx, subject, property) else {
            debug!(individual = %subject.short_form(), "No fact mentions the individual");
            return Ok(Vec::new());
        };

        let description = format!("Reflexive property reasoning: {} is reflexive", property.short_form());
        Ok(vec![JustificationPath::new(
            vec![reflexive.clone(), witness],
            description,
            ReasoningType::ReflexiveProperty,
            Self::NAME,
        )])
    }
}

/// A stored fact naming the individual, other than the reflexive loop itself
fn witness_fact(ctx: &SearchContext<'_>, individual: &Individual, property: &OwlIri) -> Option<Axiom> {
    let looped = Axiom::property_assertion(property, individual, individual);
    ctx.store
        .class_assertions_for(individual)
        .into_iter()
        .chain(ctx.store.property_assertions_from(individual))
        .chain(ctx.store.property_assertions_to(individual))
        .map(Axiom::normalized)
        .find(|ax| ax != &looped)
}

/// Asserted facts behind a property target: the target itself when stored,
/// otherwise the oracle's justification
fn supporting_facts(ctx: &SearchContext<'_>, target: &Axiom) -> Option<Vec<Axiom>> {
    if ctx.is_asserted(target) {
        Some(vec![target.clone()])
    } else {
        ctx.oracle.justification(target)
    }
}

pub struct AsymmetricStrategy;

impl AsymmetricStrategy {
    pub const NAME: &'static str = "asymmetric_property";
}

impl Strategy for AsymmetricStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Confirms an asymmetric property does not hold in reverse"
    }

    fn priority(&self) -> i32 {
        55
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };
        let Some(asymmetric) = ctx.store.characteristic_axioms_for(property, AxiomType::AsymmetricProperty).first().copied()
        else {
            return Ok(Vec::new());
        };
        if ctx.oracle.values_of(object, property).contains(subject) {
            debug!(property = %property.short_form(), "Asymmetric property holds in both directions");
            return Ok(Vec::new());
        }
        let Some(mut axioms) = supporting_facts(ctx, &target.to_axiom()) else {
            return Ok(Vec::new());
        };
        axioms.push(asymmetric.clone());

        let description = format!(
            "Asymmetric property reasoning: {}({}, {}) does not hold",
            property.short_form(),
            object.short_form(),
            subject.short_form()
        );
        Ok(vec![JustificationPath::new(axioms, description, ReasoningType::AsymmetricProperty, Self::NAME)])
    }
}

pub struct IrreflexiveStrategy;

impl IrreflexiveStrategy {
    pub const NAME: &'static str = "irreflexive_property";
}

impl Strategy for IrreflexiveStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Confirms an irreflexive property relates distinct individuals"
    }

    fn priority(&self) -> i32 {
        55
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };
        if subject == object {
            return Ok(Vec::new());
        }
        let Some(irreflexive) =
            ctx.store.characteristic_axioms_for(property, AxiomType::IrreflexiveProperty).first().copied()
        else {
            return Ok(Vec::new());
        };
        let Some(mut axioms) = supporting_facts(ctx, &target.to_axiom()) else {
            return Ok(Vec::new());
        };
        axioms.push(irreflexive.clone());

        let description = format!(
            "Irreflexive property reasoning: {} ≠ {}",
            subject.short_form(),
            object.short_form()
        );
        Ok(vec![JustificationPath::new(axioms, description, ReasoningType::IrreflexiveProperty, Self::NAME)])
    }
}
