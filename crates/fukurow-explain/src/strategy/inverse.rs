//! Inverse property reasoning

use super::{assertion, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::format;
use fukurow_core::model::{Axiom, PropertyExpression};
use fukurow_store::HierarchyDirection;

/// Explains `p(s, o)` through the reverse assertion of an inverse property.
///
/// Besides declared `InverseProperties` pairs this also walks inverse-of
/// expressions used in equivalence and sub-property axioms.
pub struct InversePropertyStrategy;

impl InversePropertyStrategy {
    pub const NAME: &'static str = "inverse_property";
}

impl Strategy for InversePropertyStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Reverse assertions of inverse properties"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };

        // (supporting fact, schema statement, description)
        let mut candidates: Vec<(Axiom, Axiom, String)> = Vec::new();

        for axiom in ctx.store.inverse_axioms_for(property) {
            let Axiom::InverseProperties(a, b) = axiom else { continue };
            let other = if a.is_named(property) {
                b
            } else if b.is_named(property) {
                a
            } else {
                continue;
            };
            candidates.push((
                assertion(other, object, subject),
                axiom.clone(),
                format!(
                    "Inverse property reasoning: {} is the inverse of {}",
                    property.short_form(),
                    format::property(other)
                ),
            ));
        }

        for axiom in ctx.store.equivalent_property_axioms_for(property) {
            let Axiom::EquivalentProperties(ops) = axiom else { continue };
            for op in ops.iter().filter(|op| op.is_anonymous()) {
                candidates.push((
                    assertion(op, subject, object),
                    axiom.clone(),
                    format!(
                        "Inverse property reasoning: {} ≡ {}",
                        property.short_form(),
                        format::property(op)
                    ),
                ));
            }
        }

        for axiom in ctx.store.sub_property_axioms_for(property, HierarchyDirection::Super) {
            if let Axiom::SubPropertyOf(sub @ PropertyExpression::InverseOf(_), _) = axiom {
                candidates.push((
                    assertion(sub, subject, object),
                    axiom.clone(),
                    format!(
                        "Inverse property reasoning: {} ⊑ {}",
                        format::property(sub),
                        property.short_form()
                    ),
                ));
            }
        }

        let paths = candidates
            .into_iter()
            .filter(|(fact, _, _)| ctx.holds(fact))
            .take(ctx.config.max_paths_per_strategy)
            .map(|(fact, schema, description)| {
                let axioms = vec![fact, schema];
                JustificationPath::new(axioms, description, ReasoningType::InverseProperty, Self::NAME)
            })
            .collect();
        Ok(paths)
    }
}
