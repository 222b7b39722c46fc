//! Co-equivalent named classes and properties

use super::{SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::model::{Axiom, ClassExpression, PropertyExpression};

pub struct EquivalentClassStrategy;

impl EquivalentClassStrategy {
    pub const NAME: &'static str = "equivalent_class";
}

impl Strategy for EquivalentClassStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Membership in a named class declared equivalent to the target"
    }

    fn priority(&self) -> i32 {
        35
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::ClassMembership { individual, class } = target else {
            return Ok(Vec::new());
        };

        let types = ctx.named_types(individual);
        let mut paths = Vec::new();
        for axiom in ctx.store.equivalence_axioms_for(&ClassExpression::Named(class.clone())) {
            for other in axiom.class_operands().into_iter().filter_map(ClassExpression::as_named) {
                if other == class || !types.contains(other) {
                    continue;
                }
                let axioms = vec![Axiom::class_assertion(other, individual), axiom.clone()];
                let description = format!("Equivalent class: {} ≡ {}", other.short_form(), class.short_form());
                paths.push(JustificationPath::new(axioms, description, ReasoningType::EquivalentClass, Self::NAME));
            }
        }
        paths.truncate(ctx.config.max_paths_per_strategy);
        Ok(paths)
    }
}

pub struct EquivalentPropertyStrategy;

impl EquivalentPropertyStrategy {
    pub const NAME: &'static str = "equivalent_property";
}

impl Strategy for EquivalentPropertyStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "The same pair related by a named property declared equivalent to the target"
    }

    fn priority(&self) -> i32 {
        25
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for axiom in ctx.store.equivalent_property_axioms_for(property) {
            for other in axiom.property_operands().into_iter().filter_map(PropertyExpression::as_named) {
                if other == property {
                    continue;
                }
                let fact = Axiom::property_assertion(other, subject, object);
                if !ctx.holds(&fact) {
                    continue;
                }
                let axioms = vec![fact, axiom.clone()];
                let description = format!("Equivalent property: {} ≡ {}", other.short_form(), property.short_form());
                paths.push(JustificationPath::new(axioms, description, ReasoningType::EquivalentProperty, Self::NAME));
            }
        }
        paths.truncate(ctx.config.max_paths_per_strategy);
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;
    use crate::strategy::fixtures::*;

    #[test]
    fn test_equivalent_class() {
        let (store, kb) = knowledge_base(vec![
            Axiom::EquivalentClasses(vec![class("Person"), class("Human")]),
            Axiom::class_assertion(&iri("Human"), &ind("john")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let paths = EquivalentClassStrategy
            .explain(&QueryTarget::class_membership(&ind("john"), &iri("Person")), &ctx)
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Equivalent class: Human ≡ Person");
    }

    #[test]
    fn test_equivalent_property() {
        let (store, kb) = knowledge_base(vec![
            Axiom::EquivalentProperties(vec![prop("hasSpouse"), prop("marriedTo")]),
            Axiom::property_assertion(&iri("marriedTo"), &ind("john"), &ind("mary")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let target = QueryTarget::property_assertion(&ind("john"), &iri("hasSpouse"), &ind("mary"));
        let paths = EquivalentPropertyStrategy.explain(&target, &ctx).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].reasoning_type(), ReasoningType::EquivalentProperty);

        let unrelated = QueryTarget::property_assertion(&ind("mary"), &iri("hasSpouse"), &ind("john"));
        assert!(EquivalentPropertyStrategy.explain(&unrelated, &ctx).unwrap().is_empty());
    }
}
