//! Domain and range reasoning

use super::{assertion, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::format;
use fukurow_core::model::{Axiom, AxiomType, ClassExpression, PropertyExpression};

/// Explains `C(x)` when `x` is the subject of a property with domain `C`, or
/// the object of a property with range `C`. One witness per property.
pub struct DomainRangeStrategy;

impl DomainRangeStrategy {
    pub const NAME: &'static str = "domain_range";
}

impl Strategy for DomainRangeStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Property usage of the individual under a domain or range axiom"
    }

    fn priority(&self) -> i32 {
        45
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
        for axiom in ctx.store.statements_of_kind(AxiomType::ObjectPropertyDomain) {
            let Axiom::ObjectPropertyDomain(property, domain) = axiom else { continue };
            if domain != &target_class {
                continue;
            }
            let Some(value) = ctx.values(individual, property).into_iter().next() else { continue };

            let axioms = vec![assertion(property, individual, &value), axiom.clone()];
            let description = format!(
                "Domain restriction: domain({}) = {}",
                format::property(property),
                class.short_form()
            );
            paths.push(build(axioms, description));
        }

        for axiom in ctx.store.statements_of_kind(AxiomType::ObjectPropertyRange) {
            let Axiom::ObjectPropertyRange(property, range) = axiom else { continue };
            if range != &target_class {
                continue;
            }
            let inverse = PropertyExpression::inverse_of(property.clone());
            let Some(value) = ctx.values(individual, &inverse).into_iter().next() else { continue };

            let axioms = vec![assertion(property, &value, individual), axiom.clone()];
            let description = format!(
                "Range restriction: range({}) = {}",
                format::property(property),
                class.short_form()
            );
            paths.push(build(axioms, description));
        }

        paths.truncate(ctx.config.max_paths_per_strategy);
        Ok(paths)
    }
}

fn build(axioms: Vec<Axiom>, description: String) -> JustificationPath {
    JustificationPath::new(axioms, description, ReasoningType::DomainRange, DomainRangeStrategy::NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;
    use crate::strategy::fixtures::*;

    fn family() -> Vec<Axiom> {
        vec![
            Axiom::ObjectPropertyDomain(prop("hasChild"), class("Parent")),
            Axiom::ObjectPropertyRange(prop("hasChild"), class("Child")),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("ann")),
        ]
    }

    #[test]
    fn test_domain_witness() {
        let (store, kb) = knowledge_base(family());
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let paths = DomainRangeStrategy
            .explain(&QueryTarget::class_membership(&ind("john"), &iri("Parent")), &ctx)
            .unwrap();
        // one witness per property, the first in order
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Domain restriction: domain(hasChild) = Parent");
        assert_eq!(
            paths[0].axioms()[0],
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("ann"))
        );
    }

    #[test]
    fn test_range_witness() {
        let (store, kb) = knowledge_base(family());
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let paths = DomainRangeStrategy
            .explain(&QueryTarget::class_membership(&ind("bob"), &iri("Child")), &ctx)
            .unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].description(), "Range restriction: range(hasChild) = Child");
        assert_eq!(paths[0].reasoning_type(), ReasoningType::DomainRange);

        let none = DomainRangeStrategy
            .explain(&QueryTarget::class_membership(&ind("bob"), &iri("Parent")), &ctx)
            .unwrap();
        assert!(none.is_empty());
    }
}
