//! Property chain reasoning

use super::{assertion, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::model::{Axiom, Individual, PropertyExpression};
use itertools::Itertools;
use std::collections::HashSet;
use tracing::debug;

/// Explains `p(s, o)` by walking the links of a chain `P1 ∘ … ∘ Pn ⊑ p` from
/// the subject towards the object.
pub struct PropertyChainStrategy;

impl PropertyChainStrategy {
    pub const NAME: &'static str = "property_chain";
}

impl Strategy for PropertyChainStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Link-by-link matches of property chains ending in the target property"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn can_explain(&self, target: &QueryTarget) -> bool {
        !target.is_class_membership()
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let QueryTarget::PropertyAssertion { subject, property, object } = target else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        for axiom in ctx.store.chain_axioms_for(property) {
            let Axiom::SubPropertyChainOf(links, _) = axiom else { continue };
            if links.len() > ctx.config.max_depth {
                debug!(links = links.len(), "Property chain longer than max_depth skipped");
                continue;
            }

            let mut walk = ChainWalk {
                ctx,
                links,
                object,
                visited: HashSet::new(),
                matched: Vec::new(),
                found: Vec::new(),
            };
            walk.step(0, subject);

            for matched in walk.found {
                let intermediates = matched
                    .iter()
                    .take(links.len().saturating_sub(1))
                    .map(|(_, to)| to.short_form())
                    .join(", ");
                let mut axioms: Vec<Axiom> = matched
                    .iter()
                    .zip(links.iter())
                    .map(|((from, to), link)| assertion(link, from, to))
                    .collect();
                axioms.push(axiom.clone());

                let description = format!("Property chain reasoning via {}", intermediates);
                paths.push(JustificationPath::new(axioms, description, ReasoningType::PropertyChain, Self::NAME));
                if paths.len() >= ctx.config.max_paths_per_strategy {
                    return Ok(paths);
                }
            }
        }
        Ok(paths)
    }
}

/// Depth-first matcher for one chain axiom
struct ChainWalk<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    links: &'c [PropertyExpression],
    object: &'c Individual,
    /// (link index, individual) pairs on the current branch
    visited: HashSet<(usize, Individual)>,
    /// Edges matched so far on the current branch
    matched: Vec<(Individual, Individual)>,
    found: Vec<Vec<(Individual, Individual)>>,
}

impl ChainWalk<'_, '_> {
    fn step(&mut self, index: usize, current: &Individual) {
        if self.found.len() >= self.ctx.config.max_paths_per_strategy {
            return;
        }
        if index == self.links.len() {
            if current == self.object {
                self.found.push(self.matched.clone());
            }
            return;
        }
        if !self.visited.insert((index, current.clone())) {
            return;
        }

        let last = index + 1 == self.links.len();
        for next in self.ctx.values(current, &self.links[index]) {
            if last && &next != self.object {
                continue;
            }
            self.matched.push((current.clone(), next.clone()));
            self.step(index + 1, &next);
            self.matched.pop();
        }

        self.visited.remove(&(index, current.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplainConfig;
    use crate::strategy::fixtures::*;

    #[test]
    fn test_two_link_chain() {
        let (store, kb) = knowledge_base(vec![
            Axiom::SubPropertyChainOf(vec![prop("hasParent"), prop("hasBrother")], prop("hasUncle")),
            Axiom::property_assertion(&iri("hasParent"), &ind("tim"), &ind("tom")),
            Axiom::property_assertion(&iri("hasBrother"), &ind("tom"), &ind("ted")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let target = QueryTarget::property_assertion(&ind("tim"), &iri("hasUncle"), &ind("ted"));
        let paths = PropertyChainStrategy.explain(&target, &ctx).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].complexity(), 3);
        assert_eq!(paths[0].description(), "Property chain reasoning via tom");
    }

    #[test]
    fn test_three_link_chain_with_alternatives() {
        let (store, kb) = knowledge_base(vec![
            Axiom::SubPropertyChainOf(vec![prop("knows"), prop("knows"), prop("knows")], prop("reaches")),
            Axiom::property_assertion(&iri("knows"), &ind("a"), &ind("b")),
            Axiom::property_assertion(&iri("knows"), &ind("a"), &ind("c")),
            Axiom::property_assertion(&iri("knows"), &ind("b"), &ind("d")),
            Axiom::property_assertion(&iri("knows"), &ind("c"), &ind("d")),
            Axiom::property_assertion(&iri("knows"), &ind("d"), &ind("e")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let target = QueryTarget::property_assertion(&ind("a"), &iri("reaches"), &ind("e"));
        let paths = PropertyChainStrategy.explain(&target, &ctx).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.complexity() == 4));
        assert_eq!(paths[0].description(), "Property chain reasoning via b, d");
    }

    #[test]
    fn test_no_match() {
        let (store, kb) = knowledge_base(vec![
            Axiom::SubPropertyChainOf(vec![prop("hasParent"), prop("hasBrother")], prop("hasUncle")),
            Axiom::property_assertion(&iri("hasParent"), &ind("tim"), &ind("tom")),
        ]);
        let config = ExplainConfig::default();
        let ctx = SearchContext::new(&store, &kb, &config);

        let target = QueryTarget::property_assertion(&ind("tim"), &iri("hasUncle"), &ind("ted"));
        assert!(PropertyChainStrategy.explain(&target, &ctx).unwrap().is_empty());
    }
}
