//! Human-readable rendering of axioms and expressions using short forms

use crate::model::{Axiom, ClassExpression, Individual, PropertyExpression};
use itertools::Itertools;

/// Short form of a property expression: `p` or `inverse(p)`.
pub fn property(expr: &PropertyExpression) -> String {
    match expr {
        PropertyExpression::ObjectProperty(iri) => iri.short_form().to_string(),
        PropertyExpression::InverseOf(inner) => format!("inverse({})", property(inner)),
    }
}

/// Short form of a class expression, Manchester-like for anonymous classes.
pub fn class(expr: &ClassExpression) -> String {
    match expr {
        ClassExpression::Named(iri) => iri.short_form().to_string(),
        ClassExpression::Thing => "Thing".to_string(),
        ClassExpression::Nothing => "Nothing".to_string(),
        ClassExpression::IntersectionOf(ops) => format!("({})", ops.iter().map(class).join(" and ")),
        ClassExpression::UnionOf(ops) => format!("({})", ops.iter().map(class).join(" or ")),
        ClassExpression::ComplementOf(inner) => format!("not {}", class(inner)),
        ClassExpression::OneOf(inds) => format!("{{{}}}", inds.iter().map(Individual::short_form).join(", ")),
        ClassExpression::SomeValuesFrom { property: p, class: c } => format!("({} some {})", property(p), class(c)),
        ClassExpression::AllValuesFrom { property: p, class: c } => format!("({} only {})", property(p), class(c)),
        ClassExpression::HasValue { property: p, individual } => {
            format!("({} value {})", property(p), individual.short_form())
        }
        ClassExpression::MinCardinality { cardinality, property: p, class: c } => {
            cardinality_form("min", *cardinality, p, c.as_deref())
        }
        ClassExpression::MaxCardinality { cardinality, property: p, class: c } => {
            cardinality_form("max", *cardinality, p, c.as_deref())
        }
        ClassExpression::ExactCardinality { cardinality, property: p, class: c } => {
            cardinality_form("exactly", *cardinality, p, c.as_deref())
        }
    }
}

fn cardinality_form(op: &str, n: u32, p: &PropertyExpression, filler: Option<&ClassExpression>) -> String {
    match filler {
        Some(c) => format!("({} {} {} {})", property(p), op, n, class(c)),
        None => format!("({} {} {})", property(p), op, n),
    }
}

/// Justification-string rendering of an axiom, e.g. `john rdf:type Person`
/// or `Man SubClassOf Person`.
pub fn axiom(axiom: &Axiom) -> String {
    match axiom {
        Axiom::ClassAssertion(c, ind) => format!("{} rdf:type {}", ind.short_form(), class(c)),
        Axiom::ObjectPropertyAssertion(p, s, o) => {
            format!("{} {} {}", s.short_form(), property(p), o.short_form())
        }
        Axiom::SubClassOf(sub, sup) => format!("{} SubClassOf {}", class(sub), class(sup)),
        Axiom::EquivalentClasses(ops) => ops.iter().map(class).join(" EquivalentTo "),
        Axiom::DisjointClasses(ops) => format!("DisjointClasses({})", ops.iter().map(class).join(", ")),
        Axiom::SubPropertyOf(sub, sup) => format!("{} SubPropertyOf {}", property(sub), property(sup)),
        Axiom::EquivalentProperties(ops) => ops.iter().map(property).join(" EquivalentTo "),
        Axiom::ObjectPropertyDomain(p, c) => format!("{} Domain {}", property(p), class(c)),
        Axiom::ObjectPropertyRange(p, c) => format!("{} Range {}", property(p), class(c)),
        Axiom::TransitiveProperty(p) => format!("TransitiveObjectProperty({})", property(p)),
        Axiom::SymmetricProperty(p) => format!("SymmetricObjectProperty({})", property(p)),
        Axiom::AsymmetricProperty(p) => format!("AsymmetricObjectProperty({})", property(p)),
        Axiom::ReflexiveProperty(p) => format!("ReflexiveObjectProperty({})", property(p)),
        Axiom::IrreflexiveProperty(p) => format!("IrreflexiveObjectProperty({})", property(p)),
        Axiom::FunctionalProperty(p) => format!("FunctionalObjectProperty({})", property(p)),
        Axiom::InverseFunctionalProperty(p) => format!("InverseFunctionalObjectProperty({})", property(p)),
        Axiom::InverseProperties(a, b) => format!("{} InverseOf {}", property(a), property(b)),
        Axiom::SubPropertyChainOf(chain, sup) => {
            format!("PropertyChain({}) SubPropertyOf {}", chain.iter().map(property).join(" o "), property(sup))
        }
    }
}
