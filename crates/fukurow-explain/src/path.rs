//! Query targets and justification paths

use crate::error::{ExplainError, ExplainResult};
use fukurow_core::model::{vocabulary, Axiom, AxiomKind, ClassExpression, Individual, OwlIri, PropertyExpression};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Statement whose entailment is being explained
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryTarget {
    /// `individual rdf:type class`
    ClassMembership { individual: Individual, class: OwlIri },
    /// `subject property object`
    PropertyAssertion { subject: Individual, property: OwlIri, object: Individual },
}

impl QueryTarget {
    pub fn class_membership(individual: &Individual, class: &OwlIri) -> Self {
        QueryTarget::ClassMembership { individual: individual.clone(), class: class.clone() }
    }

    pub fn property_assertion(subject: &Individual, property: &OwlIri, object: &Individual) -> Self {
        QueryTarget::PropertyAssertion {
            subject: subject.clone(),
            property: property.clone(),
            object: object.clone(),
        }
    }

    /// Target for a fact statement. Inverse property assertions are turned
    /// around onto the named property.
    pub fn from_axiom(axiom: &Axiom) -> ExplainResult<Self> {
        match axiom.normalized() {
            Axiom::ClassAssertion(ClassExpression::Named(class), individual) => {
                Ok(QueryTarget::ClassMembership { individual, class })
            }
            Axiom::ObjectPropertyAssertion(PropertyExpression::ObjectProperty(property), subject, object) => {
                Ok(QueryTarget::PropertyAssertion { subject, property, object })
            }
            _ => Err(ExplainError::UnsupportedTarget(fukurow_core::format::axiom(axiom))),
        }
    }

    pub fn to_axiom(&self) -> Axiom {
        match self {
            QueryTarget::ClassMembership { individual, class } => Axiom::class_assertion(class, individual),
            QueryTarget::PropertyAssertion { subject, property, object } => {
                Axiom::property_assertion(property, subject, object)
            }
        }
    }

    /// `(subject, predicate, object)` over short forms, `rdf:type` for memberships
    pub fn triple(&self) -> (String, String, String) {
        match self {
            QueryTarget::ClassMembership { individual, class } => (
                individual.short_form().to_string(),
                vocabulary::RDF_TYPE_SHORT.to_string(),
                class.short_form().to_string(),
            ),
            QueryTarget::PropertyAssertion { subject, property, object } => (
                subject.short_form().to_string(),
                property.short_form().to_string(),
                object.short_form().to_string(),
            ),
        }
    }

    /// Triple key `subject|predicate|object` over short forms
    pub fn key(&self) -> String {
        let (s, p, o) = self.triple();
        format!("{}|{}|{}", s, p, o)
    }

    /// Collision-free key over full IRIs
    pub fn cache_key(&self) -> String {
        match self {
            QueryTarget::ClassMembership { individual, class } => {
                format!("{}|{}|{}", individual, vocabulary::RDF_TYPE, class)
            }
            QueryTarget::PropertyAssertion { subject, property, object } => {
                format!("{}|{}|{}", subject, property, object)
            }
        }
    }

    pub fn is_class_membership(&self) -> bool {
        matches!(self, QueryTarget::ClassMembership { .. })
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fukurow_core::format::axiom(&self.to_axiom()))
    }
}

/// Reasoning pattern a path exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasoningType {
    DirectAssertion,
    Subsumption,
    #[serde(rename = "SUBPROPERTY")]
    SubProperty,
    EquivalentClass,
    EquivalentProperty,
    DomainRange,
    TransitiveProperty,
    SymmetricProperty,
    InverseProperty,
    FunctionalProperty,
    PropertyChain,
    DisjointClass,
    Existential,
    Universal,
    Intersection,
    Union,
    Complement,
    Cardinality,
    ReflexiveProperty,
    AsymmetricProperty,
    IrreflexiveProperty,
    /// Fallback path whose statements carry no schema category
    OracleNative,
}

impl ReasoningType {
    /// Upper-snake name, as used in dedup signatures
    pub fn name(&self) -> &'static str {
        match self {
            ReasoningType::DirectAssertion => "DIRECT_ASSERTION",
            ReasoningType::Subsumption => "SUBSUMPTION",
            ReasoningType::SubProperty => "SUBPROPERTY",
            ReasoningType::EquivalentClass => "EQUIVALENT_CLASS",
            ReasoningType::EquivalentProperty => "EQUIVALENT_PROPERTY",
            ReasoningType::DomainRange => "DOMAIN_RANGE",
            ReasoningType::TransitiveProperty => "TRANSITIVE_PROPERTY",
            ReasoningType::SymmetricProperty => "SYMMETRIC_PROPERTY",
            ReasoningType::InverseProperty => "INVERSE_PROPERTY",
            ReasoningType::FunctionalProperty => "FUNCTIONAL_PROPERTY",
            ReasoningType::PropertyChain => "PROPERTY_CHAIN",
            ReasoningType::DisjointClass => "DISJOINT_CLASS",
            ReasoningType::Existential => "EXISTENTIAL",
            ReasoningType::Universal => "UNIVERSAL",
            ReasoningType::Intersection => "INTERSECTION",
            ReasoningType::Union => "UNION",
            ReasoningType::Complement => "COMPLEMENT",
            ReasoningType::Cardinality => "CARDINALITY",
            ReasoningType::ReflexiveProperty => "REFLEXIVE_PROPERTY",
            ReasoningType::AsymmetricProperty => "ASYMMETRIC_PROPERTY",
            ReasoningType::IrreflexiveProperty => "IRREFLEXIVE_PROPERTY",
            ReasoningType::OracleNative => "ORACLE_NATIVE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReasoningType::DirectAssertion => "Direct Assertion",
            ReasoningType::Subsumption => "Subsumption",
            ReasoningType::SubProperty => "Subproperty",
            ReasoningType::EquivalentClass => "Equivalent Class",
            ReasoningType::EquivalentProperty => "Equivalent Property",
            ReasoningType::DomainRange => "Domain/Range",
            ReasoningType::TransitiveProperty => "Transitive Property",
            ReasoningType::SymmetricProperty => "Symmetric Property",
            ReasoningType::InverseProperty => "Inverse Property",
            ReasoningType::FunctionalProperty => "Functional Property",
            ReasoningType::PropertyChain => "Property Chain",
            ReasoningType::DisjointClass => "Disjoint Class",
            ReasoningType::Existential => "Existential",
            ReasoningType::Universal => "Universal",
            ReasoningType::Intersection => "Intersection",
            ReasoningType::Union => "Union",
            ReasoningType::Complement => "Complement",
            ReasoningType::Cardinality => "Cardinality",
            ReasoningType::ReflexiveProperty => "Reflexive Property",
            ReasoningType::AsymmetricProperty => "Asymmetric Property",
            ReasoningType::IrreflexiveProperty => "Irreflexive Property",
            ReasoningType::OracleNative => "Oracle Native",
        }
    }

    /// Category of a schema statement kind; `None` for facts
    pub fn from_kind(kind: AxiomKind) -> Option<ReasoningType> {
        let reasoning_type = match kind {
            AxiomKind::ClassAssertion | AxiomKind::PropertyAssertion => return None,
            AxiomKind::SubClassOf => ReasoningType::Subsumption,
            AxiomKind::SubPropertyOf => ReasoningType::SubProperty,
            AxiomKind::EquivalentClasses => ReasoningType::EquivalentClass,
            AxiomKind::EquivalentProperties => ReasoningType::EquivalentProperty,
            AxiomKind::DisjointClasses => ReasoningType::DisjointClass,
            AxiomKind::Domain | AxiomKind::Range => ReasoningType::DomainRange,
            AxiomKind::Transitive => ReasoningType::TransitiveProperty,
            AxiomKind::Symmetric => ReasoningType::SymmetricProperty,
            AxiomKind::Asymmetric => ReasoningType::AsymmetricProperty,
            AxiomKind::Reflexive => ReasoningType::ReflexiveProperty,
            AxiomKind::Irreflexive => ReasoningType::IrreflexiveProperty,
            AxiomKind::Functional | AxiomKind::InverseFunctional => ReasoningType::FunctionalProperty,
            AxiomKind::InverseProperties => ReasoningType::InverseProperty,
            AxiomKind::PropertyChain => ReasoningType::PropertyChain,
            AxiomKind::IntersectionOf => ReasoningType::Intersection,
            AxiomKind::UnionOf => ReasoningType::Union,
            AxiomKind::ComplementOf => ReasoningType::Complement,
            AxiomKind::SomeValuesFrom => ReasoningType::Existential,
            AxiomKind::AllValuesFrom => ReasoningType::Universal,
            AxiomKind::Cardinality => ReasoningType::Cardinality,
        };
        Some(reasoning_type)
    }
}

impl fmt::Display for ReasoningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A set of statements that together explain one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustificationPath {
    axioms: Vec<Axiom>,
    description: String,
    reasoning_type: ReasoningType,
    inferred: bool,
    justifications: Vec<String>,
    strategy: String,
}

impl JustificationPath {
    /// Inferred path; repeated statements (by normalized content) are dropped,
    /// keeping first occurrence order. Justification strings follow the kept
    /// statements one to one.
    pub fn new(
        axioms: Vec<Axiom>,
        description: impl Into<String>,
        reasoning_type: ReasoningType,
        strategy: &str,
    ) -> Self {
        let mut seen = HashSet::new();
        let axioms: Vec<Axiom> = axioms.into_iter().filter(|ax| seen.insert(ax.normalized())).collect();
        let justifications = axioms.iter().map(fukurow_core::format::axiom).collect();
        Self {
            axioms,
            description: description.into(),
            reasoning_type,
            inferred: true,
            justifications,
            strategy: strategy.to_string(),
        }
    }

    /// The canonical single-statement path for an asserted target
    pub fn direct(axiom: Axiom, strategy: &str) -> Self {
        let description = match axiom {
            Axiom::ClassAssertion(..) => "Direct class assertion found in ontology",
            _ => "Direct property assertion",
        };
        Self::new(vec![axiom], description, ReasoningType::DirectAssertion, strategy).with_inferred(false)
    }

    pub fn with_inferred(mut self, inferred: bool) -> Self {
        self.inferred = inferred;
        self
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reasoning_type(&self) -> ReasoningType {
        self.reasoning_type
    }

    pub fn is_inferred(&self) -> bool {
        self.inferred
    }

    pub fn justifications(&self) -> &[String] {
        &self.justifications
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Number of distinct statements
    pub fn complexity(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    pub fn schema_axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter().filter(|ax| ax.is_schema())
    }

    pub fn formatted_axioms(&self) -> Vec<String> {
        self.axioms.iter().map(fukurow_core::format::axiom).collect()
    }
}

impl fmt::Display for JustificationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({} statements)", self.reasoning_type, self.description, self.complexity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(name: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/family#{}", name))
    }

    fn ind(name: &str) -> Individual {
        Individual(iri(name))
    }

    #[test]
    fn test_target_keys() {
        let target = QueryTarget::class_membership(&ind("john"), &iri("Person"));
        assert_eq!(target.key(), "john|rdf:type|Person");
        assert!(target.cache_key().contains("22-rdf-syntax-ns#type"));

        let edge = QueryTarget::property_assertion(&ind("a"), &iri("isAncestorOf"), &ind("c"));
        assert_eq!(edge.key(), "a|isAncestorOf|c");
        assert_eq!(edge.to_string(), "a isAncestorOf c");
    }

    #[test]
    fn test_target_from_inverse_assertion() {
        let axiom = Axiom::ObjectPropertyAssertion(
            PropertyExpression::inverse_of(PropertyExpression::ObjectProperty(iri("hasParent"))),
            ind("john"),
            ind("bob"),
        );
        let target = QueryTarget::from_axiom(&axiom).unwrap();
        assert_eq!(target, QueryTarget::property_assertion(&ind("bob"), &iri("hasParent"), &ind("john")));

        let schema = Axiom::subclass(&iri("Man"), &iri("Person"));
        assert!(matches!(QueryTarget::from_axiom(&schema), Err(ExplainError::UnsupportedTarget(_))));
    }

    #[test]
    fn test_path_drops_repeated_statements() {
        let sub = Axiom::subclass(&iri("Man"), &iri("Person"));
        let path = JustificationPath::new(
            vec![sub.clone(), Axiom::class_assertion(&iri("Man"), &ind("john")), sub],
            "Subclass reasoning: Man ⊑ Person (1 steps)",
            ReasoningType::Subsumption,
            "class_hierarchy",
        );
        assert_eq!(path.complexity(), 2);
        assert!(path.is_inferred());
        assert_eq!(path.schema_axioms().count(), 1);
        assert_eq!(path.justifications(), ["Man SubClassOf Person".to_string(), "john rdf:type Man".to_string()]);
    }

    #[test]
    fn test_direct_path() {
        let path = JustificationPath::direct(Axiom::class_assertion(&iri("Man"), &ind("john")), "direct");
        assert!(!path.is_inferred());
        assert_eq!(path.complexity(), 1);
        assert_eq!(path.reasoning_type(), ReasoningType::DirectAssertion);
        assert_eq!(path.justifications(), ["john rdf:type Man".to_string()]);
    }

    #[test]
    fn test_reasoning_type_serializes_upper_snake() {
        let json = serde_json::to_string(&ReasoningType::TransitiveProperty).unwrap();
        assert_eq!(json, "\"TRANSITIVE_PROPERTY\"");
        assert_eq!(ReasoningType::from_kind(AxiomKind::Range), Some(ReasoningType::DomainRange));
        assert_eq!(ReasoningType::from_kind(AxiomKind::ClassAssertion), None);
    }
}
