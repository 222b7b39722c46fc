//! OWL 公理データモデル

use serde::{Deserialize, Serialize};
use std::fmt;

/// OWL IRI wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OwlIri(pub String);

impl OwlIri {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local name: everything after the last `#`, or after the last `/` when there is no `#`.
    pub fn short_form(&self) -> &str {
        let iri = self.0.as_str();
        if let Some(idx) = iri.rfind('#') {
            return &iri[idx + 1..];
        }
        match iri.rfind('/') {
            Some(idx) => &iri[idx + 1..],
            None => iri,
        }
    }

    pub fn is_owl_thing(&self) -> bool {
        self.0 == vocabulary::OWL_THING
    }

    pub fn is_owl_nothing(&self) -> bool {
        self.0 == vocabulary::OWL_NOTHING
    }
}

impl fmt::Display for OwlIri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OWL Individual
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Individual(pub OwlIri);

impl Individual {
    pub fn new(s: impl Into<String>) -> Self {
        Self(OwlIri::new(s))
    }

    pub fn iri(&self) -> &OwlIri {
        &self.0
    }

    pub fn short_form(&self) -> &str {
        self.0.short_form()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object property expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PropertyExpression {
    /// Named object property
    ObjectProperty(OwlIri),

    /// Inverse property: R⁻
    InverseOf(Box<PropertyExpression>),
}

impl PropertyExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        PropertyExpression::ObjectProperty(OwlIri::new(iri))
    }

    pub fn inverse_of(property: PropertyExpression) -> Self {
        PropertyExpression::InverseOf(Box::new(property))
    }

    /// The IRI of a named property, `None` for inverse expressions.
    pub fn as_named(&self) -> Option<&OwlIri> {
        match self {
            PropertyExpression::ObjectProperty(iri) => Some(iri),
            PropertyExpression::InverseOf(_) => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.as_named().is_none()
    }

    /// Named property underneath any number of inversions, and whether the
    /// expression denotes its inverse (odd nesting).
    pub fn base(&self) -> (&OwlIri, bool) {
        match self {
            PropertyExpression::ObjectProperty(iri) => (iri, false),
            PropertyExpression::InverseOf(inner) => {
                let (iri, inverted) = inner.base();
                (iri, !inverted)
            }
        }
    }

    /// Collapses double inversions so that equal properties compare equal.
    pub fn simplified(&self) -> PropertyExpression {
        let (iri, inverted) = self.base();
        let named = PropertyExpression::ObjectProperty(iri.clone());
        if inverted {
            PropertyExpression::inverse_of(named)
        } else {
            named
        }
    }

    /// True when this expression is exactly the named property `iri`.
    pub fn is_named(&self, iri: &OwlIri) -> bool {
        self.as_named() == Some(iri)
    }
}

/// OWL Class Expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ClassExpression {
    /// Named class
    Named(OwlIri),

    /// owl:Thing (⊤)
    Thing,

    /// owl:Nothing (⊥)
    Nothing,

    /// Intersection of classes: C1 ⊓ C2 ⊓ ... ⊓ Cn
    IntersectionOf(Vec<ClassExpression>),

    /// Union of classes: C1 ⊔ C2 ⊔ ... ⊔ Cn
    UnionOf(Vec<ClassExpression>),

    /// Complement of class: ¬C
    ComplementOf(Box<ClassExpression>),

    /// Enumeration of individuals: {i1, i2, ..., in}
    OneOf(Vec<Individual>),

    /// Existential restriction: ∃R.C
    SomeValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Universal restriction: ∀R.C
    AllValuesFrom {
        property: PropertyExpression,
        class: Box<ClassExpression>,
    },

    /// Has value: ∃R.{i}
    HasValue {
        property: PropertyExpression,
        individual: Individual,
    },

    /// Minimum cardinality: ≥n R.C
    MinCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>, // None means owl:Thing
    },

    /// Maximum cardinality: ≤n R.C
    MaxCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>,
    },

    /// Exact cardinality: =n R.C
    ExactCardinality {
        cardinality: u32,
        property: PropertyExpression,
        class: Option<Box<ClassExpression>>,
    },
}

impl ClassExpression {
    pub fn named(iri: impl Into<String>) -> Self {
        ClassExpression::Named(OwlIri::new(iri))
    }

    pub fn some(property: PropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom { property, class: Box::new(class) }
    }

    pub fn only(property: PropertyExpression, class: ClassExpression) -> Self {
        ClassExpression::AllValuesFrom { property, class: Box::new(class) }
    }

    pub fn as_named(&self) -> Option<&OwlIri> {
        match self {
            ClassExpression::Named(iri) => Some(iri),
            _ => None,
        }
    }

    /// `Thing`, `Nothing` and named classes are not anonymous.
    pub fn is_anonymous(&self) -> bool {
        !matches!(
            self,
            ClassExpression::Named(_) | ClassExpression::Thing | ClassExpression::Nothing
        )
    }

    pub fn is_thing(&self) -> bool {
        match self {
            ClassExpression::Thing => true,
            ClassExpression::Named(iri) => iri.is_owl_thing(),
            _ => false,
        }
    }

    pub fn is_named(&self, iri: &OwlIri) -> bool {
        self.as_named() == Some(iri)
    }

    /// Kind of the outermost constructor, for structured expressions only.
    pub fn constructor_kind(&self) -> Option<AxiomKind> {
        match self {
            ClassExpression::IntersectionOf(_) => Some(AxiomKind::IntersectionOf),
            ClassExpression::UnionOf(_) => Some(AxiomKind::UnionOf),
            ClassExpression::ComplementOf(_) => Some(AxiomKind::ComplementOf),
            ClassExpression::SomeValuesFrom { .. } | ClassExpression::HasValue { .. } => {
                Some(AxiomKind::SomeValuesFrom)
            }
            ClassExpression::AllValuesFrom { .. } => Some(AxiomKind::AllValuesFrom),
            ClassExpression::MinCardinality { .. }
            | ClassExpression::MaxCardinality { .. }
            | ClassExpression::ExactCardinality { .. } => Some(AxiomKind::Cardinality),
            ClassExpression::Named(_)
            | ClassExpression::Thing
            | ClassExpression::Nothing
            | ClassExpression::OneOf(_) => None,
        }
    }

    /// Sorts the operands of n-ary constructors, recursively.
    pub fn normalized(&self) -> ClassExpression {
        match self {
            ClassExpression::IntersectionOf(ops) => ClassExpression::IntersectionOf(sorted_classes(ops)),
            ClassExpression::UnionOf(ops) => ClassExpression::UnionOf(sorted_classes(ops)),
            ClassExpression::ComplementOf(inner) => ClassExpression::ComplementOf(Box::new(inner.normalized())),
            ClassExpression::OneOf(inds) => {
                let mut inds = inds.clone();
                inds.sort();
                inds.dedup();
                ClassExpression::OneOf(inds)
            }
            ClassExpression::SomeValuesFrom { property, class } => ClassExpression::SomeValuesFrom {
                property: property.simplified(),
                class: Box::new(class.normalized()),
            },
            ClassExpression::AllValuesFrom { property, class } => ClassExpression::AllValuesFrom {
                property: property.simplified(),
                class: Box::new(class.normalized()),
            },
            ClassExpression::HasValue { property, individual } => ClassExpression::HasValue {
                property: property.simplified(),
                individual: individual.clone(),
            },
            ClassExpression::MinCardinality { cardinality, property, class } => ClassExpression::MinCardinality {
                cardinality: *cardinality,
                property: property.simplified(),
                class: class.as_ref().map(|c| Box::new(c.normalized())),
            },
            ClassExpression::MaxCardinality { cardinality, property, class } => ClassExpression::MaxCardinality {
                cardinality: *cardinality,
                property: property.simplified(),
                class: class.as_ref().map(|c| Box::new(c.normalized())),
            },
            ClassExpression::ExactCardinality { cardinality, property, class } => ClassExpression::ExactCardinality {
                cardinality: *cardinality,
                property: property.simplified(),
                class: class.as_ref().map(|c| Box::new(c.normalized())),
            },
            ClassExpression::Named(_) | ClassExpression::Thing | ClassExpression::Nothing => self.clone(),
        }
    }
}

fn sorted_classes(ops: &[ClassExpression]) -> Vec<ClassExpression> {
    let mut ops: Vec<ClassExpression> = ops.iter().map(ClassExpression::normalized).collect();
    ops.sort();
    ops.dedup();
    ops
}

fn sorted_properties(ops: &[PropertyExpression]) -> Vec<PropertyExpression> {
    let mut ops: Vec<PropertyExpression> = ops.iter().map(PropertyExpression::simplified).collect();
    ops.sort();
    ops.dedup();
    ops
}

/// Syntactic type of an axiom. One variant per [`Axiom`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AxiomType {
    ClassAssertion,
    ObjectPropertyAssertion,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    SubPropertyOf,
    EquivalentProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    TransitiveProperty,
    SymmetricProperty,
    AsymmetricProperty,
    ReflexiveProperty,
    IrreflexiveProperty,
    FunctionalProperty,
    InverseFunctionalProperty,
    InverseProperties,
    SubPropertyChainOf,
}

impl AxiomType {
    pub const ALL: [AxiomType; 18] = [
        AxiomType::ClassAssertion,
        AxiomType::ObjectPropertyAssertion,
        AxiomType::SubClassOf,
        AxiomType::EquivalentClasses,
        AxiomType::DisjointClasses,
        AxiomType::SubPropertyOf,
        AxiomType::EquivalentProperties,
        AxiomType::ObjectPropertyDomain,
        AxiomType::ObjectPropertyRange,
        AxiomType::TransitiveProperty,
        AxiomType::SymmetricProperty,
        AxiomType::AsymmetricProperty,
        AxiomType::ReflexiveProperty,
        AxiomType::IrreflexiveProperty,
        AxiomType::FunctionalProperty,
        AxiomType::InverseFunctionalProperty,
        AxiomType::InverseProperties,
        AxiomType::SubPropertyChainOf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AxiomType::ClassAssertion => "ClassAssertion",
            AxiomType::ObjectPropertyAssertion => "ObjectPropertyAssertion",
            AxiomType::SubClassOf => "SubClassOf",
            AxiomType::EquivalentClasses => "EquivalentClasses",
            AxiomType::DisjointClasses => "DisjointClasses",
            AxiomType::SubPropertyOf => "SubObjectPropertyOf",
            AxiomType::EquivalentProperties => "EquivalentObjectProperties",
            AxiomType::ObjectPropertyDomain => "ObjectPropertyDomain",
            AxiomType::ObjectPropertyRange => "ObjectPropertyRange",
            AxiomType::TransitiveProperty => "TransitiveObjectProperty",
            AxiomType::SymmetricProperty => "SymmetricObjectProperty",
            AxiomType::AsymmetricProperty => "AsymmetricObjectProperty",
            AxiomType::ReflexiveProperty => "ReflexiveObjectProperty",
            AxiomType::IrreflexiveProperty => "IrreflexiveObjectProperty",
            AxiomType::FunctionalProperty => "FunctionalObjectProperty",
            AxiomType::InverseFunctionalProperty => "InverseFunctionalObjectProperty",
            AxiomType::InverseProperties => "InverseObjectProperties",
            AxiomType::SubPropertyChainOf => "SubPropertyChainOf",
        }
    }
}

impl fmt::Display for AxiomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasoning-relevant kind of an axiom.
///
/// Equal to the syntactic type except for class axioms whose operand is a
/// structured class expression, which take the kind of that constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AxiomKind {
    ClassAssertion,
    PropertyAssertion,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    SubPropertyOf,
    EquivalentProperties,
    Domain,
    Range,
    Transitive,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
    Functional,
    InverseFunctional,
    InverseProperties,
    PropertyChain,
    IntersectionOf,
    UnionOf,
    ComplementOf,
    SomeValuesFrom,
    AllValuesFrom,
    Cardinality,
}

/// OWL Axiom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Axiom {
    /// ClassAssertion(C a)
    ClassAssertion(ClassExpression, Individual),

    /// ObjectPropertyAssertion(P a b)
    ObjectPropertyAssertion(PropertyExpression, Individual, Individual),

    /// SubClassOf(C1 C2)
    SubClassOf(ClassExpression, ClassExpression),

    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<ClassExpression>),

    /// SubObjectPropertyOf(P1 P2)
    SubPropertyOf(PropertyExpression, PropertyExpression),

    /// EquivalentObjectProperties(P1 ... Pn)
    EquivalentProperties(Vec<PropertyExpression>),

    /// ObjectPropertyDomain(P C)
    ObjectPropertyDomain(PropertyExpression, ClassExpression),

    /// ObjectPropertyRange(P C)
    ObjectPropertyRange(PropertyExpression, ClassExpression),

    TransitiveProperty(PropertyExpression),
    SymmetricProperty(PropertyExpression),
    AsymmetricProperty(PropertyExpression),
    ReflexiveProperty(PropertyExpression),
    IrreflexiveProperty(PropertyExpression),
    FunctionalProperty(PropertyExpression),
    InverseFunctionalProperty(PropertyExpression),

    /// InverseObjectProperties(P1 P2)
    InverseProperties(PropertyExpression, PropertyExpression),

    /// SubObjectPropertyOf(ObjectPropertyChain(P1 ... Pn) P)
    SubPropertyChainOf(Vec<PropertyExpression>, PropertyExpression),
}

impl Axiom {
    /// ClassAssertion of a named class
    pub fn class_assertion(class: &OwlIri, individual: &Individual) -> Self {
        Axiom::ClassAssertion(ClassExpression::Named(class.clone()), individual.clone())
    }

    /// ObjectPropertyAssertion of a named property
    pub fn property_assertion(property: &OwlIri, subject: &Individual, object: &Individual) -> Self {
        Axiom::ObjectPropertyAssertion(
            PropertyExpression::ObjectProperty(property.clone()),
            subject.clone(),
            object.clone(),
        )
    }

    /// SubClassOf between two named classes
    pub fn subclass(sub: &OwlIri, sup: &OwlIri) -> Self {
        Axiom::SubClassOf(ClassExpression::Named(sub.clone()), ClassExpression::Named(sup.clone()))
    }

    pub fn axiom_type(&self) -> AxiomType {
        match self {
            Axiom::ClassAssertion(..) => AxiomType::ClassAssertion,
            Axiom::ObjectPropertyAssertion(..) => AxiomType::ObjectPropertyAssertion,
            Axiom::SubClassOf(..) => AxiomType::SubClassOf,
            Axiom::EquivalentClasses(_) => AxiomType::EquivalentClasses,
            Axiom::DisjointClasses(_) => AxiomType::DisjointClasses,
            Axiom::SubPropertyOf(..) => AxiomType::SubPropertyOf,
            Axiom::EquivalentProperties(_) => AxiomType::EquivalentProperties,
            Axiom::ObjectPropertyDomain(..) => AxiomType::ObjectPropertyDomain,
            Axiom::ObjectPropertyRange(..) => AxiomType::ObjectPropertyRange,
            Axiom::TransitiveProperty(_) => AxiomType::TransitiveProperty,
            Axiom::SymmetricProperty(_) => AxiomType::SymmetricProperty,
            Axiom::AsymmetricProperty(_) => AxiomType::AsymmetricProperty,
            Axiom::ReflexiveProperty(_) => AxiomType::ReflexiveProperty,
            Axiom::IrreflexiveProperty(_) => AxiomType::IrreflexiveProperty,
            Axiom::FunctionalProperty(_) => AxiomType::FunctionalProperty,
            Axiom::InverseFunctionalProperty(_) => AxiomType::InverseFunctionalProperty,
            Axiom::InverseProperties(..) => AxiomType::InverseProperties,
            Axiom::SubPropertyChainOf(..) => AxiomType::SubPropertyChainOf,
        }
    }

    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::ClassAssertion(..) => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion(..) => AxiomKind::PropertyAssertion,
            Axiom::SubClassOf(sub, sup) => sub
                .constructor_kind()
                .or_else(|| sup.constructor_kind())
                .unwrap_or(AxiomKind::SubClassOf),
            Axiom::EquivalentClasses(ops) => sorted_classes(ops)
                .iter()
                .find_map(ClassExpression::constructor_kind)
                .unwrap_or(AxiomKind::EquivalentClasses),
            Axiom::DisjointClasses(_) => AxiomKind::DisjointClasses,
            Axiom::SubPropertyOf(..) => AxiomKind::SubPropertyOf,
            Axiom::EquivalentProperties(_) => AxiomKind::EquivalentProperties,
            Axiom::ObjectPropertyDomain(..) => AxiomKind::Domain,
            Axiom::ObjectPropertyRange(..) => AxiomKind::Range,
            Axiom::TransitiveProperty(_) => AxiomKind::Transitive,
            Axiom::SymmetricProperty(_) => AxiomKind::Symmetric,
            Axiom::AsymmetricProperty(_) => AxiomKind::Asymmetric,
            Axiom::ReflexiveProperty(_) => AxiomKind::Reflexive,
            Axiom::IrreflexiveProperty(_) => AxiomKind::Irreflexive,
            Axiom::FunctionalProperty(_) => AxiomKind::Functional,
            Axiom::InverseFunctionalProperty(_) => AxiomKind::InverseFunctional,
            Axiom::InverseProperties(..) => AxiomKind::InverseProperties,
            Axiom::SubPropertyChainOf(..) => AxiomKind::PropertyChain,
        }
    }

    /// Fact (ABox) statements: class and property assertions.
    pub fn is_fact(&self) -> bool {
        matches!(self, Axiom::ClassAssertion(..) | Axiom::ObjectPropertyAssertion(..))
    }

    /// Schema (TBox/RBox) statements: everything that is not a fact.
    pub fn is_schema(&self) -> bool {
        !self.is_fact()
    }

    /// Content-equal form: n-ary operands sorted, double inversions collapsed,
    /// and inverse-property assertions rewritten onto the named property.
    pub fn normalized(&self) -> Axiom {
        match self {
            Axiom::ClassAssertion(class, ind) => Axiom::ClassAssertion(class.normalized(), ind.clone()),
            Axiom::ObjectPropertyAssertion(p, s, o) => {
                let (iri, inverted) = p.base();
                let named = PropertyExpression::ObjectProperty(iri.clone());
                if inverted {
                    Axiom::ObjectPropertyAssertion(named, o.clone(), s.clone())
                } else {
                    Axiom::ObjectPropertyAssertion(named, s.clone(), o.clone())
                }
            }
            Axiom::SubClassOf(sub, sup) => Axiom::SubClassOf(sub.normalized(), sup.normalized()),
            Axiom::EquivalentClasses(ops) => Axiom::EquivalentClasses(sorted_classes(ops)),
            Axiom::DisjointClasses(ops) => Axiom::DisjointClasses(sorted_classes(ops)),
            Axiom::SubPropertyOf(sub, sup) => Axiom::SubPropertyOf(sub.simplified(), sup.simplified()),
            Axiom::EquivalentProperties(ops) => Axiom::EquivalentProperties(sorted_properties(ops)),
            Axiom::ObjectPropertyDomain(p, c) => Axiom::ObjectPropertyDomain(p.simplified(), c.normalized()),
            Axiom::ObjectPropertyRange(p, c) => Axiom::ObjectPropertyRange(p.simplified(), c.normalized()),
            Axiom::TransitiveProperty(p) => Axiom::TransitiveProperty(p.simplified()),
            Axiom::SymmetricProperty(p) => Axiom::SymmetricProperty(p.simplified()),
            Axiom::AsymmetricProperty(p) => Axiom::AsymmetricProperty(p.simplified()),
            Axiom::ReflexiveProperty(p) => Axiom::ReflexiveProperty(p.simplified()),
            Axiom::IrreflexiveProperty(p) => Axiom::IrreflexiveProperty(p.simplified()),
            Axiom::FunctionalProperty(p) => Axiom::FunctionalProperty(p.simplified()),
            Axiom::InverseFunctionalProperty(p) => Axiom::InverseFunctionalProperty(p.simplified()),
            Axiom::InverseProperties(a, b) => {
                let (a, b) = (a.simplified(), b.simplified());
                if a <= b {
                    Axiom::InverseProperties(a, b)
                } else {
                    Axiom::InverseProperties(b, a)
                }
            }
            Axiom::SubPropertyChainOf(chain, sup) => Axiom::SubPropertyChainOf(
                chain.iter().map(PropertyExpression::simplified).collect(),
                sup.simplified(),
            ),
        }
    }

    /// Top-level class operands, in declaration order.
    pub fn class_operands(&self) -> Vec<&ClassExpression> {
        match self {
            Axiom::ClassAssertion(c, _) => vec![c],
            Axiom::SubClassOf(sub, sup) => vec![sub, sup],
            Axiom::EquivalentClasses(ops) | Axiom::DisjointClasses(ops) => ops.iter().collect(),
            Axiom::ObjectPropertyDomain(_, c) | Axiom::ObjectPropertyRange(_, c) => vec![c],
            _ => Vec::new(),
        }
    }

    /// Top-level property operands, in declaration order. Chain links come first.
    pub fn property_operands(&self) -> Vec<&PropertyExpression> {
        match self {
            Axiom::ObjectPropertyAssertion(p, _, _)
            | Axiom::ObjectPropertyDomain(p, _)
            | Axiom::ObjectPropertyRange(p, _)
            | Axiom::TransitiveProperty(p)
            | Axiom::SymmetricProperty(p)
            | Axiom::AsymmetricProperty(p)
            | Axiom::ReflexiveProperty(p)
            | Axiom::IrreflexiveProperty(p)
            | Axiom::FunctionalProperty(p)
            | Axiom::InverseFunctionalProperty(p) => vec![p],
            Axiom::SubPropertyOf(a, b) | Axiom::InverseProperties(a, b) => vec![a, b],
            Axiom::EquivalentProperties(ops) => ops.iter().collect(),
            Axiom::SubPropertyChainOf(chain, sup) => chain.iter().chain(std::iter::once(sup)).collect(),
            _ => Vec::new(),
        }
    }

    /// Individuals mentioned by a fact statement.
    pub fn individuals(&self) -> Vec<&Individual> {
        match self {
            Axiom::ClassAssertion(_, ind) => vec![ind],
            Axiom::ObjectPropertyAssertion(_, s, o) => vec![s, o],
            _ => Vec::new(),
        }
    }
}

/// OWL / RDF 語彙の IRI
pub mod vocabulary {
    use super::OwlIri;

    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// Short form used for `rdf:type` in triple keys and justification strings.
    pub const RDF_TYPE_SHORT: &str = "rdf:type";

    pub fn owl_thing() -> OwlIri { OwlIri::new(OWL_THING) }
    pub fn owl_nothing() -> OwlIri { OwlIri::new(OWL_NOTHING) }
    pub fn rdf_type() -> OwlIri { OwlIri::new(RDF_TYPE) }
}
