//! Feature tags for justification paths

use crate::dedup::Deduplicator;
use crate::path::JustificationPath;
use fukurow_core::model::{Axiom, AxiomKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Order in which codes appear in a tag
pub const CANONICAL_ORDER: [char; 20] = [
    'D', 'H', 'Q', 'T', 'S', 'I', 'F', 'N', 'E', 'L', 'C', '∩', 'U', 'R', 'M', 'J', 'V', 'A', 'Y', '¬',
];

/// Code appended when the schema statements span several categories
pub const MULTI_STEP: char = 'M';

/// Category of a schema statement, used for the multi-step flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureCategory {
    Hierarchy,
    Equivalence,
    DomainRange,
    Transitivity,
    Symmetry,
    Inverse,
    Functional,
    PropertyChain,
    Disjoint,
    Intersection,
    Union,
    Existential,
    Universal,
    Cardinality,
    Other,
}

impl FeatureCategory {
    pub fn name(&self) -> &'static str {
        match self {
            FeatureCategory::Hierarchy => "HIERARCHY",
            FeatureCategory::Equivalence => "EQUIVALENCE",
            FeatureCategory::DomainRange => "DOMAIN_RANGE",
            FeatureCategory::Transitivity => "TRANSITIVITY",
            FeatureCategory::Symmetry => "SYMMETRY",
            FeatureCategory::Inverse => "INVERSE",
            FeatureCategory::Functional => "FUNCTIONAL",
            FeatureCategory::PropertyChain => "PROPERTY_CHAIN",
            FeatureCategory::Disjoint => "DISJOINT",
            FeatureCategory::Intersection => "INTERSECTION",
            FeatureCategory::Union => "UNION",
            FeatureCategory::Existential => "EXISTENTIAL",
            FeatureCategory::Universal => "UNIVERSAL",
            FeatureCategory::Cardinality => "CARDINALITY",
            FeatureCategory::Other => "OTHER",
        }
    }
}

/// Breakdown behind one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAnalysis {
    /// Occurrences per code, in canonical order
    pub counts: Vec<(char, usize)>,
    pub categories: BTreeSet<FeatureCategory>,
    pub multi_step: bool,
    pub tag: String,
}

/// Maps the distinct statements of a path to one-letter feature codes
#[derive(Debug, Clone, Copy, Default)]
pub struct Tagger;

impl Tagger {
    pub fn new() -> Self {
        Tagger
    }

    pub fn tag(&self, path: &JustificationPath) -> String {
        self.analyze(path).tag
    }

    pub fn tag_all(&self, paths: &[JustificationPath]) -> Vec<String> {
        paths.iter().map(|p| self.tag(p)).collect()
    }

    pub fn analyze(&self, path: &JustificationPath) -> TagAnalysis {
        let mut seen = HashSet::new();
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        let mut categories = BTreeSet::new();

        for axiom in path.axioms() {
            if !seen.insert(Deduplicator::canonical(axiom)) {
                continue;
            }
            if let Some(code) = Self::code_for(axiom, path.is_inferred()) {
                *counts.entry(position(code)).or_default() += 1;
            }
            if let Some(category) = Self::category_for(axiom.kind()) {
                categories.insert(category);
            }
        }

        let multi_step = categories.len() >= 2;
        if multi_step {
            *counts.entry(position(MULTI_STEP)).or_default() += 1;
        }

        let counts: Vec<(char, usize)> = counts.into_iter().map(|(pos, n)| (CANONICAL_ORDER[pos], n)).collect();
        let tag = counts
            .iter()
            .flat_map(|&(code, n)| std::iter::repeat(code).take(n))
            .collect();

        TagAnalysis { counts, categories, multi_step, tag }
    }

    /// Code of one statement. Facts only count in direct (non-inferred) paths.
    pub fn code_for(axiom: &Axiom, inferred: bool) -> Option<char> {
        let code = match axiom.kind() {
            AxiomKind::ClassAssertion | AxiomKind::PropertyAssertion => return (!inferred).then_some('D'),
            AxiomKind::SubClassOf | AxiomKind::SubPropertyOf => 'H',
            AxiomKind::EquivalentClasses | AxiomKind::EquivalentProperties => 'Q',
            AxiomKind::Transitive => 'T',
            AxiomKind::Symmetric => 'S',
            AxiomKind::InverseProperties => 'I',
            AxiomKind::Functional | AxiomKind::InverseFunctional => 'F',
            AxiomKind::PropertyChain => 'N',
            AxiomKind::SomeValuesFrom => 'E',
            AxiomKind::AllValuesFrom => 'L',
            AxiomKind::Cardinality => 'C',
            AxiomKind::IntersectionOf => '∩',
            AxiomKind::UnionOf => 'U',
            AxiomKind::Domain | AxiomKind::Range => 'R',
            AxiomKind::DisjointClasses => 'J',
            AxiomKind::Reflexive => 'V',
            AxiomKind::Asymmetric => 'A',
            AxiomKind::Irreflexive => 'Y',
            AxiomKind::ComplementOf => '¬',
        };
        Some(code)
    }

    /// Category of a schema statement kind; `None` for facts
    pub fn category_for(kind: AxiomKind) -> Option<FeatureCategory> {
        let category = match kind {
            AxiomKind::ClassAssertion | AxiomKind::PropertyAssertion => return None,
            AxiomKind::SubClassOf | AxiomKind::SubPropertyOf => FeatureCategory::Hierarchy,
            AxiomKind::EquivalentClasses | AxiomKind::EquivalentProperties => FeatureCategory::Equivalence,
            AxiomKind::Domain | AxiomKind::Range => FeatureCategory::DomainRange,
            AxiomKind::Transitive => FeatureCategory::Transitivity,
            AxiomKind::Symmetric => FeatureCategory::Symmetry,
            AxiomKind::InverseProperties => FeatureCategory::Inverse,
            AxiomKind::Functional | AxiomKind::InverseFunctional => FeatureCategory::Functional,
            AxiomKind::PropertyChain => FeatureCategory::PropertyChain,
            AxiomKind::DisjointClasses => FeatureCategory::Disjoint,
            AxiomKind::IntersectionOf => FeatureCategory::Intersection,
            AxiomKind::UnionOf => FeatureCategory::Union,
            AxiomKind::SomeValuesFrom => FeatureCategory::Existential,
            AxiomKind::AllValuesFrom => FeatureCategory::Universal,
            AxiomKind::Cardinality => FeatureCategory::Cardinality,
            AxiomKind::Reflexive | AxiomKind::Irreflexive | AxiomKind::Asymmetric | AxiomKind::ComplementOf => {
                FeatureCategory::Other
            }
        };
        Some(category)
    }

    /// Code → meaning table, in canonical order
    pub fn tag_descriptions() -> Vec<(char, &'static str)> {
        CANONICAL_ORDER
            .iter()
            .map(|&code| {
                let meaning = match code {
                    'D' => "Direct assertion",
                    'H' => "Hierarchy (subclass or sub-property)",
                    'Q' => "Equivalence",
                    'T' => "Transitive property",
                    'S' => "Symmetric property",
                    'I' => "Inverse property",
                    'F' => "Functional or inverse-functional property",
                    'N' => "Property chain",
                    'E' => "Existential restriction",
                    'L' => "Universal restriction",
                    'C' => "Cardinality restriction",
                    '∩' => "Intersection",
                    'U' => "Union",
                    'R' => "Domain or range",
                    'M' => "Multi-step (several reasoning categories)",
                    'J' => "Disjoint classes",
                    'V' => "Reflexive property",
                    'A' => "Asymmetric property",
                    'Y' => "Irreflexive property",
                    _ => "Complement",
                };
                (code, meaning)
            })
            .collect()
    }
}

fn position(code: char) -> usize {
    CANONICAL_ORDER.iter().position(|&c| c == code).unwrap_or(CANONICAL_ORDER.len() - 1)
}
