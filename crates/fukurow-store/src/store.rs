//! Statement store trait and indexed in-memory implementation

use fukurow_core::model::{Axiom, AxiomType, ClassExpression, Individual, OwlIri};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

/// Store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate statement: {0}")]
    DuplicateStatement(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),
}

/// Which side of a hierarchy axiom the looked-up entity occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HierarchyDirection {
    /// Axioms where the entity is the sub-class / sub-property
    Sub,
    /// Axioms where the entity is the super-class / super-property
    Super,
}

/// Read-only access to the statements of one knowledge base.
///
/// All lookups return statements in insertion order so that callers iterate
/// deterministically.
pub trait StatementStore: Send + Sync {
    /// All statements of one syntactic type
    fn statements_of_kind(&self, axiom_type: AxiomType) -> Vec<&Axiom>;

    /// Literal membership, compared on normalized content
    fn contains_statement(&self, axiom: &Axiom) -> bool;

    /// `SubClassOf` axioms with `class` on the given side
    fn subclass_axioms_for(&self, class: &ClassExpression, direction: HierarchyDirection) -> Vec<&Axiom>;

    /// `EquivalentClasses` axioms that list `class` as an operand
    fn equivalence_axioms_for(&self, class: &ClassExpression) -> Vec<&Axiom>;

    /// Schema axioms mentioning the named property at top level, directly or
    /// under an inversion
    fn property_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom>;

    fn class_assertions_for(&self, individual: &Individual) -> Vec<&Axiom>;

    /// Property assertions whose subject is `individual`
    fn property_assertions_from(&self, individual: &Individual) -> Vec<&Axiom>;

    /// Property assertions whose object is `individual`
    fn property_assertions_to(&self, individual: &Individual) -> Vec<&Axiom>;

    /// Every individual mentioned by a fact, in sorted order
    fn individuals(&self) -> Vec<&Individual>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn domain_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::ObjectPropertyDomain(p, _) if p.is_named(property)))
            .collect()
    }

    fn range_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::ObjectPropertyRange(p, _) if p.is_named(property)))
            .collect()
    }

    /// `SubPropertyOf` axioms with the named property on the given side
    fn sub_property_axioms_for(&self, property: &OwlIri, direction: HierarchyDirection) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| match (ax, direction) {
                (Axiom::SubPropertyOf(sub, _), HierarchyDirection::Sub) => sub.is_named(property),
                (Axiom::SubPropertyOf(_, sup), HierarchyDirection::Super) => sup.is_named(property),
                _ => false,
            })
            .collect()
    }

    /// `InverseProperties` axioms in which the named property takes part
    fn inverse_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::InverseProperties(a, b) if a.is_named(property) || b.is_named(property)))
            .collect()
    }

    fn equivalent_property_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::EquivalentProperties(ops) if ops.iter().any(|p| p.is_named(property))))
            .collect()
    }

    /// Chain axioms whose super property is the named property
    fn chain_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::SubPropertyChainOf(_, sup) if sup.is_named(property)))
            .collect()
    }

    /// Characteristic axioms (transitive, functional, ...) of the given type
    fn characteristic_axioms_for(&self, property: &OwlIri, axiom_type: AxiomType) -> Vec<&Axiom> {
        self.property_axioms_for(property)
            .into_iter()
            .filter(|ax| ax.axiom_type() == axiom_type && ax.property_operands().iter().any(|p| p.is_named(property)))
            .collect()
    }
}

type Postings = SmallVec<[usize; 8]>;

/// In-memory statement store with indices for fast lookup
#[derive(Debug, Clone, Default)]
pub struct MemoryStatementStore {
    /// Statements in insertion order
    axioms: Vec<Axiom>,
    /// Normalized membership set
    membership: HashSet<Axiom>,
    /// Axiom type index
    type_index: HashMap<AxiomType, Postings>,
    /// Top-level class operand index
    class_index: HashMap<ClassExpression, Postings>,
    /// Property index, keyed by named base property
    property_index: HashMap<OwlIri, Postings>,
    /// Fact subject index
    subject_index: HashMap<Individual, Postings>,
    /// Fact object index
    object_index: HashMap<Individual, Postings>,
    individuals: BTreeSet<Individual>,
}

impl MemoryStatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store, silently skipping duplicates
    pub fn from_axioms(axioms: impl IntoIterator<Item = Axiom>) -> Self {
        let mut store = Self::new();
        store.extend(axioms);
        store
    }

    /// Insert a statement. Returns `Ok(false)` when an equal statement is already present.
    pub fn insert(&mut self, axiom: Axiom) -> Result<bool, StoreError> {
        validate(&axiom)?;

        let normalized = axiom.normalized();
        if self.membership.contains(&normalized) {
            return Ok(false);
        }

        let index = self.axioms.len();
        self.type_index.entry(axiom.axiom_type()).or_default().push(index);

        for class in axiom.class_operands() {
            let postings = self.class_index.entry(class.clone()).or_default();
            if postings.last() != Some(&index) {
                postings.push(index);
            }
        }

        if axiom.is_schema() {
            for property in axiom.property_operands() {
                let (iri, _) = property.base();
                let postings = self.property_index.entry(iri.clone()).or_default();
                if postings.last() != Some(&index) {
                    postings.push(index);
                }
            }
        }

        match &axiom {
            Axiom::ClassAssertion(_, ind) => {
                self.subject_index.entry(ind.clone()).or_default().push(index);
                self.individuals.insert(ind.clone());
            }
            Axiom::ObjectPropertyAssertion(_, s, o) => {
                self.subject_index.entry(s.clone()).or_default().push(index);
                self.object_index.entry(o.clone()).or_default().push(index);
                self.individuals.insert(s.clone());
                self.individuals.insert(o.clone());
            }
            _ => {}
        }

        self.membership.insert(normalized);
        self.axioms.push(axiom);
        Ok(true)
    }

    /// Insert a statement, rejecting duplicates
    pub fn insert_unique(&mut self, axiom: Axiom) -> Result<(), StoreError> {
        let rendered = fukurow_core::format::axiom(&axiom);
        if self.insert(axiom)? {
            Ok(())
        } else {
            Err(StoreError::DuplicateStatement(rendered))
        }
    }

    /// Insert many statements; invalid or duplicate ones are skipped
    pub fn extend(&mut self, axioms: impl IntoIterator<Item = Axiom>) {
        for axiom in axioms {
            // Invalid statements are dropped; `insert` reports them for callers that care.
            let _ = self.insert(axiom);
        }
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn statistics(&self) -> StoreStatistics {
        let fact_statements = self.axioms.iter().filter(|ax| ax.is_fact()).count();
        StoreStatistics {
            total_statements: self.axioms.len(),
            schema_statements: self.axioms.len() - fact_statements,
            fact_statements,
            individuals: self.individuals.len(),
        }
    }

    fn resolve(&self, postings: Option<&Postings>) -> Vec<&Axiom> {
        postings
            .map(|ids| ids.iter().filter_map(|id| self.axioms.get(*id)).collect())
            .unwrap_or_default()
    }
}

fn validate(axiom: &Axiom) -> Result<(), StoreError> {
    let problem = match axiom {
        Axiom::EquivalentClasses(ops) | Axiom::DisjointClasses(ops) if ops.len() < 2 => {
            Some("class axiom needs at least two operands")
        }
        Axiom::EquivalentProperties(ops) if ops.len() < 2 => Some("property axiom needs at least two operands"),
        Axiom::SubPropertyChainOf(chain, _) if chain.is_empty() => Some("property chain is empty"),
        _ => None,
    };
    match problem {
        Some(reason) => Err(StoreError::InvalidStatement(format!(
            "{}: {}",
            reason,
            fukurow_core::format::axiom(axiom)
        ))),
        None => Ok(()),
    }
}

impl StatementStore for MemoryStatementStore {
    fn statements_of_kind(&self, axiom_type: AxiomType) -> Vec<&Axiom> {
        self.resolve(self.type_index.get(&axiom_type))
    }

    fn contains_statement(&self, axiom: &Axiom) -> bool {
        self.membership.contains(&axiom.normalized())
    }

    fn subclass_axioms_for(&self, class: &ClassExpression, direction: HierarchyDirection) -> Vec<&Axiom> {
        self.resolve(self.class_index.get(class))
            .into_iter()
            .filter(|ax| match (ax, direction) {
                (Axiom::SubClassOf(sub, _), HierarchyDirection::Sub) => sub == class,
                (Axiom::SubClassOf(_, sup), HierarchyDirection::Super) => sup == class,
                _ => false,
            })
            .collect()
    }

    fn equivalence_axioms_for(&self, class: &ClassExpression) -> Vec<&Axiom> {
        self.resolve(self.class_index.get(class))
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::EquivalentClasses(_)))
            .collect()
    }

    fn property_axioms_for(&self, property: &OwlIri) -> Vec<&Axiom> {
        self.resolve(self.property_index.get(property))
    }

    fn class_assertions_for(&self, individual: &Individual) -> Vec<&Axiom> {
        self.resolve(self.subject_index.get(individual))
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::ClassAssertion(..)))
            .collect()
    }

    fn property_assertions_from(&self, individual: &Individual) -> Vec<&Axiom> {
        self.resolve(self.subject_index.get(individual))
            .into_iter()
            .filter(|ax| matches!(ax, Axiom::ObjectPropertyAssertion(..)))
            .collect()
    }

    fn property_assertions_to(&self, individual: &Individual) -> Vec<&Axiom> {
        self.resolve(self.object_index.get(individual))
    }

    fn individuals(&self) -> Vec<&Individual> {
        self.individuals.iter().collect()
    }

    fn len(&self) -> usize {
        self.axioms.len()
    }
}

impl FromIterator<Axiom> for MemoryStatementStore {
    fn from_iter<I: IntoIterator<Item = Axiom>>(iter: I) -> Self {
        Self::from_axioms(iter)
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_statements: usize,
    pub schema_statements: usize,
    pub fact_statements: usize,
    pub individuals: usize,
}

