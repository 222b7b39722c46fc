//! OWL DL リーナー (前向き連鎖による実体化)

use crate::oracle::EntailmentOracle;
use crate::OwlDlError;
use fukurow_core::model::{Axiom, AxiomType, ClassExpression, Individual, OwlIri, PropertyExpression};
use fukurow_store::StatementStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use tracing::{debug, info, warn};

/// Reasoner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Upper bound on forward-chaining rounds
    pub max_iterations: usize,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self { max_iterations: 1000 }
    }
}

/// A ground fact tracked by the materialization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Fact {
    /// Individual belongs to a named class
    Type(Individual, OwlIri),
    /// Subject is related to object by a named property
    Edge(Individual, OwlIri, Individual),
}

impl Fact {
    /// Statement form of the fact
    pub fn to_axiom(&self) -> Axiom {
        match self {
            Fact::Type(ind, class) => Axiom::class_assertion(class, ind),
            Fact::Edge(s, p, o) => Axiom::property_assertion(p, s, o),
        }
    }
}

/// How a fact entered the materialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Derivation {
    /// Present in the store
    Asserted(Axiom),
    /// Produced by one schema statement from earlier facts
    Inferred { rule: Axiom, premises: Vec<Fact> },
}

/// OWL DL reasoner
#[derive(Debug, Clone, Default)]
pub struct OwlDlReasoner {
    config: ReasonerConfig,
}

impl OwlDlReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReasonerConfig) -> Result<Self, OwlDlError> {
        if config.max_iterations == 0 {
            return Err(OwlDlError::ReasoningError("max_iterations must be positive".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Compute the closure of named types and property edges of a store.
    ///
    /// Stops with a warning once `max_iterations` rounds have run; the partial
    /// closure is still returned.
    pub fn materialize(&self, store: &dyn StatementStore) -> Result<Materialization, OwlDlError> {
        let mut kb = Materialization::default();
        let mut schema = Vec::new();

        for axiom_type in AxiomType::ALL {
            for axiom in store.statements_of_kind(axiom_type) {
                kb.asserted.insert(axiom.normalized());
                match axiom {
                    Axiom::ClassAssertion(class, ind) => {
                        kb.individuals.insert(ind.clone());
                        kb.assert_class(axiom, class, ind);
                    }
                    Axiom::ObjectPropertyAssertion(p, s, o) => {
                        kb.add(edge_fact(p, s, o), Derivation::Asserted(axiom.clone()));
                    }
                    _ => schema.push(axiom.clone()),
                }
            }
        }

        kb.told_supers = told_closure(&schema);
        kb.disjoint = disjoint_pairs(&schema);

        let mut iteration = 0;
        loop {
            if iteration >= self.config.max_iterations {
                warn!(max_iterations = self.config.max_iterations, "Materialization stopped before saturation");
                break;
            }
            iteration += 1;

            let mut added = 0usize;
            for (fact, derivation) in kb.round(&schema) {
                if kb.add(fact, derivation) {
                    added += 1;
                }
            }

            debug!(iteration, added, "Materialization round");
            if added == 0 {
                kb.saturated = true;
                break;
            }
        }
        kb.iterations = iteration;

        kb.check_consistency()?;

        info!(
            facts = kb.derivations.len(),
            individuals = kb.individuals.len(),
            iterations = kb.iterations,
            "Materialization complete"
        );
        Ok(kb)
    }
}

/// Result of forward chaining: the closure plus one derivation per fact.
#[derive(Debug, Clone, Default)]
pub struct Materialization {
    asserted: HashSet<Axiom>,
    individuals: BTreeSet<Individual>,
    types: BTreeMap<Individual, BTreeSet<OwlIri>>,
    edges: BTreeMap<OwlIri, BTreeSet<(Individual, Individual)>>,
    outgoing: HashMap<(OwlIri, Individual), BTreeSet<Individual>>,
    incoming: HashMap<(OwlIri, Individual), BTreeSet<Individual>>,
    derivations: HashMap<Fact, Derivation>,
    told_supers: HashMap<OwlIri, BTreeSet<OwlIri>>,
    disjoint: HashSet<(OwlIri, OwlIri)>,
    iterations: usize,
    saturated: bool,
}

type Pending = Vec<(Fact, Derivation)>;
type InProgress = HashSet<(Individual, ClassExpression)>;

impl Materialization {
    pub fn derivation(&self, fact: &Fact) -> Option<&Derivation> {
        self.derivations.get(fact)
    }

    pub fn fact_count(&self) -> usize {
        self.derivations.len()
    }

    pub fn inferred_count(&self) -> usize {
        self.derivations
            .values()
            .filter(|d| matches!(d, Derivation::Inferred { .. }))
            .count()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Named superclasses reachable through asserted subclass and equivalence axioms
    pub fn told_superclasses(&self, class: &OwlIri) -> BTreeSet<OwlIri> {
        self.told_supers.get(class).cloned().unwrap_or_default()
    }

    /// Entailment check that reports statement shapes it cannot decide
    pub fn entails(&self, axiom: &Axiom) -> Result<bool, OwlDlError> {
        if self.asserted.contains(&axiom.normalized()) {
            return Ok(true);
        }

        match axiom {
            Axiom::ClassAssertion(class, ind) => Ok(self.satisfies(ind, class, &mut HashSet::new()).is_some()),
            Axiom::ObjectPropertyAssertion(p, s, o) => Ok(self.values(s, p).contains(o)),
            Axiom::SubClassOf(sub, sup) => match (sub.as_named(), sup) {
                (_, sup) if sup.is_thing() => Ok(true),
                (Some(a), ClassExpression::Named(b)) => Ok(self.subsumed(a, b)),
                _ => Err(OwlDlError::UnsupportedFeature(format!(
                    "complex class subsumption: {}",
                    fukurow_core::format::axiom(axiom)
                ))),
            },
            Axiom::EquivalentClasses(ops) => {
                let named: Option<Vec<&OwlIri>> = ops.iter().map(ClassExpression::as_named).collect();
                match named {
                    Some(named) => Ok(named
                        .iter()
                        .all(|a| named.iter().all(|b| self.subsumed(a, b)))),
                    None => Err(OwlDlError::UnsupportedFeature(format!(
                        "complex class equivalence: {}",
                        fukurow_core::format::axiom(axiom)
                    ))),
                }
            }
            _ => Ok(false),
        }
    }

    fn subsumed(&self, sub: &OwlIri, sup: &OwlIri) -> bool {
        sub == sup
            || sup.is_owl_thing()
            || self.told_supers.get(sub).is_some_and(|supers| supers.contains(sup))
    }

    fn add(&mut self, fact: Fact, derivation: Derivation) -> bool {
        if self.derivations.contains_key(&fact) {
            return false;
        }
        match &fact {
            Fact::Type(ind, class) => {
                self.types.entry(ind.clone()).or_default().insert(class.clone());
                self.individuals.insert(ind.clone());
            }
            Fact::Edge(s, p, o) => {
                self.edges.entry(p.clone()).or_default().insert((s.clone(), o.clone()));
                self.outgoing.entry((p.clone(), s.clone())).or_default().insert(o.clone());
                self.incoming.entry((p.clone(), o.clone())).or_default().insert(s.clone());
                self.individuals.insert(s.clone());
                self.individuals.insert(o.clone());
            }
        }
        self.derivations.insert(fact, derivation);
        true
    }

    fn assert_class(&mut self, axiom: &Axiom, class: &ClassExpression, ind: &Individual) {
        match class {
            ClassExpression::Named(iri) if !iri.is_owl_thing() => {
                self.add(Fact::Type(ind.clone(), iri.clone()), Derivation::Asserted(axiom.clone()));
            }
            ClassExpression::IntersectionOf(ops) => {
                for iri in ops.iter().filter_map(ClassExpression::as_named) {
                    let derivation = Derivation::Inferred { rule: axiom.clone(), premises: Vec::new() };
                    self.add(Fact::Type(ind.clone(), iri.clone()), derivation);
                }
            }
            _ => debug!(axiom = %fukurow_core::format::axiom(axiom), "Class assertion not materialized"),
        }
    }

    /// One forward-chaining round over every schema statement
    fn round(&self, schema: &[Axiom]) -> Pending {
        let mut pending = Vec::new();
        for axiom in schema {
            self.apply_rule(axiom, &mut pending);
        }
        pending
    }

    fn apply_rule(&self, rule: &Axiom, pending: &mut Pending) {
        match rule {
            Axiom::SubClassOf(sub, sup) => self.apply_inclusion(rule, sub, sup, pending),
            Axiom::EquivalentClasses(ops) => {
                for (i, a) in ops.iter().enumerate() {
                    for (j, b) in ops.iter().enumerate() {
                        if i != j {
                            self.apply_inclusion(rule, a, b, pending);
                        }
                    }
                }
            }
            Axiom::SubPropertyOf(sub, sup) => self.apply_property_inclusion(rule, sub, sup, pending),
            Axiom::EquivalentProperties(ops) => {
                for (i, a) in ops.iter().enumerate() {
                    for (j, b) in ops.iter().enumerate() {
                        if i != j {
                            self.apply_property_inclusion(rule, a, b, pending);
                        }
                    }
                }
            }
            Axiom::InverseProperties(a, b) => {
                self.apply_property_inclusion(rule, a, &PropertyExpression::inverse_of(b.clone()), pending);
                self.apply_property_inclusion(rule, b, &PropertyExpression::inverse_of(a.clone()), pending);
            }
            Axiom::SymmetricProperty(p) => {
                self.apply_property_inclusion(rule, p, &PropertyExpression::inverse_of(p.clone()), pending);
            }
            Axiom::TransitiveProperty(p) => {
                for (s, m) in self.pairs(p) {
                    for o in self.values(&m, p) {
                        let premises = vec![edge_fact(p, &s, &m), edge_fact(p, &m, &o)];
                        infer(pending, edge_fact(p, &s, &o), rule, premises);
                    }
                }
            }
            Axiom::SubPropertyChainOf(chain, sup) => {
                for (s, o, premises) in self.chain_pairs(chain) {
                    infer(pending, edge_fact(sup, &s, &o), rule, premises);
                }
            }
            Axiom::ObjectPropertyDomain(p, class) => {
                for (s, o) in self.pairs(p) {
                    let premises = vec![edge_fact(p, &s, &o)];
                    self.conclude(rule, &s, class, premises, pending);
                }
            }
            Axiom::ObjectPropertyRange(p, class) => {
                for (s, o) in self.pairs(p) {
                    let premises = vec![edge_fact(p, &s, &o)];
                    self.conclude(rule, &o, class, premises, pending);
                }
            }
            Axiom::ReflexiveProperty(p) => {
                for x in &self.individuals {
                    infer(pending, edge_fact(p, x, x), rule, Vec::new());
                }
            }
            _ => {}
        }
    }

    fn apply_inclusion(&self, rule: &Axiom, sub: &ClassExpression, sup: &ClassExpression, pending: &mut Pending) {
        let candidates: Vec<&Individual> = match sub {
            ClassExpression::Named(iri) if !iri.is_owl_thing() => self
                .types
                .iter()
                .filter(|(_, types)| types.contains(iri))
                .map(|(ind, _)| ind)
                .collect(),
            _ => self.individuals.iter().collect(),
        };

        for ind in candidates {
            if let Some(premises) = self.satisfies(ind, sub, &mut HashSet::new()) {
                self.conclude(rule, ind, sup, premises, pending);
            }
        }
    }

    fn apply_property_inclusion(
        &self,
        rule: &Axiom,
        sub: &PropertyExpression,
        sup: &PropertyExpression,
        pending: &mut Pending,
    ) {
        for (s, o) in self.pairs(sub) {
            infer(pending, edge_fact(sup, &s, &o), rule, vec![edge_fact(sub, &s, &o)]);
        }
    }

    /// Facts implied by membership of `ind` in `class`
    fn conclude(&self, rule: &Axiom, ind: &Individual, class: &ClassExpression, premises: Vec<Fact>, pending: &mut Pending) {
        match class {
            ClassExpression::Named(iri) if !iri.is_owl_thing() && !iri.is_owl_nothing() => {
                infer(pending, Fact::Type(ind.clone(), iri.clone()), rule, premises);
            }
            ClassExpression::IntersectionOf(ops) => {
                for op in ops {
                    self.conclude(rule, ind, op, premises.clone(), pending);
                }
            }
            ClassExpression::AllValuesFrom { property, class } => {
                for v in self.values(ind, property) {
                    let mut premises = premises.clone();
                    premises.push(edge_fact(property, ind, &v));
                    self.conclude(rule, &v, class, premises, pending);
                }
            }
            _ => {}
        }
    }

    /// Evaluate membership of `ind` in `expr`; returns the supporting facts.
    ///
    /// Maximum and exact cardinalities are never satisfied, and a universal
    /// restriction needs at least one value.
    fn satisfies(&self, ind: &Individual, expr: &ClassExpression, in_progress: &mut InProgress) -> Option<Vec<Fact>> {
        let key = (ind.clone(), expr.clone());
        if !in_progress.insert(key.clone()) {
            return None;
        }
        let result = self.evaluate(ind, expr, in_progress);
        in_progress.remove(&key);
        result
    }

    fn evaluate(&self, ind: &Individual, expr: &ClassExpression, in_progress: &mut InProgress) -> Option<Vec<Fact>> {
        match expr {
            ClassExpression::Thing => Some(Vec::new()),
            ClassExpression::Nothing => None,
            ClassExpression::Named(iri) if iri.is_owl_thing() => Some(Vec::new()),
            ClassExpression::Named(iri) => self
                .types
                .get(ind)
                .filter(|types| types.contains(iri))
                .map(|_| vec![Fact::Type(ind.clone(), iri.clone())]),
            ClassExpression::IntersectionOf(ops) => {
                let mut premises = Vec::new();
                for op in ops {
                    premises.extend(self.satisfies(ind, op, in_progress)?);
                }
                Some(premises)
            }
            ClassExpression::UnionOf(ops) => ops.iter().find_map(|op| self.satisfies(ind, op, in_progress)),
            ClassExpression::ComplementOf(inner) => {
                let excluded = inner.as_named()?;
                self.types.get(ind)?.iter().find_map(|t| {
                    self.disjoint
                        .contains(&(t.clone(), excluded.clone()))
                        .then(|| vec![Fact::Type(ind.clone(), t.clone())])
                })
            }
            ClassExpression::OneOf(members) => members.contains(ind).then(Vec::new),
            ClassExpression::SomeValuesFrom { property, class } => {
                for v in self.values(ind, property) {
                    if let Some(mut premises) = self.satisfies(&v, class, in_progress) {
                        premises.insert(0, edge_fact(property, ind, &v));
                        return Some(premises);
                    }
                }
                None
            }
            ClassExpression::HasValue { property, individual } => self
                .values(ind, property)
                .contains(individual)
                .then(|| vec![edge_fact(property, ind, individual)]),
            ClassExpression::AllValuesFrom { property, class } => {
                let values = self.values(ind, property);
                if values.is_empty() {
                    return None;
                }
                let mut premises = Vec::new();
                for v in &values {
                    premises.push(edge_fact(property, ind, v));
                    premises.extend(self.satisfies(v, class, in_progress)?);
                }
                Some(premises)
            }
            ClassExpression::MinCardinality { cardinality, property, class } => {
                let mut premises = Vec::new();
                let mut witnesses = 0u32;
                for v in self.values(ind, property) {
                    if witnesses >= *cardinality {
                        break;
                    }
                    let filler = match class {
                        Some(class) => self.satisfies(&v, class, in_progress),
                        None => Some(Vec::new()),
                    };
                    if let Some(filler) = filler {
                        premises.push(edge_fact(property, ind, &v));
                        premises.extend(filler);
                        witnesses += 1;
                    }
                }
                (witnesses >= *cardinality).then_some(premises)
            }
            ClassExpression::MaxCardinality { .. } | ClassExpression::ExactCardinality { .. } => None,
        }
    }

    /// (subject, object) pairs of a property expression
    fn pairs(&self, property: &PropertyExpression) -> Vec<(Individual, Individual)> {
        let (iri, inverted) = property.base();
        self.edges
            .get(iri)
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|(s, o)| if inverted { (o.clone(), s.clone()) } else { (s.clone(), o.clone()) })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn values(&self, ind: &Individual, property: &PropertyExpression) -> BTreeSet<Individual> {
        let (iri, inverted) = property.base();
        let index = if inverted { &self.incoming } else { &self.outgoing };
        index.get(&(iri.clone(), ind.clone())).cloned().unwrap_or_default()
    }

    /// Joins the links of a property chain left to right
    fn chain_pairs(&self, chain: &[PropertyExpression]) -> Vec<(Individual, Individual, Vec<Fact>)> {
        let Some((first, rest)) = chain.split_first() else {
            return Vec::new();
        };

        let mut partial: Vec<(Individual, Individual, Vec<Fact>)> = self
            .pairs(first)
            .into_iter()
            .map(|(s, o)| {
                let premises = vec![edge_fact(first, &s, &o)];
                (s, o, premises)
            })
            .collect();

        for link in rest {
            let mut next = Vec::new();
            for (s, m, premises) in &partial {
                for o in self.values(m, link) {
                    let mut premises = premises.clone();
                    premises.push(edge_fact(link, m, &o));
                    next.push((s.clone(), o, premises));
                }
            }
            partial = next;
        }
        partial
    }

    fn check_consistency(&self) -> Result<(), OwlDlError> {
        for (ind, types) in &self.types {
            for a in types {
                if let Some(b) = types.iter().find(|b| self.disjoint.contains(&(a.clone(), (*b).clone()))) {
                    return Err(OwlDlError::ConsistencyError(format!(
                        "{} is a member of disjoint classes {} and {}",
                        ind.short_form(),
                        a.short_form(),
                        b.short_form()
                    )));
                }
            }
        }
        Ok(())
    }

    fn expand(&self, fact: &Fact, out: &mut Vec<Axiom>, seen: &mut HashSet<Fact>) {
        if !seen.insert(fact.clone()) {
            return;
        }
        match self.derivations.get(fact) {
            Some(Derivation::Asserted(axiom)) => push_unique(out, axiom),
            Some(Derivation::Inferred { rule, premises }) => {
                push_unique(out, rule);
                for premise in premises {
                    self.expand(premise, out, seen);
                }
            }
            None => {}
        }
    }
}

impl EntailmentOracle for Materialization {
    fn is_entailed(&self, axiom: &Axiom) -> bool {
        match self.entails(axiom) {
            Ok(entailed) => entailed,
            Err(e) => {
                debug!(error = %e, "Entailment check not decidable, answering false");
                false
            }
        }
    }

    fn types_of(&self, individual: &Individual) -> BTreeSet<OwlIri> {
        self.types.get(individual).cloned().unwrap_or_default()
    }

    fn property_values_of(&self, individual: &Individual, property: &PropertyExpression) -> BTreeSet<Individual> {
        self.values(individual, property)
    }

    fn justification(&self, axiom: &Axiom) -> Option<Vec<Axiom>> {
        if self.asserted.contains(&axiom.normalized()) {
            return Some(vec![axiom.clone()]);
        }

        let fact = match axiom {
            Axiom::ClassAssertion(ClassExpression::Named(class), ind) => Fact::Type(ind.clone(), class.clone()),
            Axiom::ObjectPropertyAssertion(p, s, o) => edge_fact(p, s, o),
            _ => return None,
        };
        if !self.derivations.contains_key(&fact) {
            return None;
        }

        let mut out = Vec::new();
        self.expand(&fact, &mut out, &mut HashSet::new());
        Some(out)
    }
}

fn infer(pending: &mut Pending, fact: Fact, rule: &Axiom, premises: Vec<Fact>) {
    pending.push((fact, Derivation::Inferred { rule: rule.clone(), premises }));
}

fn push_unique(out: &mut Vec<Axiom>, axiom: &Axiom) {
    if !out.contains(axiom) {
        out.push(axiom.clone());
    }
}

/// Edge fact for an assertion over a possibly inverted property
fn edge_fact(property: &PropertyExpression, subject: &Individual, object: &Individual) -> Fact {
    let (iri, inverted) = property.base();
    if inverted {
        Fact::Edge(object.clone(), iri.clone(), subject.clone())
    } else {
        Fact::Edge(subject.clone(), iri.clone(), object.clone())
    }
}

/// Transitive closure of named subclass and named equivalence edges
fn told_closure(schema: &[Axiom]) -> HashMap<OwlIri, BTreeSet<OwlIri>> {
    let mut direct: HashMap<OwlIri, BTreeSet<OwlIri>> = HashMap::new();
    for axiom in schema {
        match axiom {
            Axiom::SubClassOf(ClassExpression::Named(sub), ClassExpression::Named(sup)) => {
                direct.entry(sub.clone()).or_default().insert(sup.clone());
            }
            Axiom::EquivalentClasses(ops) => {
                let named: Vec<&OwlIri> = ops.iter().filter_map(ClassExpression::as_named).collect();
                for a in &named {
                    for b in &named {
                        if a != b {
                            direct.entry((*a).clone()).or_default().insert((*b).clone());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let mut closure = HashMap::new();
    for start in direct.keys() {
        let mut reached = BTreeSet::new();
        let mut queue: VecDeque<&OwlIri> = VecDeque::from([start]);
        while let Some(class) = queue.pop_front() {
            for sup in direct.get(class).into_iter().flatten() {
                if sup != start && reached.insert(sup.clone()) {
                    queue.push_back(sup);
                }
            }
        }
        closure.insert(start.clone(), reached);
    }
    closure
}

fn disjoint_pairs(schema: &[Axiom]) -> HashSet<(OwlIri, OwlIri)> {
    let mut pairs = HashSet::new();
    for axiom in schema {
        if let Axiom::DisjointClasses(ops) = axiom {
            let named: Vec<&OwlIri> = ops.iter().filter_map(ClassExpression::as_named).collect();
            for a in &named {
                for b in &named {
                    if a != b {
                        pairs.insert(((*a).clone(), (*b).clone()));
                    }
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use fukurow_store::MemoryStatementStore;

    fn iri(name: &str) -> OwlIri {
        OwlIri::new(format!("http://example.org/family#{}", name))
    }

    fn ind(name: &str) -> Individual {
        Individual(iri(name))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::Named(iri(name))
    }

    fn prop(name: &str) -> PropertyExpression {
        PropertyExpression::ObjectProperty(iri(name))
    }

    fn materialize(axioms: Vec<Axiom>) -> Materialization {
        let store = MemoryStatementStore::from_axioms(axioms);
        OwlDlReasoner::new().materialize(&store).unwrap()
    }

    #[test]
    fn test_subclass_closure() {
        let kb = materialize(vec![
            Axiom::subclass(&iri("Man"), &iri("Person")),
            Axiom::subclass(&iri("Person"), &iri("Agent")),
            Axiom::class_assertion(&iri("Man"), &ind("john")),
        ]);

        let types = kb.types_of(&ind("john"));
        assert!(types.contains(&iri("Person")));
        assert!(types.contains(&iri("Agent")));
        assert!(kb.is_saturated());
        assert!(kb.is_entailed(&Axiom::subclass(&iri("Man"), &iri("Agent"))));
        assert!(!kb.is_entailed(&Axiom::subclass(&iri("Agent"), &iri("Man"))));
    }

    #[test]
    fn test_justification_expands_to_asserted_statements() {
        let kb = materialize(vec![
            Axiom::subclass(&iri("Man"), &iri("Person")),
            Axiom::class_assertion(&iri("Man"), &ind("john")),
        ]);

        let target = Axiom::class_assertion(&iri("Person"), &ind("john"));
        let justification = kb.justification(&target).unwrap();
        assert_eq!(justification.len(), 2);
        assert!(justification.contains(&Axiom::subclass(&iri("Man"), &iri("Person"))));
        assert!(justification.contains(&Axiom::class_assertion(&iri("Man"), &ind("john"))));
        assert!(kb.justification(&Axiom::class_assertion(&iri("Woman"), &ind("john"))).is_none());
    }

    #[test]
    fn test_property_rules() {
        let kb = materialize(vec![
            Axiom::SubPropertyOf(prop("hasSon"), prop("hasChild")),
            Axiom::InverseProperties(prop("hasChild"), prop("hasParent")),
            Axiom::SymmetricProperty(prop("marriedTo")),
            Axiom::property_assertion(&iri("hasSon"), &ind("john"), &ind("bob")),
            Axiom::property_assertion(&iri("marriedTo"), &ind("john"), &ind("mary")),
        ]);

        assert!(kb.values_of(&ind("john"), &iri("hasChild")).contains(&ind("bob")));
        assert!(kb.values_of(&ind("bob"), &iri("hasParent")).contains(&ind("john")));
        assert!(kb.values_of(&ind("mary"), &iri("marriedTo")).contains(&ind("john")));

        let inverse = PropertyExpression::inverse_of(prop("hasChild"));
        assert!(kb.property_values_of(&ind("bob"), &inverse).contains(&ind("john")));
    }

    #[test]
    fn test_transitive_and_chain() {
        let kb = materialize(vec![
            Axiom::TransitiveProperty(prop("isAncestorOf")),
            Axiom::property_assertion(&iri("isAncestorOf"), &ind("a"), &ind("b")),
            Axiom::property_assertion(&iri("isAncestorOf"), &ind("b"), &ind("c")),
            Axiom::property_assertion(&iri("isAncestorOf"), &ind("c"), &ind("d")),
            Axiom::SubPropertyChainOf(vec![prop("hasParent"), prop("hasBrother")], prop("hasUncle")),
            Axiom::property_assertion(&iri("hasParent"), &ind("tim"), &ind("tom")),
            Axiom::property_assertion(&iri("hasBrother"), &ind("tom"), &ind("ted")),
        ]);

        assert!(kb.is_entailed(&Axiom::property_assertion(&iri("isAncestorOf"), &ind("a"), &ind("d"))));
        assert!(kb.is_entailed(&Axiom::property_assertion(&iri("hasUncle"), &ind("tim"), &ind("ted"))));
        assert!(!kb.is_entailed(&Axiom::property_assertion(&iri("hasUncle"), &ind("tom"), &ind("ted"))));
    }

    #[test]
    fn test_domain_and_range() {
        let kb = materialize(vec![
            Axiom::ObjectPropertyDomain(prop("hasChild"), class("Parent")),
            Axiom::ObjectPropertyRange(prop("hasChild"), class("Person")),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
        ]);

        assert!(kb.has_type(&ind("john"), &iri("Parent")));
        assert!(kb.has_type(&ind("bob"), &iri("Person")));
        assert!(!kb.has_type(&ind("bob"), &iri("Parent")));
    }

    #[test]
    fn test_defined_class_membership() {
        let parent = ClassExpression::some(prop("hasChild"), class("Person"));
        let kb = materialize(vec![
            Axiom::EquivalentClasses(vec![class("Parent"), parent.clone()]),
            Axiom::class_assertion(&iri("Person"), &ind("bob")),
            Axiom::property_assertion(&iri("hasChild"), &ind("john"), &ind("bob")),
        ]);

        assert!(kb.has_type(&ind("john"), &iri("Parent")));
        assert!(kb.is_entailed(&Axiom::ClassAssertion(parent, ind("john"))));
        assert!(!kb.has_type(&ind("bob"), &iri("Parent")));
    }

    #[test]
    fn test_complex_subsumption_is_unsupported() {
        let kb = materialize(vec![Axiom::class_assertion(&iri("Man"), &ind("john"))]);
        let axiom = Axiom::SubClassOf(
            ClassExpression::some(prop("hasChild"), ClassExpression::Thing),
            class("Parent"),
        );
        assert!(matches!(kb.entails(&axiom), Err(OwlDlError::UnsupportedFeature(_))));
        assert!(!kb.is_entailed(&axiom));
    }

    #[test]
    fn test_disjoint_membership_is_inconsistent() {
        let store = MemoryStatementStore::from_axioms(vec![
            Axiom::DisjointClasses(vec![class("Man"), class("Woman")]),
            Axiom::class_assertion(&iri("Man"), &ind("pat")),
            Axiom::class_assertion(&iri("Woman"), &ind("pat")),
        ]);
        let result = OwlDlReasoner::new().materialize(&store);
        assert!(matches!(result, Err(OwlDlError::ConsistencyError(_))));
    }

    #[test]
    fn test_iteration_cap() {
        let reasoner = OwlDlReasoner::with_config(ReasonerConfig { max_iterations: 1 }).unwrap();
        let store = MemoryStatementStore::from_axioms(vec![
            Axiom::subclass(&iri("A"), &iri("B")),
            Axiom::subclass(&iri("B"), &iri("C")),
            Axiom::class_assertion(&iri("A"), &ind("x")),
        ]);
        let kb = reasoner.materialize(&store).unwrap();
        assert_eq!(kb.iterations(), 1);
        assert!(!kb.is_saturated());

        assert!(OwlDlReasoner::with_config(ReasonerConfig { max_iterations: 0 }).is_err());
    }
}
