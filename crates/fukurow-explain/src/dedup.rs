//! Path deduplication by content signature

use crate::path::JustificationPath;
use fukurow_core::format;
use fukurow_core::model::Axiom;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Priority given to producers missing from the priority map
const UNKNOWN_PRIORITY: i32 = i32::MAX;

/// Collapses paths with identical signatures to one representative.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    priorities: BTreeMap<String, i32>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deduplicator breaking final ties by producer priority (lower wins)
    pub fn with_priorities(priorities: BTreeMap<String, i32>) -> Self {
        Self { priorities }
    }

    /// `TYPE|canonical;canonical;...` with the per-statement strings sorted
    pub fn signature(path: &JustificationPath) -> String {
        let statements = path.axioms().iter().map(Self::canonical).sorted().join(";");
        format!("{}|{}", path.reasoning_type().name(), statements)
    }

    /// Order-independent canonical string of one statement, over short forms
    pub fn canonical(axiom: &Axiom) -> String {
        match axiom.normalized() {
            Axiom::ObjectPropertyAssertion(p, s, o) => {
                format!("PROP:{}|{}|{}", s.short_form(), format::property(&p), o.short_form())
            }
            Axiom::ObjectPropertyDomain(p, c) => format!("DOMAIN:{}|{}", format::property(&p), format::class(&c)),
            Axiom::ObjectPropertyRange(p, c) => format!("RANGE:{}|{}", format::property(&p), format::class(&c)),
            Axiom::ClassAssertion(c, ind) => format!("CLASS:{}|{}", ind.short_form(), format::class(&c)),
            Axiom::SubClassOf(sub, sup) => format!("SUBCLASS:{}|{}", format::class(&sub), format::class(&sup)),
            Axiom::EquivalentClasses(ops) => {
                format!("EQUIV:{}", ops.iter().map(format::class).sorted().join("|"))
            }
            Axiom::EquivalentProperties(ops) => {
                format!("EQUIV:{}", ops.iter().map(format::property).sorted().join("|"))
            }
            other => format!("OTHER:{}|{}", other.axiom_type().as_str(), format::axiom(&other)),
        }
    }

    /// One representative per signature, in first-seen signature order
    pub fn dedupe(&self, paths: Vec<JustificationPath>) -> Vec<JustificationPath> {
        let before = paths.len();
        let mut order: Vec<String> = Vec::new();
        let mut winners: HashMap<String, JustificationPath> = HashMap::new();

        for path in paths {
            let signature = Self::signature(&path);
            match winners.get_mut(&signature) {
                Some(current) => {
                    if self.prefer(&path, current) == Ordering::Less {
                        *current = path;
                    }
                }
                None => {
                    order.push(signature.clone());
                    winners.insert(signature, path);
                }
            }
        }

        let deduped: Vec<JustificationPath> = order.iter().filter_map(|sig| winners.remove(sig)).collect();
        debug!(before, after = deduped.len(), "Deduplicated justification paths");
        deduped
    }

    /// `Less` when `a` should represent the group instead of `b`
    fn prefer(&self, a: &JustificationPath, b: &JustificationPath) -> Ordering {
        b.description()
            .chars()
            .count()
            .cmp(&a.description().chars().count())
            .then_with(|| b.complexity().cmp(&a.complexity()))
            .then_with(|| self.priority(a.strategy()).cmp(&self.priority(b.strategy())))
            .then_with(|| a.description().cmp(b.description()))
    }

    fn priority(&self, strategy: &str) -> i32 {
        self.priorities.get(strategy).copied().unwrap_or(UNKNOWN_PRIORITY)
    }
}
