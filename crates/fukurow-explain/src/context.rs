//! Per-run bookkeeping of processed targets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Tracks which triple keys a run has already processed, where each was
/// first seen, and the task ids registered against it.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    processed: HashSet<String>,
    first_source: HashMap<String, String>,
    task_ids: HashMap<String, Vec<String>>,
}

/// Counts over one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStats {
    pub total_queries: usize,
    pub total_task_ids: usize,
    /// Number of first sightings per source
    pub source_distribution: BTreeMap<String, usize>,
}

impl ProcessingContext {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            processed: HashSet::new(),
            first_source: HashMap::new(),
            task_ids: HashMap::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record `key` as processed from `source`. Returns true on the first sighting.
    pub fn mark_processed(&mut self, key: &str, source: &str) -> bool {
        let first = self.processed.insert(key.to_string());
        if first {
            self.first_source.insert(key.to_string(), source.to_string());
            self.task_ids.entry(key.to_string()).or_default();
            debug!(key, source, "First occurrence of query");
        } else {
            debug!(
                key,
                source,
                first_seen = self.first_source.get(key).map(String::as_str).unwrap_or("?"),
                "Skipping duplicate query"
            );
        }
        first
    }

    pub fn is_processed(&self, key: &str) -> bool {
        self.processed.contains(key)
    }

    pub fn add_task_id(&mut self, key: &str, task_id: impl Into<String>) {
        self.task_ids.entry(key.to_string()).or_default().push(task_id.into());
    }

    /// Task ids registered for the key, in registration order
    pub fn task_ids(&self, key: &str) -> &[String] {
        self.task_ids.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first_source(&self, key: &str) -> Option<&str> {
        self.first_source.get(key).map(String::as_str)
    }

    pub fn stats(&self) -> QueryStats {
        let mut source_distribution = BTreeMap::new();
        for source in self.first_source.values() {
            *source_distribution.entry(source.clone()).or_insert(0) += 1;
        }
        QueryStats {
            total_queries: self.processed.len(),
            total_task_ids: self.task_ids.values().map(Vec::len).sum(),
            source_distribution,
        }
    }
}

impl Default for ProcessingContext {
    fn default() -> Self {
        Self::new()
    }
}
