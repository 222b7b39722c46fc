//! Search configuration

use crate::error::{ExplainError, ExplainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounds and switches for one explanation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// Maximum recursion depth for hierarchy searches, chains and trace-back
    pub max_depth: usize,
    /// Maximum number of nodes a breadth-first search may visit
    pub max_frontier: usize,
    /// Frontier cap for the deep subclass trace
    pub trace_frontier: usize,
    /// Longest path (distinct statements) the engine returns
    pub max_chain_length: usize,
    /// Paths one strategy may contribute
    pub max_paths_per_strategy: usize,
    /// Return the asserted path alone when the target is in the store
    pub short_circuit_direct: bool,
    pub deep_trace: bool,
    pub fallback: bool,
    /// Run strategies on the rayon pool
    pub parallel: bool,
    /// Per-strategy priority overrides, keyed by strategy name
    pub strategy_priorities: BTreeMap<String, i32>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_frontier: 1000,
            trace_frontier: 100,
            max_chain_length: 10,
            max_paths_per_strategy: 64,
            short_circuit_direct: true,
            deep_trace: true,
            fallback: true,
            parallel: false,
            strategy_priorities: BTreeMap::new(),
        }
    }
}

impl ExplainConfig {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ExplainResult<Self> {
        let config: ExplainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ExplainResult<()> {
        let caps = [
            ("max_depth", self.max_depth),
            ("max_frontier", self.max_frontier),
            ("trace_frontier", self.trace_frontier),
            ("max_chain_length", self.max_chain_length),
            ("max_paths_per_strategy", self.max_paths_per_strategy),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, value)| *value == 0) {
            return Err(ExplainError::InvalidConfig(format!("{} must be positive", name)));
        }
        if self.max_chain_length < 2 {
            return Err(ExplainError::InvalidConfig(
                "max_chain_length must allow at least two statements".to_string(),
            ));
        }
        if self.trace_frontier > self.max_frontier {
            return Err(ExplainError::InvalidConfig(format!(
                "trace_frontier ({}) exceeds max_frontier ({})",
                self.trace_frontier, self.max_frontier
            )));
        }
        Ok(())
    }

    /// Effective priority of a strategy: the override if configured, else its default
    pub fn priority_for(&self, strategy: &str, default: i32) -> i32 {
        self.strategy_priorities.get(strategy).copied().unwrap_or(default)
    }

    pub fn with_priority(mut self, strategy: impl Into<String>, priority: i32) -> Self {
        self.strategy_priorities.insert(strategy.into(), priority);
        self
    }
}
