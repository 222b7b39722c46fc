//! Oracle-native fallback

use super::{dominant_reasoning_type, SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget, ReasoningType};
use fukurow_core::model::Axiom;
use itertools::Itertools;
use tracing::debug;

/// Uses the oracle's own justification as one more path.
///
/// The reasoning type comes from the dominant schema statement of the
/// justification, so a path a systematic strategy also found collapses with
/// it during deduplication.
pub struct NativeStrategy;

impl NativeStrategy {
    pub const NAME: &'static str = "oracle_native";
}

impl Strategy for NativeStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Justification reported by the entailment oracle"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn can_explain(&self, _target: &QueryTarget) -> bool {
        true
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let Some(axioms) = ctx.oracle.justification(&target.to_axiom()) else {
            debug!(target = %target, "Oracle has no native justification");
            return Ok(Vec::new());
        };
        let axioms: Vec<Axiom> = axioms.into_iter().unique_by(Axiom::normalized).collect();
        if axioms.is_empty() {
            return Ok(Vec::new());
        }

        let reasoning_type = dominant_reasoning_type(&axioms, ReasoningType::OracleNative);
        let description = format!("Native oracle explanation with {} statements", axioms.len());
        Ok(vec![JustificationPath::new(axioms, description, reasoning_type, Self::NAME)])
    }
}
