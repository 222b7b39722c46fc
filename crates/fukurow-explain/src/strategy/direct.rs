//! Literal membership of the target in the store

use super::{SearchContext, Strategy};
use crate::error::ExplainResult;
use crate::path::{JustificationPath, QueryTarget};

pub struct DirectStrategy;

impl DirectStrategy {
    pub const NAME: &'static str = "direct";
}

impl Strategy for DirectStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Target statement is asserted in the knowledge base"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn can_explain(&self, _target: &QueryTarget) -> bool {
        true
    }

    fn explain(&self, target: &QueryTarget, ctx: &SearchContext<'_>) -> ExplainResult<Vec<JustificationPath>> {
        let axiom = target.to_axiom();
        if ctx.is_asserted(&axiom) {
            Ok(vec![JustificationPath::direct(axiom, Self::NAME)])
        } else {
            Ok(Vec::new())
        }
    }
}
