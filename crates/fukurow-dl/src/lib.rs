//! OWL DL 推論エンジン
//!
//! このクレートは説明パス探索のための含意オラクルを提供します:
//! - `EntailmentOracle` トレイト (含意判定・型推論・プロパティ値推論)
//! - 前向き連鎖による参照実装 (`OwlDlReasoner::materialize`)
//! - 導出記録によるネイティブな正当化 (justification)

pub mod oracle;
pub mod reasoner;

pub use oracle::EntailmentOracle;
pub use reasoner::{Derivation, Fact, Materialization, OwlDlReasoner, ReasonerConfig};

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwlDlError {
    #[error("Reasoning error: {0}")]
    ReasoningError(String),

    #[error("Consistency error: {0}")]
    ConsistencyError(String),

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}
