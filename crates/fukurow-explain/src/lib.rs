//! # Fukurow Explain
//!
//! OWL 含意に対する正当化パス (justification path) 探索エンジン
//!
//! 機能:
//! - 推論パターンごとの探索戦略 (階層・同値・逆・推移・制約など)
//! - 導出の深い追跡 (deep trace-back) と含意オラクルへのフォールバック
//! - 正規化シグネチャによる重複排除
//! - 特徴タグ付け (H, T, R, M ...) と JSON エクスポート
//! - スレッド安全な結果キャッシュ

pub mod cache;
pub mod config;
pub mod context;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod export;
pub mod path;
pub mod strategy;
pub mod summary;
pub mod tagger;
pub mod trace;

pub use cache::{CacheOutcome, CachedPaths, ExplanationCache};
pub use config::ExplainConfig;
pub use context::{ProcessingContext, QueryStats};
pub use dedup::Deduplicator;
pub use engine::ExplanationEngine;
pub use error::{ExplainError, ExplainResult};
pub use export::{
    extract_justifications, format_paths, ExplanationEntry, ExplanationRecord, ExplanationReport, InferredTriple,
    SizeRange,
};
pub use path::{JustificationPath, QueryTarget, ReasoningType};
pub use strategy::{SearchContext, Strategy, StrategyRegistry};
pub use summary::TaggingSummary;
pub use tagger::{FeatureCategory, TagAnalysis, Tagger, CANONICAL_ORDER, MULTI_STEP};
pub use trace::DeepTracer;
