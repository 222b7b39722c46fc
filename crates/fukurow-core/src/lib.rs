//! # Fukurow Core
//!
//! OWL 公理のデータモデル
//! 説明パス探索で扱うステートメント (スキーマ公理・事実) を提供

pub mod model;
pub mod format;

pub use model::*;
