//! # Fukurow Store
//!
//! OWL ステートメントストア
//! スキーマ公理と事実を格納し、説明パス探索のための索引付き参照を提供

pub mod store;

pub use store::*;
