//! 重複判定モジュール
//!
//! 医療機関レコードから3種類のフィンガープリントを生成し、
//! 既存レコードのフィンガープリント集合と照合する。
//!
//! ## 判定順序
//! 1. primary（名前 + 住所 + 市区町村）
//! 2. secondary（名前 + 電話 + 市区町村）
//! 3. fuzzy（名前キーワード + 市区町村）

pub mod checker;
pub mod fingerprint;

pub use checker::{
    check_duplicate, check_fingerprints, dedupe_batch, find_similar, BatchVerdict,
    KnownFingerprints, SimilarMatch,
};
pub use fingerprint::{
    calculate_similarity, calculate_similarity_with, fingerprint, generate_fingerprints,
    SimilarityWeights,
};
