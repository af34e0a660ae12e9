//! Clinic Directory Common Library
//!
//! 収集パイプラインと重複判定コアで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod parser;

pub use types::{
    DuplicateVerdict, FingerprintSet, MatchType, ProviderRecord, RawProvider, Review,
    RomajiResult,
};
pub use error::{Error, Result};
pub use parser::{parse_known_fingerprints, parse_providers};
