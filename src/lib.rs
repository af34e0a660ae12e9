//! 医療機関ディレクトリのコアライブラリ
//!
//! 収集した施設データの正規化・フィンガープリント生成・重複判定・
//! 診療科判定・ローマ字表示名の生成を行う。

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod pipeline;
pub mod romaji;
pub mod specialty;

pub use clinic_directory_common as common;
