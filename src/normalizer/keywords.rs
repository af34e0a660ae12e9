//! 名前キーワード抽出（ファジーフィンガープリント用）
//!
//! 施設種別のような汎用語を除いた固有部分をアルファベット順に並べる。
//! 並べ替えるので "Sakura Dental" と "Dental Sakura" は同じキーになる。

use super::normalize;
use std::collections::HashSet;

/// 施設名から除外する汎用語（英語・日本語）と冠詞・接続詞
const STOP_WORDS: &[&str] = &[
    "clinic",
    "hospital",
    "medical",
    "center",
    "centre",
    "healthcare",
    "health",
    "care",
    "international",
    "クリニック",
    "病院",
    "医院",
    "診療所",
    "メディカル",
    "the",
    "and",
    "of",
    "for",
    "a",
    "an",
    "in",
    "at",
    "on",
];

/// キーとして使うトークン数
const MAX_KEYWORDS: usize = 3;

/// このトークン長以下は捨てる
const MIN_EXCLUSIVE_TOKEN_LEN: usize = 2;

/// 名前からファジー比較用のキーワード列を抽出
///
/// # Examples
/// ```
/// use clinic_directory::normalizer::extract_keywords;
///
/// assert_eq!(extract_keywords("Sakura Dental Clinic"), "dental sakura");
/// assert_eq!(extract_keywords("Dental Sakura"), "dental sakura");
/// ```
pub fn extract_keywords(name: &str) -> String {
    lazy_static::lazy_static! {
        // 正規化で濁点が落ちるので、比較側も正規化しておく
        static ref NORMALIZED_STOP_WORDS: HashSet<String> =
            STOP_WORDS.iter().map(|w| normalize(w)).collect();
    }

    let normalized = normalize(name);
    let mut tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| !NORMALIZED_STOP_WORDS.contains(*t))
        .filter(|t| t.chars().count() > MIN_EXCLUSIVE_TOKEN_LEN)
        .collect();

    tokens.sort_unstable();
    tokens.truncate(MAX_KEYWORDS);
    tokens.join(" ")
}
