//! フィンガープリント生成と類似度スコア
//!
//! フィンガープリントは正規化済みフィールドを `|` で連結した文字列の
//! SHA-256 先頭16バイト（32桁の16進）。重複判定用であり、
//! セキュリティ用途には使わない。

use crate::normalizer::{extract_keywords, normalize, normalize_address, normalize_phone};
use clinic_directory_common::{FingerprintSet, ProviderRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// フィンガープリントのバイト長（128bit）
pub const FINGERPRINT_BYTES: usize = 16;

/// secondary 一致時の加点
pub const SECONDARY_MATCH_WEIGHT: f64 = 0.8;
/// fuzzy 一致時の加点
pub const FUZZY_MATCH_WEIGHT: f64 = 0.5;
/// 正規化電話番号一致時の加点
pub const PHONE_MATCH_WEIGHT: f64 = 0.3;

/// 類似度の重みテーブル
///
/// 経験則の重みで、統計的な校正はしていない。確率ではなく
/// 0.0〜1.0 に丸めた加点スコアとして扱うこと。設定ファイルで調整可能。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    pub secondary: f64,
    pub fuzzy: f64,
    pub phone: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            secondary: SECONDARY_MATCH_WEIGHT,
            fuzzy: FUZZY_MATCH_WEIGHT,
            phone: PHONE_MATCH_WEIGHT,
        }
    }
}

/// キー文字列のフィンガープリント
pub fn fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

/// 3種類のフィンガープリントを生成
///
/// 空のフィールドも空文字列として扱うので常に値が返る。
/// 「名前が空なら医療機関ではない」といった判断は呼び出し側で行う。
pub fn generate_fingerprints(provider: &ProviderRecord) -> FingerprintSet {
    let name = normalize(&provider.name);
    let city = normalize(&provider.city);

    let primary_key = format!("{}|{}|{}", name, normalize_address(&provider.address), city);
    let secondary_key = format!("{}|{}|{}", name, normalize_phone(&provider.phone), city);
    let fuzzy_key = format!("{}|{}", extract_keywords(&provider.name), city);

    FingerprintSet {
        primary: fingerprint(&primary_key),
        secondary: fingerprint(&secondary_key),
        fuzzy: fingerprint(&fuzzy_key),
    }
}

/// 2件の類似度（既定の重み）
pub fn calculate_similarity(a: &ProviderRecord, b: &ProviderRecord) -> f64 {
    calculate_similarity_with(a, b, &SimilarityWeights::default())
}

/// 2件の類似度
///
/// primary が一致すれば 1.0。それ以外は secondary / fuzzy / 電話番号の
/// 一致ごとに加点し、1.0 で頭打ち。
pub fn calculate_similarity_with(
    a: &ProviderRecord,
    b: &ProviderRecord,
    weights: &SimilarityWeights,
) -> f64 {
    let fp_a = generate_fingerprints(a);
    let fp_b = generate_fingerprints(b);

    if fp_a.primary == fp_b.primary {
        return 1.0;
    }

    let mut score = 0.0;

    if fp_a.secondary == fp_b.secondary {
        score += weights.secondary;
    }

    if fp_a.fuzzy == fp_b.fuzzy {
        score += weights.fuzzy;
    }

    let phone_a = normalize_phone(&a.phone);
    if !phone_a.is_empty() && phone_a == normalize_phone(&b.phone) {
        score += weights.phone;
    }

    f64::min(score, 1.0)
}
