//! 既存フィンガープリントとの照合
//!
//! 照合対象のフィンガープリント集合は呼び出し側が用意する
//! （実運用ではDBの既存レコードから取得したスナップショット）。
//! このモジュール自体はI/Oを行わない。

use super::fingerprint::{calculate_similarity_with, generate_fingerprints, SimilarityWeights};
use clinic_directory_common::{DuplicateVerdict, FingerprintSet, ProviderRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// 既存レコードのフィンガープリント集合（3種類の和集合）
#[derive(Debug, Clone, Default)]
pub struct KnownFingerprints {
    fingerprints: HashSet<String>,
}

impl KnownFingerprints {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存レコードのフィンガープリントセットから構築
    pub fn from_sets<'a>(sets: impl IntoIterator<Item = &'a FingerprintSet>) -> Self {
        let mut known = Self::new();
        for set in sets {
            known.insert_set(set);
        }
        known
    }

    /// 1件分の3種類を追加
    pub fn insert_set(&mut self, set: &FingerprintSet) {
        for (_, fp) in set.iter() {
            self.fingerprints.insert(fp.to_string());
        }
    }

    pub fn insert(&mut self, fingerprint: impl Into<String>) {
        self.fingerprints.insert(fingerprint.into());
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<String> {
        &self.fingerprints
    }
}

impl FromIterator<String> for KnownFingerprints {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            fingerprints: iter.into_iter().collect(),
        }
    }
}

/// 医療機関が既存レコードと重複するか判定
///
/// primary → secondary → fuzzy の順に照合し、最初に一致した種類を返す。
/// `known` が空なら常に重複なし。
pub fn check_duplicate(provider: &ProviderRecord, known: &HashSet<String>) -> DuplicateVerdict {
    check_fingerprints(&generate_fingerprints(provider), known)
}

/// 生成済みフィンガープリントで照合
pub fn check_fingerprints(fingerprints: &FingerprintSet, known: &HashSet<String>) -> DuplicateVerdict {
    fingerprints
        .iter()
        .find(|(_, fp)| known.contains(*fp))
        .map(|(match_type, _)| DuplicateVerdict::matched(match_type))
        .unwrap_or_else(DuplicateVerdict::unique)
}

/// バッチ内1件分の判定結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVerdict {
    pub fingerprints: FingerprintSet,
    pub verdict: DuplicateVerdict,
}

/// バッチを先頭から順に重複判定
///
/// 既存スナップショットに加え、同じバッチ内で先に受理したレコードとも
/// 照合する。重複と判定されたレコードのフィンガープリントは追加しない。
pub fn dedupe_batch(providers: &[ProviderRecord], known: &KnownFingerprints) -> Vec<BatchVerdict> {
    let mut seen = known.as_set().clone();

    providers
        .iter()
        .map(|provider| {
            let fingerprints = generate_fingerprints(provider);
            let verdict = check_fingerprints(&fingerprints, &seen);

            if verdict.is_duplicate {
                debug!(
                    provider = %provider.name,
                    match_type = %verdict.match_type,
                    "duplicate provider"
                );
            } else {
                for (_, fp) in fingerprints.iter() {
                    seen.insert(fp.to_string());
                }
            }

            BatchVerdict { fingerprints, verdict }
        })
        .collect()
}

/// 類似候補
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarMatch {
    /// 候補リスト内の位置
    pub index: usize,
    pub score: f64,
}

/// 候補の中から類似度が閾値以上のものをスコア降順で返す
///
/// 同スコアは候補リストの順序を保つ。
pub fn find_similar(
    provider: &ProviderRecord,
    candidates: &[ProviderRecord],
    threshold: f64,
    weights: &SimilarityWeights,
) -> Vec<SimilarMatch> {
    let mut matches: Vec<SimilarMatch> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| SimilarMatch {
            index,
            score: calculate_similarity_with(provider, candidate, weights),
        })
        .filter(|m| m.score >= threshold)
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}
