//! 収集データの一括処理
//!
//! 生データ → 検証済みレコード → フィンガープリント → 重複判定 →
//! 診療科判定 → ローマ字表示名、の順に処理する。
//! 重複と判定されたレコードは判定結果だけを返し、以降の処理は行わない。

use crate::dedup::{dedupe_batch, find_similar, KnownFingerprints, SimilarMatch, SimilarityWeights};
use crate::romaji::{contains_japanese, convert_to_romaji_with, format_display_name, RomajiBackend, RomajiCache};
use crate::specialty::{clean_specialty_list, SpecialtyDetector, SpecialtyThresholds};
use clinic_directory_common::{DuplicateVerdict, FingerprintSet, ProviderRecord, RawProvider};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// 処理オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub thresholds: SpecialtyThresholds,
    pub backend: RomajiBackend,
}

/// 受理したレコードの付加情報
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    pub specialty: String,
    pub specialties: Vec<String>,
    pub name_romaji: String,
    pub display_name: String,
}

/// 1件分の処理結果（永続化レイヤーへの出力）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProvider {
    pub record: ProviderRecord,
    pub fingerprints: FingerprintSet,
    pub duplicate: DuplicateVerdict,
    #[serde(flatten)]
    pub enrichment: Option<Enrichment>,
}

/// 境界での検証
///
/// 口コミが配列以外で渡された場合は警告して「口コミなし」として扱う。
pub fn validate(raw: RawProvider) -> ProviderRecord {
    if !raw.reviews.is_null() && !raw.reviews.is_array() {
        warn!(
            provider = raw.provider_name.as_deref().unwrap_or_default(),
            "reviews is not a list, treating as no reviews"
        );
    }
    ProviderRecord::from(raw)
}

/// 1件の診療科と表示名を求める（キャッシュなし）
pub fn enrich(record: &ProviderRecord, options: &PipelineOptions) -> Enrichment {
    let romaji = convert_to_romaji_with(&record.name, &options.backend);
    enrich_with_romaji(record, &romaji, options)
}

fn enrich_with_romaji(record: &ProviderRecord, romaji: &str, options: &PipelineOptions) -> Enrichment {
    let detector = SpecialtyDetector::new(options.thresholds);
    let specialty = detector.determine(
        &record.name,
        &record.reviews,
        &record.place_types,
        &record.description,
        &record.existing_specialties,
    );

    let mut all = vec![specialty.clone()];
    all.extend(record.existing_specialties.iter().cloned());

    Enrichment {
        specialties: clean_specialty_list(&all),
        specialty,
        name_romaji: romaji.to_string(),
        display_name: format_display_name(&record.name, romaji),
    }
}

/// バッチを処理
///
/// 重複判定は入力順に逐次、診療科判定とローマ字変換は並列に行う。
/// `cache` にない日本語名は変換して追加する。
pub fn process_batch(
    raw: Vec<RawProvider>,
    known: &KnownFingerprints,
    cache: &mut RomajiCache,
    options: &PipelineOptions,
) -> Vec<EnrichedProvider> {
    let records: Vec<ProviderRecord> = raw.into_iter().map(validate).collect();
    let verdicts = dedupe_batch(&records, known);

    // キャッシュにない日本語名をまとめて変換
    let mut pending: Vec<&str> = Vec::new();
    let mut queued: HashSet<&str> = HashSet::new();
    for (record, batch) in records.iter().zip(&verdicts) {
        let name = record.name.as_str();
        if !batch.verdict.is_duplicate
            && contains_japanese(name)
            && cache.get(name).is_none()
            && queued.insert(name)
        {
            pending.push(name);
        }
    }

    let converted: HashMap<String, String> = pending
        .par_iter()
        .map(|name| (name.to_string(), convert_to_romaji_with(name, &options.backend)))
        .collect();

    for (name, romaji) in &converted {
        if romaji != name {
            cache.insert(name.clone(), romaji.clone());
        }
    }

    let cache: &RomajiCache = cache;
    let results: Vec<EnrichedProvider> = records
        .into_par_iter()
        .zip(verdicts.into_par_iter())
        .map(|(record, batch)| {
            let enrichment = if batch.verdict.is_duplicate {
                None
            } else {
                let romaji = converted
                    .get(record.name.as_str())
                    .map(String::as_str)
                    .or_else(|| cache.get(&record.name))
                    .unwrap_or(record.name.as_str())
                    .to_string();
                Some(enrich_with_romaji(&record, &romaji, options))
            };

            EnrichedProvider {
                record,
                fingerprints: batch.fingerprints,
                duplicate: batch.verdict,
                enrichment,
            }
        })
        .collect();

    let duplicates = results.iter().filter(|r| r.duplicate.is_duplicate).count();
    info!(
        total = results.len(),
        duplicates,
        converted = converted.len(),
        "batch processed"
    );

    results
}

/// 1件分の類似候補
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarCandidates {
    pub name: String,
    pub matches: Vec<SimilarMatch>,
}

/// 各レコードについて候補リストから類似度が閾値以上のものを探す
///
/// 重みは設定ファイルの `similarity` を渡す。
pub fn find_similar_batch(
    records: &[ProviderRecord],
    candidates: &[ProviderRecord],
    threshold: f64,
    weights: &SimilarityWeights,
) -> Vec<SimilarCandidates> {
    let results: Vec<SimilarCandidates> = records
        .par_iter()
        .map(|record| SimilarCandidates {
            name: record.name.clone(),
            matches: find_similar(record, candidates, threshold, weights),
        })
        .collect();

    let with_matches = results.iter().filter(|r| !r.matches.is_empty()).count();
    info!(
        total = results.len(),
        candidates = candidates.len(),
        with_matches,
        "similarity search finished"
    );

    results
}
