//! 診療科判定モジュール
//!
//! 5つの抽出元からキーワード一致で診療科ラベルを集め、
//! 最頻出のラベルを採用する。
//!
//! ## 抽出元（優先順）
//! 1. 既存タグ（汎用ラベルを除く）
//! 2. 施設名（一致1件につき2票）
//! 3. 口コミ（異なるキーワード2語以上で1票）
//! 4. Google Places の type
//! 5. 説明文（異なるキーワード3語以上で1票）
//!
//! 同票の場合は先に票が入ったラベル、つまり抽出元の優先順が高い方が勝つ。

pub mod keywords;

pub use keywords::{is_generic, GENERAL_MEDICINE};

use clinic_directory_common::Review;
use keywords::{specialty_for_place_type, SPECIALTY_RULES};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 施設名一致の票数
pub const NAME_VOTE_WEIGHT: usize = 2;
/// 口コミで必要な異なるキーワード数
pub const REVIEW_MIN_KEYWORD_HITS: usize = 2;
/// 説明文で必要な異なるキーワード数（AI生成文が多く誤検出しやすい）
pub const DESCRIPTION_MIN_KEYWORD_HITS: usize = 3;

/// 口コミ・説明文の判定閾値
///
/// 経験則の値で根拠となる計測はない。設定ファイルで調整可能。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyThresholds {
    pub review_min_hits: usize,
    pub description_min_hits: usize,
}

impl Default for SpecialtyThresholds {
    fn default() -> Self {
        Self {
            review_min_hits: REVIEW_MIN_KEYWORD_HITS,
            description_min_hits: DESCRIPTION_MIN_KEYWORD_HITS,
        }
    }
}

/// 集計前の票（抽出元の優先順に積まれる）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtyVote {
    labels: Vec<String>,
}

impl SpecialtyVote {
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// ラベルごとの票数（初出順）
    pub fn tally(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for label in &self.labels {
            match counts.iter_mut().find(|(l, _)| *l == label.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.as_str(), 1)),
            }
        }
        counts
    }

    /// 最多票のラベル。同票は初出が早い方
    pub fn winner(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in self.tally() {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }
}

/// 診療科判定器
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialtyDetector {
    pub thresholds: SpecialtyThresholds,
}

impl SpecialtyDetector {
    pub fn new(thresholds: SpecialtyThresholds) -> Self {
        Self { thresholds }
    }

    /// 全抽出元から票を集める
    pub fn collect_votes(
        &self,
        name: &str,
        reviews: &[Review],
        place_types: &[String],
        description: &str,
        existing_specialties: &[String],
    ) -> SpecialtyVote {
        let mut vote = SpecialtyVote::default();

        for label in from_existing(existing_specialties) {
            vote.push(label);
        }

        for label in from_name(name) {
            for _ in 0..NAME_VOTE_WEIGHT {
                vote.push(label);
            }
        }

        let review_text = reviews
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        for label in from_text(&review_text, self.thresholds.review_min_hits) {
            vote.push(label);
        }

        for label in from_place_types(place_types) {
            vote.push(label);
        }

        for label in from_text(description, self.thresholds.description_min_hits) {
            vote.push(label);
        }

        vote
    }

    /// 診療科を1つに決める。票がなければ General Medicine
    pub fn determine(
        &self,
        name: &str,
        reviews: &[Review],
        place_types: &[String],
        description: &str,
        existing_specialties: &[String],
    ) -> String {
        let vote = self.collect_votes(name, reviews, place_types, description, existing_specialties);
        let specialty = vote.winner().unwrap_or(GENERAL_MEDICINE).to_string();

        debug!(provider = name, specialty = %specialty, votes = ?vote.tally(), "specialty determined");
        specialty
    }
}

/// 既定の閾値で診療科を判定
pub fn determine_specialty(
    name: &str,
    reviews: &[Review],
    place_types: &[String],
    description: &str,
    existing_specialties: &[String],
) -> String {
    SpecialtyDetector::default().determine(name, reviews, place_types, description, existing_specialties)
}

/// 診療科リストを整理
///
/// - 具体的な診療科があれば汎用ラベルを除き、重複除去して順序を保つ
/// - 汎用ラベルしかなければそれを重複除去して返す
/// - 空なら `["General Medicine"]`
pub fn clean_specialty_list(specialties: &[String]) -> Vec<String> {
    let mut specific: Vec<String> = Vec::new();
    let mut generic: Vec<String> = Vec::new();

    for specialty in specialties {
        let specialty = specialty.trim();
        if specialty.is_empty() {
            continue;
        }
        let bucket = if is_generic(specialty) { &mut generic } else { &mut specific };
        if !bucket.iter().any(|s| s == specialty) {
            bucket.push(specialty.to_string());
        }
    }

    if !specific.is_empty() {
        specific
    } else if !generic.is_empty() {
        generic
    } else {
        vec![GENERAL_MEDICINE.to_string()]
    }
}

/// 抽出元1: 既存タグ
fn from_existing(existing: &[String]) -> Vec<&str> {
    let mut labels: Vec<&str> = Vec::new();
    for label in existing.iter().map(|s| s.trim()) {
        if !label.is_empty() && !is_generic(label) && !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// 抽出元2: 施設名の部分一致
fn from_name(name: &str) -> Vec<&'static str> {
    let name = name.to_lowercase();
    SPECIALTY_RULES
        .iter()
        .filter(|rule| rule.keywords.iter().any(|kw| name.contains(kw)))
        .map(|rule| rule.label)
        .collect()
}

/// 抽出元3・5: 異なるキーワードが `min_hits` 語以上ある診療科
fn from_text(text: &str, min_hits: usize) -> Vec<&'static str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.to_lowercase();
    SPECIALTY_RULES
        .iter()
        .filter(|rule| {
            let hits = rule.keywords.iter().filter(|kw| text.contains(*kw)).count();
            hits >= min_hits
        })
        .map(|rule| rule.label)
        .collect()
}

/// 抽出元4: place type の対応表
fn from_place_types(place_types: &[String]) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for label in place_types.iter().filter_map(|t| specialty_for_place_type(t)) {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(texts: &[&str]) -> Vec<Review> {
        texts
            .iter()
            .map(|t| Review {
                text: t.to_string(),
                rating: Some(5.0),
            })
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fallback_general_medicine() {
        assert_eq!(determine_specialty("Random Name LLC", &[], &[], "", &[]), "General Medicine");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(determine_specialty("Sakura Dental Clinic", &[], &[], "", &[]), "Dentistry");
        assert_eq!(determine_specialty("さくら小児科", &[], &[], "", &[]), "Pediatrics");
        assert_eq!(determine_specialty("青山眼科", &[], &[], "", &[]), "Ophthalmology");
    }

    #[test]
    fn test_review_single_hit_not_enough() {
        let r = reviews(&["I chipped a tooth on the way here, but the staff were kind."]);
        assert_eq!(determine_specialty("Aoba Clinic", &r, &[], "", &[]), "General Medicine");
    }

    #[test]
    fn test_review_two_hits_triggers() {
        let r = reviews(&["Chipped a tooth.", "Best dentist in town."]);
        assert_eq!(determine_specialty("Aoba Clinic", &r, &[], "", &[]), "Dentistry");
    }

    #[test]
    fn test_description_needs_three_hits() {
        let two = "Skin care with acne treatment.";
        assert_eq!(determine_specialty("Aoba Clinic", &[], &[], two, &[]), "General Medicine");

        let three = "Skin care, acne and eczema treatment.";
        assert_eq!(determine_specialty("Aoba Clinic", &[], &[], three, &[]), "Dermatology");
    }

    #[test]
    fn test_place_types() {
        let types = strings(&["point_of_interest", "dentist", "health"]);
        assert_eq!(determine_specialty("Aoba", &[], &types, "", &[]), "Dentistry");
    }

    #[test]
    fn test_doctor_type_does_not_block_description() {
        let types = strings(&["doctor", "health"]);
        let desc = "We treat skin conditions like acne and eczema.";
        assert_eq!(determine_specialty("Aoba", &[], &types, desc, &[]), "Dermatology");
    }

    #[test]
    fn test_existing_tags_skip_generic() {
        let existing = strings(&["Healthcare", "General Medicine"]);
        assert_eq!(determine_specialty("Aoba", &[], &[], "", &existing), "General Medicine");

        let existing = strings(&["Healthcare", "Cardiology"]);
        assert_eq!(determine_specialty("Aoba", &[], &[], "", &existing), "Cardiology");
    }

    #[test]
    fn test_name_weight_beats_single_sources() {
        // 名前(2票) > 既存タグ(1票) + place type(1票 別ラベル)
        let existing = strings(&["Dermatology"]);
        let types = strings(&["hospital"]);
        assert_eq!(
            determine_specialty("Sakura Dental", &[], &types, "", &existing),
            "Dentistry"
        );
    }

    #[test]
    fn test_tie_broken_by_source_priority() {
        // 既存タグ(1票) と place type(1票) の同票 → 既存タグ
        let existing = strings(&["Dermatology"]);
        let types = strings(&["dentist"]);
        assert_eq!(determine_specialty("Aoba", &[], &types, "", &existing), "Dermatology");

        // 口コミ(1票) と説明文(1票) の同票 → 口コミ
        let r = reviews(&["Great dentist, fixed my tooth."]);
        let desc = "Skin, acne and eczema care.";
        assert_eq!(determine_specialty("Aoba", &r, &[], desc, &[]), "Dentistry");
    }

    #[test]
    fn test_tie_within_name_prefers_table_order() {
        // 「消化器内科」は Gastroenterology と Internal Medicine の両方に一致
        assert_eq!(determine_specialty("新宿消化器内科", &[], &[], "", &[]), "Gastroenterology");
    }

    #[test]
    fn test_custom_thresholds() {
        let detector = SpecialtyDetector::new(SpecialtyThresholds {
            review_min_hits: 1,
            description_min_hits: 1,
        });
        let r = reviews(&["My tooth feels great."]);
        assert_eq!(detector.determine("Aoba", &r, &[], "", &[]), "Dentistry");
    }

    #[test]
    fn test_vote_tally_order() {
        let detector = SpecialtyDetector::default();
        let vote = detector.collect_votes(
            "Sakura Dental",
            &[],
            &strings(&["dentist"]),
            "",
            &strings(&["ENT"]),
        );
        assert_eq!(vote.tally(), vec![("ENT", 1), ("Dentistry", 3)]);
        assert_eq!(vote.winner(), Some("Dentistry"));
    }

    #[test]
    fn test_vote_empty() {
        assert!(SpecialtyVote::default().winner().is_none());
    }

    #[test]
    fn test_clean_specialty_list() {
        assert_eq!(
            clean_specialty_list(&strings(&["General Medicine", "Dentistry", "Healthcare", "Dentistry", "ENT"])),
            strings(&["Dentistry", "ENT"])
        );
        assert_eq!(
            clean_specialty_list(&strings(&["Healthcare", "General Medicine", "Healthcare"])),
            strings(&["Healthcare", "General Medicine"])
        );
        assert_eq!(clean_specialty_list(&[]), strings(&["General Medicine"]));
        assert_eq!(clean_specialty_list(&strings(&["  "])), strings(&["General Medicine"]));
    }
}
