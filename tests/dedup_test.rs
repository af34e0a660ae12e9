//! 重複判定テスト
//!
//! フィンガープリント生成と重複判定の性質を検証

use clinic_directory::common::{parse_known_fingerprints, MatchType, ProviderRecord};
use clinic_directory::dedup::{
    calculate_similarity, check_duplicate, dedupe_batch, find_similar, generate_fingerprints,
    KnownFingerprints, SimilarityWeights,
};
use clinic_directory::normalizer::{normalize, normalize_phone};

fn provider(name: &str, address: &str, phone: &str, city: &str) -> ProviderRecord {
    ProviderRecord::new(name, address, phone, city)
}

/// 同じ入力からは常に同じフィンガープリント
#[test]
fn test_fingerprints_deterministic() {
    let p = provider("Sakura Dental Clinic", "1-2-3 Jingumae", "03-1234-5678", "Shibuya");
    let same = provider("Sakura Dental Clinic", "1-2-3 Jingumae", "03-1234-5678", "Shibuya");

    assert_eq!(generate_fingerprints(&p), generate_fingerprints(&p));
    assert_eq!(generate_fingerprints(&p), generate_fingerprints(&same));
}

/// 大文字小文字・アクセントは区別しない
#[test]
fn test_case_and_accent_insensitive() {
    let a = provider("Tōkyō Clinic", "1-1 Marunouchi", "03-0000-0000", "Chiyoda");
    let b = provider("tokyo clinic", "1-1 Marunouchi", "03-0000-0000", "Chiyoda");
    assert_eq!(generate_fingerprints(&a), generate_fingerprints(&b));
}

/// 正規化は冪等
#[test]
fn test_normalize_idempotent() {
    for text in ["", "  Tōkyō  Clinic!! ", "さくら歯科（渋谷）", "Dr. Müller's Praxis", "a\tb\nc"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "{:?}", text);
    }
}

/// 国番号付きと国内表記の電話番号は同じ
#[test]
fn test_phone_country_code() {
    assert_eq!(normalize_phone("+81-3-1234-5678"), normalize_phone("03-1234-5678"));
}

/// 名前・住所・市区町村が一致すれば primary で重複
#[test]
fn test_exact_match_is_primary_duplicate() {
    let first = provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai");
    let second = provider("AOBA CLINIC", "2-2 honcho", "", "sendai");

    let known = KnownFingerprints::from_sets([&generate_fingerprints(&first)]);
    let verdict = check_duplicate(&second, known.as_set());

    assert!(verdict.is_duplicate);
    assert_eq!(verdict.match_type, MatchType::Primary);
}

/// 住所が違っても電話番号が一致すれば secondary
#[test]
fn test_phone_match_is_secondary_duplicate() {
    let first = provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai");
    let moved = provider("Aoba Clinic", "5-8 Ichibancho", "+81 22-111-2222", "Sendai");

    let known = KnownFingerprints::from_sets([&generate_fingerprints(&first)]);
    let verdict = check_duplicate(&moved, known.as_set());

    assert_eq!(verdict.match_type, MatchType::Secondary);
}

/// 既存スナップショットをJSONから読み込んで判定
#[test]
fn test_known_fingerprints_from_json() {
    let first = provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai");
    let fps = generate_fingerprints(&first);
    let json = format!(r#"[{{"primary_fingerprint": "{}"}}, null, ""]"#, fps.primary);

    let known: KnownFingerprints = parse_known_fingerprints(&json).unwrap().into_iter().collect();
    assert_eq!(known.len(), 1);
    assert!(check_duplicate(&first, known.as_set()).is_duplicate);
}

/// バッチ内の重複は先に出たものを残す
#[test]
fn test_dedupe_batch_first_wins() {
    let batch = vec![
        provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai"),
        provider("Midori Dental", "3-3 Kita", "022-333-4444", "Sendai"),
        provider("aoba clinic", "2-2 Honcho", "", "Sendai"),
    ];

    let verdicts = dedupe_batch(&batch, &KnownFingerprints::new());
    assert!(!verdicts[0].verdict.is_duplicate);
    assert!(!verdicts[1].verdict.is_duplicate);
    assert!(verdicts[2].verdict.is_duplicate);
    assert_eq!(verdicts[2].verdict.match_type, MatchType::Primary);
}

/// 類似度は 0.0〜1.0
#[test]
fn test_similarity_scores() {
    let a = provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai");
    let same = provider("Aoba Clinic", "2-2 Honcho", "", "Sendai");
    let moved = provider("Aoba Clinic", "5-8 Ichibancho", "022-111-2222", "Sendai");
    let other = provider("Midori Dental", "3-3 Kita", "022-333-4444", "Osaka");

    assert_eq!(calculate_similarity(&a, &same), 1.0);
    // secondary + fuzzy + phone は 1.0 で頭打ち
    assert_eq!(calculate_similarity(&a, &moved), 1.0);
    assert_eq!(calculate_similarity(&a, &other), 0.0);

    let renamed = provider("Aoba Family Clinic", "5-8 Ichibancho", "022-111-2222", "Sendai");
    let score = calculate_similarity(&a, &renamed);
    assert!((score - 0.3).abs() < 1e-9, "{}", score);
}

/// 閾値以上の候補をスコア順に
#[test]
fn test_find_similar() {
    let target = provider("Aoba Clinic", "2-2 Honcho", "022-111-2222", "Sendai");
    let candidates = vec![
        provider("Midori Dental", "3-3 Kita", "022-333-4444", "Sendai"),
        provider("Aoba Family Clinic", "9-9 Minami", "022-111-2222", "Sendai"),
        provider("Aoba Clinic", "2-2 Honcho", "", "Sendai"),
    ];

    let matches = find_similar(&target, &candidates, 0.3, &SimilarityWeights::default());
    let indices: Vec<usize> = matches.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![2, 1]);
    assert_eq!(matches[0].score, 1.0);
}
