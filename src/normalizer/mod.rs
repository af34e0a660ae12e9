//! テキスト正規化モジュール
//!
//! フィンガープリント生成の前処理として、名前・住所・電話番号を
//! 比較可能な形に揃える。すべて全域関数で、空文字列には空文字列を返す。
//!
//! ## 処理フロー
//! 1. 小文字化
//! 2. NFD分解 + 結合文字の除去（アクセント除去）
//! 3. 単語文字以外を空白に置換
//! 4. 連続空白の圧縮

pub mod address;
pub mod keywords;
pub mod phone;

pub use address::normalize_address;
pub use keywords::extract_keywords;
pub use phone::normalize_phone;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// 基本の正規化
///
/// # Examples
/// ```
/// use clinic_directory::normalizer::normalize;
///
/// assert_eq!(normalize("Tōkyō  Clinic!"), "tokyo clinic");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    lazy_static::lazy_static! {
        static ref NON_WORD_RE: Regex = Regex::new(r"[^\w\s]").unwrap();
        // 結合文字のうち Mn（非スペーシングマーク）だけを除く
        static ref NONSPACING_MARK_RE: Regex = Regex::new(r"\p{Mn}").unwrap();
    }

    let decomposed: String = text.to_lowercase().nfd().collect();
    let stripped = NONSPACING_MARK_RE.replace_all(&decomposed, "");

    let spaced = NON_WORD_RE.replace_all(&stripped, " ");
    collapse_whitespace(&spaced)
}

/// 連続する空白を1つにまとめ、前後の空白を除去
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Sakura Dental Clinic"), "sakura dental clinic");
        assert_eq!(normalize("  Sakura\t\tDental\n"), "sakura dental");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Tōkyō Clinic"), "tokyo clinic");
        assert_eq!(normalize("Café Médical"), "cafe medical");
    }

    #[test]
    fn test_normalize_keeps_spacing_marks() {
        // U+093E は Mc（スペーシングマーク）なので残す
        assert_eq!(normalize("\u{0915}\u{093E}"), "\u{0915}\u{093E}");
        // U+0301 は Mn なので除く
        assert_eq!(normalize("e\u{0301}"), "e");
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize("St. Luke's (International)"), "st luke s international");
        assert_eq!(normalize("A&B---C"), "a b c");
    }

    #[test]
    fn test_normalize_keeps_japanese_word_chars() {
        assert_eq!(normalize("さくら歯科・医院"), "さくら歯科 医院");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "Tōkyō Clinic",
            "St. Luke's International Hospital",
            "さくらデンタルクリニック",
            "İstanbul Ärzte",
            "  mixed   CASE  & symbols!! ",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b \t c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }
}
