//! 住所の正規化
//!
//! - 表記ゆれの多い語を略記に統一（street → st など）
//! - 国名・都市名・「区」を除去
//! - 番地や棟番号など、数字を含むか3文字以下のトークンだけを残す

use super::normalize;

/// 略記への置換（文字列としての単純置換、順序どおりに適用）
const ADDRESS_REPLACEMENTS: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("road", "rd"),
    ("building", "bldg"),
    ("floor", "fl"),
    ("japan", ""),
    ("tokyo", ""),
    ("ku", ""),
];

/// 残すトークンの最大文字数（数字を含まない場合）
const MAX_PLAIN_TOKEN_LEN: usize = 3;

/// 住所を比較用に正規化
///
/// 置換はトークン境界を見ない部分文字列置換なので、`kudan` のように
/// 語中の `ku` も消える。
pub fn normalize_address(address: &str) -> String {
    let mut result = normalize(address);

    for (from, to) in ADDRESS_REPLACEMENTS {
        result = result.replace(from, to);
    }

    result
        .split_whitespace()
        .filter(|token| {
            token.chars().any(|c| c.is_ascii_digit())
                || token.chars().count() <= MAX_PLAIN_TOKEN_LEN
        })
        .collect::<Vec<_>>()
        .join(" ")
}
