//! ローマ字変換モジュール
//!
//! 日本語の施設名を英語表示用に変換する。
//!
//! ## 処理フロー
//! 1. 医療用語を対訳表でプレースホルダに置換（音訳で崩れないように）
//! 2. 残った日本語を音訳
//!    - 日本語のみ: 全体を音訳し、助詞以外の語頭を大文字に
//!    - 英字混在: 日本語部分だけ音訳し、英字部分はそのまま
//! 3. プレースホルダを英語に戻す
//! 4. 空白の整理と小文字→大文字の境目への空白挿入

pub mod backend;
pub mod cache;
pub mod terms;

pub use backend::{RomajiBackend, Transliterator};
pub use cache::RomajiCache;

use clinic_directory_common::RomajiResult;
use regex::Regex;
use tracing::warn;

/// 語頭を大文字にしない助詞（文頭を除く）
const PARTICLES: &[&str] = &[
    "no", "to", "wa", "ga", "wo", "ni", "de", "he", "kara", "made", "ya",
];

/// プレースホルダに使う私用領域（BMP）
const PLACEHOLDER_BASE: u32 = 0xE000;
const PLACEHOLDER_END: u32 = 0xF8FF;

lazy_static::lazy_static! {
    static ref JAPANESE_RUN_RE: Regex = Regex::new(
        r"[\x{3005}-\x{3007}\x{3040}-\x{30FF}\x{31F0}-\x{31FF}\x{3400}-\x{4DBF}\x{4E00}-\x{9FFF}\x{F900}-\x{FAFF}\x{FF66}-\x{FF9F}\x{20000}-\x{2FA1F}]+"
    ).unwrap();
    static ref CAMEL_BOUNDARY_RE: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
    static ref SORTED_TERMS: Vec<(&'static str, &'static str)> = terms::sorted_terms();
}

/// ひらがな・カタカナ・漢字（拡張を含む）か
pub fn is_japanese_char(c: char) -> bool {
    matches!(
        c as u32,
        0x3005..=0x3007       // 々〆〇
        | 0x3040..=0x309F     // ひらがな
        | 0x30A0..=0x30FF     // カタカナ
        | 0x31F0..=0x31FF     // カタカナ拡張
        | 0x3400..=0x4DBF     // CJK拡張A
        | 0x4E00..=0x9FFF     // CJK統合漢字
        | 0xF900..=0xFAFF     // CJK互換漢字
        | 0xFF66..=0xFF9F     // 半角カタカナ
        | 0x20000..=0x2FA1F   // CJK拡張B以降
    )
}

/// 日本語の文字を含むか
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}

/// 既定のバックエンドでローマ字に変換
///
/// 日本語を含まなければ入力をそのまま返す。
pub fn convert_to_romaji(text: &str) -> String {
    convert_to_romaji_with(text, &RomajiBackend::default())
}

/// 指定バックエンドでローマ字に変換
///
/// バックエンドが使えない場合は警告を出して入力をそのまま返す。
pub fn convert_to_romaji_with(text: &str, backend: &dyn Transliterator) -> String {
    if !contains_japanese(text) {
        return text.to_string();
    }

    if !backend.is_available() {
        warn!(text, "romaji backend unavailable, keeping original text");
        return text.to_string();
    }

    // 1. 医療用語をプレースホルダに
    let (masked, replacements) = mask_terms(text);

    // 2. 残りの日本語を音訳
    let transliterated = if contains_japanese(&masked) {
        let pure = !masked.chars().any(|c| c.is_ascii_alphabetic());
        match transliterate_segments(&masked, backend, pure) {
            Some(result) => result,
            None => {
                warn!(text, "romaji transliteration failed, keeping original text");
                return text.to_string();
            }
        }
    } else {
        masked
    };

    // 3. プレースホルダを英語に
    let restored = unmask_terms(&transliterated, &replacements);

    // 4. 後処理
    let collapsed = crate::normalizer::collapse_whitespace(&restored);
    CAMEL_BOUNDARY_RE.replace_all(&collapsed, "$1 $2").into_owned()
}

/// 変換前後の組
pub fn romanize(text: &str) -> RomajiResult {
    RomajiResult {
        original: text.to_string(),
        converted: convert_to_romaji(text),
    }
}

/// 表示名
///
/// 日本語を含み、変換結果が元と異なる場合は `"{ローマ字} ({元の名前})"`。
/// それ以外（英語名や変換できなかった場合）は名前をそのまま返す。
/// `precomputed` があれば変換をやり直さずに使う。
pub fn get_display_name(name: &str, precomputed: Option<&str>) -> String {
    if !contains_japanese(name) {
        return name.to_string();
    }

    match precomputed {
        Some(romaji) => format_display_name(name, romaji),
        None => format_display_name(name, &convert_to_romaji(name)),
    }
}

/// 変換済みのローマ字から表示名を組み立てる
pub fn format_display_name(name: &str, romaji: &str) -> String {
    let romaji = romaji.trim();
    if romaji.is_empty() || romaji == name {
        name.to_string()
    } else {
        format!("{} ({})", romaji, name)
    }
}

/// 対訳表の語をプレースホルダ（前後に空白）に置き換える
///
/// プレースホルダは私用領域から、入力に現れない文字を選ぶ。
fn mask_terms(text: &str) -> (String, Vec<(char, &'static str)>) {
    let mut masked = text.to_string();
    let mut replacements: Vec<(char, &'static str)> = Vec::new();
    let mut next = PLACEHOLDER_BASE;

    for (ja, en) in SORTED_TERMS.iter() {
        if !masked.contains(ja) {
            continue;
        }
        let placeholder = loop {
            match char::from_u32(next) {
                Some(c) if c as u32 <= PLACEHOLDER_END => {
                    next += 1;
                    if !text.contains(c) {
                        break Some(c);
                    }
                }
                _ => break None,
            }
        };
        let Some(placeholder) = placeholder else {
            break;
        };
        masked = masked.replace(ja, &format!(" {} ", placeholder));
        replacements.push((placeholder, *en));
    }

    (masked, replacements)
}

/// 挿入したプレースホルダだけを英語に戻す。直前が空白でなければ空白を補う
fn unmask_terms(text: &str, replacements: &[(char, &str)]) -> String {
    let mut result = String::with_capacity(text.len() + 16);

    for c in text.chars() {
        match replacements.iter().find(|(placeholder, _)| *placeholder == c) {
            Some((_, en)) => {
                if result.chars().last().is_some_and(|prev| !prev.is_whitespace()) {
                    result.push(' ');
                }
                result.push_str(en);
            }
            None => result.push(c),
        }
    }

    result
}

/// 日本語の連続部分だけを音訳する
///
/// `pure` なら結果全体を語ごとに大文字化し、そうでなければ
/// 文頭か空白の直後にある音訳部分だけを大文字化する。
fn transliterate_segments(text: &str, backend: &dyn Transliterator, pure: bool) -> Option<String> {
    let mut result = String::with_capacity(text.len() * 2);
    let mut last = 0;

    for m in JAPANESE_RUN_RE.find_iter(text) {
        result.push_str(&text[last..m.start()]);

        let romaji = backend.transliterate(m.as_str())?;
        let follows_space = result.chars().last().map_or(true, char::is_whitespace);
        if !pure && follows_space {
            result.push_str(&title_case(&romaji));
        } else {
            result.push_str(&romaji);
        }

        last = m.end();
    }
    result.push_str(&text[last..]);

    Some(if pure { title_case(&result) } else { result })
}

/// 語頭を大文字に。先頭以外の助詞は小文字のまま
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut first_word = true;

    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if word.is_empty() {
            continue;
        }
        if !first_word && PARTICLES.contains(&word.to_lowercase().as_str()) {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
        first_word = false;
    }

    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
