//! ローマ字変換バックエンド
//!
//! かな・漢字の音訳は kakasi（`romaji` feature）に任せる。
//! feature を外したビルドや `--romaji-backend off` ではバックエンドが
//! 使えない扱いになり、変換は入力をそのまま返す。

use clap::ValueEnum;

/// 日本語文字列をローマ字に音訳する
pub trait Transliterator: Send + Sync {
    /// 音訳結果。バックエンドが使えなければ `None`
    fn transliterate(&self, text: &str) -> Option<String>;

    fn is_available(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RomajiBackend {
    /// kakasi による音訳
    #[default]
    Kakasi,
    /// 変換しない
    Off,
}

impl RomajiBackend {
    pub fn name(&self) -> &'static str {
        match self {
            RomajiBackend::Kakasi => "kakasi",
            RomajiBackend::Off => "off",
        }
    }
}

impl Transliterator for RomajiBackend {
    fn transliterate(&self, text: &str) -> Option<String> {
        match self {
            RomajiBackend::Kakasi => kakasi_romaji(text),
            RomajiBackend::Off => None,
        }
    }

    fn is_available(&self) -> bool {
        match self {
            RomajiBackend::Kakasi => cfg!(feature = "romaji"),
            RomajiBackend::Off => false,
        }
    }
}

#[cfg(feature = "romaji")]
fn kakasi_romaji(text: &str) -> Option<String> {
    Some(kakasi::convert(text).romaji)
}

#[cfg(not(feature = "romaji"))]
fn kakasi_romaji(_text: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_backend_unavailable() {
        assert!(!RomajiBackend::Off.is_available());
        assert_eq!(RomajiBackend::Off.transliterate("さくら"), None);
    }

    #[cfg(feature = "romaji")]
    #[test]
    fn test_kakasi_backend() {
        assert!(RomajiBackend::Kakasi.is_available());
        assert_eq!(RomajiBackend::Kakasi.transliterate("さくら").as_deref(), Some("sakura"));
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(RomajiBackend::default().name(), "kakasi");
    }
}
