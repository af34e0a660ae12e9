//! ローマ字変換キャッシュ
//!
//! 施設名 → ローマ字の対応を保持し、同じ名前の再変換をスキップする。
//! プロセス全体で共有せず、バッチを回す呼び出し側が所有して渡す。

use super::{contains_japanese, convert_to_romaji_with, format_display_name, Transliterator};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

const CACHE_FILE_NAME: &str = "romaji-cache.json";

/// キャッシュ本体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomajiCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 元の名前 → ローマ字
    entries: HashMap<String, String>,
}

impl RomajiCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// 既定のキャッシュファイルの場所
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("clinic-directory").join(CACHE_FILE_NAME))
    }

    /// キャッシュファイルを読み込み
    ///
    /// ファイルがない・壊れている・バージョン違いの場合は空のキャッシュ。
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "romaji cache unreadable");
                return Self::default();
            }
        };

        match serde_json::from_reader::<_, RomajiCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(cache) => {
                warn!(found = cache.version, "romaji cache version mismatch, starting empty");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "romaji cache corrupted, starting empty");
                Self::default()
            }
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。削除したら `true`
    pub fn clear(path: &Path) -> Result<bool> {
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, romaji: impl Into<String>) {
        self.entries.insert(name.into(), romaji.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// キャッシュを使ってローマ字を取得（なければ変換して追加）
    ///
    /// 日本語を含まない名前はキャッシュしない。
    pub fn romaji(&mut self, name: &str, backend: &dyn Transliterator) -> String {
        if !contains_japanese(name) {
            return name.to_string();
        }
        if let Some(cached) = self.get(name) {
            return cached.to_string();
        }

        let romaji = convert_to_romaji_with(name, backend);
        // 変換できなかった結果は残さない（バックエンド復旧後に再変換する）
        if romaji != name {
            self.insert(name, romaji.clone());
        }
        romaji
    }

    /// キャッシュを使って表示名を取得
    pub fn display_name(&mut self, name: &str, backend: &dyn Transliterator) -> String {
        if !contains_japanese(name) {
            return name.to_string();
        }
        let romaji = self.romaji(name, backend);
        format_display_name(name, &romaji)
    }
}

impl Default for RomajiCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::romaji::RomajiBackend;

    struct CountingBackend(std::sync::atomic::AtomicUsize);

    impl Transliterator for CountingBackend {
        fn transliterate(&self, _text: &str) -> Option<String> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Some("chiba".to_string())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_romaji_cached_once() {
        let backend = CountingBackend(Default::default());
        let mut cache = RomajiCache::new();

        assert_eq!(cache.romaji("千葉クリニック", &backend), "Chiba Clinic");
        assert_eq!(cache.romaji("千葉クリニック", &backend), "Chiba Clinic");
        assert_eq!(backend.0.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_english_names_not_cached() {
        let mut cache = RomajiCache::new();
        assert_eq!(cache.romaji("Aoba Clinic", &RomajiBackend::Off), "Aoba Clinic");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_conversion_not_cached() {
        let mut cache = RomajiCache::new();
        assert_eq!(
            cache.display_name("千葉クリニック", &RomajiBackend::Off),
            "千葉クリニック"
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_display_name_uses_cache() {
        let mut cache = RomajiCache::new();
        cache.insert("千葉クリニック", "Chiba Clinic");
        assert_eq!(
            cache.display_name("千葉クリニック", &RomajiBackend::Off),
            "Chiba Clinic (千葉クリニック)"
        );
    }
}
