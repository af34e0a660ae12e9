use crate::dedup::SimilarityWeights;
use crate::error::{DirectoryError, Result};
use crate::specialty::SpecialtyThresholds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ログフィルタの環境変数（設定ファイルより優先）
pub const LOG_ENV: &str = "CLINIC_DIR_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub similarity: SimilarityWeights,
    pub review_min_hits: usize,
    pub description_min_hits: usize,
    pub log_filter: String,
    pub romaji_cache_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = SpecialtyThresholds::default();
        Self {
            similarity: SimilarityWeights::default(),
            review_min_hits: thresholds.review_min_hits,
            description_min_hits: thresholds.description_min_hits,
            log_filter: "info".into(),
            romaji_cache_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DirectoryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("clinic-directory").join("config.json"))
    }

    pub fn thresholds(&self) -> SpecialtyThresholds {
        SpecialtyThresholds {
            review_min_hits: self.review_min_hits,
            description_min_hits: self.description_min_hits,
        }
    }

    /// キャッシュファイルの場所（未設定なら既定のキャッシュディレクトリ）
    pub fn romaji_cache_path(&self) -> Option<PathBuf> {
        self.romaji_cache_path
            .clone()
            .or_else(crate::romaji::RomajiCache::default_path)
    }

    /// ログフィルタ（環境変数を優先）
    pub fn log_filter(&self) -> String {
        std::env::var(LOG_ENV).unwrap_or_else(|_| self.log_filter.clone())
    }

    fn validate(&self) -> Result<()> {
        let weights = [
            ("similarity.secondary", self.similarity.secondary),
            ("similarity.fuzzy", self.similarity.fuzzy),
            ("similarity.phone", self.similarity.phone),
        ];
        for (key, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(DirectoryError::Config(format!(
                    "{} は 0.0〜1.0 で指定してください: {}",
                    key, weight
                )));
            }
        }

        if self.review_min_hits == 0 || self.description_min_hits == 0 {
            return Err(DirectoryError::Config(
                "キーワード閾値は1以上で指定してください".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.similarity.secondary, 0.8);
        assert_eq!(config.review_min_hits, 2);
        assert_eq!(config.description_min_hits, 3);
        assert_eq!(config.thresholds(), SpecialtyThresholds::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"similarity": {"fuzzy": 0.4}}"#).unwrap();
        assert_eq!(config.similarity.fuzzy, 0.4);
        assert_eq!(config.similarity.secondary, 0.8);
        assert_eq!(config.review_min_hits, 2);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut config = Config::default();
        config.similarity.phone = 1.5;
        assert!(matches!(config.validate(), Err(DirectoryError::Config(_))));

        let mut config = Config::default();
        config.review_min_hits = 0;
        assert!(config.validate().is_err());
    }
}
