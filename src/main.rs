use anyhow::{Context, Result};
use clap::Parser;
use clinic_directory::common::{parse_known_fingerprints, parse_providers, ProviderRecord, RawProvider};
use clinic_directory::dedup::{check_fingerprints, dedupe_batch, generate_fingerprints, KnownFingerprints};
use clinic_directory::romaji::{format_display_name, RomajiCache};
use clinic_directory::specialty::{clean_specialty_list, SpecialtyDetector};
use clinic_directory::error::DirectoryError;
use clinic_directory::{cli, config, logging, pipeline};
use cli::{Cli, Commands};
use config::Config;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init(cli.verbose, &config.log_filter());

    let backend = cli.romaji_backend;

    match cli.command {
        Commands::Fingerprint { input } => {
            let records = read_records(&input)?;
            let output: Vec<_> = records
                .iter()
                .map(|record| json!({ "name": record.name, "fingerprints": generate_fingerprints(record) }))
                .collect();
            print_json(&output)?;
        }

        Commands::Check { input, known, batch } => {
            let records = read_records(&input)?;
            let known = read_known(known.as_deref())?;

            if batch {
                print_json(&dedupe_batch(&records, &known))?;
            } else {
                let output: Vec<_> = records
                    .iter()
                    .map(|record| {
                        let fingerprints = generate_fingerprints(record);
                        let verdict = check_fingerprints(&fingerprints, known.as_set());
                        json!({ "name": record.name, "fingerprints": fingerprints, "verdict": verdict })
                    })
                    .collect();
                print_json(&output)?;
            }
        }

        Commands::Similar { input, candidates, threshold } => {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(DirectoryError::InvalidInput(format!(
                    "閾値は 0.0〜1.0 で指定してください: {}",
                    threshold
                ))
                .into());
            }
            let records = read_records(&input)?;
            let candidates = read_records(&candidates)?;
            let results = pipeline::find_similar_batch(&records, &candidates, threshold, &config.similarity);
            print_json(&results)?;
        }

        Commands::Specialty { input } => {
            let records = read_records(&input)?;
            let detector = SpecialtyDetector::new(config.thresholds());
            let output: Vec<_> = records
                .iter()
                .map(|record| {
                    let specialty = detector.determine(
                        &record.name,
                        &record.reviews,
                        &record.place_types,
                        &record.description,
                        &record.existing_specialties,
                    );
                    let mut all = vec![specialty.clone()];
                    all.extend(record.existing_specialties.iter().cloned());
                    json!({
                        "name": record.name,
                        "specialty": specialty,
                        "specialties": clean_specialty_list(&all),
                    })
                })
                .collect();
            print_json(&output)?;
        }

        Commands::Romaji { text, display } => {
            let mut cache = RomajiCache::new();
            for name in &text {
                let romaji = cache.romaji(name, &backend);
                if display {
                    println!("{}", format_display_name(name, &romaji));
                } else {
                    println!("{}", romaji);
                }
            }
        }

        Commands::Process { input, output, known, cache, no_cache } => {
            let raw = read_raw(&input)?;
            let known = read_known(known.as_deref())?;

            let cache_path = if no_cache {
                None
            } else {
                cache.or_else(|| config.romaji_cache_path())
            };
            let mut romaji_cache = cache_path
                .as_deref()
                .map(RomajiCache::load)
                .unwrap_or_default();

            let options = pipeline::PipelineOptions {
                thresholds: config.thresholds(),
                backend,
            };
            let results = pipeline::process_batch(raw, &known, &mut romaji_cache, &options);

            if let Some(path) = &cache_path {
                romaji_cache
                    .save(path)
                    .with_context(|| format!("キャッシュ保存失敗: {}", path.display()))?;
            }

            match output {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&results)?;
                    std::fs::write(&path, json)?;
                    info!(path = %path.display(), count = results.len(), "results written");
                }
                None => print_json(&results)?,
            }
        }

        Commands::Config {
            show,
            set_log_filter,
            set_review_min_hits,
            set_description_min_hits,
            set_cache_path,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(filter) = set_log_filter {
                config.log_filter = filter;
                changed = true;
            }
            if let Some(hits) = set_review_min_hits {
                config.review_min_hits = hits;
                changed = true;
            }
            if let Some(hits) = set_description_min_hits {
                config.description_min_hits = hits;
                changed = true;
            }
            if let Some(path) = set_cache_path {
                config.romaji_cache_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  ログフィルタ: {}", config.log_filter());
                println!(
                    "  類似度の重み: secondary={} fuzzy={} phone={}",
                    config.similarity.secondary, config.similarity.fuzzy, config.similarity.phone
                );
                println!("  口コミの最小ヒット数: {}", config.review_min_hits);
                println!("  説明文の最小ヒット数: {}", config.description_min_hits);
                match config.romaji_cache_path() {
                    Some(path) => println!("  ローマ字キャッシュ: {}", path.display()),
                    None => println!("  ローマ字キャッシュ: 未設定"),
                }
                println!("  ローマ字バックエンド: {}", backend.name());
            }
        }

        Commands::Cache { clear, path, info } => {
            let cache_path = path
                .or_else(|| config.romaji_cache_path())
                .context("キャッシュディレクトリが見つかりません")?;

            if info || !clear {
                if cache_path.exists() {
                    let cache = RomajiCache::load(&cache_path);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match RomajiCache::clear(&cache_path) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DirectoryError::FileNotFound(path.display().to_string()).into());
    }
    std::fs::read_to_string(path).with_context(|| format!("読み込み失敗: {}", path.display()))
}

fn read_raw(path: &Path) -> Result<Vec<RawProvider>> {
    let content = read_input(path)?;
    let raw = parse_providers(&content).with_context(|| format!("施設データの解析失敗: {}", path.display()))?;
    info!(path = %path.display(), count = raw.len(), "providers loaded");
    Ok(raw)
}

fn read_records(path: &Path) -> Result<Vec<ProviderRecord>> {
    Ok(read_raw(path)?.into_iter().map(pipeline::validate).collect())
}

fn read_known(path: Option<&Path>) -> Result<KnownFingerprints> {
    let Some(path) = path else {
        return Ok(KnownFingerprints::new());
    };
    let content = read_input(path)?;
    let known: KnownFingerprints = parse_known_fingerprints(&content)
        .with_context(|| format!("既存フィンガープリントの解析失敗: {}", path.display()))?
        .into_iter()
        .collect();
    info!(path = %path.display(), count = known.len(), "known fingerprints loaded");
    Ok(known)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
