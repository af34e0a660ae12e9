//! 入力JSONパーサー
//!
//! 収集レイヤーが書き出したJSONから医療機関レコードと
//! 既存フィンガープリントのスナップショットを読み取る

use crate::error::{Error, Result};
use crate::types::RawProvider;
use serde_json::Value;

/// 医療機関リストをパース
///
/// 受け付ける形:
/// 1. `[{...}, {...}]` 配列
/// 2. `{"providers": [...]}` ラッパー
/// 3. `{...}` 単一オブジェクト
///
/// # Examples
/// ```
/// use clinic_directory_common::parse_providers;
///
/// let providers = parse_providers(r#"[{"provider_name": "Sakura Dental"}]"#).unwrap();
/// assert_eq!(providers[0].provider_name.as_deref(), Some("Sakura Dental"));
/// ```
pub fn parse_providers(input: &str) -> Result<Vec<RawProvider>> {
    let value: Value = serde_json::from_str(input.trim())?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("providers") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::Parse("providers が配列ではありません".into())),
            None => vec![Value::Object(obj)],
        },
        _ => return Err(Error::Parse("医療機関データが配列でもオブジェクトでもありません".into())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| Error::Parse(format!("{}件目のパースエラー: {}", i + 1, e)))
        })
        .collect()
}

/// 既存フィンガープリントをパース
///
/// 文字列の配列、または `primary`/`secondary`/`fuzzy`（および
/// `*_fingerprint` 列名）を持つオブジェクトの配列を受け付ける。
/// 空文字列は無視する。
pub fn parse_known_fingerprints(input: &str) -> Result<Vec<String>> {
    const KEYS: [&str; 6] = [
        "primary",
        "secondary",
        "fuzzy",
        "primary_fingerprint",
        "secondary_fingerprint",
        "fuzzy_fingerprint",
    ];

    let value: Value = serde_json::from_str(input.trim())?;
    let Value::Array(items) = value else {
        return Err(Error::Parse("フィンガープリントは配列で指定してください".into()));
    };

    let mut fingerprints = Vec::new();
    for item in items {
        match item {
            Value::String(s) => fingerprints.push(s),
            Value::Object(obj) => {
                for key in KEYS {
                    if let Some(Value::String(s)) = obj.get(key) {
                        fingerprints.push(s.clone());
                    }
                }
            }
            Value::Null => {}
            other => {
                return Err(Error::Parse(format!("不正なフィンガープリント: {}", other)));
            }
        }
    }

    fingerprints.retain(|s| !s.is_empty());
    Ok(fingerprints)
}
