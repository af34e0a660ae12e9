//! 医療機関レコードの型定義
//!
//! 収集パイプラインと重複判定・診療科判定で共有される型:
//! - RawProvider: 収集レイヤーから渡される生データ（JSON）
//! - ProviderRecord: 境界で検証・補完した入力レコード
//! - FingerprintSet / DuplicateVerdict: 重複判定の出力
//! - RomajiResult: ローマ字変換の出力

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 収集レイヤーから渡される生データ
///
/// Google Places 由来のJSONをそのまま受けるため、形が崩れていても
/// デシリアライズ自体は失敗しないようにしている。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProvider {
    #[serde(deserialize_with = "lenient_string")]
    pub provider_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub address: Option<String>,
    /// 数値で渡された場合は文字列にする
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub city: Option<String>,
    /// `[{text, rating}]` を想定。それ以外の形は「口コミなし」扱い
    pub reviews: Value,
    pub google_types: Value,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// 配列またはカンマ区切り文字列
    pub existing_specialties: Value,
}

/// 文字列はそのまま、数値は文字列に、それ以外（配列・オブジェクト等）は `None`
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// 口コミ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub text: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// 検証済みの医療機関レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub reviews: Vec<Review>,
    /// 重複なし・出現順
    pub place_types: Vec<String>,
    pub description: String,
    pub existing_specialties: Vec<String>,
}

impl ProviderRecord {
    /// 名前・住所・電話・市区町村だけを持つレコード
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            city: city.into(),
            ..Default::default()
        }
    }
}

impl From<RawProvider> for ProviderRecord {
    fn from(raw: RawProvider) -> Self {
        let mut place_types: Vec<String> = Vec::new();
        for t in strings_from_value(&raw.google_types) {
            if !place_types.contains(&t) {
                place_types.push(t);
            }
        }

        Self {
            name: raw.provider_name.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            reviews: reviews_from_value(&raw.reviews),
            place_types,
            description: raw.description.unwrap_or_default(),
            existing_specialties: strings_from_value(&raw.existing_specialties),
        }
    }
}

/// 口コミJSONを防御的に読み取る
///
/// - 配列以外 → 空
/// - オブジェクト以外の要素 → スキップ
/// - `text` 欠落 → 空文字
/// - `rating` は数値または数値文字列
pub fn reviews_from_value(value: &Value) -> Vec<Review> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| {
            let text = obj
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let rating = match obj.get("rating") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse().ok(),
                _ => None,
            };
            Review { text, rating }
        })
        .collect()
}

/// 文字列配列またはカンマ区切り文字列を読み取る
pub fn strings_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// 重複判定用フィンガープリント（16バイトの16進文字列 ×3）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerprintSet {
    /// 名前 + 住所 + 市区町村
    pub primary: String,
    /// 名前 + 電話 + 市区町村
    pub secondary: String,
    /// 名前キーワード + 市区町村
    pub fuzzy: String,
}

impl FingerprintSet {
    /// primary → secondary → fuzzy の順で返す
    pub fn iter(&self) -> impl Iterator<Item = (MatchType, &str)> {
        [
            (MatchType::Primary, self.primary.as_str()),
            (MatchType::Secondary, self.secondary.as_str()),
            (MatchType::Fuzzy, self.fuzzy.as_str()),
        ]
        .into_iter()
    }
}

/// 一致したフィンガープリントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Primary,
    Secondary,
    Fuzzy,
    #[default]
    #[serde(rename = "none")]
    NoMatch,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Primary => write!(f, "primary"),
            MatchType::Secondary => write!(f, "secondary"),
            MatchType::Fuzzy => write!(f, "fuzzy"),
            MatchType::NoMatch => write!(f, "none"),
        }
    }
}

/// 重複判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateVerdict {
    pub is_duplicate: bool,
    pub match_type: MatchType,
}

impl DuplicateVerdict {
    /// 重複なし
    pub fn unique() -> Self {
        Self::default()
    }

    /// `match_type` で一致
    pub fn matched(match_type: MatchType) -> Self {
        Self {
            is_duplicate: match_type != MatchType::NoMatch,
            match_type,
        }
    }
}

/// ローマ字変換結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomajiResult {
    pub original: String,
    pub converted: String,
}

impl RomajiResult {
    /// 変換で文字列が変わったか
    pub fn changed(&self) -> bool {
        self.original != self.converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reviews_from_value_valid() {
        let value = json!([
            {"text": "Great dentist", "rating": 5},
            {"text": "Clean", "rating": "4.5"},
        ]);
        let reviews = reviews_from_value(&value);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, Some(5.0));
        assert_eq!(reviews[1].rating, Some(4.5));
    }

    #[test]
    fn test_reviews_from_value_bad_shapes() {
        // 配列以外は口コミなし
        assert!(reviews_from_value(&json!("not a list")).is_empty());
        assert!(reviews_from_value(&json!({"text": "x"})).is_empty());
        assert!(reviews_from_value(&Value::Null).is_empty());

        // オブジェクト以外の要素はスキップ
        let reviews = reviews_from_value(&json!(["oops", 3, {"rating": 2}]));
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "");
        assert_eq!(reviews[0].rating, Some(2.0));
    }

    #[test]
    fn test_strings_from_value() {
        assert_eq!(
            strings_from_value(&json!(["Dentistry", " ", "ENT"])),
            vec!["Dentistry", "ENT"]
        );
        assert_eq!(
            strings_from_value(&json!("Dentistry, Pediatrics")),
            vec!["Dentistry", "Pediatrics"]
        );
        assert!(strings_from_value(&json!(42)).is_empty());
    }

    #[test]
    fn test_provider_record_from_raw() {
        let raw: RawProvider = serde_json::from_value(json!({
            "provider_name": "Sakura Dental",
            "phone": null,
            "google_types": ["dentist", "health", "dentist"],
            "reviews": "broken",
        }))
        .unwrap();

        let record = ProviderRecord::from(raw);
        assert_eq!(record.name, "Sakura Dental");
        assert_eq!(record.phone, "");
        assert_eq!(record.place_types, vec!["dentist", "health"]);
        assert!(record.reviews.is_empty());
    }

    #[test]
    fn test_duplicate_verdict() {
        assert!(!DuplicateVerdict::unique().is_duplicate);
        assert_eq!(DuplicateVerdict::unique().match_type, MatchType::NoMatch);

        let verdict = DuplicateVerdict::matched(MatchType::Fuzzy);
        assert!(verdict.is_duplicate);
        assert_eq!(verdict.match_type.to_string(), "fuzzy");
    }

    #[test]
    fn test_match_type_serde() {
        assert_eq!(serde_json::to_string(&MatchType::NoMatch).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&MatchType::Primary).unwrap(), "\"primary\"");
    }
}
