//! 電話番号の正規化
//!
//! 国番号（+81）と市外局番の先頭0を取り除き、国内表記と国際表記を
//! 同じ数字列に揃える。全角数字は半角として扱う。

/// 日本の国番号
const COUNTRY_CODE: &str = "81";

/// 電話番号を数字列に正規化
///
/// # Examples
/// ```
/// use clinic_directory::normalizer::normalize_phone;
///
/// assert_eq!(normalize_phone("+81-3-1234-5678"), "312345678");
/// assert_eq!(normalize_phone("03-1234-5678"), "312345678");
/// ```
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .map(|c| match c {
            // 全角→半角
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .filter(|c| c.is_ascii_digit())
        .collect();

    let digits = digits.strip_prefix(COUNTRY_CODE).unwrap_or(&digits);
    let digits = digits.strip_prefix('0').unwrap_or(digits);

    digits.to_string()
}
