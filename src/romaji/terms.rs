//! 医療用語の対訳表
//!
//! 音訳すると意味が崩れる施設種別・診療科・地名を英語に置き換える。
//! 長い語から順に照合する（「整形外科」を「外科」より先に）。

use std::cmp::Reverse;

const MEDICAL_TERMS: &[(&str, &str)] = &[
    // 施設種別
    ("デンタルクリニック", "Dental Clinic"),
    ("デンタルオフィス", "Dental Office"),
    ("レディースクリニック", "Women's Clinic"),
    ("こどもクリニック", "Children's Clinic"),
    ("メディカルセンター", "Medical Center"),
    ("クリニック", "Clinic"),
    ("総合病院", "General Hospital"),
    ("大学病院", "University Hospital"),
    ("医療センター", "Medical Center"),
    ("病院", "Hospital"),
    ("歯科医院", "Dental Clinic"),
    ("歯科クリニック", "Dental Clinic"),
    ("医院", "Clinic"),
    ("診療所", "Clinic"),
    ("歯医者", "Dentist"),
    // 診療科
    ("歯科", "Dental"),
    ("矯正歯科", "Orthodontics"),
    ("小児歯科", "Pediatric Dentistry"),
    ("内科", "Internal Medicine"),
    ("外科", "Surgery"),
    ("整形外科", "Orthopedics"),
    ("形成外科", "Plastic Surgery"),
    ("美容外科", "Cosmetic Surgery"),
    ("脳神経外科", "Neurosurgery"),
    ("神経内科", "Neurology"),
    ("心療内科", "Psychosomatic Medicine"),
    ("精神科", "Psychiatry"),
    ("消化器内科", "Gastroenterology"),
    ("循環器内科", "Cardiology"),
    ("小児科", "Pediatrics"),
    ("皮膚科", "Dermatology"),
    ("美容皮膚科", "Cosmetic Dermatology"),
    ("眼科", "Ophthalmology"),
    ("耳鼻咽喉科", "ENT"),
    ("耳鼻科", "ENT"),
    ("産婦人科", "Obstetrics and Gynecology"),
    ("婦人科", "Gynecology"),
    ("泌尿器科", "Urology"),
    // 地名・位置
    ("駅前", "Station"),
    ("駅", "Station"),
    ("東京", "Tokyo"),
    ("大阪", "Osaka"),
    ("京都", "Kyoto"),
    ("横浜", "Yokohama"),
];

/// 照合順（文字数の降順、同じ長さは表記順）に並べた対訳表
pub fn sorted_terms() -> Vec<(&'static str, &'static str)> {
    let mut terms = MEDICAL_TERMS.to_vec();
    terms.sort_by_key(|(ja, _)| (Reverse(ja.chars().count()), *ja));
    terms
}
