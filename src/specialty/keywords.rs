//! 診療科キーワードテーブル
//!
//! 英語キーワードは小文字の部分一致で照合する。短すぎる語（"ent", "ear"）は
//! "dentist" や "heart" に誤一致するので入れていない。
//! テーブルの並び順は同票時の優先順位を兼ねる（具体的な科を内科より前に置く）。

/// 該当なしの場合の診療科
pub const GENERAL_MEDICINE: &str = "General Medicine";

/// 汎用ラベル（具体的な診療科があれば捨てる）
pub const GENERIC_SPECIALTIES: &[&str] = &[
    GENERAL_MEDICINE,
    "General Practice",
    "Healthcare",
    "Health",
    "Medical",
    "Medical Clinic",
    "Clinic",
    "General",
];

/// 診療科ごとのキーワード
pub struct SpecialtyRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

pub const SPECIALTY_RULES: &[SpecialtyRule] = &[
    SpecialtyRule {
        label: "Dentistry",
        keywords: &[
            "dental", "dentist", "tooth", "teeth", "orthodont", "cavity", "歯科", "歯医者",
            "デンタル", "矯正歯科",
        ],
    },
    SpecialtyRule {
        label: "Women's Health",
        keywords: &[
            "gynecolog", "gynaecolog", "obstetric", "women's", "ladies", "maternity",
            "pregnan", "婦人科", "産科", "レディース",
        ],
    },
    SpecialtyRule {
        label: "Pediatrics",
        keywords: &[
            "pediatric", "paediatric", "child", "kids", "infant", "baby", "小児科", "こども",
            "子ども", "キッズ",
        ],
    },
    SpecialtyRule {
        label: "Dermatology",
        keywords: &[
            "dermatolog", "skin", "acne", "eczema", "rash", "皮膚科", "皮フ科",
        ],
    },
    SpecialtyRule {
        label: "Orthopedics",
        keywords: &[
            "orthopedic", "orthopaedic", "bone", "joint", "fracture", "spine",
            "sports medicine", "整形外科", "整骨",
        ],
    },
    SpecialtyRule {
        label: "Mental Health",
        keywords: &[
            "psychiatr", "psycholog", "mental", "depression", "anxiety", "counseling",
            "counselling", "精神科", "心療内科", "メンタル",
        ],
    },
    SpecialtyRule {
        label: "Cardiology",
        keywords: &[
            "cardio", "cardiac", "heart", "blood pressure", "循環器", "心臓",
        ],
    },
    SpecialtyRule {
        label: "ENT",
        keywords: &[
            "otolaryngolog", "otorhinolaryngolog", "ear nose", "sinus", "throat", "hearing",
            "耳鼻咽喉科", "耳鼻科",
        ],
    },
    SpecialtyRule {
        label: "Emergency",
        keywords: &[
            "emergency", "urgent care", "24 hour", "24-hour", "after hours", "救急", "夜間",
        ],
    },
    SpecialtyRule {
        label: "Ophthalmology",
        keywords: &[
            "ophthalm", "eye", "vision", "cataract", "lasik", "contact lens", "眼科",
        ],
    },
    SpecialtyRule {
        label: "Gastroenterology",
        keywords: &[
            "gastro", "stomach", "endoscop", "colonoscop", "digestive", "liver", "消化器",
            "胃腸", "内視鏡",
        ],
    },
    SpecialtyRule {
        label: "Urology",
        keywords: &[
            "urolog", "kidney", "bladder", "prostate", "urinary", "泌尿器",
        ],
    },
    SpecialtyRule {
        label: "Plastic Surgery",
        keywords: &[
            "plastic surg", "cosmetic", "aesthetic", "botox", "美容外科", "形成外科", "美容",
        ],
    },
    SpecialtyRule {
        label: "Neurology",
        keywords: &[
            "neurolog", "neurosurg", "brain", "migraine", "headache", "stroke", "神経内科",
            "脳神経", "脳外科",
        ],
    },
    SpecialtyRule {
        label: "Internal Medicine",
        keywords: &[
            "internal medicine", "internist", "diabetes", "内科", "生活習慣病",
        ],
    },
];

/// Google Places の type → 診療科
///
/// 汎用ラベルは置かない（"doctor" はほぼ全ての施設に付くので対応させない）。
pub const PLACE_TYPE_SPECIALTIES: &[(&str, &str)] = &[
    ("dentist", "Dentistry"),
    ("hospital", "Hospital"),
    ("physiotherapist", "Orthopedics"),
    ("chiropractor", "Orthopedics"),
    ("optician", "Ophthalmology"),
];

/// 汎用ラベルか（大文字小文字を区別しない）
pub fn is_generic(label: &str) -> bool {
    let label = label.trim();
    GENERIC_SPECIALTIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(label))
}

/// place type に対応する診療科
pub fn specialty_for_place_type(place_type: &str) -> Option<&'static str> {
    let place_type = place_type.trim().to_lowercase();
    PLACE_TYPE_SPECIALTIES
        .iter()
        .find(|(t, _)| *t == place_type)
        .map(|(_, label)| *label)
}
