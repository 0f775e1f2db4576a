// AgroCast - core/catalog.rs
//
// Fixed disease catalog with bilingual treatment advice.
// Order matters: the classifier selects entries by index.

use crate::core::model::{ClassificationResult, DiseaseCatalogEntry, Language, ScanRecord};

/// Label reported for a healthy leaf.
pub const HEALTHY_LABEL: &str = "Healthy";

/// English advice for a healthy leaf.
pub const HEALTHY_TREATMENT_EN: &str =
    "Your plant appears healthy! Continue with regular care and monitoring.";

/// Tamil advice for a healthy leaf.
pub const HEALTHY_TREATMENT_TA: &str =
    "உங்கள் தாவரம் ஆரோக்கியமாக தெரிகிறது! வழக்கமான பராமரிப்பை தொடரவும்.";

/// The five diseases the classifier can report, most common first.
pub const DISEASES: [DiseaseCatalogEntry; 5] = [
    DiseaseCatalogEntry {
        name: "Leaf Blight",
        treatment_english: "Apply copper fungicide. Remove affected leaves. Ensure proper drainage.",
        treatment_tamil: "தாமிர பூஞ்சைக் கொல்லி தெளிக்கவும். பாதிக்கப்பட்ட இலைகளை அகற்றவும். சரியான வடிகால் உறுதிப்படுத்தவும்.",
    },
    DiseaseCatalogEntry {
        name: "Powdery Mildew",
        treatment_english: "Use sulfur-based fungicide. Improve air circulation. Avoid overhead watering.",
        treatment_tamil: "கந்தக அடிப்படையிலான பூஞ்சைக் கொல்லி பயன்படுத்தவும். காற்று சுழற்சியை மேம்படுத்தவும். தலைக்கு மேல் நீர் பாய்ச்சுவதை தவிர்க்கவும்.",
    },
    DiseaseCatalogEntry {
        name: "Bacterial Spot",
        treatment_english: "Apply copper spray. Remove infected plant parts. Practice crop rotation.",
        treatment_tamil: "தாமிர தெளிப்பான் தெளிக்கவும். தொற்று பாதிக்கப்பட்ட தாவர பாகங்களை அகற்றவும். பயிர் சுழற்சி பின்பற்றவும்.",
    },
    DiseaseCatalogEntry {
        name: "Rust Disease",
        treatment_english: "Apply fungicide containing propiconazole. Remove affected leaves immediately.",
        treatment_tamil: "புரோபிகோனசோல் கொண்ட பூஞ்சைக் கொல்லி தெளிக்கவும். பாதிக்கப்பட்ட இலைகளை உடனே அகற்றவும்.",
    },
    DiseaseCatalogEntry {
        name: "Anthracnose",
        treatment_english: "Use copper-based fungicide. Improve drainage and air circulation.",
        treatment_tamil: "தாமிர அடிப்படையிலான பூஞ்சைக் கொல்லி பயன்படுத்தவும். வடிகால் மற்றும் காற்று சுழற்சியை மேம்படுத்தவும்.",
    },
];

/// Look up a catalog entry by disease name (exact match).
pub fn find(name: &str) -> Option<&'static DiseaseCatalogEntry> {
    DISEASES.iter().find(|d| d.name == name)
}

/// Treatment text for `label` in `language`, covering the healthy label too.
///
/// Returns `None` for labels that are neither "Healthy" nor a catalog name.
pub fn treatment_for(label: &str, language: Language) -> Option<&'static str> {
    if label == HEALTHY_LABEL {
        return Some(match language {
            Language::En => HEALTHY_TREATMENT_EN,
            Language::Ta => HEALTHY_TREATMENT_TA,
        });
    }
    find(label).map(|entry| match language {
        Language::En => entry.treatment_english,
        Language::Ta => entry.treatment_tamil,
    })
}

/// The text to show or read aloud for `result` in `language`.
///
/// Resolves through `catalog_index` when the classifier set one, then by
/// label. Tamil falls back to the result's own (English) treatment when
/// neither yields Tamil text.
pub fn localized_treatment(result: &ClassificationResult, language: Language) -> String {
    if language == Language::En {
        return result.treatment.clone();
    }
    let indexed = if result.is_healthy {
        Some(HEALTHY_TREATMENT_TA)
    } else {
        result
            .catalog_index
            .and_then(|i| DISEASES.get(i))
            .map(|entry| entry.treatment_tamil)
    };
    indexed
        .or_else(|| treatment_for(&result.label, language))
        .map(str::to_string)
        .unwrap_or_else(|| result.treatment.clone())
}

/// Rewrite each record's treatment in `language` where the catalog has it.
///
/// Records with unknown labels keep their stored text.
pub fn localize_records(records: &mut [ScanRecord], language: Language) {
    for record in records.iter_mut() {
        if let Some(text) = treatment_for(&record.label, language) {
            record.treatment = text.to_string();
        }
    }
}
