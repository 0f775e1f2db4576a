// AgroCast - core/i18n.rs
//
// Static English/Tamil string table for UI labels and messages.
// Lookup of a missing key returns the key itself so untranslated labels stay
// visible rather than blank.

use crate::core::model::Language;

/// `(key, english, tamil)` rows.
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    // Navigation & general
    ("appName", "AgroCast", "அக்ரோகாஸ்ட்"),
    ("tagline", "AI-Powered Crop Disease Detection", "AI-இயங்கும் பயிர் நோய் கண்டறிதல்"),
    ("dashboard", "Dashboard", "முதன்மை பக்கம்"),
    ("upload", "Upload Image", "படம் பதிவேற்று"),
    ("profile", "Profile", "சுயவிவரம்"),
    // Dashboard
    ("welcomeBack", "Welcome back", "மீண்டும் வரவேற்கிறோம்"),
    ("recentScans", "Recent Scans", "சமீபத்திய ஸ்கேன்கள்"),
    ("weatherForecast", "Weather Forecast", "வானிலை முன்னறிவிப்பு"),
    ("diseaseRiskLevel", "Disease Risk Level", "நோய் ஆபத்து நிலை"),
    ("riskLow", "Low Risk", "குறைந்த ஆபத்து"),
    ("riskMedium", "Medium Risk", "நடுத்தர ஆபத்து"),
    ("riskHigh", "High Risk", "அதிக ஆபத்து"),
    ("uploadNewImage", "Upload New Image", "புதிய படம் பதிவேற்று"),
    ("viewHistory", "View History", "வரலாற்றைப் பார்க்க"),
    // Upload & detection
    ("uploadLeafImage", "Upload Leaf Image", "இலை படம் பதிவேற்று"),
    ("takePhoto", "Take Photo", "புகைப்படம் எடு"),
    ("chooseFile", "Choose File", "கோப்பைத் தேர்வுசெய்"),
    ("analyzing", "Analyzing...", "பகுப்பாய்வு செய்கிறது..."),
    ("detectionResult", "Detection Result", "கண்டறிதல் முடிவு"),
    ("diseaseDetected", "Disease Detected", "நோய் கண்டறியப்பட்டது"),
    ("healthyPlant", "Healthy Plant", "ஆரோக்கியமான தாவரம்"),
    ("confidence", "Confidence", "நம்பிக்கை"),
    ("treatment", "Recommended Treatment", "பரிந்துரைக்கப்பட்ட சிகிச்சை"),
    ("listenInTamil", "Listen in Tamil", "தமிழில் கேளுங்கள்"),
    // Weather
    ("temperature", "Temperature", "வெப்பநிலை"),
    ("humidity", "Humidity", "ஈரப்பதம்"),
    ("windSpeed", "Wind Speed", "காற்றின் வேகம்"),
    ("forecast", "Forecast", "முன்னறிவிப்பு"),
    // Common actions
    ("save", "Save", "சேமி"),
    ("cancel", "Cancel", "ரத்து செய்"),
    ("submit", "Submit", "சமர்ப்பி"),
    ("retry", "Retry", "மீண்டும் முயற்சி"),
    ("close", "Close", "மூடு"),
    ("loading", "Loading...", "ஏற்றுகிறது..."),
    // Application
    ("statusReady", "Ready. Choose a leaf photo to begin.", "தயார். தொடங்க இலை புகைப்படத்தைத் தேர்வுசெய்யவும்."),
    ("selectedImage", "Selected image", "தேர்ந்தெடுத்த படம்"),
    ("selectImageFirst", "Please select an image first.", "முதலில் ஒரு படத்தைத் தேர்வுசெய்யவும்."),
    ("analyzeLeaf", "Analyze Leaf", "இலையை பகுப்பாய்வு செய்"),
    ("analysisComplete", "Analysis complete", "பகுப்பாய்வு முடிந்தது"),
    ("analysisFailed", "Analysis failed", "பகுப்பாய்வு தோல்வியடைந்தது"),
    ("listen", "Listen", "கேளுங்கள்"),
    ("speechNotSupported", "Speech synthesis not supported", "பேச்சு தொகுப்பு ஆதரிக்கப்படவில்லை"),
    ("noScansYet", "No scans yet", "இன்னும் ஸ்கேன்கள் இல்லை"),
    ("refresh", "Refresh", "புதுப்பி"),
    ("about", "About", "பற்றி"),
    ("file", "File", "கோப்பு"),
    ("exportHistory", "Export History...", "வரலாற்றை ஏற்றுமதி செய்..."),
    ("exit", "Exit", "வெளியேறு"),
    ("noPreview", "Preview unavailable", "முன்னோட்டம் கிடைக்கவில்லை"),
    // Messages
    (
        "uploadError",
        "Failed to upload image. Please try again.",
        "படம் பதிவேற்ற முடியவில்லை. மீண்டும் முயற்சிக்கவும்.",
    ),
    (
        "networkError",
        "Network error. Please check your connection.",
        "நெட்வொர்க் பிழை. உங்கள் இணைப்பைச் சரிபார்க்கவும்.",
    ),
    (
        "uploadSuccess",
        "Image uploaded successfully!",
        "படம் வெற்றிகரமாக பதிவேற்றப்பட்டது!",
    ),
];

/// Translate `key` into `language`, returning the key itself when unknown.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    match TRANSLATIONS.iter().find(|(k, _, _)| *k == key) {
        Some(&(_, en, ta)) => match language {
            Language::En => en,
            Language::Ta => ta,
        },
        None => key,
    }
}

/// Iterate over every known translation key.
pub fn keys() -> impl Iterator<Item = &'static str> {
    TRANSLATIONS.iter().map(|(k, _, _)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(translate(Language::En, "dashboard"), "Dashboard");
        assert_eq!(translate(Language::Ta, "dashboard"), "முதன்மை பக்கம்");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(translate(Language::En, "noSuchKey"), "noSuchKey");
        assert_eq!(translate(Language::Ta, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_keys_unique_and_translated() {
        let all: Vec<_> = keys().collect();
        for (i, k) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(k), "duplicate key {k}");
            assert!(!translate(Language::En, k).is_empty());
            assert!(!translate(Language::Ta, k).is_empty());
        }
    }

    #[test]
    fn test_risk_keys_present() {
        for risk in crate::core::model::RiskLevel::all() {
            let key = risk.translation_key();
            assert_ne!(translate(Language::En, key), key);
        }
    }
}
