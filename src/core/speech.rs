// AgroCast - core/speech.rs
//
// Read-aloud planning: which locale, voice, and prosody to use for a piece
// of treatment text. Actually producing audio is a platform concern
// (see platform::speech).

use crate::core::model::Language;
use crate::util::constants::{
    ENGLISH_SPEECH_LOCALE, SPEECH_PITCH, SPEECH_RATE, SPEECH_VOLUME, TAMIL_SPEECH_LOCALE,
};
use crate::util::error::SpeechError;

/// A voice offered by the speech backend.
///
/// Also the shape of `[[speech.voices]]` entries in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Voice {
    /// Backend voice name, e.g. "Google தமிழ்" or "ta".
    pub name: String,
    /// Language tag the voice speaks, e.g. "ta-IN".
    pub lang: String,
}

/// A fully specified utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub locale: &'static str,
    /// Preferred voice; `None` lets the backend choose by locale.
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl SpeechRequest {
    /// Primary language subtag of `locale` ("ta" for "ta-IN").
    pub fn language_tag(&self) -> &'static str {
        self.locale.split('-').next().unwrap_or(self.locale)
    }
}

/// Something that can read text aloud.
///
/// Implementations stop any utterance still in progress before starting a
/// new one.
pub trait Speaker {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError>;

    /// Voices the backend can use. Empty when unknown.
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }
}

/// Speech locale for `language`.
pub fn locale_for(language: Language) -> &'static str {
    match language {
        Language::En => ENGLISH_SPEECH_LOCALE,
        Language::Ta => TAMIL_SPEECH_LOCALE,
    }
}

/// Build the utterance for `text` in `language`, picking a Tamil voice from
/// `voices` when one is available.
pub fn plan_speech(text: &str, language: Language, voices: &[Voice]) -> SpeechRequest {
    let voice = match language {
        Language::Ta => voices.iter().find(|v| is_tamil_voice(v)).cloned(),
        Language::En => None,
    };

    SpeechRequest {
        text: text.to_string(),
        locale: locale_for(language),
        voice,
        rate: SPEECH_RATE,
        pitch: SPEECH_PITCH,
        volume: SPEECH_VOLUME,
    }
}

fn is_tamil_voice(voice: &Voice) -> bool {
    voice.lang.contains("ta") || voice.lang.contains("Tamil") || voice.name.contains("Tamil")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn test_english_plan() {
        let req = plan_speech("Apply copper spray.", Language::En, &[voice("Tamil", "ta-IN")]);
        assert_eq!(req.locale, "en-US");
        assert_eq!(req.voice, None);
        assert_eq!(req.rate, 0.8);
        assert_eq!(req.pitch, 1.0);
        assert_eq!(req.volume, 1.0);
    }

    #[test]
    fn test_tamil_plan_picks_tamil_voice() {
        let voices = [voice("English (US)", "en-US"), voice("Lekha", "ta-IN")];
        let req = plan_speech("தாமிர", Language::Ta, &voices);
        assert_eq!(req.locale, "ta-IN");
        assert_eq!(req.voice, Some(voice("Lekha", "ta-IN")));
    }

    #[test]
    fn test_tamil_plan_matches_voice_name() {
        let voices = [voice("Microsoft Valluvar - Tamil (India)", "x-unknown")];
        let req = plan_speech("தாமிர", Language::Ta, &voices);
        assert_eq!(req.voice.map(|v| v.name), Some(voices[0].name.clone()));
    }

    #[test]
    fn test_language_tag() {
        assert_eq!(plan_speech("x", Language::Ta, &[]).language_tag(), "ta");
        assert_eq!(plan_speech("x", Language::En, &[]).language_tag(), "en");
    }

    #[test]
    fn test_tamil_plan_without_voice() {
        let req = plan_speech("தாமிர", Language::Ta, &[voice("Daniel", "en-GB")]);
        assert_eq!(req.locale, "ta-IN");
        assert!(req.voice.is_none());
    }
}
