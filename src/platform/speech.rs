// AgroCast - platform/speech.rs
//
// Speech backends. Desktop platforms have no single built-in speech API, so
// read-aloud runs a user-configured command (e.g. espeak-ng, say). Without
// one, `NullSpeaker` reports that speech is unavailable.
//
// Command arguments may carry placeholders filled from the planned request:
//
//   {text}    treatment text (appended as the last argument when absent)
//   {locale}  full locale tag, e.g. "ta-IN"
//   {lang}    primary language subtag, e.g. "ta"
//   {voice}   chosen voice name, or {lang} when no voice matched
//   {rate}    relative rate, e.g. "0.8"
//   {wpm}     rate as words per minute, e.g. "140"
//   {pitch}   relative pitch
//   {volume}  relative volume
//
// e.g. `["espeak-ng", "-v", "{voice}", "-s", "{wpm}"]`

use crate::core::speech::{Speaker, SpeechRequest, Voice};
use crate::util::constants::{DEBUG_MAX_TEXT_PREVIEW, SPEECH_BASE_WPM};
use crate::util::error::SpeechError;
use crate::util::logging::preview;
use std::process::{Child, Command, Stdio};

/// Build the backend described by config.
pub fn from_config(
    enabled: bool,
    command: Option<&[String]>,
    voices: &[Voice],
) -> Box<dyn Speaker + Send> {
    match (enabled, command) {
        (true, Some(cmd)) if !cmd.is_empty() => {
            Box::new(CommandSpeaker::new(cmd.to_vec()).with_voices(voices.to_vec()))
        }
        _ => Box::new(NullSpeaker),
    }
}

/// Expand placeholders in `template` for `request`.
///
/// The text is appended as a final argument unless some argument already
/// contains `{text}`.
pub fn build_args(template: &[String], request: &SpeechRequest) -> Vec<String> {
    let lang = request.language_tag();
    let voice = request.voice.as_ref().map(|v| v.name.as_str()).unwrap_or(lang);
    let wpm = (SPEECH_BASE_WPM * request.rate).round().to_string();

    let mut has_text = false;
    let mut args: Vec<String> = template
        .iter()
        .map(|arg| {
            has_text |= arg.contains("{text}");
            arg.replace("{locale}", request.locale)
                .replace("{lang}", lang)
                .replace("{voice}", voice)
                .replace("{rate}", &request.rate.to_string())
                .replace("{wpm}", &wpm)
                .replace("{pitch}", &request.pitch.to_string())
                .replace("{volume}", &request.volume.to_string())
                .replace("{text}", &request.text)
        })
        .collect();
    if !has_text {
        args.push(request.text.clone());
    }
    args
}

/// Speaks by spawning an external program.
#[derive(Debug)]
pub struct CommandSpeaker {
    /// Program followed by its argument template.
    command: Vec<String>,
    /// Voices declared in config; offered to the speech planner.
    voices: Vec<Voice>,
    /// The utterance still playing, if any.
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            voices: Vec::new(),
            current: None,
        }
    }

    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }

    /// Process ID of the utterance still tracked, if any.
    pub fn current_pid(&self) -> Option<u32> {
        self.current.as_ref().map(Child::id)
    }

    /// Stop any utterance still in progress.
    pub fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    if let Err(e) = child.kill() {
                        tracing::debug!(error = %e, "Failed to stop previous utterance");
                    }
                    let _ = child.wait();
                }
            }
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        self.cancel();

        let Some((program, template)) = self.command.split_first() else {
            return Err(SpeechError::Unavailable);
        };
        let args = build_args(template, request);

        tracing::info!(
            program = %program,
            locale = request.locale,
            voice = request.voice.as_ref().map(|v| v.name.as_str()).unwrap_or(""),
            text = %preview(&request.text, DEBUG_MAX_TEXT_PREVIEW),
            "Speaking treatment"
        );

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                tracing::warn!(program = %program, error = %e, "Speech command failed to start");
                SpeechError::Spawn {
                    program: program.clone(),
                    source: e,
                }
            })?;

        self.current = Some(child);
        Ok(())
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Backend used when no speech command is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        tracing::info!("Speech synthesis not supported");
        Err(SpeechError::Unavailable)
    }
}
