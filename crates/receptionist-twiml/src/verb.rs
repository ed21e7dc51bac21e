//! TwiML verbs supported by the receptionist.

use crate::escape::{write_attr, write_escaped};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_voice_name() -> String {
    "Polly.Joanna".to_string()
}

fn default_voice_language() -> String {
    "en-US".to_string()
}

/// Text-to-speech voice the provider uses for every `<Say>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Provider voice name (e.g. "Polly.Joanna", "Polly.Matthew").
    #[serde(default = "default_voice_name")]
    pub name: String,

    /// BCP-47 language tag (e.g. "en-US").
    #[serde(default = "default_voice_language")]
    pub language: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            name: default_voice_name(),
            language: default_voice_language(),
        }
    }
}

impl VoiceSettings {
    /// Builds a `<Say>` for `text` spoken with this voice.
    pub fn say(&self, text: impl Into<String>) -> Say {
        Say::new(text)
            .voice(self.name.clone())
            .language(self.language.clone())
    }
}

/// HTTP method the provider uses when following a verb's URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// What a `<Gather>` listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatherInput {
    #[default]
    Speech,
    Dtmf,
    SpeechAndDtmf,
}

impl GatherInput {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::Dtmf => "dtmf",
            Self::SpeechAndDtmf => "dtmf speech",
        }
    }
}

/// `<Say>`: speak text to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Say {
    pub text: String,
    pub voice: Option<String>,
    pub language: Option<String>,
}

impl Say {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            language: None,
        }
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl fmt::Display for Say {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Say")?;
        if let Some(voice) = &self.voice {
            write_attr(f, "voice", voice)?;
        }
        if let Some(language) = &self.language {
            write_attr(f, "language", language)?;
        }
        f.write_str(">")?;
        write_escaped(f, &self.text)?;
        f.write_str("</Say>")
    }
}

/// `<Gather>`: speak the nested prompts while listening, then post the
/// recognized input to `action`.
///
/// If the caller says nothing the provider skips to the verb after the
/// gather, which is where timeout handling goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gather {
    pub input: GatherInput,
    pub action: String,
    pub method: Method,
    /// Seconds of silence that end capture, or "auto".
    pub speech_timeout: Option<String>,
    pub prompts: Vec<Say>,
}

impl Gather {
    /// Speech capture posting to `action` with automatic end-of-speech
    /// detection.
    pub fn speech(action: impl Into<String>) -> Self {
        Self {
            input: GatherInput::Speech,
            action: action.into(),
            method: Method::Post,
            speech_timeout: Some("auto".to_string()),
            prompts: Vec::new(),
        }
    }

    pub fn say(mut self, say: Say) -> Self {
        self.prompts.push(say);
        self
    }
}

impl fmt::Display for Gather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Gather")?;
        write_attr(f, "input", self.input.as_str())?;
        write_attr(f, "action", &self.action)?;
        write_attr(f, "method", self.method.as_str())?;
        if let Some(timeout) = &self.speech_timeout {
            write_attr(f, "speechTimeout", timeout)?;
        }
        if self.prompts.is_empty() {
            return f.write_str(" />");
        }
        f.write_str(">")?;
        for say in &self.prompts {
            write!(f, "{say}")?;
        }
        f.write_str("</Gather>")
    }
}

/// `<Redirect>`: hand control to another webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub url: String,
    pub method: Option<Method>,
}

impl Redirect {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Redirect")?;
        if let Some(method) = self.method {
            write_attr(f, "method", method.as_str())?;
        }
        f.write_str(">")?;
        write_escaped(f, &self.url)?;
        f.write_str("</Redirect>")
    }
}

/// A single instruction in a [`crate::VoiceResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Say(Say),
    Gather(Gather),
    Redirect(Redirect),
    Hangup,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Say(say) => write!(f, "{say}"),
            Self::Gather(gather) => write!(f, "{gather}"),
            Self::Redirect(redirect) => write!(f, "{redirect}"),
            Self::Hangup => f.write_str("<Hangup />"),
        }
    }
}

impl From<Say> for Verb {
    fn from(say: Say) -> Self {
        Self::Say(say)
    }
}

impl From<Gather> for Verb {
    fn from(gather: Gather) -> Self {
        Self::Gather(gather)
    }
}

impl From<Redirect> for Verb {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}
