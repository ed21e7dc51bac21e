//! Voice-response documents for the telephony provider.
//!
//! A [`VoiceResponse`] is an ordered list of verbs the provider executes top
//! to bottom: speak text, listen for speech, jump to another webhook, or hang
//! up. Documents render to TwiML, the provider's XML dialect.

mod escape;
pub mod verb;

pub use verb::{Gather, GatherInput, Method, Redirect, Say, Verb, VoiceSettings};

use std::fmt;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Top-level `<Response>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a verb and returns the document for chaining.
    pub fn push(mut self, verb: impl Into<Verb>) -> Self {
        self.verbs.push(verb.into());
        self
    }

    pub fn say(self, say: Say) -> Self {
        self.push(say)
    }

    pub fn gather(self, gather: Gather) -> Self {
        self.push(gather)
    }

    pub fn redirect(self, url: impl Into<String>) -> Self {
        self.push(Redirect::new(url))
    }

    pub fn hangup(self) -> Self {
        self.push(Verb::Hangup)
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// Returns `true` if any top-level verb opens a speech capture.
    pub fn listens(&self) -> bool {
        self.verbs.iter().any(|v| matches!(v, Verb::Gather(_)))
    }

    /// Returns `true` if the document ends the call.
    pub fn hangs_up(&self) -> bool {
        self.verbs.iter().any(|v| matches!(v, Verb::Hangup))
    }

    /// Renders the document, including the XML declaration.
    pub fn to_xml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VoiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(XML_DECLARATION)?;
        if self.verbs.is_empty() {
            return f.write_str("<Response />");
        }
        f.write_str("<Response>")?;
        for verb in &self.verbs {
            write!(f, "{verb}")?;
        }
        f.write_str("</Response>")
    }
}
