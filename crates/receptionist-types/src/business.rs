//! Business profile and the receptionist system prompt rendered from it.

use serde::{Deserialize, Serialize};

const DEFAULT_BUSINESS_NAME: &str = "Demo Receptionist";

const DEFAULT_BUSINESS_INFO: &str = "Hours: Mon–Fri 9am–5pm.
Services: general inquiries, pricing estimates, scheduling call-backs.
If unsure, politely collect name, phone, and reason for calling.";

fn default_name() -> String {
    DEFAULT_BUSINESS_NAME.to_string()
}

fn default_info() -> String {
    DEFAULT_BUSINESS_INFO.to_string()
}

/// The business the receptionist answers the phone for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Name spoken in the greeting and used in the system prompt.
    #[serde(default = "default_name")]
    pub name: String,

    /// Free-form facts the model may answer from (hours, services, ...).
    #[serde(default = "default_info")]
    pub info: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            info: default_info(),
        }
    }
}

impl BusinessProfile {
    pub fn new(name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: info.into(),
        }
    }

    /// Renders the system prompt that opens every call's history.
    ///
    /// Surrounding whitespace in `info` is dropped so that multi-line values
    /// from TOML or the environment render cleanly.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a courteous, concise phone receptionist for {}.\n\
             Use the facts below. If a fact is not in these docs, say you'll take a message.\n\
             Avoid long paragraphs. Speak plainly and helpfully.\n\
             ---\n\
             {}",
            self.name,
            self.info.trim()
        )
    }

    /// Opening line spoken when a call is answered.
    pub fn greeting(&self) -> String {
        format!(
            "Hello, thanks for calling {}. How can I help you today?",
            self.name
        )
    }
}
