//! Chat-completion client for the receptionist.
//!
//! Sends a call's role-tagged history to an OpenAI-compatible
//! `/chat/completions` endpoint and returns the single text reply. The
//! [`ChatClient`] trait is the seam the call handlers depend on, so tests and
//! alternative providers can stand in for [`OpenAiChatClient`].

pub mod client;
pub mod config;
pub mod error;

pub use client::{ChatClient, OpenAiChatClient};
pub use config::LlmConfig;
pub use error::LlmError;
