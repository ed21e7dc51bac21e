use crate::config::LlmConfig;
use crate::error::LlmError;
use async_trait::async_trait;
use receptionist_types::ChatTurn;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of response-body characters echoed into [`LlmError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Produces the next assistant reply for a conversation.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the reply to `history`, trimmed of surrounding whitespace.
    async fn complete(&self, history: &[ChatTurn]) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`ChatClient`] backed by an OpenAI-compatible chat-completion API.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(config: LlmConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("receptionist/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, history: &[ChatTurn]) -> Result<String, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::Config("API key is not set".to_string()));
        }

        let body = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: history,
        };

        debug!(
            model = %self.config.model,
            turns = history.len(),
            "sending chat completion request"
        );

        let resp = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let completion: CompletionResponse = resp.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(text)
    }
}
