use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Chat API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Chat API returned no completion text")]
    EmptyResponse,
}
