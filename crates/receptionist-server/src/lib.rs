//! Receptionist server library logic.

pub mod api_call;
pub mod config;
pub mod session;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use config::Config;
use receptionist_llm::{ChatClient, OpenAiChatClient};
use receptionist_twiml::VoiceSettings;
use receptionist_types::{BusinessProfile, ChatTurn};
use serde_json::{json, Value};
use session::{InMemorySessionStore, SessionStore};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Business the receptionist answers for.
    pub business: BusinessProfile,
    /// Voice every `<Say>` is rendered with.
    pub voice: VoiceSettings,
    /// Per-call conversation histories.
    pub sessions: Arc<dyn SessionStore>,
    /// Chat-completion backend.
    pub chat: Arc<dyn ChatClient>,
    system_prompt: String,
}

impl AppState {
    pub fn new(
        business: BusinessProfile,
        voice: VoiceSettings,
        sessions: Arc<dyn SessionStore>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        let system_prompt = business.system_prompt();
        Self {
            business,
            voice,
            sessions,
            chat,
            system_prompt,
        }
    }

    /// Wires the in-memory session store and the OpenAI-compatible client
    /// from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        if config.llm.api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set; every caller will hear the fallback reply");
        }
        Self::new(
            config.business.clone(),
            config.voice.clone(),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(OpenAiChatClient::new(config.llm.clone())),
        )
    }

    /// The system turn every call history starts with.
    pub fn system_turn(&self) -> ChatTurn {
        ChatTurn::system(self.system_prompt.clone())
    }
}

/// Liveness probe for the telephony provider's console.
async fn root() -> &'static str {
    "OK"
}

/// Health check handler.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let active_calls = match state.sessions.len() {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "failed to count sessions for health check");
            0
        }
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "active_calls": active_calls,
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(api_call::VOICE_PATH, post(api_call::voice_handler))
        .route(api_call::GATHER_PATH, post(api_call::gather_handler))
        .route(api_call::GOODBYE_PATH, post(api_call::goodbye_handler))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
