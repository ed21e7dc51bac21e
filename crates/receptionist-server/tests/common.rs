#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use receptionist_llm::{ChatClient, LlmError};
use receptionist_server::session::InMemorySessionStore;
use receptionist_server::{app, AppState};
use receptionist_twiml::VoiceSettings;
use receptionist_types::{BusinessProfile, ChatTurn};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for oneshot

/// Chat backend that returns a fixed reply (or fails) and records every
/// history it was asked to complete.
pub struct ScriptedChat {
    reply: Option<String>,
    pub requests: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedChat {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn complete(&self, history: &[ChatTurn]) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(history.to_vec());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Api {
                status: 500,
                body: "upstream exploded".to_string(),
            }),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub sessions: InMemorySessionStore,
    pub chat: Arc<ScriptedChat>,
}

pub fn setup_app(chat: Arc<ScriptedChat>) -> TestApp {
    let sessions = InMemorySessionStore::new();
    let state = AppState::new(
        BusinessProfile::new("Acme Plumbing", "Open 24/7."),
        VoiceSettings::default(),
        Arc::new(sessions.clone()),
        chat.clone(),
    );
    TestApp {
        router: app(state),
        sessions,
        chat,
    }
}

pub async fn post_form(router: &Router, uri: &str, form: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
