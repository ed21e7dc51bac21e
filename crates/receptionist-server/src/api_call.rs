//! Telephony webhook handlers for the call lifecycle.
//!
//! The provider posts a form for each event and executes the TwiML document
//! returned. Speech recognition and synthesis happen on the provider side;
//! these handlers only exchange text.

use crate::session::SessionError;
use crate::AppState;
use axum::{
    extract::{rejection::FormRejection, Extension, Form},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use receptionist_twiml::{Gather, VoiceResponse};
use receptionist_types::ChatTurn;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Route that answers a new call.
pub const VOICE_PATH: &str = "/voice";
/// Route the provider posts recognized speech to.
pub const GATHER_PATH: &str = "/gather";
/// Route that ends the call.
pub const GOODBYE_PATH: &str = "/goodbye";

pub const NO_INPUT_RETRY: &str = "I didn't catch that. One more time.";
pub const EMPTY_SPEECH_PROMPT: &str = "Sorry, I didn't hear anything. Please tell me how I can help.";
pub const FOLLOW_UP_PROMPT: &str = "Anything else I can help you with?";
pub const FAREWELL: &str = "Thanks for calling. Goodbye!";
pub const CHAT_FALLBACK: &str = "I'm having trouble accessing our assistant right now. \
     Would you like me to take a message with your name and number?";

/// Webhook form fields the receptionist reads. Everything else the provider
/// sends is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CallForm {
    #[serde(rename = "CallSid", default)]
    pub call_sid: String,
    #[serde(rename = "SpeechResult", default)]
    pub speech_result: String,
}

/// Missing or unparseable bodies behave like a form with every field empty.
fn form_or_default(form: Result<Form<CallForm>, FormRejection>) -> CallForm {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable webhook form, using empty fields");
            CallForm::default()
        }
    }
}

/// A TwiML document served as `text/xml`.
#[derive(Debug)]
pub struct Twiml(pub VoiceResponse);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.0.to_xml()).into_response()
    }
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session store failure: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "call handler failed");
        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Handler for `POST /voice`.
///
/// Starts the call's history over with the system prompt, greets the caller
/// and listens. If nothing is heard the caller gets one retry line and the
/// document loops back here.
pub async fn voice_handler(
    Extension(state): Extension<Arc<AppState>>,
    form: Result<Form<CallForm>, FormRejection>,
) -> Result<Twiml, ApiError> {
    let form = form_or_default(form);

    state
        .sessions
        .create(&form.call_sid, vec![state.system_turn()])?;
    tracing::info!(call_sid = %form.call_sid, "call started");

    let voice = &state.voice;
    Ok(Twiml(
        VoiceResponse::new()
            .gather(Gather::speech(GATHER_PATH).say(voice.say(state.business.greeting())))
            .say(voice.say(NO_INPUT_RETRY))
            .redirect(VOICE_PATH),
    ))
}

/// Handler for `POST /gather`.
///
/// Empty speech reprompts without touching the history. Otherwise one user
/// turn and one assistant turn are appended, and the reply is spoken before
/// listening again. A failed chat query is replaced by [`CHAT_FALLBACK`].
pub async fn gather_handler(
    Extension(state): Extension<Arc<AppState>>,
    form: Result<Form<CallForm>, FormRejection>,
) -> Result<Twiml, ApiError> {
    let form = form_or_default(form);
    let call_sid = form.call_sid.as_str();
    let speech = form.speech_result.trim();
    let voice = &state.voice;

    if speech.is_empty() {
        tracing::debug!(call_sid, "no speech captured, reprompting");
        return Ok(Twiml(VoiceResponse::new().gather(
            Gather::speech(GATHER_PATH).say(voice.say(EMPTY_SPEECH_PROMPT)),
        )));
    }

    // The provider may skip /voice (e.g. a restarted process mid-call).
    if state.sessions.get(call_sid)?.is_none() {
        state.sessions.create(call_sid, vec![state.system_turn()])?;
    }
    state.sessions.append(call_sid, ChatTurn::user(speech))?;

    let history = state
        .sessions
        .get(call_sid)?
        .ok_or_else(|| SessionError::UnknownCall(call_sid.to_string()))?;

    let reply = match state.chat.complete(&history).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(call_sid, error = %e, "chat completion failed, using fallback reply");
            CHAT_FALLBACK.to_string()
        }
    };

    let turns = state
        .sessions
        .append(call_sid, ChatTurn::assistant(reply.clone()))?;
    tracing::info!(call_sid, turns, "answered caller");

    Ok(Twiml(
        VoiceResponse::new()
            .gather(
                Gather::speech(GATHER_PATH)
                    .say(voice.say(reply))
                    .say(voice.say(FOLLOW_UP_PROMPT)),
            )
            .say(voice.say(FAREWELL)),
    ))
}

/// Handler for `POST /goodbye`.
pub async fn goodbye_handler(Extension(state): Extension<Arc<AppState>>) -> Twiml {
    Twiml(
        VoiceResponse::new()
            .say(state.voice.say(FAREWELL))
            .hangup(),
    )
}
