//! Chat relay routes — toggle, status, and the completion pipeline.
//!
//! DESIGN
//! ======
//! `/chat` runs the whole relay: gate on the toggle, validate input, build
//! the role-tagged message sequence from the caller-carried transcript,
//! draw a credential, call the completion service, and hand back the reply
//! plus the transcript with the new `You:` / `AI:` lines appended. Every
//! error is terminal for its request; the transcript is never partially
//! updated.

use axum::Json;
use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::state::AppState;
use crate::transcript;

// =============================================================================
// REQUEST EXTRACTION
// =============================================================================

/// JSON extractor that rejects malformed bodies with the relay's own
/// `{"error": "Invalid request"}` shape instead of Axum's plain-text default.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(_) => Err(invalid_request()),
        }
    }
}

fn invalid_request() -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid request" })))
}

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub action: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub conversation_history: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /chat_toggle` — enable or disable the chat endpoint.
pub async fn chat_toggle(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ToggleBody>,
) -> (StatusCode, Json<Value>) {
    match body.action.as_str() {
        "enable" => {
            state.set_chat_enabled(true);
            info!("chat enabled");
            (StatusCode::OK, Json(json!({ "message": "Chat enabled" })))
        }
        "disable" => {
            state.set_chat_enabled(false);
            info!("chat disabled");
            (StatusCode::OK, Json(json!({ "message": "Chat disabled" })))
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid action" }))),
    }
}

/// `GET /status` — current toggle state.
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "chat_enabled": state.chat_enabled() }))
}

/// `POST /chat` — relay one user message to the completion service.
///
/// The availability gate runs before body validation: a disabled chat
/// answers 403 even when the body is malformed.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<ApiJson<ChatBody>, (StatusCode, Json<Value>)>,
) -> (StatusCode, Json<Value>) {
    if !state.chat_enabled() {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "Chat is currently disabled" })));
    }
    let ApiJson(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };
    if body.user_input.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "No user input provided" })));
    }

    let messages =
        transcript::build_messages(&body.conversation_history, &body.user_input, state.settings.history_max_lines);
    let key = state.keys.select();

    match state
        .llm
        .complete(key.secret, &state.settings.system_prompt, &messages, state.settings.max_tokens)
        .await
    {
        Ok(ai_response) => {
            let conversation_history =
                transcript::append_exchange(&body.conversation_history, &body.user_input, &ai_response);
            (
                StatusCode::OK,
                Json(json!({
                    "ai_response": ai_response,
                    "conversation_history": conversation_history,
                })),
            )
        }
        Err(err) => {
            warn!(key = key.index.as_str(), error = %err, "completion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to call AI model", "details": err.to_string() })),
            )
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
