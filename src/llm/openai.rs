//! OpenAI chat-completions API client.
//!
//! One shared `reqwest::Client`; the bearer credential is supplied per call
//! because each request draws a key from the pool.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::types::{ChatCompletion, ChatMessage, CompletionError, Role};
use crate::config::HttpTimeouts;

pub struct OpenAiClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Build a client for the given model and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(model: String, base_url: &str, timeouts: HttpTimeouts) -> Result<Self, CompletionError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| CompletionError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, model, base_url })
    }

    async fn send_json(&self, api_key: &str, body: &impl Serialize) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| CompletionError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(CompletionError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let wire = build_wire_messages(system, messages);
        let body = CcRequest { model: &self.model, max_tokens, messages: &wire };
        let text = self.send_json(api_key, &body).await?;
        parse_completion_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [CcMessage<'a>],
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn build_wire_messages<'a>(system: &'a str, messages: &'a [ChatMessage]) -> Vec<CcMessage<'a>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(CcMessage { role: Role::System.as_str(), content: system });
    for message in messages {
        out.push(CcMessage { role: message.role.as_str(), content: &message.content });
    }
    out
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_completion_response(json_text: &str) -> Result<String, CompletionError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| CompletionError::ApiParse(e.to_string()))?;
    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(CompletionError::EmptyCompletion);
    };
    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| CompletionError::ApiParse("chat_completions: missing message.content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_response() {
        let json = serde_json::json!({
            "model": "gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Hello! What is your name?" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
        })
        .to_string();
        let reply = parse_completion_response(&json).unwrap();
        assert_eq!(reply, "Hello! What is your name?");
    }

    #[test]
    fn parse_zero_choices_is_empty_completion() {
        let json = serde_json::json!({ "model": "gpt-3.5-turbo", "choices": [] }).to_string();
        let err = parse_completion_response(&json).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyCompletion));
    }

    #[test]
    fn parse_missing_choices_is_empty_completion() {
        let json = serde_json::json!({ "model": "gpt-3.5-turbo" }).to_string();
        let err = parse_completion_response(&json).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyCompletion));
    }

    #[test]
    fn parse_missing_content_is_parse_error() {
        let json = serde_json::json!({
            "choices": [{ "index": 0, "message": { "role": "assistant" } }]
        })
        .to_string();
        let err = parse_completion_response(&json).unwrap_err();
        assert!(matches!(err, CompletionError::ApiParse(_)));
    }

    #[test]
    fn parse_invalid_json_is_parse_error() {
        let err = parse_completion_response("not json").unwrap_err();
        assert!(matches!(err, CompletionError::ApiParse(_)));
    }

    #[test]
    fn wire_messages_put_system_first() {
        let messages = vec![ChatMessage::user("You: hi"), ChatMessage::assistant("AI: hello")];
        let wire = build_wire_messages("persona", &messages);
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[0].content, "persona");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[2].role, "assistant");
    }

    #[test]
    fn request_body_wire_shape() {
        let messages = vec![ChatMessage::user("hi")];
        let wire = build_wire_messages("persona", &messages);
        let body = CcRequest { model: "gpt-3.5-turbo", max_tokens: 550, messages: &wire };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 550);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }
}
