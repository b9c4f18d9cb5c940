//! Relay configuration parsed from environment variables.

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 550;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HISTORY_MAX_LINES: usize = 40;

/// Built-in persona instruction sent as the system message. Overridable via
/// `SYSTEM_PROMPT`; never user-controlled.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Your name is MEE. You are one of the most popular therapists in the world, \
famous for out-of-the-box and non-repetitive ideas influenced by the philosophies of Carl Jung, Sigmund Freud, and \
Friedrich Nietzsche. You are always deep and introspective; you never stoop to generic ideas that are a Google search \
away. You resonate such good and positive energy that people are drawn to open up to you, so always talk like a human \
and not a search engine. Ask for your client's name, greet them with a welcoming message, and always end your response \
with a follow-up question that prompts them to think more about their issues and open up. Never be the one to end the \
conversation; keep digging with specific and directed questions, often drawing parallels to the external world in a \
philosophically profound manner. When there is nothing to talk about, fill the silence with something creative and \
philosophical. Never talk in listicles.";

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A required credential env var is absent or empty.
    #[error("missing credential: {var} must be set and non-empty")]
    MissingCredential { var: &'static str },
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind_addr: String,
    pub port: u16,
    pub api_key_1: String,
    pub api_key_2: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeouts: HttpTimeouts,
    pub system_prompt: String,
    pub history_max_lines: usize,
}

impl RelayConfig {
    /// Build typed relay config from environment variables.
    ///
    /// Required (startup fails when absent or empty):
    /// - `OPENAI_API_KEY_1`, `OPENAI_API_KEY_2`
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `127.0.0.1`
    /// - `PORT`: default 5000
    /// - `LLM_MODEL`: default `gpt-3.5-turbo`
    /// - `LLM_BASE_URL`: default OpenAI API base URL
    /// - `LLM_MAX_TOKENS`: default 550
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `SYSTEM_PROMPT`: default built-in persona
    /// - `HISTORY_MAX_LINES`: default 40
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if either credential is missing or empty.
    pub fn from_env() -> Result<Self, StartupError> {
        let api_key_1 = require_credential("OPENAI_API_KEY_1")?;
        let api_key_2 = require_credential("OPENAI_API_KEY_2")?;

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let system_prompt = std::env::var("SYSTEM_PROMPT").unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());
        let timeouts = HttpTimeouts {
            request_secs: env_parse("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            port: env_parse("PORT", DEFAULT_PORT),
            api_key_1,
            api_key_2,
            model,
            base_url,
            max_tokens: env_parse("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            timeouts,
            system_prompt,
            history_max_lines: env_parse("HISTORY_MAX_LINES", DEFAULT_HISTORY_MAX_LINES),
        })
    }
}

fn require_credential(var: &'static str) -> Result<String, StartupError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(StartupError::MissingCredential { var }),
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
