//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the chat toggle flag, the credential pool, the completion
//! client, and the immutable per-deployment chat settings. The toggle is
//! an `AtomicBool` with relaxed ordering: last-write-wins is the contract,
//! and the flag shares no state with anything else.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::RelayConfig;
use crate::keys::KeyPool;
use crate::llm::ChatCompletion;

// =============================================================================
// CHAT SETTINGS
// =============================================================================

/// Immutable chat parameters fixed at startup.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Persona instruction sent as the system message. Not user-controlled.
    pub system_prompt: String,
    /// Maximum output tokens requested per completion.
    pub max_tokens: u32,
    /// Cap on replayed history lines per request.
    pub history_max_lines: usize,
}

impl ChatSettings {
    #[must_use]
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            history_max_lines: config.history_max_lines,
        }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Chat availability toggle. Defaults to enabled; resets on restart.
    chat_enabled: Arc<AtomicBool>,
    pub keys: Arc<KeyPool>,
    pub llm: Arc<dyn ChatCompletion>,
    pub settings: Arc<ChatSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(keys: KeyPool, llm: Arc<dyn ChatCompletion>, settings: ChatSettings) -> Self {
        Self {
            chat_enabled: Arc::new(AtomicBool::new(true)),
            keys: Arc::new(keys),
            llm,
            settings: Arc::new(settings),
        }
    }

    #[must_use]
    pub fn chat_enabled(&self) -> bool {
        self.chat_enabled.load(Ordering::Relaxed)
    }

    pub fn set_chat_enabled(&self, enabled: bool) {
        self.chat_enabled.store(enabled, Ordering::Relaxed);
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
