//! LLM — completion client for the upstream chat API.
//!
//! The router only sees the [`ChatCompletion`] trait; the concrete
//! [`OpenAiClient`] is constructed once in `main` and injected via app state.

pub mod openai;
pub mod types;

pub use openai::OpenAiClient;
pub use types::ChatCompletion;
