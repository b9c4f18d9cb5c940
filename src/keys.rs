//! Credential pool — fair random selection across two API keys.
//!
//! DESIGN
//! ======
//! Two opaque credentials, immutable after startup. Each request draws one
//! with a fair coin flip; no memory of prior picks and no failover — an
//! invalid key simply surfaces as an upstream error on that call. The key
//! index travels with the pick so failures can report which credential was
//! in play without ever logging the secret itself.

use rand::Rng;

use crate::config::StartupError;

/// Which of the two pool slots a selection came from. Safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIndex {
    K1,
    K2,
}

impl KeyIndex {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::K1 => "key1",
            Self::K2 => "key2",
        }
    }
}

/// A selected credential: the secret plus its pool slot.
#[derive(Clone, Copy)]
pub struct SelectedKey<'a> {
    pub index: KeyIndex,
    pub secret: &'a str,
}

impl std::fmt::Debug for SelectedKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedKey")
            .field("index", &self.index)
            .field("secret", &"<redacted>")
            .finish()
    }
}

pub struct KeyPool {
    key1: String,
    key2: String,
}

// Secrets stay out of any Debug output.
impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPool")
            .field("key1", &"<redacted>")
            .field("key2", &"<redacted>")
            .finish()
    }
}

impl KeyPool {
    /// Build a pool from two credentials.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if either credential is empty; the process
    /// must not serve traffic without both configured.
    pub fn new(key1: String, key2: String) -> Result<Self, StartupError> {
        if key1.trim().is_empty() {
            return Err(StartupError::MissingCredential { var: "OPENAI_API_KEY_1" });
        }
        if key2.trim().is_empty() {
            return Err(StartupError::MissingCredential { var: "OPENAI_API_KEY_2" });
        }
        Ok(Self { key1, key2 })
    }

    /// Pick one credential with a fair coin flip.
    #[must_use]
    pub fn select(&self) -> SelectedKey<'_> {
        self.select_with(&mut rand::rng())
    }

    /// Deterministic variant for fairness tests: caller supplies the RNG.
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectedKey<'_> {
        if rng.random_range(0..2) == 1 {
            SelectedKey { index: KeyIndex::K2, secret: &self.key2 }
        } else {
            SelectedKey { index: KeyIndex::K1, secret: &self.key1 }
        }
    }
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
