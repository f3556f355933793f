use std::sync::Arc;

use log::warn;

use crate::config::Market;
use crate::storage::kv::KeyValueStore;

/// Capability the refresh pipeline uses to obtain an API token.
///
/// `None` means the user declined (or no token exists and none can be
/// asked for); the pipeline treats that as a silent abort, not an error.
pub trait CredentialProvider: Send + Sync {
    fn obtain(&self, market: Market) -> Option<String>;
}

/// Capability for asking the user for a token interactively. The CLI
/// implements this over stdin; tests use canned answers. Returning `None`
/// means the user declined.
pub trait TokenPrompt: Send + Sync {
    fn request(&self, message: &str) -> Option<String>;
}

/// A prompt that always declines. For non-interactive contexts where only
/// already-persisted tokens should be used.
pub struct NoPrompt;

impl TokenPrompt for NoPrompt {
    fn request(&self, _message: &str) -> Option<String> {
        None
    }
}

/// Token lookup backed by the key-value store, prompting and persisting
/// on first use.
///
/// A persisted non-blank token wins. Otherwise the prompt is asked; a
/// non-blank reply is trimmed and persisted before being returned, a
/// decline persists nothing.
pub struct StoredCredentials {
    store: Arc<dyn KeyValueStore>,
    prompt: Box<dyn TokenPrompt>,
}

impl StoredCredentials {
    pub fn new(store: Arc<dyn KeyValueStore>, prompt: Box<dyn TokenPrompt>) -> Self {
        Self { store, prompt }
    }

    /// Overwrite the persisted token for a market (the "update token"
    /// flow). Blank tokens are rejected.
    pub fn replace(&self, market: Market, token: &str) -> bool {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return false;
        }
        if let Err(e) = self.store.set(market.config().storage_key, trimmed) {
            warn!("Failed to persist {market} token: {e}");
        }
        true
    }
}

impl CredentialProvider for StoredCredentials {
    fn obtain(&self, market: Market) -> Option<String> {
        let config = market.config();
        if let Some(stored) = self.store.get(config.storage_key) {
            let trimmed = stored.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }

        let answer = self.prompt.request(config.token_prompt)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Persist before returning; a failed write still yields a usable
        // token for this session.
        if let Err(e) = self.store.set(config.storage_key, trimmed) {
            warn!("Failed to persist {market} token: {e}");
        }
        Some(trimmed.to_string())
    }
}
