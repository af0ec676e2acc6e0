//! Persisted chat state on top of a [`KvStore`].
//!
//! Two kinds of entries, both plain text:
//! - `teseWebPersona` holds the selected persona id;
//! - `teseWebChatHistory_<persona>` holds that persona's log as a JSON array.
//!
//! The key names follow the browser widget's `localStorage` layout. Message
//! text is kept as the service's lightweight markup; logs written by the
//! widget carry bot turns as HTML, which loads fine and exports as plain
//! text but is displayed with its tags.

use roteiro_types::chat::ChatMessage;
use roteiro_types::error::RepositoryError;
use roteiro_types::persona::PersonaId;
use tracing::{debug, warn};

use crate::storage::kv_store::KvStore;

use super::log::truncate_oldest;

/// Key holding the selected persona.
pub const PERSONA_KEY: &str = "teseWebPersona";

/// Prefix of the per-persona history keys.
pub const HISTORY_KEY_PREFIX: &str = "teseWebChatHistory_";

/// Storage key of `persona`'s history.
pub fn history_key(persona: PersonaId) -> String {
    format!("{HISTORY_KEY_PREFIX}{persona}")
}

/// Persona selection and per-persona history, persisted through a [`KvStore`].
///
/// Every operation touches only the entry for its own key.
pub struct HistoryStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Access the underlying key/value store.
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// The stored persona selection, or the default when missing or invalid.
    pub async fn load_persona(&self) -> PersonaId {
        match self.kv.get(PERSONA_KEY).await {
            Ok(Some(raw)) => match raw.parse::<PersonaId>() {
                Ok(id) if raw == id.as_str() => id,
                _ => {
                    debug!(value = %raw, "Ignoring unrecognized persona selection");
                    PersonaId::default()
                }
            },
            Ok(None) => PersonaId::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read persona selection, using default");
                PersonaId::default()
            }
        }
    }

    /// Overwrite the persona selection.
    pub async fn save_persona(&self, persona: PersonaId) -> Result<(), RepositoryError> {
        self.kv.set(PERSONA_KEY, persona.as_str()).await
    }

    /// Load `persona`'s history.
    ///
    /// Never fails: an unparseable entry is deleted and treated as empty, and
    /// a storage read error is logged and treated as empty.
    pub async fn load_log(&self, persona: PersonaId) -> Vec<ChatMessage> {
        let key = history_key(persona);
        let raw = match self.kv.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(persona = %persona, error = %e, "Failed to read history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ChatMessage>>(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(persona = %persona, error = %e, "Discarding corrupt history entry");
                if let Err(e) = self.kv.delete(&key).await {
                    warn!(persona = %persona, error = %e, "Failed to delete corrupt history entry");
                }
                Vec::new()
            }
        }
    }

    /// Persist `persona`'s history, keeping only the most recent entries.
    pub async fn save_log(
        &self,
        persona: PersonaId,
        messages: &[ChatMessage],
    ) -> Result<(), RepositoryError> {
        let mut kept = messages.to_vec();
        truncate_oldest(&mut kept);
        let value = serde_json::to_string(&kept)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize history: {e}")))?;
        self.kv.set(&history_key(persona), &value).await
    }

    /// Delete `persona`'s history entry.
    pub async fn clear_log(&self, persona: PersonaId) -> Result<(), RepositoryError> {
        self.kv.delete(&history_key(persona)).await
    }

    /// The stored history exactly as persisted.
    pub async fn raw_log(&self, persona: PersonaId) -> Result<Option<String>, RepositoryError> {
        self.kv.get(&history_key(persona)).await
    }
}
