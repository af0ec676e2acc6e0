//! Bounded per-persona message log.

use roteiro_types::chat::{ChatMessage, HISTORY_CAP};
use roteiro_types::persona::PersonaId;
use thiserror::Error;

/// A message was offered to a log owned by a different persona.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("message owned by '{found}' cannot join the '{expected}' log")]
pub struct ForeignMessage {
    pub expected: PersonaId,
    pub found: PersonaId,
}

/// Ordered, capped history of one persona's turns.
///
/// Holds at most [`HISTORY_CAP`] messages; pushing past the cap drops the
/// oldest first. Every entry is owned by `persona`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLog {
    persona: PersonaId,
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    /// Empty log for `persona`.
    pub fn new(persona: PersonaId) -> Self {
        Self {
            persona,
            entries: Vec::new(),
        }
    }

    /// Build a log from restored entries.
    ///
    /// Entries owned by another persona are dropped; the rest keep their
    /// order and are cut down to the most recent [`HISTORY_CAP`].
    pub fn from_entries(persona: PersonaId, entries: Vec<ChatMessage>) -> Self {
        let mut entries: Vec<ChatMessage> =
            entries.into_iter().filter(|m| m.persona == persona).collect();
        truncate_oldest(&mut entries);
        Self { persona, entries }
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a message, evicting from the front if needed.
    ///
    /// Returns how many old entries were evicted.
    pub fn push(&mut self, message: ChatMessage) -> Result<usize, ForeignMessage> {
        if message.persona != self.persona {
            return Err(ForeignMessage {
                expected: self.persona,
                found: message.persona,
            });
        }
        self.entries.push(message);
        Ok(truncate_oldest(&mut self.entries))
    }
}

/// Keep only the last [`HISTORY_CAP`] entries. Returns the number removed.
pub(crate) fn truncate_oldest(entries: &mut Vec<ChatMessage>) -> usize {
    let excess = entries.len().saturating_sub(HISTORY_CAP);
    if excess > 0 {
        entries.drain(..excess);
    }
    excess
}
