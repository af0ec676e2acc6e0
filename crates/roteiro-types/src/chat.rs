//! Chat message types for roteiro.
//!
//! A `ChatMessage` is one turn of a conversation. Messages are grouped into
//! per-persona logs and persisted as JSON arrays, so the serialized shape
//! (`{text, sender, persona, timestamp, meta?}`) is part of the storage format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persona::PersonaId;

/// Maximum number of messages kept per persona log.
pub const HISTORY_CAP: usize = 30;

/// Source tag the answer service uses when it found nothing.
pub const NO_ANSWER_SOURCE: &str = "no_answer";

/// Source tag recorded on the placeholder appended after a failed exchange.
pub const ERROR_SOURCE: &str = "erro";

/// Bot text substituted for a blank or `no_answer` reply.
pub const NO_ANSWER_TEXT: &str =
    "Nenhuma resposta encontrada para sua pergunta. Tente reformular ou perguntar de outra forma.";

/// Bot text appended when the exchange with the answer service failed.
pub const TECHNICAL_FAILURE_TEXT: &str =
    "Desculpe, não consegui processar sua pergunta devido a um erro técnico.";

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Metadata the answer service attaches to a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Confidence score in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Provenance tag (`pdf`, `llm`, `fallback`, `busca_hibrida`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Persona token echoed back by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

impl ResponseMeta {
    /// Whether there is anything worth showing in a footer.
    pub fn is_displayable(&self) -> bool {
        self.confidence.is_some() || self.source.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// A single chat turn.
///
/// `persona` is the persona that was active when the message was created and
/// is never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub persona: PersonaId,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl ChatMessage {
    /// A user turn addressed to `persona`.
    pub fn user(text: impl Into<String>, persona: PersonaId) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            persona,
            timestamp: Utc::now(),
            meta: None,
        }
    }

    /// A bot turn spoken by `persona`.
    pub fn bot(text: impl Into<String>, persona: PersonaId, meta: Option<ResponseMeta>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            persona,
            timestamp: Utc::now(),
            meta,
        }
    }

    /// The placeholder recorded when an exchange failed.
    pub fn technical_failure(persona: PersonaId) -> Self {
        Self::bot(
            TECHNICAL_FAILURE_TEXT,
            persona,
            Some(ResponseMeta {
                confidence: Some(0.0),
                source: Some(ERROR_SOURCE.to_string()),
                personality: None,
            }),
        )
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Confidence from the metadata, if any.
    pub fn confidence(&self) -> Option<f64> {
        self.meta.as_ref().and_then(|m| m.confidence)
    }
}
