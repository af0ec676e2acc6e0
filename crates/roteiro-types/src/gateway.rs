//! Wire types for the answer service.
//!
//! The service exposes `POST /api/chat` taking an [`AskRequest`] and
//! returning an [`AskResponse`], plus `GET /health`.

use serde::{Deserialize, Serialize};

use crate::chat::{NO_ANSWER_SOURCE, ResponseMeta};

/// Relative path of the answer endpoint.
pub const CHAT_PATH: &str = "/api/chat";

/// Relative path of the health probe.
pub const HEALTH_PATH: &str = "/health";

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Persona token (`dr_gasnelio` or `ga`).
    pub personality_id: String,
}

/// Successful response body from `POST /api/chat`.
///
/// Every field defaults when absent: a reply without an `answer` is a
/// "no answer" reply, not a protocol failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub personality: String,
}

impl AskResponse {
    /// True when the reply carries no usable answer.
    pub fn is_no_answer(&self) -> bool {
        self.answer.trim().is_empty() || self.source == NO_ANSWER_SOURCE
    }

    /// Metadata to attach to the bot message built from this reply.
    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            confidence: Some(self.confidence),
            source: non_empty(&self.source),
            personality: non_empty(&self.personality),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}
