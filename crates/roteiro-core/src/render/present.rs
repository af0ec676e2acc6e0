//! Message presentation.
//!
//! `present` maps a stored message to what a view draws: author, avatar,
//! HTML body and an optional confidence/source footer.

use std::fmt;

use chrono::{DateTime, Utc};
use roteiro_types::chat::{ChatMessage, ResponseMeta, Sender};
use roteiro_types::persona::PersonaId;

use crate::persona::PersonaRegistry;

use super::markup;

/// Author label for user turns.
pub const USER_LABEL: &str = "Você";

/// A message ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub persona: PersonaId,
    /// `Você` for user turns, the persona's display name for bot turns.
    pub author: &'static str,
    /// Avatar URL; bot turns only.
    pub avatar: Option<&'static str>,
    /// Original message text (lightweight markdown).
    pub text: String,
    pub html: String,
    pub footer: Option<MetaFooter>,
    pub timestamp: DateTime<Utc>,
}

/// Confidence and provenance shown under a bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFooter {
    pub confidence_pct: Option<i64>,
    pub source_label: Option<String>,
}

impl fmt::Display for MetaFooter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.confidence_pct, &self.source_label) {
            (Some(pct), Some(label)) => write!(f, "Confiança: {pct}% \u{00b7} {label}"),
            (Some(pct), None) => write!(f, "Confiança: {pct}%"),
            (None, Some(label)) => write!(f, "{label}"),
            (None, None) => Ok(()),
        }
    }
}

/// `round(confidence * 100)`.
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Human label for a source tag. Unknown tags come back verbatim.
pub fn source_label(tag: &str) -> &str {
    match tag {
        "pdf" => "PDF da tese",
        "llm" => "Modelo LLM",
        "fallback" => "Fallback",
        "hibrida" | "busca_hibrida" | "busca híbrida" | "busca-hibrida" => "Busca híbrida",
        other => other,
    }
}

fn footer(meta: &ResponseMeta) -> Option<MetaFooter> {
    if !meta.is_displayable() {
        return None;
    }
    Some(MetaFooter {
        confidence_pct: meta.confidence.map(confidence_percent),
        source_label: meta
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| source_label(s).to_string()),
    })
}

/// Render one message.
pub fn present(message: &ChatMessage, registry: &PersonaRegistry) -> RenderedMessage {
    let persona = registry.get(message.persona);
    let (author, avatar, footer) = match message.sender {
        Sender::User => (USER_LABEL, None, None),
        Sender::Bot => (
            persona.name,
            Some(persona.avatar),
            message.meta.as_ref().and_then(footer),
        ),
    };

    RenderedMessage {
        sender: message.sender,
        persona: message.persona,
        author,
        avatar,
        text: message.text.clone(),
        html: markup::to_html(&message.text),
        footer,
        timestamp: message.timestamp,
    }
}
