//! Persona identity types.
//!
//! The client talks to the answer service through one of two fixed
//! conversational identities. The set is closed: adding a persona means
//! adding a variant here and an entry in the core registry.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Identifier of one of the fixed personas.
///
/// Serialized lowercase (`"professor"`, `"amigo"`), which is also the form
/// stored under the persona selection key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    /// Dr. Gasnelio: technical, formal register.
    Professor,
    /// Gá: casual, friendly register.
    Amigo,
}

impl PersonaId {
    /// Every persona, in display order.
    pub const ALL: [PersonaId; 2] = [PersonaId::Professor, PersonaId::Amigo];

    /// Stable identifier used in storage keys and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Professor => "professor",
            PersonaId::Amigo => "amigo",
        }
    }

    /// Token sent to the answer service as `personality_id`.
    pub fn wire_token(&self) -> &'static str {
        match self {
            PersonaId::Professor => "dr_gasnelio",
            PersonaId::Amigo => "ga",
        }
    }

    /// The other persona of the pair. Used by the toggle control.
    pub fn toggled(&self) -> PersonaId {
        match self {
            PersonaId::Professor => PersonaId::Amigo,
            PersonaId::Amigo => PersonaId::Professor,
        }
    }
}

impl Default for PersonaId {
    fn default() -> Self {
        PersonaId::Professor
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    /// Accepts the storage identifier or the service token, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professor" | "dr_gasnelio" => Ok(PersonaId::Professor),
            "amigo" | "ga" => Ok(PersonaId::Amigo),
            other => Err(format!("unknown persona: '{other}'")),
        }
    }
}

/// Display metadata for a persona.
///
/// Instances are static and immutable; see the registry in `roteiro-core`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub id: PersonaId,
    pub name: &'static str,
    pub avatar: &'static str,
    /// Shown when the persona's history is empty. Never persisted.
    pub greeting: &'static str,
    /// Passed through to the answer service; unused locally.
    pub system_prompt: &'static str,
}
