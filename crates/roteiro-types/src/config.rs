//! Client configuration types for roteiro.
//!
//! `ClientConfig` represents the `config.toml` in the data directory that
//! points the client at an answer service and tunes the chat surface.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.roteiro/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the answer service; `/api/chat` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How long an error banner stays visible, in milliseconds.
    #[serde(default = "default_banner_dismiss_ms")]
    pub banner_dismiss_ms: u64,

    /// Appended to every error banner.
    #[serde(default = "default_support_hint")]
    pub support_hint: String,

    /// Canned questions offered by `/prompts`.
    #[serde(default = "default_quick_prompts")]
    pub quick_prompts: Vec<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_banner_dismiss_ms() -> u64 {
    5_000
}

fn default_support_hint() -> String {
    "Se o problema persistir, entre em contato com a equipe do projeto.".to_string()
}

fn default_quick_prompts() -> Vec<String> {
    vec![
        "Qual a dose da rifampicina na PQT-U?".to_string(),
        "Quais são os efeitos adversos da clofazimina?".to_string(),
        "Como orientar o paciente sobre a dose supervisionada?".to_string(),
    ]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            banner_dismiss_ms: default_banner_dismiss_ms(),
            support_hint: default_support_hint(),
            quick_prompts: default_quick_prompts(),
        }
    }
}
