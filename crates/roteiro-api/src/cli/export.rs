//! `roteiro export`: write a persona's conversation as text, HTML or JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use roteiro_core::chat::HistoryStore;
use roteiro_core::export::{history_html, history_text};
use roteiro_core::persona::PersonaRegistry;
use roteiro_core::storage::kv_store::KvStore;
use roteiro_types::persona::PersonaId;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// `Label: text` per message, blank line between.
    Txt,
    /// Standalone HTML page.
    Html,
    /// The stored log, verbatim.
    Json,
}

impl ExportFormat {
    /// File name used when exporting from inside the chat.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "chat_historico.txt",
            ExportFormat::Html => "chat_historico.html",
            ExportFormat::Json => "chat_historico.json",
        }
    }
}

/// Render `persona`'s stored conversation in `format`.
pub async fn render_export<S: KvStore>(
    history: &HistoryStore<S>,
    persona: PersonaId,
    format: ExportFormat,
) -> Result<String> {
    let registry = PersonaRegistry::builtin();
    let rendered = match format {
        ExportFormat::Txt => history_text(&history.load_log(persona).await, &registry),
        ExportFormat::Html => {
            let title = format!("Conversa com {}", registry.get(persona).name);
            history_html(&title, &history.load_log(persona).await, &registry)
        }
        ExportFormat::Json => history
            .raw_log(persona)
            .await
            .context("Falha ao ler o histórico salvo")?
            .unwrap_or_else(|| "[]".to_string()),
    };
    Ok(rendered)
}

/// Write `content` to `path`, creating parent directories.
pub async fn write_export(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Falha ao gravar {}", path.display()))
}

/// Handle `roteiro export`.
pub async fn export(
    state: &AppState,
    persona: Option<PersonaId>,
    format: ExportFormat,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let history = state.history();
    let persona = match persona {
        Some(p) => p,
        None => history.load_persona().await,
    };
    let content = render_export(&history, persona, format).await?;

    let Some(path) = output else {
        println!("{content}");
        return Ok(());
    };

    write_export(&path, &content).await?;
    if json {
        let result = serde_json::json!({
            "persona": persona,
            "format": format!("{format:?}").to_lowercase(),
            "path": path.display().to_string(),
            "bytes": content.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Conversa com '{}' exportada para {}",
            style("ok").green(),
            style(persona).cyan(),
            style(path.display()).cyan(),
        );
        println!();
    }
    Ok(())
}
