//! `roteiro persona`: show or change the selected persona.

use anyhow::{Context, Result};
use console::style;
use roteiro_core::persona::PersonaRegistry;

use crate::cli::PersonaCommand;
use crate::cli::chat::renderer::ChatRenderer;
use crate::state::AppState;

pub async fn persona(state: &AppState, action: Option<PersonaCommand>, json: bool) -> Result<()> {
    let store = state.history();
    let selected = match action {
        None | Some(PersonaCommand::Show) => store.load_persona().await,
        Some(PersonaCommand::Set { persona }) => {
            store
                .save_persona(persona)
                .await
                .context("Failed to save persona selection")?;
            tracing::debug!(persona = %persona, "Persona selected");
            persona
        }
    };

    let registry = PersonaRegistry::builtin();
    if json {
        let p = registry.get(selected);
        let result = serde_json::json!({
            "persona": selected,
            "name": p.name,
            "service_token": selected.wire_token(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    for p in registry.all() {
        let id = p.id;
        let marker = if id == selected {
            style("●").green().bold()
        } else {
            style("○").dim()
        };
        println!(
            "  {} {} {}",
            marker,
            ChatRenderer::accent_style(id).apply_to(format!("{:<10}", id.as_str())),
            p.name
        );
    }
    println!();
    Ok(())
}
