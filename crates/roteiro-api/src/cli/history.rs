//! `roteiro history`: print a persona's stored conversation.

use anyhow::Result;
use console::style;
use roteiro_core::persona::PersonaRegistry;
use roteiro_core::render::present;
use roteiro_types::persona::PersonaId;

use crate::cli::chat::renderer::ChatRenderer;
use crate::state::AppState;

pub async fn history(state: &AppState, persona: Option<PersonaId>, json: bool) -> Result<()> {
    let store = state.history();
    let persona = match persona {
        Some(p) => p,
        None => store.load_persona().await,
    };
    let messages = store.load_log(persona).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    let registry = PersonaRegistry::builtin();
    println!();
    if messages.is_empty() {
        println!(
            "  {}",
            style(format!("Sem histórico com {}.", registry.get(persona).name)).dim()
        );
        println!();
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    for message in &messages {
        println!("{}", renderer.render(&present(message, &registry)));
        println!();
    }
    println!(
        "  {}",
        style(format!("{} mensagens com {}", messages.len(), registry.get(persona).name)).dim()
    );
    println!();
    Ok(())
}
