//! `roteiro forget`: delete a persona's stored conversation.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use roteiro_core::persona::PersonaRegistry;
use roteiro_types::persona::PersonaId;

use crate::state::AppState;

/// Delete the stored log for `persona` (default: the selected one).
///
/// Asks for confirmation unless `force` or `json` is set. The persona
/// selection itself is left alone.
pub async fn forget(
    state: &AppState,
    persona: Option<PersonaId>,
    force: bool,
    json: bool,
) -> Result<()> {
    let store = state.history();
    let persona = match persona {
        Some(p) => p,
        None => store.load_persona().await,
    };
    let count = store.load_log(persona).await.len();
    let name = PersonaRegistry::builtin().get(persona).name;

    if count == 0 {
        if json {
            println!("{}", serde_json::json!({ "persona": persona, "deleted": 0 }));
        } else {
            println!();
            println!("  {}", style(format!("Sem histórico com {name}.")).dim());
            println!();
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Apagar {} mensagens com {}? Não é possível desfazer.",
                style(count).bold(),
                style(name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelado.");
            return Ok(());
        }
    }

    store
        .clear_log(persona)
        .await
        .context("Failed to delete stored history")?;
    tracing::info!(persona = %persona, count, "History deleted");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "persona": persona,
                "deleted": count,
            }))?
        );
    } else {
        println!();
        println!(
            "  {} Histórico com {} apagado ({} mensagens)",
            style("ok").green(),
            style(name).cyan(),
            count
        );
        println!();
    }
    Ok(())
}
