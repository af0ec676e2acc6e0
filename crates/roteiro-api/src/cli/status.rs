//! `roteiro status`: configuration, storage and answer service health.

use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use roteiro_core::gateway::ResponseGateway;
use roteiro_core::persona::PersonaRegistry;
use roteiro_types::chat::HISTORY_CAP;
use roteiro_types::persona::PersonaId;

use crate::state::AppState;

/// Display the status dashboard.
///
/// Shows the selected persona, how many messages each persona has stored,
/// and whether the answer service's health endpoint responds.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let history = state.history();
    let selected = history.load_persona().await;
    let mut counts = Vec::with_capacity(PersonaId::ALL.len());
    for id in PersonaId::ALL {
        counts.push((id, history.load_log(id).await.len()));
    }

    let gateway = state.gateway()?;
    let spinner = (!json).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Verificando o serviço de respostas...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });
    let health = gateway.health().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json {
        let logs: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(id, n)| (id.as_str().to_string(), serde_json::json!(n)))
            .collect();
        let service = match &health {
            Ok(h) => serde_json::json!({ "reachable": true, "status": h.status, "service": h.service }),
            Err(e) => serde_json::json!({ "reachable": false, "error": e.to_string() }),
        };
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "storage": state.kv.kind(),
            "base_url": state.config.base_url,
            "persona": selected,
            "history_cap": HISTORY_CAP,
            "logs": logs,
            "service": service,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} roteiro v{}", style("*").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();

    let registry = PersonaRegistry::builtin();
    println!("  {}", style("── Conversas ──").dim());
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Persona").fg(Color::White),
        Cell::new("Nome").fg(Color::White),
        Cell::new("Mensagens").fg(Color::White),
    ]);
    for (id, n) in &counts {
        let label = if *id == selected {
            Cell::new(format!("{id} (atual)")).fg(Color::Green)
        } else {
            Cell::new(id.as_str())
        };
        table.add_row(vec![
            label,
            Cell::new(registry.get(*id).name),
            Cell::new(format!("{n}/{HISTORY_CAP}")),
        ]);
    }
    for line in table.to_string().lines() {
        println!("  {line}");
    }
    println!();

    println!("  {}", style("── Serviço ──").dim());
    println!("  URL:    {}", style(&state.config.base_url).cyan());
    match &health {
        Ok(h) => println!("  Health: {} {}", style("✓").green(), h.status),
        Err(e) => println!("  Health: {} {}", style("✗").red(), style(e).dim()),
    }
    println!();

    println!("  {}", style("── Sistema ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    let storage = match state.kv.kind() {
        "sqlite" => "SQLite (WAL mode)",
        _ => "memória (--ephemeral)",
    };
    println!("  Storage:  {}", style(storage).dim());
    println!();

    Ok(())
}
