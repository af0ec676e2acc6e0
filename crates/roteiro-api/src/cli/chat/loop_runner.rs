//! Main chat loop orchestration.
//!
//! Builds the session, restores the stored persona and history, then reads
//! lines until Ctrl+D or `/exit`. Plain lines go to `ChatSession::submit`;
//! slash commands are handled here.

use std::path::Path;

use console::style;
use roteiro_core::chat::SubmitOutcome;
use roteiro_core::render::present;
use roteiro_types::persona::PersonaId;
use tracing::debug;

use crate::cli::export::{render_export, write_export};
use crate::state::{AppSession, AppState};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::view::{TerminalView, ViewMode};

type Session = AppSession<TerminalView>;

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, persona: Option<PersonaId>) -> anyhow::Result<()> {
    print_welcome_banner(&state.config.base_url, state.kv.kind());

    let session = state.session(TerminalView::new(ViewMode::Transcript))?;
    session.initialize().await;
    if let Some(persona) = persona {
        session.switch_persona(persona).await;
    }

    let (mut input, _writer) = ChatInput::new(session.current_persona().await)
        .map_err(|e| anyhow::anyhow!("Falha ao iniciar a entrada: {e}"))?;

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Sessão encerrada.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Ctrl+D para sair, ou continue conversando.").dim()
                );
                continue;
            }
            InputEvent::Line(text) => text,
        };

        let Some(cmd) = commands::parse(&text) else {
            submit(&session, &text).await;
            continue;
        };

        match cmd {
            ChatCommand::Help => commands::print_help(),
            ChatCommand::Exit => {
                println!("\n  {}", style("Sessão encerrada.").dim());
                break;
            }
            ChatCommand::Clear => input.clear(),
            ChatCommand::Persona(target) => {
                let current = session.current_persona().await;
                match target {
                    Some(p) if p == current => println!(
                        "\n  {} Já conversando com {}.\n",
                        style("*").cyan().bold(),
                        session.registry().get(p).name
                    ),
                    Some(p) => {
                        session.switch_persona(p).await;
                    }
                    None => {
                        session.toggle_persona().await;
                    }
                }
                input.set_persona(session.current_persona().await);
            }
            ChatCommand::History => print_history(&session).await,
            ChatCommand::Prompts => commands::print_prompts(&state.config.quick_prompts),
            ChatCommand::Prompt(n) => match state.config.quick_prompts.get(n - 1) {
                Some(prompt) => {
                    println!("  {} {}", style("Você:").green().bold(), prompt);
                    submit(&session, prompt).await;
                }
                None => println!(
                    "\n  {} Não há pergunta rápida #{n}. Digite /prompts para ver a lista.\n",
                    style("?").yellow().bold()
                ),
            },
            ChatCommand::Export(format) => {
                let persona = session.current_persona().await;
                let path = Path::new(format.default_file_name());
                let result = match render_export(session.store(), persona, format).await {
                    Ok(content) => write_export(path, &content).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => println!(
                        "\n  {} Conversa salva em {}\n",
                        style("ok").green(),
                        style(path.display()).cyan()
                    ),
                    Err(e) => println!("\n  {} Falha ao exportar: {e:#}\n", style("!").red().bold()),
                }
            }
            ChatCommand::Unknown(detail) => println!(
                "\n  {} Comando desconhecido: {}. Digite /help para ver os comandos.\n",
                style("?").yellow().bold(),
                style(detail).dim()
            ),
        }
    }

    input.flush();
    Ok(())
}

async fn submit(session: &Session, text: &str) {
    match session.submit(text).await {
        SubmitOutcome::Ignored(reason) => debug!(?reason, "Input ignored"),
        outcome => debug!(?outcome, "Submission finished"),
    }
}

async fn print_history(session: &Session) {
    let messages = session.messages().await;
    if messages.is_empty() {
        println!("\n  {}\n", style("Sem histórico para esta persona.").dim());
        return;
    }
    let renderer = session.view().renderer();
    for message in &messages {
        println!();
        println!("{}", renderer.render(&present(message, session.registry())));
    }
    println!();
}
