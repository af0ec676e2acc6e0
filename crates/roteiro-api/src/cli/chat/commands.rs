//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls: persona switching,
//! history, quick prompts and export.

use console::style;
use roteiro_types::persona::PersonaId;

use crate::cli::export::ExportFormat;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Toggle persona, or switch to the named one.
    Persona(Option<PersonaId>),
    /// Reprint the current persona's history.
    History,
    /// List the quick prompts.
    Prompts,
    /// Send quick prompt N (1-based).
    Prompt(usize),
    /// Write the current history to a file (`txt` or `html`).
    Export(ExportFormat),
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/persona" | "/trocar" => match arg {
            None => Some(ChatCommand::Persona(None)),
            Some(name) => match name.parse::<PersonaId>() {
                Ok(id) => Some(ChatCommand::Persona(Some(id))),
                Err(_) => Some(ChatCommand::Unknown(format!("persona desconhecida '{name}'"))),
            },
        },
        "/history" | "/historico" => Some(ChatCommand::History),
        "/prompts" => Some(ChatCommand::Prompts),
        "/p" => match arg.map(str::parse::<usize>) {
            Some(Ok(n)) if n > 0 => Some(ChatCommand::Prompt(n)),
            _ => Some(ChatCommand::Unknown("/p exige o número da pergunta".to_string())),
        },
        "/export" => match arg.map(str::to_lowercase).as_deref() {
            None | Some("txt") => Some(ChatCommand::Export(ExportFormat::Txt)),
            Some("html") => Some(ChatCommand::Export(ExportFormat::Html)),
            Some(other) => Some(ChatCommand::Unknown(format!(
                "formato de exportação não suportado '{other}'"
            ))),
        },
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let rows = [
        ("/help", "Mostrar esta ajuda"),
        ("/persona [p]", "Alternar persona, ou escolher professor|amigo"),
        ("/history", "Reexibir o histórico da persona atual"),
        ("/prompts", "Listar perguntas rápidas"),
        ("/p N", "Enviar a pergunta rápida N"),
        ("/export [txt|html]", "Salvar a conversa em arquivo"),
        ("/clear", "Limpar a tela"),
        ("/exit", "Encerrar"),
    ];

    println!();
    println!("  {}", style("Comandos disponíveis:").bold());
    println!();
    for (cmd, desc) in rows {
        println!("  {:<20} {}", style(cmd).cyan(), desc);
    }
    println!();
    println!(
        "  {}",
        style("Ctrl+D para sair; Ctrl+C não perde mensagens").dim()
    );
    println!();
}

/// Print the configured quick prompts, numbered from 1.
pub fn print_prompts(prompts: &[String]) {
    println!();
    if prompts.is_empty() {
        println!("  {}", style("Nenhuma pergunta rápida configurada.").dim());
    }
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", i + 1)).cyan(), prompt);
    }
    println!();
}
