//! Banners printed by the chat loop.

use console::style;
use roteiro_types::persona::Persona;

use super::renderer::ChatRenderer;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(base_url: &str, storage: &str) {
    println!();
    println!(
        "  {} {}",
        style("Roteiro de Dispensação").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!("  {}  {}", style("Serviço:").bold(), style(base_url).dim());
    println!("  {}  {}", style("Histórico:").bold(), style(storage).dim());
    println!();
    println!(
        "  {}",
        style("Digite /help para ver os comandos, Ctrl+D para sair").dim()
    );
    println!("  {}", style("---").dim());
}

/// Print the header shown whenever a persona becomes current.
pub fn print_persona_header(persona: &Persona) {
    println!();
    println!(
        "  {} {}",
        ChatRenderer::accent_style(persona.id).apply_to(persona.name),
        style("\u{00b7} Online").green().dim()
    );
}
