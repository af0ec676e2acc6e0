//! Terminal rendering of chat messages.
//!
//! `ChatRenderer` draws a [`RenderedMessage`] as an author line, the body
//! rendered through `termimad` (which understands the same `**bold**`,
//! `*italic*` and `` `code` `` markup the answer service emits), and a dim
//! confidence/source footer. Each persona gets its own accent color.

use chrono::Local;
use console::{Style, style};
use crossterm::style::Color;
use roteiro_core::render::RenderedMessage;
use roteiro_types::chat::Sender;
use roteiro_types::persona::PersonaId;
use termimad::MadSkin;

/// Accent color of a persona.
pub fn persona_accent(persona: PersonaId) -> Color {
    match persona {
        PersonaId::Professor => Color::Cyan,
        PersonaId::Amigo => Color::Green,
    }
}

/// Terminal message renderer with per-persona accents.
pub struct ChatRenderer {
    professor: MadSkin,
    amigo: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        Self {
            professor: Self::skin(persona_accent(PersonaId::Professor)),
            amigo: Self::skin(persona_accent(PersonaId::Amigo)),
        }
    }

    fn skin(accent: Color) -> MadSkin {
        let mut skin = MadSkin::default_dark();
        let tc = Self::crossterm_to_termimad(accent);
        skin.bold.set_fg(tc);
        skin.headers[0].set_fg(tc);
        skin.headers[1].set_fg(tc);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        skin
    }

    fn skin_for(&self, persona: PersonaId) -> &MadSkin {
        match persona {
            PersonaId::Professor => &self.professor,
            PersonaId::Amigo => &self.amigo,
        }
    }

    /// Console style for a persona's name.
    pub fn accent_style(persona: PersonaId) -> Style {
        match persona_accent(persona) {
            Color::Green => Style::new().green().bold(),
            _ => Style::new().cyan().bold(),
        }
    }

    /// Render a message to a printable block (no trailing newline).
    pub fn render(&self, message: &RenderedMessage) -> String {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        let author = match message.sender {
            Sender::User => style(message.author).green().bold().to_string(),
            Sender::Bot => Self::accent_style(message.persona)
                .apply_to(message.author)
                .to_string(),
        };

        let body = self.skin_for(message.persona).term_text(&message.text).to_string();
        let mut out = format!("  {author} {}\n", style(time).dim());
        for line in body.trim_end().lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        if let Some(footer) = &message.footer {
            out.push_str(&format!("  {}\n", style(footer).dim()));
        }
        out.trim_end().to_string()
    }

    /// Convert a crossterm Color to termimad Color.
    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Yellow => termimad::crossterm::style::Color::Yellow,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}
