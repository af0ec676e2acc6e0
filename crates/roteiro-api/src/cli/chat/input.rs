//! Line input for the chat loop, on top of `rustyline_async`.

use console::style;
use roteiro_types::persona::PersonaId;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use super::renderer::ChatRenderer;

/// What the user did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// A submitted line, untrimmed. May be blank.
    Line(String),
    /// Ctrl+D.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Prompt text for the current persona.
pub fn prompt_for(persona: PersonaId) -> String {
    format!(
        "  {} {} ",
        ChatRenderer::accent_style(persona).apply_to(persona.as_str()),
        style(">").green().bold()
    )
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Start reading with the prompt for `persona`.
    ///
    /// The returned `SharedWriter` prints without breaking the prompt line.
    pub fn new(persona: PersonaId) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt_for(persona))?;
        Ok((Self { rl }, writer))
    }

    /// Show the prompt for a newly selected persona.
    pub fn set_persona(&mut self, persona: PersonaId) {
        let _ = self.rl.update_prompt(&prompt_for(persona));
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!(error = %e, "Input closed");
                InputEvent::Eof
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exiting.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
