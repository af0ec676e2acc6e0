//! Terminal implementation of the session's `ChatView`.
//!
//! Redraws print the persona header and the restored messages; appends print
//! only bot turns, since the user's own line is already on screen. While a
//! request is in flight an `indicatif` spinner shows "Aguardando resposta...".
//! Error banners go to stderr and are cleared after their dismiss delay.

use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use roteiro_core::chat::{ChatView, ErrorBanner};
use roteiro_core::render::RenderedMessage;
use roteiro_types::chat::Sender;
use roteiro_types::persona::Persona;

use super::banner::print_persona_header;
use super::renderer::ChatRenderer;

/// What the view prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Full interactive transcript.
    Transcript,
    /// Only replies and errors (one-shot `ask`).
    ReplyOnly,
    /// Nothing on stdout; used with `--json`.
    Silent,
}

pub struct TerminalView {
    renderer: ChatRenderer,
    mode: ViewMode,
    progress: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
    banner: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new(mode: ViewMode) -> Self {
        let target = if mode == ViewMode::Silent {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        Self::with_draw_target(mode, target)
    }

    fn with_draw_target(mode: ViewMode, target: ProgressDrawTarget) -> Self {
        Self {
            renderer: ChatRenderer::new(),
            mode,
            progress: MultiProgress::with_draw_target(target),
            spinner: Mutex::new(None),
            banner: Mutex::new(None),
        }
    }

    pub fn renderer(&self) -> &ChatRenderer {
        &self.renderer
    }

    fn print(&self, message: &RenderedMessage) {
        let block = self.renderer.render(message);
        // Keep spinner lines intact while printing.
        self.progress.suspend(|| {
            println!();
            println!("{block}");
        });
    }
}

fn spinner_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

impl ChatView for TerminalView {
    fn redraw(&self, persona: &Persona, messages: &[RenderedMessage]) {
        if self.mode != ViewMode::Transcript {
            return;
        }
        print_persona_header(persona);
        for message in messages {
            self.print(message);
        }
        println!();
    }

    fn append(&self, message: &RenderedMessage) {
        if self.mode == ViewMode::Silent || message.sender == Sender::User {
            return;
        }
        self.print(message);
        if self.mode == ViewMode::Transcript {
            println!();
        }
    }

    fn show_banner(&self, banner: &ErrorBanner) {
        let text = format!("{} {}", style("!").red().bold(), style(&banner.message).red());
        match self.mode {
            ViewMode::Silent => {}
            ViewMode::ReplyOnly => eprintln!("\n  {text}"),
            ViewMode::Transcript => {
                let bar = self.progress.add(ProgressBar::new_spinner());
                bar.set_style(spinner_style("  {msg}"));
                bar.set_message(text);
                bar.tick();

                // A newer banner replaces the one still on screen.
                if let Ok(mut slot) = self.banner.lock() {
                    if let Some(previous) = slot.replace(bar.clone()) {
                        previous.finish_and_clear();
                    }
                }

                let delay = banner.dismiss_after;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    bar.finish_and_clear();
                });
            }
        }
    }

    fn set_busy(&self, busy: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if busy {
            let spinner = self.progress.add(ProgressBar::new_spinner());
            spinner.set_style(spinner_style("  {spinner:.cyan} {msg}"));
            spinner.set_message("Aguardando resposta...");
            spinner.enable_steady_tick(Duration::from_millis(80));
            *slot = Some(spinner);
        } else if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }
}
