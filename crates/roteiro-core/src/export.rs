//! Conversation export.
//!
//! Plain-text and standalone HTML renditions of one persona's log. Richer
//! document formats are left to external tools fed from these.

use std::fmt::Write as _;

use roteiro_types::chat::{ChatMessage, Sender};

use crate::persona::PersonaRegistry;
use crate::render::markup::{escape_html, to_plain};
use crate::render::present::{USER_LABEL, present};

/// Label a message is exported under: `Você` or the owning persona's name.
fn label(message: &ChatMessage, registry: &PersonaRegistry) -> &'static str {
    match message.sender {
        Sender::User => USER_LABEL,
        Sender::Bot => registry.get(message.persona).name,
    }
}

/// `"<label>: <text>"` per message, separated by a blank line.
pub fn history_text(messages: &[ChatMessage], registry: &PersonaRegistry) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", label(m, registry), to_plain(&m.text)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A minimal standalone HTML document with the rendered messages.
pub fn history_html(
    title: &str,
    messages: &[ChatMessage],
    registry: &PersonaRegistry,
) -> String {
    let mut body = String::new();
    for message in messages {
        let rendered = present(message, registry);
        let class = match rendered.sender {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        let _ = writeln!(body, "<div class=\"message {class}\">");
        let _ = writeln!(
            body,
            "  <div class=\"author\">{}</div>",
            escape_html(rendered.author)
        );
        let _ = writeln!(body, "  <div class=\"text\">{}</div>", rendered.html);
        if let Some(footer) = &rendered.footer {
            let _ = writeln!(
                body,
                "  <div class=\"meta\">{}</div>",
                escape_html(&footer.to_string())
            );
        }
        let _ = writeln!(
            body,
            "  <time datetime=\"{ts}\">{ts}</time>",
            ts = rendered.timestamp.to_rfc3339()
        );
        let _ = writeln!(body, "</div>");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }
.message { margin: 1rem 0; padding: 0.75rem; border-radius: 6px; }
.user { background: #eef3fb; }
.bot { background: #f5f5f5; }
.author { font-weight: bold; }
.meta, time { color: #666; font-size: 0.8rem; }
";
