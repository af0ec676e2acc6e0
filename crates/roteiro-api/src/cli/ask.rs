//! `roteiro ask`: one question through the same session manager as `chat`.

use anyhow::Result;
use roteiro_core::chat::{IgnoreReason, SubmitOutcome};
use roteiro_core::render::markup::to_plain;
use roteiro_core::render::present;
use roteiro_types::persona::PersonaId;

use crate::cli::chat::view::{TerminalView, ViewMode};
use crate::state::AppState;

/// Submit `question` and print the reply.
///
/// The reply, and any failure banner, are printed by the view. With `json`
/// the view stays silent and the final bot message is printed as JSON.
pub async fn ask(
    state: &AppState,
    question: &str,
    persona: Option<PersonaId>,
    json: bool,
) -> Result<()> {
    let mode = if json { ViewMode::Silent } else { ViewMode::ReplyOnly };
    let session = state.session(TerminalView::new(mode))?;
    session.initialize().await;
    if let Some(persona) = persona {
        session.switch_persona(persona).await;
    }

    let outcome = session.submit(question).await;
    tracing::debug!(?outcome, "Ask finished");

    if let SubmitOutcome::Ignored(IgnoreReason::Blank) = outcome {
        anyhow::bail!("Question is empty");
    }

    if json {
        let messages = session.messages().await;
        let reply = messages.last().filter(|m| !m.is_user());
        let footer = reply
            .and_then(|m| present(m, session.registry()).footer)
            .map(|f| f.to_string());
        let result = serde_json::json!({
            "persona": session.current_persona().await,
            "outcome": outcome_label(outcome),
            "answer": reply.map(|m| m.text.as_str()),
            "plain": reply.map(|m| to_plain(&m.text)),
            "meta": reply.and_then(|m| m.meta.as_ref()),
            "footer": footer,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
    }
    Ok(())
}

fn outcome_label(outcome: SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Answered => "answered",
        SubmitOutcome::NoAnswer => "no_answer",
        SubmitOutcome::Failed(_) => "failed",
        SubmitOutcome::Ignored(_) => "ignored",
    }
}
