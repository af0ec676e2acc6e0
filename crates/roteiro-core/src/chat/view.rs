//! The presentation port the session draws through.
//!
//! The session decides *what* changes on screen; a `ChatView` decides how.
//! The terminal front end lives in roteiro-api.

use std::time::Duration;

use roteiro_types::error::FailureKind;
use roteiro_types::persona::Persona;

use crate::render::RenderedMessage;

/// A transient, user-facing error notice.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub kind: FailureKind,
    /// Guidance for `kind` followed by the support hint.
    pub message: String,
    /// How long the banner stays up. It never blocks input.
    pub dismiss_after: Duration,
}

/// Where the session renders.
pub trait ChatView: Send + Sync {
    /// Replace everything on screen with `messages` for `persona`.
    ///
    /// Called on initialize and on persona switch only.
    fn redraw(&self, persona: &Persona, messages: &[RenderedMessage]);

    /// Draw one new message below the existing ones.
    fn append(&self, message: &RenderedMessage);

    fn show_banner(&self, banner: &ErrorBanner);

    /// `true` while a submission is in flight.
    fn set_busy(&self, busy: bool);
}
