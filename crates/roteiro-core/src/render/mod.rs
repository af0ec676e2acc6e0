//! Presentation rendering.
//!
//! Pure functions from a [`ChatMessage`](roteiro_types::chat::ChatMessage)
//! to display content. No state and no failure mode: missing metadata just
//! means no footer.

pub mod markup;
pub mod present;

pub use present::{MetaFooter, RenderedMessage, present};
