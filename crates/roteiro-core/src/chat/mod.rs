//! Persona-scoped chat: the bounded log, its persistence, and the session
//! manager that ties them to the answer gateway and a view.

pub mod history;
pub mod log;
pub mod session;
pub mod view;

pub use history::HistoryStore;
pub use log::MessageLog;
pub use session::{ChatSession, IgnoreReason, RenderPlan, SessionSettings, SubmitOutcome};
pub use view::{ChatView, ErrorBanner};
