//! Interactive terminal chat for roteiro.
//!
//! Entry point: `loop_runner::run_chat_loop`. The session manager lives in
//! roteiro-core; this module supplies the terminal `ChatView`, line input
//! and slash commands.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod view;
