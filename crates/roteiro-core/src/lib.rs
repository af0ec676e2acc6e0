//! Chat session logic and port definitions for roteiro.
//!
//! This crate defines the "ports" (key/value storage, answer gateway, chat
//! view) that the infrastructure and application layers implement, plus the
//! session manager that drives them. It depends only on `roteiro-types` --
//! never on `roteiro-infra` or any database/IO crate.

pub mod chat;
pub mod export;
pub mod gateway;
pub mod persona;
pub mod render;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
