//! Shared domain types for roteiro.
//!
//! This crate contains the core domain types used across the roteiro chat
//! client: personas, chat messages, the answer endpoint's wire format,
//! client configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod persona;
