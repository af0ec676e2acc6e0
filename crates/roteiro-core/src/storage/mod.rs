//! Storage abstractions for roteiro.
//!
//! Defines the key/value port the persisted chat history sits on.
//! Implementations live in roteiro-infra.

pub mod kv_store;
