//! Infrastructure layer for roteiro.
//!
//! Contains implementations of the ports defined in `roteiro-core`: SQLite
//! and in-memory key/value storage, the HTTP answer gateway, plus the config
//! loader and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod memory;
pub mod sqlite;
