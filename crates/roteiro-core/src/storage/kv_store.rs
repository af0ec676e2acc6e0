//! Key-value store trait.
//!
//! Defines the interface for the client's durable key/value storage.
//! Implementations live in roteiro-infra.

use roteiro_types::error::RepositoryError;

/// Trait for durable key-value storage of opaque text blobs.
///
/// The chat client keeps exactly two kinds of entries here: the selected
/// persona and one serialized history per persona. Values are stored
/// verbatim; interpreting them is the caller's job.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
