//! Application state wiring storage, configuration and the gateway.
//!
//! The session manager is generic over its ports; AppState pins them to the
//! concrete infra implementations chosen at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use roteiro_core::chat::{ChatSession, ChatView, HistoryStore, SessionSettings};
use roteiro_core::storage::kv_store::KvStore;
use roteiro_infra::config::load_client_config;
use roteiro_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use roteiro_infra::http::HttpResponseGateway;
use roteiro_infra::memory::MemoryKvStore;
use roteiro_infra::sqlite::{DatabasePool, SqliteKvStore};
use roteiro_types::config::ClientConfig;
use roteiro_types::error::RepositoryError;

/// Storage selected at startup: the SQLite file, or memory for `--ephemeral`.
#[derive(Clone)]
pub enum AppKvStore {
    Sqlite(SqliteKvStore),
    Memory(Arc<MemoryKvStore>),
}

impl AppKvStore {
    pub fn kind(&self) -> &'static str {
        match self {
            AppKvStore::Sqlite(_) => "sqlite",
            AppKvStore::Memory(_) => "memory",
        }
    }
}

impl KvStore for AppKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match self {
            AppKvStore::Sqlite(store) => store.get(key).await,
            AppKvStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        match self {
            AppKvStore::Sqlite(store) => store.set(key, value).await,
            AppKvStore::Memory(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        match self {
            AppKvStore::Sqlite(store) => store.delete(key).await,
            AppKvStore::Memory(store) => store.delete(key).await,
        }
    }
}

/// The session type every command drives.
pub type AppSession<V> = ChatSession<AppKvStore, HttpResponseGateway, V>;

/// Shared application state.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
    pub kv: AppKvStore,
}

impl AppState {
    /// Resolve the data directory, load config, and open storage.
    pub async fn init(data_dir: Option<&Path>, ephemeral: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        let config = load_client_config(&data_dir).await;

        let kv = if ephemeral {
            tracing::debug!("Using in-memory storage");
            AppKvStore::Memory(Arc::new(MemoryKvStore::new()))
        } else {
            ensure_data_dir(&data_dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
            let pool = DatabasePool::open(&data_dir)
                .await
                .with_context(|| format!("Failed to open database in {}", data_dir.display()))?;
            AppKvStore::Sqlite(SqliteKvStore::new(pool))
        };

        tracing::debug!(data_dir = %data_dir.display(), base_url = %config.base_url, "State initialized");
        Ok(Self { data_dir, config, kv })
    }

    /// Persona selection and histories.
    pub fn history(&self) -> HistoryStore<AppKvStore> {
        HistoryStore::new(self.kv.clone())
    }

    /// Client for the configured answer service.
    pub fn gateway(&self) -> anyhow::Result<HttpResponseGateway> {
        HttpResponseGateway::new(&self.config.base_url)
            .with_context(|| format!("Invalid answer service URL '{}'", self.config.base_url))
    }

    /// A chat session drawing through `view`. Call `initialize` before use.
    pub fn session<V: ChatView>(&self, view: V) -> anyhow::Result<AppSession<V>> {
        Ok(ChatSession::new(
            self.history(),
            self.gateway()?,
            view,
            SessionSettings::from_config(&self.config),
        ))
    }
}
