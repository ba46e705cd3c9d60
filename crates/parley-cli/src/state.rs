//! Application state wiring the adapters together.
//!
//! The controller is generic over `ChatBackend` and `KvStore`; AppState pins
//! it to the HTTP backend and the SQLite store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use parley_core::chat::controller::{ChatController, ControllerOptions};
use parley_core::chat::history::ChatLogStore;
use parley_infra::config::{ensure_data_dir, load_client_config, resolve_data_dir};
use parley_infra::http::HttpChatBackend;
use parley_infra::sqlite::kv::SqliteKvStore;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::ClientConfig;
use parley_types::wire::RequestShape;

/// Concrete controller type pinned to infra implementations.
pub type ConcreteController = ChatController<HttpChatBackend, SqliteKvStore>;

/// Settings from the command line that take precedence over `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub single_turn: bool,
}

impl Overrides {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if self.single_turn {
            config.request_shape = RequestShape::SingleTurn;
        }
    }
}

/// Shared application state for all commands.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ClientConfig,
    pub db_pool: DatabasePool,
    pub backend: Arc<HttpChatBackend>,
}

impl AppState {
    /// Initialize the application state: resolve config, open the DB, build the backend.
    pub async fn init(overrides: &Overrides) -> anyhow::Result<Self> {
        let data_dir = overrides.data_dir.clone().unwrap_or_else(resolve_data_dir);

        ensure_data_dir(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let mut config = load_client_config(&data_dir).await;
        overrides.apply(&mut config);

        let db_pool = DatabasePool::open_in(&data_dir)
            .await
            .context("Failed to open the chat database")?;

        let backend = HttpChatBackend::new(&config).context("Invalid chat endpoint configuration")?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            endpoint = %config.endpoint,
            shape = %config.request_shape,
            "Application state initialized"
        );

        Ok(Self {
            data_dir,
            config,
            db_pool,
            backend: Arc::new(backend),
        })
    }

    /// The persisted chat log under the configured key.
    pub fn chat_log_store(&self) -> ChatLogStore<SqliteKvStore> {
        ChatLogStore::new(
            SqliteKvStore::new(self.db_pool.clone()),
            self.config.storage_key.clone(),
        )
    }

    /// A controller with the persisted log already restored.
    pub async fn controller(&self) -> ConcreteController {
        let mut controller = ChatController::new(
            Arc::clone(&self.backend),
            self.chat_log_store(),
            ControllerOptions::from(&self.config),
        );
        controller.initialize().await;
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut config = ClientConfig::default();
        let overrides = Overrides {
            data_dir: None,
            endpoint: Some("http://10.0.0.2:8000".to_string()),
            single_turn: true,
        };

        overrides.apply(&mut config);

        assert_eq!(config.endpoint, "http://10.0.0.2:8000");
        assert_eq!(config.request_shape, RequestShape::SingleTurn);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = ClientConfig {
            request_shape: RequestShape::SingleTurn,
            ..ClientConfig::default()
        };

        Overrides::default().apply(&mut config);

        assert_eq!(config.endpoint, "http://localhost:8000");
        assert_eq!(config.request_shape, RequestShape::SingleTurn);
    }

    #[tokio::test]
    async fn test_init_with_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            data_dir: Some(dir.path().join("nested")),
            ..Overrides::default()
        };

        let state = AppState::init(&overrides).await.unwrap();
        assert!(state.data_dir.join("parley.db").exists());

        let controller = state.controller().await;
        assert!(controller.log().is_empty());
        assert_eq!(controller.history().key(), "chatLog");
    }

    #[tokio::test]
    async fn test_init_rejects_bad_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            data_dir: Some(dir.path().to_path_buf()),
            endpoint: Some("not a url".to_string()),
            single_turn: false,
        };

        assert!(AppState::init(&overrides).await.is_err());
    }
}
