//! Configuration and service-status store.
//!
//! Holds two independent pieces of state: the application [`Configuration`]
//! (persisted under [`CONFIG_KEY`]) and the proxy [`ServiceStatus`] (transient,
//! only ever changed after the backend confirms a start/stop).

use std::sync::Arc;

use iflow_types::{
    Configuration, DashboardError, ServiceStatus, StateError, StorageError, ValidationError,
};
use parking_lot::RwLock;

use crate::commands;
use crate::storage::{KeyValueStore, CONFIG_KEY};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct StoreState {
    config: Option<Configuration>,
    status: ServiceStatus,
    loading: bool,
}

/// Clears the loading flag when dropped, including when the owning future
/// is abandoned mid-call.
struct LoadingGuard {
    state: Arc<RwLock<StoreState>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.write().loading = false;
    }
}

#[derive(Clone)]
pub struct ConfigStore {
    transport: Transport,
    storage: Arc<dyn KeyValueStore>,
    state: Arc<RwLock<StoreState>>,
}

impl ConfigStore {
    pub fn new(transport: Transport, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, storage, state: Arc::new(RwLock::new(StoreState::default())) }
    }

    /// Current configuration; `None` until [`load_config`](Self::load_config) ran.
    pub fn config(&self) -> Option<Configuration> {
        self.state.read().config.clone()
    }

    pub fn status(&self) -> ServiceStatus {
        self.state.read().status
    }

    /// Whether a start/stop is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Load the persisted configuration and make it current.
    ///
    /// A missing, unreadable, malformed or invalid document yields the
    /// defaults. Defaults are not written back until the user saves.
    pub fn load_config(&self) -> Configuration {
        let config = match self.read_persisted() {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::debug!("no persisted configuration, using defaults");
                Configuration::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load configuration, using defaults");
                Configuration::default()
            }
        };

        self.state.write().config = Some(config.clone());
        config
    }

    fn read_persisted(&self) -> Result<Option<Configuration>, StorageError> {
        let Some(raw) = self.storage.get(CONFIG_KEY)? else {
            return Ok(None);
        };
        let config: Configuration =
            serde_json::from_str(&raw).map_err(|e| StorageError::from_json_error(CONFIG_KEY, &e))?;
        config.validate().map_err(|e| StorageError::Parse {
            key: CONFIG_KEY.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(config))
    }

    /// Persist `config` in full and make it current.
    ///
    /// The write lock is held across the persist so no reader sees a state
    /// other than the old or the new configuration. On any error nothing
    /// changes.
    pub fn save_config(&self, config: Configuration) -> Result<(), DashboardError> {
        config.validate()?;
        let raw = serde_json::to_string(&config)
            .map_err(|e| StorageError::from_json_error(CONFIG_KEY, &e))?;

        let mut state = self.state.write();
        self.storage.set(CONFIG_KEY, &raw)?;
        state.config = Some(config);
        tracing::debug!("configuration saved");
        Ok(())
    }

    /// Current configuration, loading the persisted one first if needed.
    fn current_or_load(&self) -> Configuration {
        match self.config() {
            Some(config) => config,
            None => self.load_config(),
        }
    }

    /// Apply `updater` to the current configuration and save it.
    ///
    /// On a store that has not loaded yet the persisted document is the
    /// starting point, never the defaults.
    pub fn update_config<F>(&self, updater: F) -> Result<Configuration, DashboardError>
    where
        F: FnOnce(&mut Configuration),
    {
        let mut config = self.current_or_load();
        updater(&mut config);
        self.save_config(config.clone())?;
        Ok(config)
    }

    /// Send the current configuration to the backend.
    pub async fn publish_config(&self) -> Result<(), DashboardError> {
        let config = self.current_or_load();
        commands::save_config(&self.transport, &config).await?;
        Ok(())
    }

    /// Adopt the backend's configuration and persist it locally.
    pub async fn fetch_remote_config(&self) -> Result<Configuration, DashboardError> {
        let config = commands::get_config(&self.transport).await?;
        self.save_config(config.clone())?;
        Ok(config)
    }

    fn begin(&self, operation: &str) -> Result<LoadingGuard, StateError> {
        let mut state = self.state.write();
        if state.loading {
            return Err(StateError::Busy { operation: operation.to_string() });
        }
        state.loading = true;
        Ok(LoadingGuard { state: Arc::clone(&self.state) })
    }

    /// Ask the backend to start the proxy on `port`.
    ///
    /// Status flips to running only after the backend confirms. A call made
    /// while another start/stop is in flight fails with `StateError::Busy`.
    pub async fn start_service(&self, port: u16) -> Result<ServiceStatus, DashboardError> {
        if port == 0 {
            return Err(ValidationError::OutOfRange {
                field: "port".to_string(),
                message: "must be between 1 and 65535".to_string(),
            }
            .into());
        }

        let _guard = self.begin("start_service")?;
        commands::start_service(&self.transport, port).await?;

        let status = ServiceStatus::running(port, None)?;
        self.state.write().status = status;
        tracing::info!(port, "proxy service started");
        Ok(status)
    }

    /// Ask the backend to stop the proxy.
    pub async fn stop_service(&self) -> Result<ServiceStatus, DashboardError> {
        let _guard = self.begin("stop_service")?;
        commands::stop_service(&self.transport).await?;

        let status = ServiceStatus::stopped();
        self.state.write().status = status;
        tracing::info!("proxy service stopped");
        Ok(status)
    }

    /// Replace local status with the backend's view.
    pub async fn refresh_status(&self) -> Result<ServiceStatus, DashboardError> {
        let status = commands::get_service_status(&self.transport).await?;
        status.check()?;
        self.state.write().status = status;
        Ok(status)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use crate::transport::HttpBridge;

    fn store_with(storage: MemoryStore) -> ConfigStore {
        let transport = Transport::http_only(HttpBridge::new(&ClientConfig::default()));
        ConfigStore::new(transport, Arc::new(storage))
    }

    #[test]
    fn test_initial_state() {
        let store = store_with(MemoryStore::new());
        assert!(store.config().is_none());
        assert_eq!(store.status(), ServiceStatus::stopped());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_load_defaults_without_persisting() {
        let storage = MemoryStore::new();
        let store = store_with(storage.clone());

        assert_eq!(store.load_config(), Configuration::default());
        assert_eq!(store.config(), Some(Configuration::default()));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_malformed_and_invalid_documents_fall_back() {
        let storage = MemoryStore::new();
        let store = store_with(storage.clone());

        storage.set(CONFIG_KEY, "{not json").unwrap();
        assert_eq!(store.load_config(), Configuration::default());

        storage.set(CONFIG_KEY, r#"{"port": 0}"#).unwrap();
        assert_eq!(store.load_config(), Configuration::default());

        storage.set(CONFIG_KEY, r#"{"port": 70000}"#).unwrap();
        assert_eq!(store.load_config(), Configuration::default());
    }

    #[test]
    fn test_partial_document_keeps_saved_fields() {
        let storage = MemoryStore::new();
        storage.set(CONFIG_KEY, r#"{"port": 8123, "language": "en-US"}"#).unwrap();
        let store = store_with(storage);

        let config = store.load_config();
        assert_eq!(config.listen_port, 8123);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.retry_count, 3);
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStore::new();
        let store = store_with(storage.clone());
        let config = Configuration {
            listen_port: 9001,
            upstream_base_url: "http://localhost:4000/v1".to_string(),
            retry_count: 0,
            timeout_seconds: 5,
            theme: iflow_types::Theme::Light,
            language: "en-US".to_string(),
        };

        store.save_config(config.clone()).unwrap();
        assert_eq!(store.config(), Some(config.clone()));

        // A fresh store over the same storage sees the saved document
        let reopened = store_with(storage);
        assert_eq!(reopened.load_config(), config);
    }

    #[test]
    fn test_invalid_save_has_no_side_effect() {
        let storage = MemoryStore::new();
        let store = store_with(storage.clone());
        store.load_config();

        let bad = Configuration { timeout_seconds: 0, ..Configuration::default() };
        let err = store.save_config(bad).unwrap_err();
        assert!(err.is_validation());
        assert!(storage.is_empty());
        assert_eq!(store.config(), Some(Configuration::default()));
    }

    #[test]
    fn test_update_config() {
        let store = store_with(MemoryStore::new());
        let updated = store.update_config(|c| c.theme = c.theme.toggled()).unwrap();
        assert_eq!(updated.theme, iflow_types::Theme::Light);
        assert_eq!(store.load_config().theme, iflow_types::Theme::Light);
    }

    #[test]
    fn test_update_before_load_keeps_persisted_fields() {
        let storage = MemoryStore::new();
        storage
            .set(
                CONFIG_KEY,
                r#"{"port":9100,"baseUrl":"http://localhost:4000/v1","language":"en-US"}"#,
            )
            .unwrap();
        let store = store_with(storage.clone());

        let updated = store.update_config(|c| c.theme = iflow_types::Theme::Light).unwrap();
        assert_eq!(updated.listen_port, 9100);
        assert_eq!(updated.upstream_base_url, "http://localhost:4000/v1");
        assert_eq!(updated.language, "en-US");

        let reloaded = store_with(storage).load_config();
        assert_eq!(reloaded, updated);
        assert_eq!(reloaded.theme, iflow_types::Theme::Light);
    }

    #[tokio::test]
    async fn test_zero_port_rejected_before_dispatch() {
        let store = store_with(MemoryStore::new());
        let err = store.start_service(0).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!store.is_loading());
        assert_eq!(store.status(), ServiceStatus::stopped());
    }
}
