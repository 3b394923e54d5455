//! Wiring of the store and façades over one transport.

use std::sync::Arc;

use crate::credentials::CredentialFacade;
use crate::monitor::Monitor;
use crate::storage::KeyValueStore;
use crate::store::ConfigStore;
use crate::transport::Transport;

/// Everything a view needs, sharing one transport and one storage.
#[derive(Clone)]
pub struct Dashboard {
    pub store: ConfigStore,
    pub credentials: CredentialFacade,
    pub monitor: Monitor,
}

impl Dashboard {
    pub fn new(transport: Transport, storage: Arc<dyn KeyValueStore>) -> Self {
        tracing::info!(transport = %transport.kind(), "dashboard client ready");
        Self {
            store: ConfigStore::new(transport.clone(), Arc::clone(&storage)),
            credentials: CredentialFacade::new(transport.clone(), storage),
            monitor: Monitor::new(transport),
        }
    }
}
