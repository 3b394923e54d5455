//! Global application state and boot sequence.

use std::cell::OnceCell;
use std::sync::Arc;

use iflow_client::config::DEFAULT_BASE_URL;
use iflow_client::{Bridge, ClientConfig, Dashboard, HttpBridge, Transport};
use iflow_types::{AuthState, Configuration, LogEntry, ProxyStats, ServiceStatus, SystemInfo};
use leptos::prelude::*;

use crate::storage::LocalStorage;
use crate::tauri::TauriBridge;

thread_local! {
    static DASHBOARD: OnceCell<Dashboard> = const { OnceCell::new() };
}

/// The dashboard client built by [`boot`].
pub fn dashboard() -> Option<Dashboard> {
    DASHBOARD.with(|cell| cell.get().cloned())
}

/// Reactive mirror of store and façade state.
///
/// Signals are only written after a façade call settles, so views never see
/// a status the backend has not confirmed.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: RwSignal<Option<Configuration>>,
    pub status: RwSignal<ServiceStatus>,
    pub loading: RwSignal<bool>,
    pub auth: RwSignal<AuthState>,
    pub logs: RwSignal<Vec<LogEntry>>,
    pub stats: RwSignal<ProxyStats>,
    pub system: RwSignal<SystemInfo>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            config: RwSignal::new(None),
            status: RwSignal::new(ServiceStatus::stopped()),
            loading: RwSignal::new(false),
            auth: RwSignal::new(AuthState::signed_out()),
            logs: RwSignal::new(vec![]),
            stats: RwSignal::new(ProxyStats::default()),
            system: RwSignal::new(SystemInfo::default()),
        }
    }

    /// Copy store snapshots into the signals.
    pub fn sync_store(&self, dashboard: &Dashboard) {
        self.config.set(dashboard.store.config());
        self.status.set(dashboard.store.status());
        self.loading.set(dashboard.store.is_loading());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_transport() -> Transport {
    let native = TauriBridge::detect().map(|bridge| Arc::new(bridge) as Arc<dyn Bridge>);
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Transport::new(native, HttpBridge::new(&ClientConfig::new(origin)))
}

/// Initialise logging, build the client and provide [`AppState`] as context.
///
/// Call once, from the root component, so the state lands in its context.
pub fn boot() -> AppState {
    console_error_panic_hook::set_once();

    // Ignore error if already initialized
    drop(console_log::init_with_level(log::Level::Debug));

    let dashboard = Dashboard::new(build_transport(), Arc::new(LocalStorage));
    dashboard.store.load_config();

    let state = AppState::new();
    state.sync_store(&dashboard);
    provide_context(state);

    DASHBOARD.with(|cell| {
        if cell.set(dashboard).is_err() {
            log::warn!("dashboard already booted");
        }
    });

    log::info!("iflow2api dashboard ready");
    state
}
