//! State actions module
//!
//! Each action runs a façade call on the UI event loop and copies the
//! settled result into [`AppState`]. Errors go to the caller's `on_result`
//! callback; presenting them is up to the view.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use iflow_client::{filter_logs, Dashboard};
use iflow_types::{Configuration, Credentials, DashboardError, LogEntry, ServiceStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::AppState;

/// Native confirmation dialog.
pub fn confirm_dialog(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Proxy start/stop actions
#[derive(Clone)]
pub struct ServiceActions {
    state: AppState,
    dashboard: Dashboard,
}

impl ServiceActions {
    pub fn new(state: AppState, dashboard: Dashboard) -> Self {
        Self { state, dashboard }
    }

    /// Start the proxy on `port`.
    pub fn start(
        &self,
        port: u16,
        on_result: impl Fn(Result<ServiceStatus, DashboardError>) + 'static,
    ) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            s.loading.set(true);
            let result = d.store.start_service(port).await;
            s.sync_store(&d);
            on_result(result);
        });
    }

    /// Stop the proxy.
    pub fn stop(&self, on_result: impl Fn(Result<ServiceStatus, DashboardError>) + 'static) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            s.loading.set(true);
            let result = d.store.stop_service().await;
            s.sync_store(&d);
            on_result(result);
        });
    }

    /// Stop when running, otherwise start on the configured port.
    pub fn toggle(&self, on_result: impl Fn(Result<ServiceStatus, DashboardError>) + 'static) {
        if self.state.status.get_untracked().is_running() {
            self.stop(on_result);
        } else {
            let port = self.state.config.get_untracked().unwrap_or_default().listen_port;
            self.start(port, on_result);
        }
    }

    /// Refresh proxy status from the backend
    pub fn refresh_status(&self) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            if let Err(e) = d.store.refresh_status().await {
                log::warn!("status refresh failed: {}", e);
            }
            s.sync_store(&d);
        });
    }
}

/// Config-related actions
#[derive(Clone)]
pub struct ConfigActions {
    state: AppState,
    dashboard: Dashboard,
}

impl ConfigActions {
    pub fn new(state: AppState, dashboard: Dashboard) -> Self {
        Self { state, dashboard }
    }

    /// Reload the persisted configuration.
    pub fn reload(&self) {
        let config = self.dashboard.store.load_config();
        self.state.config.set(Some(config));
    }

    /// Persist `config` locally, then hand it to the backend.
    pub fn save(
        &self,
        config: Configuration,
        on_result: impl Fn(Result<(), DashboardError>) + 'static,
    ) {
        if let Err(e) = self.dashboard.store.save_config(config) {
            on_result(Err(e));
            return;
        }
        self.state.config.set(self.dashboard.store.config());

        let d = self.dashboard.clone();
        spawn_local(async move {
            on_result(d.store.publish_config().await);
        });
    }
}

/// OAuth and API-key actions
#[derive(Clone)]
pub struct AuthActions {
    state: AppState,
    dashboard: Dashboard,
}

impl AuthActions {
    pub fn new(state: AppState, dashboard: Dashboard) -> Self {
        Self { state, dashboard }
    }

    /// Load saved credentials on mount
    pub fn check(&self) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            match d.credentials.check_auth().await {
                Ok(auth) => s.auth.set(auth),
                Err(e) => log::warn!("failed to load auth state: {}", e),
            }
        });
    }

    pub fn login(&self, on_result: impl Fn(Result<Credentials, DashboardError>) + 'static) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            let result = d.credentials.start_oauth_login().await;
            s.auth.set(d.credentials.auth_state());
            on_result(result);
        });
    }

    pub fn refresh_token(&self, on_result: impl Fn(Result<Credentials, DashboardError>) + 'static) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            let result = d.credentials.refresh_token().await;
            s.auth.set(d.credentials.auth_state());
            on_result(result);
        });
    }

    /// Log out after `confirm` approves; `Ok(false)` when declined.
    pub fn logout(
        &self,
        confirm: impl FnOnce() -> bool + 'static,
        on_result: impl Fn(Result<bool, DashboardError>) + 'static,
    ) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            let result = d.credentials.logout(confirm).await;
            s.auth.set(d.credentials.auth_state());
            on_result(result);
        });
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), DashboardError> {
        self.dashboard.credentials.save_api_key_direct(key)
    }
}

/// Refresh period of the dashboard and monitor views.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1_000;

/// Stops a loop started by [`MonitorActions::start_polling`].
#[derive(Clone, Debug)]
pub struct PollHandle {
    active: Rc<Cell<bool>>,
}

impl PollHandle {
    fn new() -> Self {
        Self { active: Rc::new(Cell::new(true)) }
    }

    /// The loop exits before its next round.
    pub fn stop(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Traffic log and metrics actions
#[derive(Clone)]
pub struct MonitorActions {
    state: AppState,
    dashboard: Dashboard,
}

impl MonitorActions {
    pub fn new(state: AppState, dashboard: Dashboard) -> Self {
        Self { state, dashboard }
    }

    pub fn refresh_logs(&self) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            match d.monitor.fetch_logs().await {
                Ok(logs) => s.logs.set(logs),
                Err(e) => log::warn!("failed to fetch logs: {}", e),
            }
        });
    }

    /// Counters and host metrics.
    pub fn refresh_metrics(&self) {
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            load_metrics(s, &d).await;
        });
    }

    /// Refresh status, metrics and logs every `interval_ms` until the
    /// returned handle is stopped.
    pub fn start_polling(&self, interval_ms: u32) -> PollHandle {
        let handle = PollHandle::new();
        let active = handle.clone();
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            while active.is_active() {
                if let Err(e) = d.store.refresh_status().await {
                    log::warn!("status refresh failed: {}", e);
                }
                s.sync_store(&d);
                load_metrics(s, &d).await;
                match d.monitor.fetch_logs().await {
                    Ok(logs) => s.logs.set(logs),
                    Err(e) => log::warn!("failed to fetch logs: {}", e),
                }
                TimeoutFuture::new(interval_ms).await;
            }
            log::debug!("monitor polling stopped");
        });
        handle
    }

    pub fn clear_logs(
        &self,
        confirm: impl FnOnce() -> bool,
        on_result: impl Fn(Result<(), DashboardError>) + 'static,
    ) {
        if !confirm() {
            return;
        }
        let s = self.state;
        let d = self.dashboard.clone();
        spawn_local(async move {
            let result = d.monitor.clear_logs().await;
            s.logs.set(d.monitor.cached_logs());
            on_result(result);
        });
    }

    /// Logs matching `term` (path or model, case-insensitive). Tracks `logs`.
    pub fn filtered(&self, term: &str) -> Vec<LogEntry> {
        self.state.logs.with(|logs| filter_logs(logs, term).into_iter().cloned().collect())
    }
}

async fn load_metrics(s: AppState, d: &Dashboard) {
    match d.monitor.stats().await {
        Ok(stats) => s.stats.set(stats),
        Err(e) => log::warn!("failed to fetch stats: {}", e),
    }
    match d.monitor.system_info().await {
        Ok(info) => s.system.set(info),
        Err(e) => log::warn!("failed to fetch system info: {}", e),
    }
}
