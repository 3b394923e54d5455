//! Traffic logs and metrics.

use std::sync::Arc;

use iflow_types::{DashboardError, LogEntry, ProxyStats, SystemInfo};
use parking_lot::RwLock;

use crate::commands;
use crate::transport::Transport;

/// Read-only view over backend-owned logs and counters.
#[derive(Clone)]
pub struct Monitor {
    transport: Transport,
    logs: Arc<RwLock<Vec<LogEntry>>>,
}

impl Monitor {
    pub fn new(transport: Transport) -> Self {
        Self { transport, logs: Arc::new(RwLock::new(Vec::new())) }
    }

    /// Logs from the last successful fetch.
    pub fn cached_logs(&self) -> Vec<LogEntry> {
        self.logs.read().clone()
    }

    pub async fn fetch_logs(&self) -> Result<Vec<LogEntry>, DashboardError> {
        let logs = commands::get_logs(&self.transport).await?;
        *self.logs.write() = logs.clone();
        Ok(logs)
    }

    /// Clear backend logs; the local cache empties only once the backend confirms.
    pub async fn clear_logs(&self) -> Result<(), DashboardError> {
        commands::clear_logs(&self.transport).await?;
        self.logs.write().clear();
        tracing::info!("traffic logs cleared");
        Ok(())
    }

    pub async fn stats(&self) -> Result<ProxyStats, DashboardError> {
        Ok(commands::get_stats(&self.transport).await?)
    }

    pub async fn system_info(&self) -> Result<SystemInfo, DashboardError> {
        Ok(commands::get_system_info(&self.transport).await?)
    }
}

/// Entries whose path or model contains `term`, ignoring case.
pub fn filter_logs<'a>(entries: &'a [LogEntry], term: &str) -> Vec<&'a LogEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return entries.iter().collect();
    }
    entries.iter().filter(|e| e.matches(&term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, model: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp_label: "14:30:25".to_string(),
            http_method: "POST".to_string(),
            path: path.to_string(),
            status_code: 200,
            model_name: model.map(str::to_string),
            duration_millis: None,
        }
    }

    #[test]
    fn test_filter_logs() {
        let logs = vec![
            entry("/v1/chat/completions", Some("glm-4.7")),
            entry("/v1/models", None),
            entry("/v1/messages", Some("claude-sonnet-4-5")),
        ];

        assert_eq!(filter_logs(&logs, "").len(), 3);
        assert_eq!(filter_logs(&logs, "  ").len(), 3);

        let by_model = filter_logs(&logs, "CLAUDE");
        assert_eq!(by_model.len(), 1);
        assert_eq!(by_model[0].path, "/v1/messages");

        let by_path = filter_logs(&logs, "/v1/m");
        assert_eq!(by_path.len(), 2);

        assert!(filter_logs(&logs, "gemini").is_empty());
    }
}
