//! Proxy service run status.

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Status as reported over the wire, before normalisation.
#[derive(Debug, Deserialize)]
struct WireServiceStatus {
    running: bool,
    #[serde(default)]
    port: u16,
    #[serde(default)]
    pid: Option<u32>,
}

/// Proxy service status.
///
/// Fields are private so `running == false => port == 0` holds for every
/// value. Deserialization normalises a stopped status to port 0 and, like
/// [`ServiceStatus::running`], rejects a running status without a port.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "WireServiceStatus")]
pub struct ServiceStatus {
    running: bool,
    port: u16,
    #[serde(rename = "pid", skip_serializing_if = "Option::is_none")]
    process_id: Option<u32>,
}

impl TryFrom<WireServiceStatus> for ServiceStatus {
    type Error = StateError;

    fn try_from(wire: WireServiceStatus) -> Result<Self, Self::Error> {
        if wire.running {
            Self::running(wire.port, wire.pid)
        } else {
            Ok(Self::stopped())
        }
    }
}

impl ServiceStatus {
    /// Not accepting traffic.
    pub const fn stopped() -> Self {
        Self { running: false, port: 0, process_id: None }
    }

    /// Accepting traffic on `port`.
    pub fn running(port: u16, process_id: Option<u32>) -> Result<Self, StateError> {
        if port == 0 {
            return Err(StateError::Inconsistent { running: true, port });
        }
        Ok(Self { running: true, port, process_id })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Listen port; 0 while stopped.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn process_id(&self) -> Option<u32> {
        self.process_id
    }

    /// Re-check the status invariant.
    pub fn check(&self) -> Result<(), StateError> {
        if !self.running && self.port != 0 {
            return Err(StateError::Inconsistent { running: self.running, port: self.port });
        }
        Ok(())
    }

    /// Admin panel served by the running proxy.
    pub fn admin_url(&self) -> Option<String> {
        self.running.then(|| format!("http://localhost:{}/admin", self.port))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_has_zero_port() {
        let status = ServiceStatus::stopped();
        assert!(!status.is_running());
        assert_eq!(status.port(), 0);
        assert!(status.check().is_ok());
        assert_eq!(status, ServiceStatus::default());
    }

    #[test]
    fn test_running_requires_port() {
        assert!(ServiceStatus::running(0, None).is_err());

        let status = ServiceStatus::running(8000, Some(4242)).unwrap();
        assert!(status.is_running());
        assert_eq!(status.port(), 8000);
        assert_eq!(status.process_id(), Some(4242));
        assert_eq!(status.admin_url().as_deref(), Some("http://localhost:8000/admin"));
    }

    #[test]
    fn test_stopped_wire_status_is_normalised() {
        // Backends may keep reporting the last port after the process exits.
        let status: ServiceStatus =
            serde_json::from_str(r#"{"running": false, "port": 8000, "pid": 17}"#).unwrap();
        assert_eq!(status, ServiceStatus::stopped());
        assert!(status.admin_url().is_none());
    }

    #[test]
    fn test_running_wire_status() {
        let status: ServiceStatus =
            serde_json::from_str(r#"{"running": true, "port": 8080, "pid": 99}"#).unwrap();
        assert_eq!(status, ServiceStatus::running(8080, Some(99)).unwrap());
    }

    #[test]
    fn test_running_wire_status_without_port_rejected() {
        let result = serde_json::from_str::<ServiceStatus>(r#"{"running": true, "port": 0}"#);
        assert!(result.is_err());

        let missing = serde_json::from_str::<ServiceStatus>(r#"{"running": true}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_serialize_omits_missing_pid() {
        let json = serde_json::to_value(ServiceStatus::stopped()).unwrap();
        assert_eq!(json, serde_json::json!({"running": false, "port": 0}));

        let json = serde_json::to_value(ServiceStatus::running(8000, None).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"running": true, "port": 8000}));
    }
}
