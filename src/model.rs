//! Data models for port and process reports.
//!
//! Every value here is built fresh for a single query and carries no identity
//! beyond its contents.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::port::Port;

/// An operating-system process identifier.
///
/// Nothing guarantees the pid still refers to the same process by the time
/// it is used.
pub type Pid = u32;

/// Metadata about a process, as read from the process table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: Pid,
    /// `false` means the process was not found; the other fields are then empty.
    pub exists: bool,
    pub command: String,
    pub user: String,
    pub start_time: String,
}

impl ProcessInfo {
    /// The "not found" record for `pid`.
    pub fn missing(pid: Pid) -> Self {
        Self {
            pid,
            ..Self::default()
        }
    }
}

/// Whether a port is in use and, if known, who holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortUsage {
    pub port: Port,
    pub is_used: bool,
    /// Only ever set when `is_used` is true, and even then only when the
    /// owner could be resolved.
    pub process: Option<ProcessInfo>,
}

impl PortUsage {
    pub fn free(port: Port) -> Self {
        Self {
            port,
            is_used: false,
            process: None,
        }
    }

    pub fn used(port: Port, process: Option<ProcessInfo>) -> Self {
        Self {
            port,
            is_used: true,
            process,
        }
    }
}

/// The result of scanning a run of consecutive ports.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub ports: Vec<PortUsage>,
    pub timestamp: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    #[test]
    fn test_missing_process_is_empty() {
        let info = ProcessInfo::missing(4242);
        assert_eq!(info.pid, 4242);
        assert!(!info.exists);
        assert!(info.command.is_empty());
        assert!(info.user.is_empty());
        assert!(info.start_time.is_empty());
    }

    #[test]
    fn test_port_usage_json_shape() {
        let json = serde_json::to_value(PortUsage::free(port(5000))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"port": 5000, "is_used": false, "process": null})
        );

        let owner = ProcessInfo {
            pid: 77,
            exists: true,
            command: "python app.py".to_string(),
            user: "dev".to_string(),
            start_time: "Sat Oct 17 09:00:00 2026".to_string(),
        };
        let json = serde_json::to_value(PortUsage::used(port(5000), Some(owner))).unwrap();
        assert_eq!(json["is_used"], true);
        assert_eq!(json["process"]["pid"], 77);
        assert_eq!(json["process"]["exists"], true);
        assert_eq!(json["process"]["start_time"], "Sat Oct 17 09:00:00 2026");
    }

    #[test]
    fn test_used_without_owner_keeps_process_absent() {
        let usage = PortUsage::used(port(5000), None);
        assert!(usage.is_used);
        assert!(usage.process.is_none());
    }
}
