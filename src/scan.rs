//! Scanning a run of consecutive ports.

use chrono::Local;

use crate::model::{PortUsage, ScanReport};
use crate::port::Port;
use crate::report::port_usage;
use crate::system::Inspector;

/// Reports on `count` consecutive ports starting at `start`, in port order.
///
/// Each call probes live state. The run stops at 65535, so fewer than `count`
/// entries come back near the top of the range.
pub fn scan(inspector: &Inspector, start: Port, count: u32) -> Vec<PortUsage> {
    start
        .span(count)
        .map(|port| port_usage(inspector, port))
        .collect()
}

/// Scans and stamps the result with the current local time.
pub fn scan_report(inspector: &Inspector, start: Port, count: u32) -> ScanReport {
    let ports = scan(inspector, start, count);
    ScanReport {
        ports,
        timestamp: Local::now(),
    }
}
