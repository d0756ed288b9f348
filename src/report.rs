//! Per-port usage reports.

use crate::model::PortUsage;
use crate::port::Port;
use crate::probe::is_port_in_use;
use crate::system::Inspector;

/// Checks `port` and, if it is taken, tries to name the owner.
///
/// Failing to identify the owner leaves `process` unset; it never changes
/// the availability answer.
pub fn port_usage(inspector: &Inspector, port: Port) -> PortUsage {
    if !is_port_in_use(port) {
        return PortUsage::free(port);
    }

    let owner = inspector.process_using_port(port);
    PortUsage::used(port, owner.exists.then_some(owner))
}
