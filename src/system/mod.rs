//! Process and socket table access.
//!
//! The readers are traits so the data source can change per platform. On Unix
//! they shell out to `ps` and `lsof`. Readers report failures through
//! `InspectError`; the [`Inspector`] facade turns every failure into an
//! ordinary "not found" value.

#[cfg(unix)]
mod lsof;
#[cfg(unix)]
mod ps;

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::InspectError;
use crate::model::{Pid, ProcessInfo};
use crate::port::Port;

/// Looks up process metadata by pid.
pub trait ProcessTable {
    /// `Ok(None)` means the process does not exist.
    fn lookup(&self, pid: Pid) -> Result<Option<ProcessInfo>, InspectError>;
}

/// Maps between processes and the TCP ports they hold.
pub trait SocketTable {
    /// Ports the process has open, without duplicates.
    fn ports_for_pid(&self, pid: Pid) -> Result<BTreeSet<Port>, InspectError>;

    /// The pid listening on `port`, if any.
    fn listening_pid(&self, port: Port) -> Result<Option<Pid>, InspectError>;
}

/// Combines a process table and a socket table behind infallible queries.
pub struct Inspector {
    processes: Box<dyn ProcessTable>,
    sockets: Box<dyn SocketTable>,
}

impl Inspector {
    pub fn new(
        processes: impl ProcessTable + 'static,
        sockets: impl SocketTable + 'static,
    ) -> Self {
        Self {
            processes: Box::new(processes),
            sockets: Box::new(sockets),
        }
    }

    /// Readers for the current platform.
    pub fn system() -> Self {
        #[cfg(unix)]
        {
            Self::new(ps::Ps, lsof::Lsof)
        }

        #[cfg(not(unix))]
        {
            Self::new(Unsupported, Unsupported)
        }
    }

    /// Metadata for `pid`; `exists` is false if it cannot be found.
    pub fn process_info(&self, pid: Pid) -> ProcessInfo {
        match self.processes.lookup(pid) {
            Ok(Some(info)) => info,
            Ok(None) => ProcessInfo::missing(pid),
            Err(e) => {
                debug!(pid, error = %e, "process lookup unavailable");
                ProcessInfo::missing(pid)
            }
        }
    }

    /// TCP ports held by `pid`; empty when nothing can be determined.
    pub fn ports_used_by_process(&self, pid: Pid) -> BTreeSet<Port> {
        self.sockets.ports_for_pid(pid).unwrap_or_else(|e| {
            debug!(pid, error = %e, "socket lookup unavailable");
            BTreeSet::new()
        })
    }

    /// The process listening on `port`.
    ///
    /// Returns a record with `exists == false` when there is no listener or it
    /// cannot be identified.
    pub fn process_using_port(&self, port: Port) -> ProcessInfo {
        match self.sockets.listening_pid(port) {
            Ok(Some(pid)) => self.process_info(pid),
            Ok(None) => ProcessInfo::default(),
            Err(e) => {
                debug!(port = %port, error = %e, "listener lookup unavailable");
                ProcessInfo::default()
            }
        }
    }
}

/// Readers for platforms without `ps`/`lsof`.
#[cfg(not(unix))]
struct Unsupported;

#[cfg(not(unix))]
impl ProcessTable for Unsupported {
    fn lookup(&self, _pid: Pid) -> Result<Option<ProcessInfo>, InspectError> {
        Err(InspectError::PlatformNotSupported)
    }
}

#[cfg(not(unix))]
impl SocketTable for Unsupported {
    fn ports_for_pid(&self, _pid: Pid) -> Result<BTreeSet<Port>, InspectError> {
        Err(InspectError::PlatformNotSupported)
    }

    fn listening_pid(&self, _port: Port) -> Result<Option<Pid>, InspectError> {
        Err(InspectError::PlatformNotSupported)
    }
}
