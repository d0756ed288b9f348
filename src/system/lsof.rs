//! Socket table reader backed by `lsof`.
//!
//! Output is the default column layout:
//!
//! ```text
//! COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
//! python3 4242 alice    3u  IPv4  51234      0t0  TCP 127.0.0.1:5000 (LISTEN)
//! ```
//!
//! `-P -n` keep ports and addresses numeric.

use std::collections::BTreeSet;
use std::process::{Command, Stdio};

use crate::error::InspectError;
use crate::model::Pid;
use crate::port::Port;
use crate::system::SocketTable;

const PID_COLUMN: usize = 1;
const PROTOCOL_COLUMN: usize = 7;
const NAME_COLUMN: usize = 8;

pub struct Lsof;

impl Lsof {
    fn run(args: &[&str]) -> Result<String, InspectError> {
        let output = Command::new("lsof")
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| InspectError::ToolUnavailable {
                tool: "lsof",
                source,
            })?;

        // lsof exits 1 when nothing matches, which is an empty table, not a failure.
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SocketTable for Lsof {
    fn ports_for_pid(&self, pid: Pid) -> Result<BTreeSet<Port>, InspectError> {
        let pid = pid.to_string();
        let stdout = Self::run(&["-iTCP", "-P", "-n", "-a", "-p", &pid])?;
        Ok(parse_process_ports(&stdout))
    }

    fn listening_pid(&self, port: Port) -> Result<Option<Pid>, InspectError> {
        let filter = format!("-iTCP:{port}");
        let stdout = Self::run(&[filter.as_str(), "-P", "-n", "-sTCP:LISTEN"])?;
        parse_listener_pid(&stdout)
    }
}

/// Collects the local TCP ports named in an `lsof -i` listing.
///
/// Non-TCP rows and names without a numeric port, such as `*:*`, are skipped.
fn parse_process_ports(output: &str) -> BTreeSet<Port> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.get(PROTOCOL_COLUMN) {
                Some(&"TCP") => columns.get(NAME_COLUMN).copied(),
                _ => None,
            }
        })
        .filter_map(local_port)
        .collect()
}

/// Extracts the local port from a NAME field like `127.0.0.1:5000` or
/// `[::1]:5000->[::1]:61234`.
fn local_port(name: &str) -> Option<Port> {
    let local = name.split("->").next()?;
    let (_, port) = local.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse().ok()
}

/// Reads the owning pid from the first data row of an `lsof` listing.
fn parse_listener_pid(output: &str) -> Result<Option<Pid>, InspectError> {
    let Some(row) = output.lines().nth(1) else {
        return Ok(None);
    };

    let malformed = || InspectError::Malformed {
        tool: "lsof",
        line: row.to_string(),
    };

    let pid = row.split_whitespace().nth(PID_COLUMN).ok_or_else(malformed)?;
    pid.parse().map(Some).map_err(|_| malformed())
}
