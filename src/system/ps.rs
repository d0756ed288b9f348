//! Process table reader backed by `ps`.
//!
//! Column contract: `pid user lstart command`, no header. `lstart` is always
//! five tokens (`Sat Oct 17 09:00:00 2026`); the command is whatever is left
//! on the line, spaces included.

use std::process::{Command, Stdio};

use crate::error::InspectError;
use crate::model::{Pid, ProcessInfo};
use crate::system::ProcessTable;

const LSTART_FIELDS: usize = 5;

pub struct Ps;

impl ProcessTable for Ps {
    fn lookup(&self, pid: Pid) -> Result<Option<ProcessInfo>, InspectError> {
        let output = Command::new("ps")
            .args(["-p", &pid.to_string(), "-o", "pid=,user=,lstart=,command="])
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| InspectError::ToolUnavailable { tool: "ps", source })?;

        // ps exits non-zero with no output when the pid is unknown.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .map(|line| parse_ps_line(pid, line)))
    }
}

/// Builds a `ProcessInfo` from one line of `ps` output.
///
/// Missing trailing columns are left empty rather than rejected.
fn parse_ps_line(pid: Pid, line: &str) -> ProcessInfo {
    let (fields, command) = take_fields(line, 2 + LSTART_FIELDS);

    ProcessInfo {
        pid,
        exists: true,
        user: fields.get(1).map(|s| s.to_string()).unwrap_or_default(),
        start_time: fields.get(2..).map(|s| s.join(" ")).unwrap_or_default(),
        command: command.to_string(),
    }
}

/// Splits off up to `n` whitespace-separated fields and returns them with the
/// untouched remainder of the line.
fn take_fields(line: &str, n: usize) -> (Vec<&str>, &str) {
    let mut fields = Vec::with_capacity(n);
    let mut rest = line.trim_start();

    while fields.len() < n && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    (fields, rest.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let line = "  4242 alice    Sat Oct 17 09:15:02 2026 python -m flask run --port 5000";
        let info = parse_ps_line(4242, line);

        assert!(info.exists);
        assert_eq!(info.pid, 4242);
        assert_eq!(info.user, "alice");
        assert_eq!(info.start_time, "Sat Oct 17 09:15:02 2026");
        assert_eq!(info.command, "python -m flask run --port 5000");
    }

    #[test]
    fn test_parse_keeps_command_spacing() {
        let line = "1 root Mon Oct  5 08:00:00 2026 /sbin/init  splash";
        let info = parse_ps_line(1, line);

        assert_eq!(info.start_time, "Mon Oct 5 08:00:00 2026");
        assert_eq!(info.command, "/sbin/init  splash");
    }

    #[test]
    fn test_parse_truncated_line() {
        let info = parse_ps_line(7, "7 bob");
        assert!(info.exists);
        assert_eq!(info.user, "bob");
        assert!(info.start_time.is_empty());
        assert!(info.command.is_empty());
    }

    #[test]
    fn test_take_fields() {
        let (fields, rest) = take_fields("  a b   c d e ", 2);
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(rest, "c d e");

        let (fields, rest) = take_fields("a", 3);
        assert_eq!(fields, vec!["a"]);
        assert_eq!(rest, "");
    }

    fn ps_usable() -> bool {
        Command::new("ps")
            .args(["-p", "1", "-o", "pid="])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_lookup_current_process() {
        if !ps_usable() {
            return;
        }

        let pid = std::process::id();
        let info = Ps.lookup(pid).unwrap().expect("own process should be listed");
        assert_eq!(info.pid, pid);
        assert!(!info.user.is_empty());
        assert!(!info.command.is_empty());
        assert_eq!(info.start_time.split_whitespace().count(), LSTART_FIELDS);
    }

    #[test]
    fn test_lookup_unknown_pid() {
        if !ps_usable() {
            return;
        }

        assert!(matches!(Ps.lookup(2_000_000_000), Ok(None)));
    }
}
