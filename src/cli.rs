//! CLI command definitions using clap.

use clap::{Parser, Subcommand};

use crate::model::Pid;
use crate::port::Port;

/// Port Finder - check local TCP ports and find out who holds them.
#[derive(Parser, Debug)]
#[command(name = "port-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether a port is in use.
    ///
    /// The answer is a snapshot: the port may change state right after.
    #[command(visible_alias = "used")]
    IsPortUsed {
        /// Port number to check
        port: Port,
    },

    /// Find the first free port, searching upward from a start port.
    ///
    /// Exits with status 1 if no free port is found.
    #[command(visible_alias = "find")]
    FindPort {
        /// Port to start searching from
        #[arg(long)]
        start: Option<Port>,

        /// Number of consecutive ports to try
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Show usage of a run of consecutive ports.
    #[command(visible_alias = "scan")]
    ScanPorts {
        /// First port to scan
        #[arg(long)]
        start: Option<Port>,

        /// Number of ports to scan
        #[arg(long)]
        count: Option<u32>,
    },

    /// Show a process and the ports it holds.
    ///
    /// Exits with status 1 if the process does not exist.
    #[command(visible_alias = "ps")]
    ProcessInfo {
        /// Process ID
        pid: Pid,
    },

    /// Suggest free ports, preferred port first.
    #[command(visible_alias = "sg")]
    Suggest {
        /// Port to try before the configured candidates
        #[arg(long)]
        preferred: Option<Port>,
    },

    /// Show the effective defaults.
    #[command(visible_alias = "c")]
    Config {
        /// Show the config file path
        #[arg(long)]
        path: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_flag_is_global() {
        let cli = Cli::try_parse_from(["port-finder", "is-port-used", "8080", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::IsPortUsed { port } if port.as_u16() == 8080));
    }

    #[test]
    fn test_find_port_flags() {
        let cli = Cli::try_parse_from([
            "port-finder",
            "find-port",
            "--start",
            "6000",
            "--max-attempts",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::FindPort {
                start,
                max_attempts,
            } => {
                assert_eq!(start.map(Port::as_u16), Some(6000));
                assert_eq!(max_attempts, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_port_zero() {
        assert!(Cli::try_parse_from(["port-finder", "is-port-used", "0"]).is_err());
        assert!(Cli::try_parse_from(["port-finder", "scan-ports", "--start", "70000"]).is_err());
    }
}
