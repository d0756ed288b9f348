//! Port Finder CLI - check local TCP ports, find free ones, and identify the
//! processes that hold them.

mod allocator;
mod cli;
mod config;
mod display;
mod error;
mod model;
mod port;
mod probe;
mod report;
mod scan;
mod system;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::{config_path, load_settings, Settings};
use display::{
    display_availability, display_availability_json, display_config, display_config_json,
    display_found_port, display_found_port_json, display_process, display_process_json,
    display_scan, display_scan_json, display_suggestions, display_suggestions_json,
};
use error::Result;
use model::Pid;
use port::Port;
use probe::is_port_in_use;
use system::Inspector;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let json = cli.json;

    match cli.command {
        Command::IsPortUsed { port } => cmd_is_port_used(port, json),

        Command::FindPort {
            start,
            max_attempts,
        } => {
            let settings = load_settings()?;
            cmd_find_port(
                start.unwrap_or(settings.find.start),
                max_attempts.unwrap_or(settings.find.max_attempts),
                json,
            )
        }

        Command::ScanPorts { start, count } => {
            let settings = load_settings()?;
            cmd_scan_ports(
                start.unwrap_or(settings.scan.start),
                count.unwrap_or(settings.scan.count),
                json,
            )
        }

        Command::ProcessInfo { pid } => cmd_process_info(pid, json),

        Command::Suggest { preferred } => {
            let settings = load_settings()?;
            cmd_suggest(preferred, &settings, json)
        }

        Command::Config { path } => cmd_config(path, json),
    }
}

fn cmd_is_port_used(port: Port, json: bool) -> Result<ExitCode> {
    let is_used = is_port_in_use(port);

    if json {
        display_availability_json(port, is_used)?;
    } else {
        display_availability(port, is_used);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_find_port(start: Port, max_attempts: u32, json: bool) -> Result<ExitCode> {
    let found = allocator::find_available_port(start, max_attempts);

    if json {
        display_found_port_json(found)?;
    } else {
        display_found_port(found, start, max_attempts);
    }

    Ok(if found.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_scan_ports(start: Port, count: u32, json: bool) -> Result<ExitCode> {
    let inspector = Inspector::system();
    let report = scan::scan_report(&inspector, start, count);

    if json {
        display_scan_json(&report)?;
    } else {
        display_scan(&report);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_process_info(pid: Pid, json: bool) -> Result<ExitCode> {
    let inspector = Inspector::system();
    let info = inspector.process_info(pid);

    if json {
        display_process_json(&info)?;
    } else {
        // Only look up sockets for a process that exists.
        let ports = if info.exists {
            inspector.ports_used_by_process(pid)
        } else {
            Default::default()
        };
        display_process(&info, &ports);
    }

    Ok(if info.exists {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_suggest(preferred: Option<Port>, settings: &Settings, json: bool) -> Result<ExitCode> {
    let preferred = preferred.unwrap_or(settings.suggest.preferred);
    let suggestions = allocator::port_suggestions(preferred, &settings.suggest.candidates);

    if json {
        display_suggestions_json(&suggestions)?;
    } else {
        display_suggestions(&suggestions);
    }

    Ok(if suggestions.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_config(show_path: bool, json: bool) -> Result<ExitCode> {
    let settings = load_settings()?;
    let path = if show_path {
        Some(config_path()?)
    } else {
        None
    };

    if json {
        display_config_json(&settings, path.as_deref())?;
    } else {
        display_config(&settings, path.as_deref());
    }
    Ok(ExitCode::SUCCESS)
}
