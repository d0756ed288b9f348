//! Output formatting and display utilities.
//!
//! Every command has a human-readable form and a JSON form. Both are built
//! from the same computed values.

use std::collections::BTreeSet;
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table, TableComponent};
use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;
use crate::model::{PortUsage, ProcessInfo, ScanReport};
use crate::port::Port;

/// Creates a table with clean styling: solid borders, no row separators.
fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_style(TableComponent::VerticalLines, '│');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
    table
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// One sentence describing a port's usage.
///
/// The three shapes (free, held by a known process, held by an unknown
/// process) are the whole set; scripts match on them.
pub fn usage_line(usage: &PortUsage) -> String {
    let port = usage.port;
    match (usage.is_used, &usage.process) {
        (false, _) => format!("Port {port} is available"),
        (true, Some(p)) => format!(
            "Port {port} is in use by PID {} ({}): {}",
            p.pid, p.user, p.command
        ),
        (true, None) => {
            format!("Port {port} is in use, but the owning process could not be determined")
        }
    }
}

/// Availability record for JSON output.
#[derive(Debug, Serialize)]
pub struct Availability {
    pub port: Port,
    pub is_used: bool,
}

pub fn display_availability(port: Port, is_used: bool) {
    if is_used {
        println!("Port {port} is in use");
    } else {
        println!("Port {port} is available");
    }
}

pub fn display_availability_json(port: Port, is_used: bool) -> Result<()> {
    print_json(&Availability { port, is_used })
}

/// Free-port search result for JSON output.
#[derive(Debug, Serialize)]
pub struct FoundPort {
    pub available_port: Option<Port>,
}

pub fn display_found_port(found: Option<Port>, start: Port, attempts: u32) {
    match found {
        Some(port) => println!("Available port: {port}"),
        None => println!("No available port in {attempts} attempt(s) starting at {start}"),
    }
}

pub fn display_found_port_json(found: Option<Port>) -> Result<()> {
    print_json(&FoundPort {
        available_port: found,
    })
}

/// Displays one usage line per scanned port.
pub fn display_scan(report: &ScanReport) {
    for usage in &report.ports {
        println!("{}", usage_line(usage));
    }
}

pub fn display_scan_json(report: &ScanReport) -> Result<()> {
    print_json(report)
}

/// Displays process details and the ports it holds.
pub fn display_process(info: &ProcessInfo, ports: &BTreeSet<Port>) {
    if !info.exists {
        println!("No process with PID {}", info.pid);
        return;
    }

    let ports_str = if ports.is_empty() {
        "none".to_string()
    } else {
        ports
            .iter()
            .map(Port::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut table = create_table();
    table.add_row(vec![Cell::new("PID"), Cell::new(info.pid)]);
    table.add_row(vec![Cell::new("User"), Cell::new(&info.user)]);
    table.add_row(vec![Cell::new("Started"), Cell::new(&info.start_time)]);
    table.add_row(vec![Cell::new("Command"), Cell::new(&info.command)]);
    table.add_row(vec![Cell::new("Ports"), Cell::new(ports_str)]);

    println!("{table}");
}

pub fn display_process_json(info: &ProcessInfo) -> Result<()> {
    print_json(info)
}

/// Displays suggested ports, one per line.
pub fn display_suggestions(ports: &[Port]) {
    if ports.is_empty() {
        println!("No suggested ports are available.");
        return;
    }

    for port in ports {
        println!("{port}");
    }
}

pub fn display_suggestions_json(ports: &[Port]) -> Result<()> {
    print_json(ports)
}

/// Displays the effective command defaults.
pub fn display_config(settings: &Settings, path: Option<&Path>) {
    if let Some(p) = path {
        println!("Config file: {}", p.display());
        println!();
    }

    let candidates = settings
        .suggest
        .candidates
        .iter()
        .map(Port::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = create_table();
    table.set_header(vec!["SETTING", "VALUE"]);
    table.add_row(vec![Cell::new("find.start"), Cell::new(settings.find.start)]);
    table.add_row(vec![
        Cell::new("find.max_attempts"),
        Cell::new(settings.find.max_attempts),
    ]);
    table.add_row(vec![Cell::new("scan.start"), Cell::new(settings.scan.start)]);
    table.add_row(vec![Cell::new("scan.count"), Cell::new(settings.scan.count)]);
    table.add_row(vec![
        Cell::new("suggest.preferred"),
        Cell::new(settings.suggest.preferred),
    ]);
    table.add_row(vec![Cell::new("suggest.candidates"), Cell::new(candidates)]);

    println!("{table}");
}

/// Configuration info for JSON output.
#[derive(Debug, Serialize)]
pub struct ConfigInfo<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(flatten)]
    pub settings: &'a Settings,
}

pub fn display_config_json(settings: &Settings, path: Option<&Path>) -> Result<()> {
    print_json(&ConfigInfo {
        config_file: path.map(|p| p.display().to_string()),
        settings,
    })
}
