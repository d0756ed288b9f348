//! Free-port search.
//!
//! Results are advisory: nothing is reserved, so a returned port can be taken
//! by someone else before the caller binds it.

use tracing::{debug, warn};

use crate::port::Port;
use crate::probe::is_port_in_use;

/// Conventional development ports offered after the preferred one.
pub const DEFAULT_CANDIDATES: [u16; 5] = [5001, 8000, 8080, 3000, 3001];

/// Returns the first free port in `start..start + max_attempts`.
///
/// Returns `None` when every port in the range is in use. The range never
/// wraps and stops at 65535.
pub fn find_available_port(start: Port, max_attempts: u32) -> Option<Port> {
    find_available_port_by(start, max_attempts, is_port_in_use)
}

/// Linear search using the given occupancy check.
pub fn find_available_port_by(
    start: Port,
    max_attempts: u32,
    mut in_use: impl FnMut(Port) -> bool,
) -> Option<Port> {
    let found = start.span(max_attempts).find(|&port| !in_use(port));

    match found {
        Some(port) => debug!(port = %port, "found available port"),
        None => warn!(
            start = %start,
            attempts = max_attempts,
            "no available port in search range"
        ),
    }
    found
}

/// Lists ports worth trying, best first.
///
/// `preferred` leads the list if it is free. The free `candidates` follow in
/// their given order, skipping `preferred` itself.
pub fn port_suggestions(preferred: Port, candidates: &[Port]) -> Vec<Port> {
    port_suggestions_by(preferred, candidates, is_port_in_use)
}

/// Suggestion list using the given occupancy check.
pub fn port_suggestions_by(
    preferred: Port,
    candidates: &[Port],
    mut in_use: impl FnMut(Port) -> bool,
) -> Vec<Port> {
    let mut suggestions = Vec::new();

    if !in_use(preferred) {
        suggestions.push(preferred);
    }

    for &port in candidates {
        if port == preferred || suggestions.contains(&port) {
            continue;
        }
        if !in_use(port) {
            suggestions.push(port);
        }
    }

    suggestions
}
