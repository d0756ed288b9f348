//! Bind-based port probing.
//!
//! The probe is a point-in-time heuristic, not a reservation: a port reported
//! free can be taken by another process before the caller binds it.

use std::net::{Ipv4Addr, SocketAddrV4, TcpListener};

use tracing::debug;

use crate::port::Port;

/// Returns `true` if `port` cannot be bound on the IPv4 loopback address.
///
/// Any bind failure counts as "in use": address in use, permission denied and
/// every other cause are not told apart. The socket is dropped before
/// returning.
pub fn is_port_in_use(port: Port) -> bool {
    let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port.as_u16());
    match TcpListener::bind(addr) {
        Ok(_listener) => false,
        Err(e) => {
            debug!(port = %port, error = %e, "bind failed, treating port as in use");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold_ephemeral() -> (TcpListener, Port) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        (listener, port)
    }

    #[test]
    fn test_held_port_is_in_use_until_released() {
        let (listener, port) = hold_ephemeral();
        assert!(is_port_in_use(port));

        drop(listener);
        assert!(!is_port_in_use(port));
    }

    #[test]
    fn test_probe_is_idempotent() {
        let (_listener, port) = hold_ephemeral();
        assert_eq!(is_port_in_use(port), is_port_in_use(port));

        let (listener, free) = hold_ephemeral();
        drop(listener);
        assert_eq!(is_port_in_use(free), is_port_in_use(free));
    }

    #[test]
    fn test_probe_releases_its_socket() {
        let (listener, port) = hold_ephemeral();
        drop(listener);

        assert!(!is_port_in_use(port));
        // A leaked probe socket would make the second bind fail.
        let rebound = TcpListener::bind((Ipv4Addr::LOCALHOST, port.as_u16()));
        assert!(rebound.is_ok());
    }
}
