//! TCP port numbers.
//!
//! `Port` wraps a `u16` that is never zero, and knows how to walk a bounded
//! run of consecutive ports without wrapping past 65535.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A TCP port number in 1-65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

/// Error returned when a string is not a usable port number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortParseError {
    /// Not a number, or larger than 65535.
    InvalidFormat(String),
    /// Port 0 is reserved.
    Zero,
}

impl fmt::Display for PortParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortParseError::InvalidFormat(s) => {
                write!(f, "invalid port '{s}' (must be a number in 1-65535)")
            }
            PortParseError::Zero => write!(f, "invalid port 0 (must be 1-65535)"),
        }
    }
}

impl std::error::Error for PortParseError {}

impl Port {
    /// Where searches and scans begin unless told otherwise.
    pub const DEFAULT_START: Port = Port(5000);

    /// Creates a port, rejecting 0.
    pub fn new(value: u16) -> Option<Self> {
        (value != 0).then_some(Port(value))
    }

    #[inline]
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Yields `self`, `self + 1`, ... for at most `count` ports.
    ///
    /// Stops early at 65535 rather than wrapping, so the iterator may be
    /// shorter than `count`.
    pub fn span(self, count: u32) -> impl Iterator<Item = Port> {
        let start = u32::from(self.0);
        let end = start.saturating_add(count).min(u32::from(u16::MAX) + 1);
        (start..end).map(|n| Port(n as u16))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Port {
    type Err = PortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s
            .trim()
            .parse()
            .map_err(|_| PortParseError::InvalidFormat(s.to_string()))?;
        Port::new(value).ok_or(PortParseError::Zero)
    }
}

impl Serialize for Port {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        Port::new(value).ok_or_else(|| serde::de::Error::custom(PortParseError::Zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    #[test]
    fn test_rejects_zero() {
        assert!(Port::new(0).is_none());
        assert_eq!(port(1).as_u16(), 1);
        assert_eq!(port(65535).as_u16(), 65535);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("5000".parse::<Port>().unwrap(), port(5000));
        assert_eq!("0".parse::<Port>(), Err(PortParseError::Zero));
        assert!(matches!(
            "65536".parse::<Port>(),
            Err(PortParseError::InvalidFormat(_))
        ));
        assert!("http".parse::<Port>().is_err());
    }

    #[test]
    fn test_span_is_consecutive() {
        let ports: Vec<u16> = port(9000).span(3).map(Port::as_u16).collect();
        assert_eq!(ports, vec![9000, 9001, 9002]);
    }

    #[test]
    fn test_span_empty() {
        assert_eq!(port(9000).span(0).count(), 0);
    }

    #[test]
    fn test_span_stops_at_max() {
        let ports: Vec<u16> = port(65534).span(10).map(Port::as_u16).collect();
        assert_eq!(ports, vec![65534, 65535]);

        assert_eq!(port(65535).span(u32::MAX).count(), 1);
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&port(8080)).unwrap(), "8080");
        let back: Port = serde_json::from_str("8080").unwrap();
        assert_eq!(back, port(8080));
        assert!(serde_json::from_str::<Port>("0").is_err());
    }
}
