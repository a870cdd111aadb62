#![allow(clippy::uninlined_format_args)]

use std::str::FromStr;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Transport protocol whose kernel table is scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "lowercase"))]
pub enum Protocol {
    /// Transmission Control Protocol
    Tcp,
    /// User Datagram Protocol
    Udp,
}

impl Protocol {
    /// Protocols in the order they are reported
    pub const ALL: [Self; 2] = [Self::Tcp, Self::Udp];

    /// File name of the protocol's table under `/proc/net`
    #[must_use]
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

impl FromStr for Protocol {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            _ => Err(ScanError::UnknownProtocol(s.to_string())),
        }
    }
}

/// Outcome of scanning one protocol table
///
/// `max_port` is always meaningful: it holds whatever maximum was accumulated
/// before the scan finished or failed. `failure` tells a clean zero apart from
/// a failed scan.
#[derive(Debug)]
pub struct PortScan {
    /// Protocol whose table was scanned
    pub protocol: Protocol,
    /// Highest local port seen, `0` when none
    pub max_port: u16,
    /// Data rows whose port was decoded
    pub rows_scanned: usize,
    /// First failure hit during the scan, if any
    pub failure: Option<ScanError>,
}

impl PortScan {
    /// Create an empty scan result for a protocol
    #[must_use]
    pub const fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            max_port: 0,
            rows_scanned: 0,
            failure: None,
        }
    }

    /// Returns true if the whole table was read without a failure
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Keep the first failure of a scan, later ones are dropped
    pub(crate) fn record_failure(&mut self, err: ScanError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Human-readable diagnostic line for a failed scan
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        self.failure.as_ref().map(|err| match err {
            ScanError::TableUnavailable { path, .. } => format!(
                "unable to open {}; make sure you are on Linux and have sufficient permissions",
                path.display()
            ),
            other => format!(
                "an error occurred while scanning {}: {}",
                self.protocol, other
            ),
        })
    }

    /// Result line as printed by the binary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "current maximum {} port is: {}",
            self.protocol, self.max_port
        )
    }
}
