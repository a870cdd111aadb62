//! Port table scanning
//!
//! Reads a kernel socket table such as `/proc/net/tcp`:
//!
//! ```text
//!   sl  local_address rem_address   st tx_queue rx_queue ...
//!    0: 0100007F:1F90 00000000:0000 0A 00000000:00000000 ...
//! ```
//!
//! and reduces the hex port of each `local_address` to the highest one.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use log::{debug, trace, warn};

use crate::config::{MalformedRows, ScanConfig};
use crate::error::{Result, ScanError};
use crate::types::{PortScan, Protocol};

/// Decode the local port of one data row
///
/// `line_number` is the 1-based position of the row in the table and is only
/// used for error reporting.
///
/// # Errors
/// Returns [`ScanError::MalformedRow`] if the row has no second field or the
/// field has no `:`, and [`ScanError::InvalidPort`] if the port is not a
/// hexadecimal `u16`.
pub fn parse_local_port(line_number: usize, line: &str) -> Result<u16> {
    let local_address = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ScanError::malformed_row(line_number, "missing local address column"))?;

    let port = local_address.split(':').nth(1).ok_or_else(|| {
        ScanError::malformed_row(
            line_number,
            format!("local address '{local_address}' has no ':'"),
        )
    })?;

    u16::from_str_radix(port, 16)
        .map_err(|source| ScanError::invalid_port(line_number, port, source))
}

/// Scanner for the kernel's per-protocol socket tables
#[derive(Debug, Clone, Default)]
pub struct PortTableScanner {
    config: ScanConfig,
}

impl PortTableScanner {
    /// Create a scanner with the given settings
    #[must_use]
    pub const fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Settings this scanner runs with
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Location of the table for `protocol`
    #[must_use]
    pub fn table_path(&self, protocol: Protocol) -> PathBuf {
        self.config.root().join(protocol.table_name())
    }

    /// Scan the table for `protocol`
    ///
    /// Never fails outright: a table that cannot be opened yields a zero
    /// maximum with [`ScanError::TableUnavailable`] recorded as the failure.
    #[must_use]
    pub fn scan(&self, protocol: Protocol) -> PortScan {
        let path = self.table_path(protocol);
        debug!("Scanning {} table at {}", protocol, path.display());

        match File::open(&path) {
            Ok(file) => self.scan_reader(protocol, BufReader::new(file)),
            Err(err) => {
                warn!("Cannot open {}: {}", path.display(), err);
                let mut scan = PortScan::new(protocol);
                scan.failure = Some(ScanError::table_unavailable(path, err));
                scan
            }
        }
    }

    /// Scan the TCP table, then the UDP table
    #[must_use]
    pub fn scan_all(&self) -> Vec<PortScan> {
        Protocol::ALL.iter().map(|&p| self.scan(p)).collect()
    }

    /// Scan table text from any buffered source
    ///
    /// The first line is the column header and is skipped. Rows after it are
    /// decoded in order; how an undecodable row is handled depends on the
    /// configured [`MalformedRows`] policy. Read errors always end the scan.
    pub fn scan_reader<R: BufRead>(&self, protocol: Protocol, reader: R) -> PortScan {
        let mut scan = PortScan::new(protocol);
        let mut lines = reader.lines();

        match lines.next() {
            Some(Ok(_header)) => {}
            Some(Err(err)) => {
                warn!("Failed to read {protocol} table header: {err}");
                scan.failure = Some(err.into());
                return scan;
            }
            None => {
                warn!("{protocol} table is empty, expected a header row");
                scan.failure = Some(ScanError::malformed_row(1, "missing header row"));
                return scan;
            }
        }

        // Header is line 1
        for (line_number, line) in (2..).zip(lines) {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("Failed to read {protocol} table row {line_number}: {err}");
                    scan.record_failure(err.into());
                    break;
                }
            };

            match parse_local_port(line_number, &line) {
                Ok(port) => {
                    trace!("{protocol} row {line_number}: local port {port}");
                    scan.rows_scanned += 1;
                    scan.max_port = scan.max_port.max(port);
                }
                Err(err) => {
                    warn!("Bad {protocol} table row: {err}");
                    scan.record_failure(err);
                    if self.config.malformed_rows() == MalformedRows::Stop {
                        break;
                    }
                }
            }
        }

        debug!(
            "{} scan finished: max port {} over {} rows{}",
            protocol,
            scan.max_port,
            scan.rows_scanned,
            if scan.is_complete() { "" } else { " (incomplete)" }
        );
        scan
    }
}

/// Highest local port in use for `protocol`, read from `/proc/net`
///
/// Shorthand for `PortTableScanner::default().scan(protocol)`.
#[must_use]
pub fn max_port(protocol: Protocol) -> PortScan {
    PortTableScanner::default().scan(protocol)
}
