use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// The error type for port table scans.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The table file is missing or cannot be opened
    #[error("Failed to open {}: {source}", path.display())]
    TableUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error occurred while reading table rows
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A data row does not have the `index address:port ...` shape
    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// The port substring is not a valid hexadecimal port
    #[error("Invalid port '{port}' on row {line}: {source}")]
    InvalidPort {
        line: usize,
        port: String,
        #[source]
        source: ParseIntError,
    },

    /// Protocol name is neither `tcp` nor `udp`
    #[error("Unknown protocol '{0}', expected 'tcp' or 'udp'")]
    UnknownProtocol(String),
}

impl ScanError {
    /// Create a new table unavailable error
    pub fn table_unavailable(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::TableUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new malformed row error
    pub fn malformed_row(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            reason: reason.into(),
        }
    }

    /// Create a new invalid port error
    pub fn invalid_port(line: usize, port: impl Into<String>, source: ParseIntError) -> Self {
        Self::InvalidPort {
            line,
            port: port.into(),
            source,
        }
    }

    /// Returns true if the table itself could not be opened
    #[must_use]
    pub const fn is_table_unavailable(&self) -> bool {
        matches!(self, Self::TableUnavailable { .. })
    }

    /// Returns true if the failure came from a single bad row
    #[must_use]
    pub const fn is_row_failure(&self) -> bool {
        matches!(self, Self::MalformedRow { .. } | Self::InvalidPort { .. })
    }
}

/// A specialized `Result` type for port table scans.
pub type Result<T> = std::result::Result<T, ScanError>;
