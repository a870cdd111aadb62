use std::path::{Path, PathBuf};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// Directory the kernel exposes its per-protocol socket tables in
pub const DEFAULT_TABLE_ROOT: &str = "/proc/net";

/// What a scan does when it meets a row it cannot decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum MalformedRows {
    /// Stop at the first bad row and keep the maximum seen before it
    #[default]
    Stop,
    /// Skip bad rows and keep scanning; the first failure is still recorded
    Skip,
}

/// Settings for a [`PortTableScanner`](crate::PortTableScanner)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    root: PathBuf,
    malformed_rows: MalformedRows,
}

impl ScanConfig {
    /// Create a config reading from `/proc/net` that stops on the first bad row
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_TABLE_ROOT),
            malformed_rows: MalformedRows::default(),
        }
    }

    /// Read tables from `root` instead of `/proc/net`
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the policy for rows that cannot be decoded
    #[must_use]
    pub fn with_malformed_rows(mut self, policy: MalformedRows) -> Self {
        self.malformed_rows = policy;
        self
    }

    /// Directory containing the protocol tables
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Policy for undecodable rows
    #[must_use]
    pub const fn malformed_rows(&self) -> MalformedRows {
        self.malformed_rows
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}
