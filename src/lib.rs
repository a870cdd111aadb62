#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Portmax
//!
//! Reports the highest locally-bound port number in use for TCP and UDP by
//! reading the kernel's socket tables under `/proc/net`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use portmax::{PortTableScanner, Protocol};
//!
//! let scanner = PortTableScanner::default();
//! let tcp = scanner.scan(Protocol::Tcp);
//! match tcp.diagnostic() {
//!     Some(reason) => eprintln!("{reason}"),
//!     None => println!("{}", tcp.summary()),
//! }
//! ```
//!
//! A scan never fails outright. [`PortScan::max_port`] holds whatever maximum
//! was accumulated and [`PortScan::failure`] says why the scan stopped early,
//! if it did.
//!
//! ## Features
//!
//! - `serde-support` - Enable serialization support for [`Protocol`] and [`MalformedRows`]

mod config;
mod error;
mod scanner;
mod types;

pub use config::{MalformedRows, ScanConfig, DEFAULT_TABLE_ROOT};
pub use error::{Result, ScanError};
pub use scanner::{max_port, parse_local_port, PortTableScanner};
pub use types::{PortScan, Protocol};
