//! # darter - A Concurrent TCP Reachability Prober
//!
//! darter answers one question quickly: which TCP ports on a set of targets
//! accept connections? Targets may be bare hosts, IP literals, or CIDR
//! blocks; ports come from a comma-separated range spec. Probes run on a
//! bounded worker pool with cooperative cancellation, and only open ports
//! are reported.
//!
//! ## Example
//!
//! ```rust,ignore
//! use darter::scanner::{run_scan, ScanJob};
//! use darter::types::PortRangeSpec;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let job = ScanJob {
//!         target: "192.168.1.0/30".into(),
//!         ports: PortRangeSpec::new("22,80,443"),
//!         concurrency: 64,
//!         timeout: Duration::from_secs(1),
//!     };
//!     let (events, mut rx) = mpsc::channel(64);
//!     tokio::spawn(run_scan(vec![job], events, CancellationToken::new()));
//!     while let Some(event) = rx.recv().await {
//!         println!("{event:?}");
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`types`] - target expansion and port range specifications
//! - [`scanner`] - the producer / worker pool / aggregator pipeline
//! - [`config`] - settings file supplying scan defaults
//! - [`error`] - error types
//! - [`output`] - terminal formatting for the CLI
//! - [`cli`] - command-line definitions

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, RangeParseError};
pub use scanner::{PortState, Probe, ProbeOutcome, ScanEvent, ScanJob, TcpProbe};
pub use types::{expand, PortBlock, PortRangeSpec};
