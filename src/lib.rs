//! # flexcount
//!
//! Concurrent SSH collector for Cisco WLC FlexConnect AP group inventories.
//!
//! flexcount connects to a fleet of AireOS wireless controllers, drives each
//! CLI through its in-band `User:`/`Password:` login, runs
//! `show flexconnect group summary`, and parses the group table into
//! structured records. Hosts are processed concurrently under a bounded
//! ceiling; one host's failure never disturbs the others.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use flexcount::config::{Credentials, RunLimits};
//! use flexcount::dispatch::{dispatch, DEFAULT_CEILING};
//! use flexcount::platform::aireos;
//! use flexcount::report::ReportBatch;
//! use flexcount::worker::{collect_host, RunContext};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Arc::new(RunContext {
//!         credentials: Credentials::new("admin", "secret"),
//!         grammar: aireos(),
//!         limits: RunLimits::default(),
//!         cancel: CancellationToken::new(),
//!     });
//!
//!     let hosts = vec!["10.0.0.1".to_owned(), "10.0.0.2".to_owned()];
//!     let outcomes = dispatch(hosts, DEFAULT_CEILING, |host| {
//!         collect_host(host, Arc::clone(&ctx))
//!     })
//!     .await;
//!
//!     let batch = ReportBatch::from_outcomes(&outcomes);
//!     println!("{} groups collected", batch.len());
//! }
//! ```

pub mod channel;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod parse;
pub mod platform;
pub mod report;
pub mod transport;
pub mod worker;

// Re-export main types for convenience
pub use config::{Credentials, RunLimits};
pub use dispatch::dispatch;
pub use error::Error;
pub use parse::{parse_transcript, GroupRecord};
pub use platform::CliGrammar;
pub use report::{RecordSink, ReportBatch};
pub use worker::{collect_host, HostOutcome, RunContext};
