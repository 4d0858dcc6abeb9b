//! # varnish-statsd
//!
//! Polls the JSON stats endpoint of a Varnish 4.1 cache server and forwards a handful of its numbers to statsd as
//! gauges, once per configured interval.
//!
//! ## Architecture
//!
//! - **`config`**: the JSON configuration file read at startup
//! - **`metrics`**: the decoded stats snapshot and the gauges derived from it
//! - **`collectors`**: one poll cycle, fetch → decode → emit
//! - **`statsd`**: a small UDP client for the statsd line protocol
//! - **`scheduler`**: runs the collector forever on a fixed interval
//!
//! ## Usage
//!
//! ```bash
//! varnish-statsd --config /etc/varnish-statsd/config.json
//! ```

#[macro_use]
extern crate tracing;

pub mod args;
pub mod collectors;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod retry;
pub mod scheduler;
pub mod statsd;

pub use args::Args;
pub use collectors::*;
pub use config::{
    parse_config,
    Config,
};
pub use error::BridgeError;
pub use logging::init_logging;
pub use scheduler::{
    Scheduler,
    SchedulerState,
};
