//! # Collectors Module
//!
//! A collector performs one poll cycle: pull stats from a source and push them somewhere else.
//!
//! - **`Collector` trait**: the interface the [`crate::scheduler::Scheduler`] drives
//! - **`VarnishCollector`**: fetches the Varnish stats JSON and emits six statsd gauges

pub mod collector;
pub mod varnish_collector;

// Re-export the main types for easy access
pub use collector::Collector;
pub use varnish_collector::VarnishCollector;
