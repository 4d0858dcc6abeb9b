use crate::error::Result;
use std::{
    future::Future,
    pin::Pin,
};

/// Trait for running a single poll cycle
pub trait Collector {
    /// Fetch, map and emit once
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Get the last collected data as JSON
    fn summary(&self) -> serde_json::Value;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
