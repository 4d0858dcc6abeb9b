pub mod gauge;
pub mod varnish_stats;

// Re-export the main types for easy access
pub use gauge::*;
pub use varnish_stats::*;
