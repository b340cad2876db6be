//! Stats functionality for the server transport implementation
//!
//! This module contains components for gathering and analyzing media statistics.

// quality module moved to media-core
pub mod metrics;
// MOS and R-factor calculations moved to media-core
pub use metrics::get_server_metrics;
pub use metrics::ServerMetrics; 