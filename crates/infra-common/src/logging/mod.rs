//! Structured logging: `tracing`/`tracing-subscriber` bootstrap plus
//! contextual fields and lightweight metrics helpers layered on top.

pub mod context;
pub mod metrics;
pub mod setup;

pub use context::LogContext;
pub use setup::{log_welcome, parse_log_level, setup_logging, LoggingConfig};
