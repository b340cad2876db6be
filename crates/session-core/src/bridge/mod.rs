//! Bridge Module
//!
//! Multi-session bridging for conference calls.

pub mod bridge;
pub mod types;

pub use bridge::*;
pub use types::*; 