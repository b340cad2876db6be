//! Core functionality for the server transport implementation
//!
//! This module contains components for handling the core transport functionality.

pub mod connection;
mod events;
mod frame;

pub use connection::*;
pub use events::*;
pub use frame::*; 