//! DTLS functionality
//!
//! This module contains components for handling DTLS handshakes and transports.

pub mod handshake;
pub mod transport;

pub use handshake::*;
pub use transport::*; 