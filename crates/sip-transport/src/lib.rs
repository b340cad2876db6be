//! SIP transport layer implementation for the rvoip stack
//!
//! This crate provides transport implementations for SIP messages: plain
//! UDP sockets and a SIP/ICE adapter that presents a completed peer-to-peer
//! ICE component (spec.md §4.3) the same way.

// Re-export modules from the transport directory
pub mod transport;
pub mod error;
pub mod factory;
pub mod manager;
pub mod events;

// Internal modules
#[cfg(test)]
mod tests;

// Re-export commonly used types and functions
pub use transport::{Transport, TransportEvent};
pub use error::{Error, Result};
pub use transport::udp::UdpTransport;
pub use transport::ice::SipIceTransport;

/// Bind a UDP transport to the specified address
pub async fn bind_udp(addr: std::net::SocketAddr) -> Result<(UdpTransport, tokio::sync::mpsc::Receiver<TransportEvent>)> {
    UdpTransport::bind(addr, None).await
}

/// Re-export of common types for easier use
pub mod prelude {
    pub use crate::{
        Error, Result, Transport, TransportEvent,
        UdpTransport, SipIceTransport,
        bind_udp,
        factory::{TransportFactory, TransportType},
        manager::TransportManager,
        events::TransportEventAdapter,
    };
}
