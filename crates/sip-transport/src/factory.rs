//! Builds a concrete [`Transport`] from a requested kind and bind address.

use std::net::SocketAddr;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::transport::udp::UdpTransport;
use crate::transport::{Transport, TransportEvent};

/// Transport kinds this crate can hand out. SIP-over-TCP/TLS/WebSocket are
/// out of scope; ICE-backed transports are constructed directly via
/// [`crate::transport::ice::SipIceTransport::new`] once a component has
/// completed connectivity checks, so they aren't built through this factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    Udp,
}

pub struct TransportFactory;

impl TransportFactory {
    /// Binds a new transport of `transport_type` at `bind_addr`.
    pub async fn create(
        transport_type: TransportType,
        bind_addr: SocketAddr,
        channel_capacity: Option<usize>,
    ) -> Result<(Box<dyn Transport>, mpsc::Receiver<TransportEvent>)> {
        match transport_type {
            TransportType::Udp => {
                let (transport, rx) = UdpTransport::bind(bind_addr, channel_capacity).await?;
                Ok((Box::new(transport), rx))
            }
        }
    }
}
