//! Transport abstraction: anything that can hand a [`Message`] to a peer and
//! surface received messages as [`TransportEvent`]s, whether it's a plain
//! UDP socket or a completed ICE component wrapped by [`ice::SipIceTransport`].

pub mod ice;
pub mod udp;

use std::fmt::Debug;
use std::net::SocketAddr;

use async_trait::async_trait;
use rvoip_sip_core::Message;

use crate::error::Result;

/// Event surfaced by a [`Transport`] as datagrams/frames arrive.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A full SIP message was parsed off the wire.
    MessageReceived {
        message: Message,
        source: SocketAddr,
        destination: SocketAddr,
    },
    /// A transport-level error (parse failure, socket error) occurred;
    /// the transport itself keeps running.
    Error { error: String },
    /// The transport's receive loop has exited; no further events follow.
    Closed,
}

/// Common surface the transport manager drives, whether backed by a UDP
/// socket or a SIP/ICE adapter (`transport::ice::SipIceTransport`).
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    fn local_addr(&self) -> Result<SocketAddr>;
    async fn send_message(&self, message: Message, destination: SocketAddr) -> Result<()>;
    async fn close(&self) -> Result<()>;
    fn is_closed(&self) -> bool;
}
