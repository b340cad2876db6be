//! SIP/ICE Transport Adapter (spec.md §4.3): presents a completed ICE
//! component as if it were a UDP SIP transport, so the rest of the stack
//! routes PDUs through it exactly like [`super::udp::UdpTransport`].

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rvoip_ice_core::transport::IceTransport;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportEvent};

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Bridges one ICE component to the SIP transport manager. Construction
/// registers an `onRecv` callback with the underlying [`IceTransport`];
/// every payload it hands back is parsed as a SIP message and surfaced as
/// a [`TransportEvent::MessageReceived`], same as `UdpTransport`.
#[derive(Clone)]
pub struct SipIceTransport {
    inner: Arc<SipIceTransportInner>,
}

struct SipIceTransportInner {
    ice: Arc<IceTransport>,
    component: u32,
    local_addr: SocketAddr,
    closed: AtomicBool,
    events_tx: mpsc::Sender<TransportEvent>,
}

impl SipIceTransport {
    /// Wraps a completed ICE component. `component` must already have a
    /// nominated candidate pair (`IceTransport::is_completed`); the adapter
    /// does no gathering/negotiation of its own.
    pub async fn new(
        ice: Arc<IceTransport>,
        component: u32,
        channel_capacity: Option<usize>,
    ) -> Result<(Self, mpsc::Receiver<TransportEvent>)> {
        let local_addr = ice
            .get_local_address(component)
            .await
            .map_err(|e| Error::Ice(e.to_string()))?;

        let (events_tx, events_rx) = mpsc::channel(channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY));

        let inner = Arc::new(SipIceTransportInner {
            ice: ice.clone(),
            component,
            local_addr,
            closed: AtomicBool::new(false),
            events_tx,
        });

        let recv_inner = inner.clone();
        ice.set_on_recv(
            component,
            Arc::new(move |data: Vec<u8>| {
                let inner = recv_inner.clone();
                tokio::spawn(async move { inner.handle_recv(data).await });
            }),
        )
        .await
        .map_err(|e| Error::Ice(e.to_string()))?;

        Ok((Self { inner }, events_rx))
    }
}

impl SipIceTransportInner {
    async fn handle_recv(&self, data: Vec<u8>) {
        let source = match self.ice.get_remote_address(self.component).await {
            Ok(addr) => addr,
            Err(e) => {
                warn!("ICE component {} has no nominated remote address yet: {}", self.component, e);
                return;
            }
        };

        match rvoip_sip_core::parse_message(&data) {
            Ok(message) => {
                debug!("received {} bytes over ICE component {} from {}", data.len(), self.component, source);
                let _ = self
                    .events_tx
                    .send(TransportEvent::MessageReceived {
                        message,
                        source,
                        destination: self.local_addr,
                    })
                    .await;
            }
            Err(e) => {
                let _ = self
                    .events_tx
                    .send(TransportEvent::Error {
                        error: format!("error parsing SIP message over ICE: {}", e),
                    })
                    .await;
            }
        }
    }
}

#[async_trait]
impl Transport for SipIceTransport {
    fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr)
    }

    /// Writes `message` to the ICE component. `IceTransport::send` carries
    /// the whole buffer over a single nominated pair and is all-or-nothing
    /// (there is no partial-datagram write to shift and retry, unlike a
    /// stream transport), so the short-write buffering spec.md §4.3
    /// describes never has a partial case to handle here; see DESIGN.md.
    async fn send_message(&self, message: rvoip_sip_core::Message, destination: SocketAddr) -> Result<()> {
        if self.inner.closed.load(Ordering::Relaxed) {
            return Err(Error::TransportClosed);
        }

        let expected = self
            .inner
            .ice
            .get_remote_address(self.inner.component)
            .await
            .map_err(|e| Error::Ice(e.to_string()))?;
        if expected != destination {
            return Err(Error::InvalidAddress(format!(
                "destination {} does not match nominated ICE peer {}",
                destination, expected
            )));
        }

        let bytes = message.to_bytes();
        self.inner
            .ice
            .send(self.inner.component, &bytes)
            .await
            .map_err(|e| Error::Ice(e.to_string()))
    }

    async fn close(&self) -> Result<()> {
        self.inner.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for SipIceTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SipIceTransport(component={}, local={})", self.inner.component, self.inner.local_addr)
    }
}
