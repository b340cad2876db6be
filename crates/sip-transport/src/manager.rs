//! Owns every transport bound by the daemon and fans their events into one
//! channel, so callers above (the dialog layer) see a single inbound stream
//! no matter how many sockets/ICE components are actually live.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use rvoip_sip_core::Message;
use tokio::sync::{mpsc, RwLock};

use crate::error::{Error, Result};
use crate::factory::{TransportFactory, TransportType};
use crate::transport::{Transport, TransportEvent};

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

pub struct TransportManager {
    transports: RwLock<HashMap<SocketAddr, Arc<dyn Transport>>>,
    events_tx: mpsc::Sender<TransportEvent>,
}

impl TransportManager {
    pub async fn new(channel_capacity: Option<usize>) -> Result<(Self, mpsc::Receiver<TransportEvent>)> {
        let (events_tx, events_rx) = mpsc::channel(channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY));
        Ok((
            Self {
                transports: RwLock::new(HashMap::new()),
                events_tx,
            },
            events_rx,
        ))
    }

    /// Convenience constructor used by callers that don't care about sizing
    /// the aggregate event channel.
    pub async fn with_defaults() -> Result<(Self, mpsc::Receiver<TransportEvent>)> {
        Self::new(None).await
    }

    /// Binds a new transport and starts relaying its events onto this
    /// manager's aggregate channel. Returns the address it bound to.
    pub async fn create_transport(
        &self,
        transport_type: TransportType,
        bind_addr: SocketAddr,
    ) -> Result<SocketAddr> {
        let (transport, rx) = TransportFactory::create(transport_type, bind_addr, None).await?;
        let transport: Arc<dyn Transport> = Arc::from(transport);
        self.adopt(transport, rx).await
    }

    /// Registers an already-constructed transport (e.g. a
    /// `transport::ice::SipIceTransport` built once ICE connectivity checks
    /// complete) and relays its events the same way.
    pub async fn register_transport(
        &self,
        transport: Arc<dyn Transport>,
        events_rx: mpsc::Receiver<TransportEvent>,
    ) -> Result<SocketAddr> {
        self.adopt(transport, events_rx).await
    }

    async fn adopt(
        &self,
        transport: Arc<dyn Transport>,
        mut events_rx: mpsc::Receiver<TransportEvent>,
    ) -> Result<SocketAddr> {
        let local_addr = transport.local_addr()?;

        let forward_tx = self.events_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = events_rx.recv().await {
                let closed = matches!(event, TransportEvent::Closed);
                if forward_tx.send(event).await.is_err() || closed {
                    break;
                }
            }
        });

        self.transports.write().await.insert(local_addr, transport);
        Ok(local_addr)
    }

    /// Sends `message` to `destination` over the first transport that isn't
    /// closed. Every transport here is connectionless, so there's no
    /// per-destination binding to route on; callers that need a specific
    /// local interface should send through that transport directly instead.
    pub async fn send_message(&self, message: Message, destination: SocketAddr) -> Result<()> {
        let transports = self.transports.read().await;
        let transport = transports
            .values()
            .find(|t| !t.is_closed())
            .ok_or(Error::NoTransport(destination))?;
        transport.send_message(message, destination).await
    }

    pub async fn close_all(&self) -> Result<()> {
        let transports = self.transports.read().await;
        for transport in transports.values() {
            transport.close().await?;
        }
        Ok(())
    }
}
