//! Fans transport events out to more than one subscriber (the dialog layer,
//! a metrics sink, a test harness) without them racing on a single
//! `mpsc::Receiver`.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::transport::TransportEvent;

const DEFAULT_CAPACITY: usize = 256;

pub struct TransportEventAdapter {
    tx: broadcast::Sender<TransportEvent>,
}

impl TransportEventAdapter {
    pub fn new(capacity: Option<usize>) -> Self {
        let (tx, _) = broadcast::channel(capacity.unwrap_or(DEFAULT_CAPACITY));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.tx.subscribe()
    }

    /// Drains `source` and republishes every event onto this adapter's bus
    /// until the transport closes or every subscriber has dropped.
    pub fn spawn_forwarder(self: &Arc<Self>, mut source: mpsc::Receiver<TransportEvent>) {
        let adapter = self.clone();
        tokio::spawn(async move {
            while let Some(event) = source.recv().await {
                let closed = matches!(event, TransportEvent::Closed);
                // No subscribers yet is not an error; the event is simply dropped.
                let _ = adapter.tx.send(event);
                if closed {
                    break;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcasts_to_every_subscriber() {
        let adapter = Arc::new(TransportEventAdapter::new(None));
        let mut sub_a = adapter.subscribe();
        let mut sub_b = adapter.subscribe();

        let (tx, rx) = mpsc::channel(4);
        adapter.spawn_forwarder(rx);
        tx.send(TransportEvent::Closed).await.unwrap();

        assert!(matches!(sub_a.recv().await.unwrap(), TransportEvent::Closed));
        assert!(matches!(sub_b.recv().await.unwrap(), TransportEvent::Closed));
    }
}
