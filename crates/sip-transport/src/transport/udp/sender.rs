//! Sends datagrams on the socket shared with a [`super::UdpListener`].

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use crate::error::Result;

pub struct UdpSender {
    socket: Arc<UdpSocket>,
}

impl UdpSender {
    pub fn new(socket: Arc<UdpSocket>) -> Result<Self> {
        Ok(Self { socket })
    }

    /// Sends the whole buffer in one datagram. UDP sendto is atomic for
    /// a single datagram, so unlike a stream transport there is no partial
    /// write to buffer and retry.
    pub async fn send(&self, data: &[u8], destination: SocketAddr) -> Result<()> {
        self.socket.send_to(data, destination).await?;
        Ok(())
    }

    #[cfg(test)]
    pub fn default() -> Self {
        let socket = std::net::UdpSocket::bind("127.0.0.1:0").expect("bind dummy socket");
        socket.set_nonblocking(true).expect("set nonblocking");
        Self {
            socket: Arc::new(UdpSocket::from_std(socket).expect("wrap dummy socket")),
        }
    }
}
