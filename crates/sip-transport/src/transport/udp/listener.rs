//! Binds and reads from the UDP socket backing a [`super::UdpTransport`].

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use crate::error::Result;

const MAX_DATAGRAM_SIZE: usize = 65_535;

pub struct UdpListener {
    socket: Arc<UdpSocket>,
}

impl UdpListener {
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket: Arc::new(socket) })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn clone_socket(&self) -> Arc<UdpSocket> {
        self.socket.clone()
    }

    /// Receives one datagram, returning its bytes, the sender's address,
    /// and the local address it arrived on.
    pub async fn receive(&self) -> Result<(Vec<u8>, SocketAddr, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, src) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);
        let local = self.socket.local_addr()?;
        Ok((buf, src, local))
    }

    #[cfg(test)]
    pub fn default() -> Self {
        // A closed placeholder; never actually used to send/receive (see
        // `UdpTransport::default`, which marks the transport closed before
        // its receive loop would touch this socket).
        let socket = std::net::UdpSocket::bind("127.0.0.1:0").expect("bind dummy socket");
        socket.set_nonblocking(true).expect("set nonblocking");
        Self {
            socket: Arc::new(UdpSocket::from_std(socket).expect("wrap dummy socket")),
        }
    }
}
