//! ICE candidates (RFC 8445 §5) and their concrete UDP/TCP socket-backed
//! transports.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::net::{TcpSocket, TcpStream, UdpSocket};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Candidate type per RFC 8445 §5.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateType {
    Host,
    ServerReflexive,
    PeerReflexive,
    Relayed,
}

impl CandidateType {
    fn as_sdp_token(&self) -> &'static str {
        match self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relayed => "relay",
        }
    }

    fn type_preference(&self) -> u32 {
        match self {
            CandidateType::Host => 126,
            CandidateType::PeerReflexive => 110,
            CandidateType::ServerReflexive => 100,
            CandidateType::Relayed => 0,
        }
    }
}

/// Transport protocol a candidate is reachable over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportType {
    Udp,
    Tcp,
    TcpActive,
    TcpPassive,
    TcpSo,
}

impl TransportType {
    pub fn is_tcp(&self) -> bool {
        !matches!(self, TransportType::Udp)
    }

    fn as_sdp_token(&self) -> &'static str {
        match self {
            TransportType::Udp => "UDP",
            _ => "TCP",
        }
    }
}

/// A single ICE candidate's address/priority/foundation information,
/// independent of the socket backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct IceCandidate {
    pub foundation: String,
    pub component: u32,
    pub transport: TransportType,
    pub priority: u32,
    pub ip: std::net::IpAddr,
    pub port: u16,
    pub candidate_type: CandidateType,
    pub related_address: Option<SocketAddr>,
}

impl IceCandidate {
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }

    /// RFC 8445 §5.1.2.1 recommended priority formula.
    pub fn compute_priority(type_pref: u32, local_pref: u32, component: u32) -> u32 {
        (type_pref << 24) + (local_pref << 8) + (256 - component.min(256))
    }

    pub fn to_sdp_string(&self) -> String {
        let mut s = format!(
            "candidate:{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.transport.as_sdp_token(),
            self.priority,
            self.ip,
            self.port,
            self.candidate_type.as_sdp_token(),
        );
        if let Some(raddr) = self.related_address {
            s.push_str(&format!(" raddr {} rport {}", raddr.ip(), raddr.port()));
        }
        s
    }

    pub fn from_sdp_string(line: &str) -> Result<Self> {
        let line = line.strip_prefix("candidate:").unwrap_or(line);
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 8 {
            return Err(Error::InvalidCandidate(format!("too few fields: {}", line)));
        }
        let foundation = parts[0].to_string();
        let component: u32 = parts[1]
            .parse()
            .map_err(|_| Error::InvalidCandidate("bad component".into()))?;
        let transport = match parts[2].to_ascii_uppercase().as_str() {
            "UDP" => TransportType::Udp,
            "TCP" => TransportType::Tcp,
            other => return Err(Error::InvalidCandidate(format!("bad transport: {}", other))),
        };
        let priority: u32 = parts[3]
            .parse()
            .map_err(|_| Error::InvalidCandidate("bad priority".into()))?;
        let ip: std::net::IpAddr = parts[4]
            .parse()
            .map_err(|_| Error::InvalidCandidate("bad address".into()))?;
        let port: u16 = parts[5]
            .parse()
            .map_err(|_| Error::InvalidCandidate("bad port".into()))?;
        if parts[6] != "typ" {
            return Err(Error::InvalidCandidate("missing typ token".into()));
        }
        let candidate_type = match parts[7] {
            "host" => CandidateType::Host,
            "srflx" => CandidateType::ServerReflexive,
            "prflx" => CandidateType::PeerReflexive,
            "relay" => CandidateType::Relayed,
            other => return Err(Error::InvalidCandidate(format!("bad candidate type: {}", other))),
        };
        Ok(IceCandidate {
            foundation,
            component,
            transport,
            priority,
            ip,
            port,
            candidate_type,
            related_address: None,
        })
    }
}

/// Anything that can describe itself as an [`IceCandidate`] and move bytes.
pub trait Candidate {
    fn get_info(&self) -> &IceCandidate;
}

/// A host/srflx/relay candidate backed by a UDP socket.
pub struct UdpCandidate {
    info: IceCandidate,
    socket: Arc<UdpSocket>,
    data_tx: mpsc::Sender<(Vec<u8>, SocketAddr)>,
    data_rx: Mutex<Option<mpsc::Receiver<(Vec<u8>, SocketAddr)>>>,
    closed: AtomicBool,
}

impl UdpCandidate {
    pub async fn new(
        socket: UdpSocket,
        component: u32,
        candidate_type: CandidateType,
        related_address: Option<SocketAddr>,
    ) -> Result<Self> {
        let local_addr = socket.local_addr()?;
        let priority = IceCandidate::compute_priority(candidate_type.type_preference(), 65535, component);
        let info = IceCandidate {
            foundation: format!("udp{}{}", component, local_addr.port()),
            component,
            transport: TransportType::Udp,
            priority,
            ip: local_addr.ip(),
            port: local_addr.port(),
            candidate_type,
            related_address,
        };

        let socket = Arc::new(socket);
        let (data_tx, data_rx) = mpsc::channel(256);
        let recv_socket = socket.clone();
        let recv_tx = data_tx.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 65536];
            loop {
                match recv_socket.recv_from(&mut buf).await {
                    Ok((len, src)) => {
                        if recv_tx.send((buf[..len].to_vec(), src)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("UDP candidate recv error: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            info,
            socket,
            data_tx,
            data_rx: Mutex::new(Some(data_rx)),
            closed: AtomicBool::new(false),
        })
    }

    pub async fn send_to(&self, data: &[u8], dest: SocketAddr) -> Result<()> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(Error::ConnectionError("candidate closed".into()));
        }
        self.socket.send_to(data, dest).await?;
        Ok(())
    }

    /// Takes the receiver for this candidate's incoming datagrams. Only one
    /// caller may hold it at a time.
    pub fn get_data_receiver(&self) -> mpsc::Receiver<(Vec<u8>, SocketAddr)> {
        self.data_rx
            .try_lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .unwrap_or_else(|| {
                let (_tx, rx) = mpsc::channel(1);
                rx
            })
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }
}

impl Candidate for UdpCandidate {
    fn get_info(&self) -> &IceCandidate {
        &self.info
    }
}

/// A host/srflx/relay candidate backed by a TCP connection (active, passive
/// or simultaneous-open per RFC 6544).
pub struct TcpCandidate {
    info: IceCandidate,
    stream: Mutex<Option<TcpStream>>,
    transport: TransportType,
}

impl TcpCandidate {
    pub async fn new(
        socket: TcpSocket,
        transport: TransportType,
        component: u32,
        candidate_type: CandidateType,
        related_address: Option<SocketAddr>,
    ) -> Result<Self> {
        let local_addr = socket.local_addr()?;
        let priority = IceCandidate::compute_priority(candidate_type.type_preference(), 65535, component);
        let info = IceCandidate {
            foundation: format!("tcp{}{}", component, local_addr.port()),
            component,
            transport,
            priority,
            ip: local_addr.ip(),
            port: local_addr.port(),
            candidate_type,
            related_address,
        };
        // Passive candidates listen; active/so candidates connect on demand
        // when a remote candidate is paired with them. For gathering we only
        // need the bound local address, so the socket is dropped here and a
        // fresh connection made lazily in `send_to`.
        drop(socket);
        Ok(Self {
            info,
            stream: Mutex::new(None),
            transport,
        })
    }

    pub async fn send_to(&self, data: &[u8], dest: SocketAddr) -> Result<()> {
        let mut guard = self.stream.lock().await;
        if guard.is_none() {
            debug!("Opening TCP connection to {} for candidate pairing", dest);
            let stream = TcpStream::connect(dest).await?;
            *guard = Some(stream);
        }
        if let Some(stream) = guard.as_mut() {
            use tokio::io::AsyncWriteExt;
            stream.write_all(data).await?;
        }
        Ok(())
    }
}

impl Candidate for TcpCandidate {
    fn get_info(&self) -> &IceCandidate {
        &self.info
    }
}
