//! Error types for the SIP transport layer.

use std::net::SocketAddr;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SIP parse error: {0}")]
    Parse(#[from] rvoip_sip_core::Error),

    #[error("transport is closed")]
    TransportClosed,

    #[error("no transport bound to {0}")]
    NoTransport(SocketAddr),

    #[error("invalid destination address: {0}")]
    InvalidAddress(String),

    #[error("ICE transport error: {0}")]
    Ice(String),

    #[error("operation already in flight for this transport")]
    PendingTx,
}

impl rvoip_infra_common::errors::Classify for Error {
    fn kind(&self) -> rvoip_infra_common::errors::ErrorKind {
        use rvoip_infra_common::errors::ErrorKind;
        match self {
            Error::Io(_) | Error::TransportClosed | Error::NoTransport(_) => ErrorKind::Network,
            Error::Parse(_) => ErrorKind::Protocol,
            Error::InvalidAddress(_) => ErrorKind::Configuration,
            Error::Ice(_) => ErrorKind::Network,
            Error::PendingTx => ErrorKind::Protocol,
        }
    }
}
