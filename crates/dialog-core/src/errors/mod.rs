//! Error types for dialog-core: the Invite Session FSM, SDP negotiation,
//! and the Registration Client.

use thiserror::Error;

/// Classification used to map a crate's errors onto spec.md §7's taxonomy
/// (ConfigurationError, NetworkError, AuthenticationError,
/// NegotiationError, ProtocolError, ResourceExhaustion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Authentication,
    Negotiation,
    Protocol,
    ResourceExhaustion,
}

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("SDP negotiation failed: {0}")]
    Negotiation(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("registration failed: {0}")]
    Registration(String),

    #[error("invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    #[error("transport error: {0}")]
    Transport(#[from] rvoip_sip_transport::Error),

    #[error("sip-core error: {0}")]
    SipCore(#[from] rvoip_sip_core::Error),

    #[error("other dialog-core error: {0}")]
    Other(String),
}

impl DialogError {
    pub fn protocol_error(msg: impl Into<String>) -> Self {
        DialogError::Protocol(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DialogError::Protocol(_) | DialogError::InvalidTransition { .. } => ErrorKind::Protocol,
            DialogError::Negotiation(_) => ErrorKind::Negotiation,
            // regc_cb mapping resolved per SPEC_FULL.md §10 Open Question 2:
            // transport-level registration failure classifies as network,
            // not authentication.
            DialogError::Network(_) | DialogError::Transport(_) => ErrorKind::Network,
            DialogError::Registration(_) => ErrorKind::Network,
            DialogError::SipCore(_) | DialogError::Other(_) => ErrorKind::Protocol,
        }
    }
}

pub type DialogResult<T> = std::result::Result<T, DialogError>;
