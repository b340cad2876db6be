//! ICE (Interactive Connectivity Establishment) implementation for NAT traversal.
//!
//! This crate provides ICE functionality as defined in RFC 8445, including STUN
//! support for NAT traversal in VoIP applications. This is a custom implementation
//! that follows the ICE standard and doesn't rely on the webrtc-ice crate.

// Error handling
pub mod error;

// Core STUN protocol implementation
pub mod stun;

// ICE agent
pub mod agent;

// ICE candidates
pub mod candidate;

// Configuration
pub mod config;

// Multi-component transport carrier
pub mod transport;

// Public exports
pub use agent::{IceAgent, IceAgentState, IceAgentEvent};
pub use candidate::{IceCandidate, CandidateType, TransportType, Candidate};
pub use config::{
    IceConfig, IceServerConfig, IceRole, IceComponent,
    GatheringPolicy, IceConfigBuilder
};
pub use error::{Error, Result};
pub use stun::{StunMessage, StunAttribute, StunMessageType, StunAttributeType};
pub use transport::{IceTransport, RecvCallback};

/// Re-export of common types and functions
pub mod prelude {
    pub use super::{
        IceAgent, IceAgentState, IceAgentEvent,
        IceCandidate, CandidateType, TransportType,
        IceConfig, IceServerConfig, IceRole, IceComponent, GatheringPolicy,
        IceTransport, RecvCallback,
        Error, Result,
        StunMessage, StunAttribute
    };
}

/// ICE protocol constants
pub mod constants {
    /// STUN magic cookie value (RFC 5389)
    pub const STUN_MAGIC_COOKIE: u32 = 0x2112A442;
    
    /// Default port for STUN servers
    pub const DEFAULT_STUN_PORT: u16 = 3478;
    
    /// Default port for TURNS servers
    pub const DEFAULT_TURNS_PORT: u16 = 5349;
}
