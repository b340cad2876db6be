use std::io;
use thiserror::Error as ThisError;

/// Result type for RTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for RTP packet, session, and statistics handling.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("RTP packet error: {0}")]
    PacketError(String),

    #[error("RTCP packet error: {0}")]
    RtcpError(String),

    #[error("RTP session error: {0}")]
    SessionError(String),

    #[error("buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Other(String),
}
