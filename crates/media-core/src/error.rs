//! Error types for ring buffers, resampling, and codec registry lookups.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown codec payload type: {0}")]
    UnknownPayloadType(u8),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid ring buffer capacity: {0}")]
    InvalidCapacity(usize),

    #[error("other media error: {0}")]
    Other(String),
}
