//! # rvoip-rtp-core
//!
//! RTP (RFC 3550) packet format, session loop, and statistics for the rvoip
//! VoIP stack's call and transport core. Handles the per-call encode/send
//! and receive/decode cycle; codec implementations and ring buffers that
//! feed it live in `rvoip-media-core`.

pub mod error;
pub mod packet;
pub mod session;
pub mod stats;
pub mod time;

pub use error::{Error, Result};
pub use packet::{RtpHeader, RtpPacket};
pub use session::{AudioSink, Codec, PcmSink, PcmSource, RtpSession, RtpSessionConfig};
pub use stats::{RtpStats, RtpStatsManager};

/// RTP sequence number (RFC 3550 §5.1), wraps at 16 bits.
pub type RtpSequenceNumber = u16;

/// RTP timestamp (RFC 3550 §5.1), wraps at 32 bits.
pub type RtpTimestamp = u32;

/// RTP synchronization source identifier.
pub type RtpSsrc = u32;
