//! Common functionality shared between UAC and UAS

pub mod dtmf;
pub mod transfer;
pub mod bridge;
pub mod audio_channels;
pub mod protocol;
pub mod call_ops;

pub use dtmf::*;
pub use transfer::*;
pub use bridge::*;
pub use audio_channels::*;
pub use protocol::*;
pub use call_ops as operations;