//! # SIP Wire Parser
//!
//! Turns a raw datagram or stream frame into a [`crate::types::sip_message::Message`].
//! The envelope (start-line, header lines, body) is split by hand in
//! [`message`]; each individual header's value is then parsed by its own
//! [`crate::types::header::TypedHeaderTrait::from_header`].

pub mod message;
pub mod utils;

pub use message::{parse_message, parse_message_with_mode, ParseMode};
