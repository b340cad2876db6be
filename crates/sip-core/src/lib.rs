//! # rvoip-sip-core
//!
//! Core SIP protocol types and wire parser for the rvoip peer-to-peer
//! communication daemon.
//!
//! This crate provides the strongly-typed SIP message model ([`Request`],
//! [`Response`], [`Message`]) and the envelope parser that turns raw bytes
//! off a socket into one of them. It is the foundation the dialog, session
//! and transport crates build their own abstractions on top of.
//!
//! ## Overview
//!
//! - **Message Types**: [`Request`], [`Response`], [`Message`] and the
//!   header types they carry ([`From`], [`To`], [`Via`], [`Contact`], ...).
//! - **URI Handling**: [`Uri`] / [`Host`] parsing per RFC 3261 Section 19.
//! - **Parsing**: [`parse_message`] / [`parse_message_with_mode`] turn bytes
//!   into a [`Message`], unfolding line-wrapped headers and validating
//!   Content-Length against the body that followed.
//! - **SDP**: [`SdpSession`] parses and renders RFC 4566 offer/answer bodies
//!   (`v=`/`o=`/`s=`/`c=`/`t=`/`m=`/`a=` lines) used by the dialog crate's
//!   offer/answer negotiator.
//!
//! ## Parsing a message
//!
//! ```rust
//! use rvoip_sip_core::prelude::*;
//!
//! let data = b"INVITE sip:bob@example.com SIP/2.0\r\n\
//! Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
//! Max-Forwards: 70\r\n\
//! To: Bob <sip:bob@example.com>\r\n\
//! From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
//! Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
//! CSeq: 314159 INVITE\r\n\
//! Contact: <sip:alice@pc33.atlanta.com>\r\n\
//! Content-Length: 0\r\n\r\n";
//!
//! let message = parse_message(data).expect("valid SIP message");
//!
//! if let Message::Request(request) = message {
//!     assert_eq!(request.method(), Method::Invite);
//!     assert!(request.header(&HeaderName::From).is_some());
//! }
//! ```
//!
//! ## Building a message
//!
//! ```rust
//! use rvoip_sip_core::prelude::*;
//!
//! let request = Request::new_with_essentials(
//!     Method::Invite,
//!     "sip:bob@example.com".parse().unwrap(),
//!     "sip:alice@example.com".parse().unwrap(),
//!     "a84b4c76e66710@pc33.atlanta.com",
//!     1,
//! );
//! assert_eq!(request.method(), Method::Invite);
//! ```
//!
//! ## Parsing modes
//!
//! [`ParseMode::Strict`] rejects a Content-Length that doesn't match the
//! body that followed it; [`ParseMode::Lenient`] accepts a short body as
//! real-world UDP senders sometimes produce.

pub mod error;
pub mod parser;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use parser::{parse_message, parse_message_with_mode, ParseMode};
pub use types::header::{Header, HeaderAccess, HeaderName, HeaderValue, TypedHeader, TypedHeaderTrait};
pub use types::uri::{Host, Uri};
pub use types::{
    Address, CallId, CandidateAttribute, ConnectionData, Contact, ContentLength, ContentType,
    CSeq, Event, EventType, Expires, FmtpAttribute, From, MaxForwards, MediaDescription,
    MediaDirection, MediaType, Message, Method, Origin, Param, ParsedAttribute, RecordRoute,
    RecordRouteEntry, ReferTo, ReferredBy, RepeatTime, Request, Response, RidAttribute,
    RidDirection, Route, RouteEntry, RtpMapAttribute, SdpSession, SsrcAttribute, StatusCode,
    SubscriptionState, TimeDescription, To, Version, Via,
};
pub use types::auth::{Authorization, Challenge, Credentials, WwwAuthenticate};
