//! # SIP Types
//!
//! Strongly-typed representations of the SIP message grammar this daemon
//! needs: the envelope (method/URI/version, status codes), the address and
//! parameter primitives shared by name-addr headers, the ~18 header types
//! this peer-to-peer stack actually parses and builds, and SDP (RFC 4566)
//! for offer/answer bodies.

pub mod address;
pub mod auth;
pub mod call_id;
pub mod contact;
pub mod content_length;
pub mod content_type;
pub mod cseq;
pub mod event;
pub mod expires;
pub mod from;
pub mod header;
pub mod headers;
pub mod max_forwards;
pub mod media_type;
pub mod method;
pub mod param;
pub mod record_route;
pub mod refer_to;
pub mod referred_by;
pub mod route;
pub mod sdp;
pub mod sip_message;
pub mod sip_request;
pub mod sip_response;
pub mod status;
pub mod subscription_state;
pub mod to;
pub mod uri;
pub mod version;
pub mod via;

pub use address::Address;
pub use call_id::CallId;
pub use contact::Contact;
pub use content_length::ContentLength;
pub use content_type::ContentType;
pub use cseq::CSeq;
pub use event::{Event, EventType};
pub use expires::Expires;
pub use from::From;
pub use header::{Header, HeaderAccess, HeaderName, HeaderValue, TypedHeader, TypedHeaderTrait};
pub use max_forwards::MaxForwards;
pub use media_type::MediaType;
pub use method::Method;
pub use param::Param;
pub use record_route::{RecordRoute, RecordRouteEntry};
pub use refer_to::ReferTo;
pub use referred_by::ReferredBy;
pub use route::{Route, RouteEntry};
pub use sdp::{
    CandidateAttribute, ConnectionData, FmtpAttribute, MediaDescription, MediaDirection, Origin,
    ParsedAttribute, RepeatTime, RidAttribute, RidDirection, RtpMapAttribute, SdpSession,
    SsrcAttribute, TimeDescription,
};
pub use sip_message::Message;
pub use sip_request::Request;
pub use sip_response::Response;
pub use status::StatusCode;
pub use subscription_state::SubscriptionState;
pub use to::To;
pub use version::Version;
pub use via::{SentProtocol, Via, ViaHeader};
