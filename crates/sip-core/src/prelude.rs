//! Convenience re-exports for the common SIP message construction and
//! parsing path. `use rvoip_sip_core::prelude::*;` pulls in the core
//! message types and header types most call sites need.

pub use crate::error::{Error, Result};
pub use crate::parser::{parse_message, message::{parse_message_with_mode, ParseMode}};
pub use crate::types::{
    header::{Header, HeaderAccess, HeaderValue, TypedHeader, TypedHeaderTrait},
    headers::HeaderName,
    sdp::{MediaDescription, MediaDirection, SdpSession},
    sip_message::Message,
    sip_request::Request,
    sip_response::Response,
    Method,
    StatusCode,
    Address,
    CallId,
    Contact,
    ContentType,
    ContentLength,
    CSeq,
    Expires,
    From,
    MaxForwards,
    Via,
};
pub use crate::types::uri::{Uri, Host};
