//! # SIP Message
//!
//! A parsed message is either a [`Request`] or a [`Response`]; this enum is
//! the common envelope produced by the wire parser and consumed by
//! transaction/transport code that doesn't care which.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::header::{HeaderName, TypedHeader, TypedHeaderTrait};
use crate::types::headers::HeaderAccess;
use crate::types::sip_request::Request;
use crate::types::sip_response::Response;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Request(Request),
    Response(Response),
}

impl Message {
    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Message::Response(_))
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Message::Request(req) => Some(req),
            Message::Response(_) => None,
        }
    }

    pub fn as_response(&self) -> Option<&Response> {
        match self {
            Message::Request(_) => None,
            Message::Response(resp) => Some(resp),
        }
    }

    pub fn into_request(self) -> Option<Request> {
        match self {
            Message::Request(req) => Some(req),
            Message::Response(_) => None,
        }
    }

    pub fn into_response(self) -> Option<Response> {
        match self {
            Message::Request(_) => None,
            Message::Response(resp) => Some(resp),
        }
    }

    pub fn body(&self) -> &[u8] {
        match self {
            Message::Request(req) => req.body(),
            Message::Response(resp) => resp.body(),
        }
    }

    /// Serializes the message to wire format (start-line, headers, blank
    /// line, raw body bytes) for handing to a transport's socket send.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Message::Request(req) => req.to_bytes(),
            Message::Response(resp) => resp.to_bytes(),
        }
    }
}

impl From<Request> for Message {
    fn from(request: Request) -> Self {
        Message::Request(request)
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        Message::Response(response)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Request(req) => write!(f, "{}", req),
            Message::Response(resp) => write!(f, "{}", resp),
        }
    }
}

impl HeaderAccess for Message {
    fn typed_headers<T: TypedHeaderTrait + 'static>(&self) -> Vec<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        match self {
            Message::Request(req) => req.typed_headers::<T>(),
            Message::Response(resp) => resp.typed_headers::<T>(),
        }
    }

    fn typed_header<T: TypedHeaderTrait + 'static>(&self) -> Option<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        match self {
            Message::Request(req) => HeaderAccess::typed_header::<T>(req),
            Message::Response(resp) => HeaderAccess::typed_header::<T>(resp),
        }
    }

    fn headers(&self, name: &HeaderName) -> Vec<&TypedHeader> {
        match self {
            Message::Request(req) => req.headers(name),
            Message::Response(resp) => resp.headers(name),
        }
    }

    fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        match self {
            Message::Request(req) => HeaderAccess::header(req, name),
            Message::Response(resp) => HeaderAccess::header(resp, name),
        }
    }

    fn headers_by_name(&self, name: &str) -> Vec<&TypedHeader> {
        match self {
            Message::Request(req) => req.headers_by_name(name),
            Message::Response(resp) => resp.headers_by_name(name),
        }
    }

    fn raw_header_value(&self, name: &HeaderName) -> Option<String> {
        match self {
            Message::Request(req) => req.raw_header_value(name),
            Message::Response(resp) => resp.raw_header_value(name),
        }
    }

    fn raw_headers(&self, name: &HeaderName) -> Vec<Vec<u8>> {
        match self {
            Message::Request(req) => req.raw_headers(name),
            Message::Response(resp) => resp.raw_headers(name),
        }
    }

    fn header_names(&self) -> Vec<HeaderName> {
        match self {
            Message::Request(req) => req.header_names(),
            Message::Response(resp) => resp.header_names(),
        }
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        match self {
            Message::Request(req) => req.has_header(name),
            Message::Response(resp) => resp.has_header(name),
        }
    }
}
