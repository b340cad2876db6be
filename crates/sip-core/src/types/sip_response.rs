//! # SIP Response Message
//!
//! A response mirrors a request's header/body shape but replaces the
//! request-line with a status-line: `SIP-Version Status-Code Reason-Phrase`
//! (RFC 3261 Section 7.2).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::header::{HeaderName, TypedHeader, TypedHeaderTrait};
use crate::types::headers::HeaderAccess;
use crate::types::status::StatusCode;
use crate::types::version::Version;
use crate::types::{self, CSeq, CallId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: StatusCode,
    pub reason: Option<String>,
    pub version: Version,
    pub headers: Vec<TypedHeader>,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Response {
            status,
            reason: None,
            version: Version::sip_2_0(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Creates a response with an explicit reason phrase, overriding the
    /// status code's default (e.g. a proxy relaying a localized phrase).
    pub fn new_with_reason(status: StatusCode, reason: impl Into<String>) -> Self {
        let mut response = Self::new(status);
        response.reason = Some(reason.into());
        response
    }

    pub fn with_header(mut self, header: TypedHeader) -> Self {
        self.headers.push(header);
        self
    }

    pub fn set_headers(&mut self, headers: Vec<TypedHeader>) {
        self.headers = headers;
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();

        let content_length =
            TypedHeader::ContentLength(types::content_length::ContentLength(self.body.len() as u32));
        self.headers.retain(|h| h.name() != HeaderName::ContentLength);
        self.headers.push(content_length);

        self
    }

    pub fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.iter().find(|h| h.name() == *name)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn reason(&self) -> &str {
        self.reason.as_deref().unwrap_or_else(|| self.status.reason_phrase())
    }

    pub fn version(&self) -> Version {
        self.version.clone()
    }

    pub fn typed_header<T: TypedHeaderTrait + 'static>(&self) -> Option<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        self.headers.iter().find_map(|h| h.as_typed_ref::<T>())
    }

    pub fn call_id(&self) -> Option<&CallId> {
        match self.header(&HeaderName::CallId) {
            Some(TypedHeader::CallId(cid)) => Some(cid),
            _ => None,
        }
    }

    pub fn from(&self) -> Option<&types::From> {
        match self.header(&HeaderName::From) {
            Some(TypedHeader::From(from)) => Some(from),
            _ => None,
        }
    }

    pub fn to(&self) -> Option<&types::To> {
        match self.header(&HeaderName::To) {
            Some(TypedHeader::To(to)) => Some(to),
            _ => None,
        }
    }

    pub fn cseq(&self) -> Option<&CSeq> {
        match self.header(&HeaderName::CSeq) {
            Some(TypedHeader::CSeq(cseq)) => Some(cseq),
            _ => None,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn all_headers(&self) -> &[TypedHeader] {
        &self.headers
    }

    pub fn to_bytes_no_body(&self) -> Vec<u8> {
        let mut buffer = Vec::new();

        buffer.extend_from_slice(
            format!("{} {} {}\r\n", self.version, self.status.as_u16(), self.reason()).as_bytes(),
        );

        for header in &self.headers {
            buffer.extend_from_slice(format!("{}\r\n", header).as_bytes());
        }

        buffer.extend_from_slice(b"\r\n");
        buffer
    }

    /// Serializes the response to wire format: status-line, headers, blank
    /// line, then the raw body bytes (not the lossy UTF-8 fallback `Display`
    /// uses for human-readable printing).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = self.to_bytes_no_body();
        buffer.extend_from_slice(&self.body);
        buffer
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.status.as_u16(), self.reason())?;

        for header in &self.headers {
            write!(f, "\r\n{}", header)?;
        }

        write!(f, "\r\n")?;

        if !self.body.is_empty() {
            write!(f, "\r\n")?;
            match std::str::from_utf8(&self.body) {
                Ok(body_str) => write!(f, "{}", body_str)?,
                Err(_) => {
                    let display_len = std::cmp::min(self.body.len(), 100);
                    for b in &self.body[..display_len] {
                        write!(f, "{:02x}", b)?;
                    }
                    if self.body.len() > 100 {
                        write!(f, "... [truncated, {} bytes total]", self.body.len())?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl HeaderAccess for Response {
    fn typed_headers<T: TypedHeaderTrait + 'static>(&self) -> Vec<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        use crate::types::headers::collect_typed_headers;
        collect_typed_headers::<T>(&self.headers)
    }

    fn typed_header<T: TypedHeaderTrait + 'static>(&self) -> Option<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        self.typed_headers::<T>().into_iter().next()
    }

    fn headers(&self, name: &HeaderName) -> Vec<&TypedHeader> {
        self.headers.iter().filter(|h| h.name() == *name).collect()
    }

    fn header(&self, name: &HeaderName) -> Option<&TypedHeader> {
        self.headers.iter().find(|h| h.name() == *name)
    }

    fn headers_by_name(&self, name: &str) -> Vec<&TypedHeader> {
        match HeaderName::from_str(name) {
            Ok(header_name) => self.headers(&header_name),
            Err(_) => Vec::new(),
        }
    }

    fn raw_header_value(&self, name: &HeaderName) -> Option<String> {
        self.header(name).and_then(|h| match h.to_string().split_once(':') {
            Some((_, value)) => Some(value.trim().to_string()),
            None => None,
        })
    }

    fn raw_headers(&self, name: &HeaderName) -> Vec<Vec<u8>> {
        self.headers(name)
            .iter()
            .filter_map(|h| match h.to_string().split_once(':') {
                Some((_, value)) => Some(value.trim().as_bytes().to_vec()),
                None => None,
            })
            .collect()
    }

    fn header_names(&self) -> Vec<HeaderName> {
        let mut names = HashSet::new();
        for header in &self.headers {
            names.insert(header.name());
        }
        names.into_iter().collect()
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        self.headers.iter().any(|h| h.name() == *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallId, MaxForwards};

    #[test]
    fn new_response_has_default_reason() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn with_body_sets_content_length() {
        let response = Response::new(StatusCode::Ok).with_body(Bytes::from("hello"));
        assert!(response.has_header(&HeaderName::ContentLength));
    }

    #[test]
    fn header_access_round_trips() {
        let response = Response::new(StatusCode::Ok)
            .with_header(TypedHeader::CallId(CallId::new("abc123")))
            .with_header(TypedHeader::MaxForwards(MaxForwards::new(70)));

        assert!(response.has_header(&HeaderName::CallId));
        assert_eq!(response.header_names().len(), 2);
    }
}
