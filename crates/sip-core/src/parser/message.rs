//! # SIP Message Envelope Parser
//!
//! Splits a raw SIP datagram or stream frame into a start-line, a set of
//! `Name: value` header lines (with RFC 3261 Section 7.3.1 line-folding
//! undone) and a body, then builds a [`Request`] or [`Response`] from the
//! result. Per-header parsing is delegated to each header type's own
//! [`TypedHeaderTrait::from_header`].

use std::convert::TryFrom;
use std::str::FromStr;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::parser::utils::unfold_lws;
use crate::types::header::{Header, HeaderName, HeaderValue, TypedHeader};
use crate::types::method::Method;
use crate::types::sip_message::Message;
use crate::types::sip_request::Request;
use crate::types::sip_response::Response;
use crate::types::status::StatusCode;
use crate::types::uri::Uri;
use crate::types::version::Version;

/// Controls how strictly [`parse_message_with_mode`] treats deviations from
/// the ABNF grammar (e.g. a missing Content-Length, a truncated body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Reject any structural deviation from RFC 3261.
    Strict,
    /// Tolerate a missing or mismatched Content-Length and a short body,
    /// as real-world UAs over UDP sometimes send.
    Lenient,
}

impl Default for ParseMode {
    fn default() -> Self {
        ParseMode::Strict
    }
}

const MAX_HEADERS: usize = 256;
const MAX_LINE_LEN: usize = 8192;

/// Parses a complete SIP message from `input`, in [`ParseMode::Strict`] mode.
pub fn parse_message(input: &[u8]) -> Result<Message> {
    parse_message_with_mode(input, ParseMode::Strict)
}

/// Parses a complete SIP message from `input`.
pub fn parse_message_with_mode(input: &[u8], mode: ParseMode) -> Result<Message> {
    let header_end = find_header_end(input)
        .ok_or_else(|| Error::IncompleteParse("no CRLFCRLF header terminator found".to_string()))?;

    let header_block = &input[..header_end];
    let rest = &input[header_end..];

    let unfolded = unfold_lws(header_block);
    let text = std::str::from_utf8(&unfolded)
        .map_err(|e| Error::ParseError(format!("invalid UTF-8 in message headers: {}", e)))?;

    let mut lines = text.split("\r\n").filter(|l| !l.is_empty());

    let start_line = lines
        .next()
        .ok_or_else(|| Error::InvalidFormat("empty message".to_string()))?;
    if start_line.len() > MAX_LINE_LEN {
        return Err(Error::LineTooLong(start_line.len()));
    }

    let mut headers = Vec::new();
    for line in lines {
        if line.len() > MAX_LINE_LEN {
            return Err(Error::LineTooLong(line.len()));
        }
        headers.push(parse_header_line(line)?);
        if headers.len() > MAX_HEADERS {
            return Err(Error::TooManyHeaders(headers.len()));
        }
    }

    let body = extract_body(&headers, rest, mode)?;

    if let Some((version, status, reason)) = try_parse_status_line(start_line) {
        let typed_headers = headers
            .into_iter()
            .map(TypedHeader::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut response = Response::new(status);
        response.version = version;
        if reason != status.reason_phrase() {
            response.reason = Some(reason);
        }
        response.set_headers(typed_headers);
        let response = response.with_body(body);
        return Ok(Message::Response(response));
    }

    let (method, uri, version) = parse_request_line(start_line)?;
    let typed_headers = headers
        .into_iter()
        .map(TypedHeader::try_from)
        .collect::<Result<Vec<_>>>()?;

    let mut request = Request::new(method, uri);
    request.version = version;
    request.set_headers(typed_headers);
    let request = request.with_body(body);

    Ok(Message::Request(request))
}

/// Finds the index just past the CRLFCRLF (or bare LFLF) that ends the
/// header block, i.e. the offset at which the body begins.
fn find_header_end(input: &[u8]) -> Option<usize> {
    if let Some(pos) = input.windows(4).position(|w| w == b"\r\n\r\n") {
        return Some(pos + 4);
    }
    input.windows(2).position(|w| w == b"\n\n").map(|pos| pos + 2)
}

fn try_parse_status_line(line: &str) -> Option<(Version, StatusCode, String)> {
    let mut parts = line.splitn(3, ' ');
    let version = Version::from_str(parts.next()?).ok()?;
    let code = parts.next()?.parse::<u16>().ok()?;
    let status = StatusCode::from_u16(code).ok()?;
    let reason = parts.next().unwrap_or_default().to_string();
    Some((version, status, reason))
}

fn parse_request_line(line: &str) -> Result<(Method, Uri, Version)> {
    let mut parts = line.splitn(3, ' ');
    let method = parts
        .next()
        .ok_or_else(|| Error::InvalidFormat("missing method in request-line".to_string()))?;
    let uri = parts
        .next()
        .ok_or_else(|| Error::InvalidFormat("missing URI in request-line".to_string()))?;
    let version = parts
        .next()
        .ok_or_else(|| Error::InvalidFormat("missing version in request-line".to_string()))?;

    Ok((Method::from_str(method)?, Uri::from_str(uri)?, Version::from_str(version)?))
}

fn parse_header_line(line: &str) -> Result<Header> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| Error::InvalidHeader(format!("missing ':' in header line: {}", line)))?;
    let name = HeaderName::from_str(name.trim())?;
    Ok(Header::new(name, HeaderValue::text(value.trim())))
}

fn extract_body(headers: &[Header], rest: &[u8], mode: ParseMode) -> Result<Bytes> {
    let content_length = headers
        .iter()
        .find(|h| h.name == HeaderName::ContentLength)
        .and_then(|h| h.value.to_string().trim().parse::<usize>().ok());

    match (content_length, mode) {
        (Some(len), _) if len <= rest.len() => Ok(Bytes::copy_from_slice(&rest[..len])),
        (Some(len), ParseMode::Strict) => Err(Error::ContentLengthMismatch { expected: len, actual: rest.len() }),
        (Some(_), ParseMode::Lenient) => Ok(Bytes::copy_from_slice(rest)),
        (None, _) => Ok(Bytes::copy_from_slice(rest)),
    }
}
