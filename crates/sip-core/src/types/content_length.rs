//! # SIP Content-Length Header
//!
//! The octet count of the message body (RFC 3261 Section 20.14). Required
//! on stream-oriented transports to find the end of a message; `with_body`
//! on `Request`/`Response` keeps this in sync automatically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentLength(pub u32);

impl ContentLength {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::ParseError(format!("invalid Content-Length value: {}", s)))?;
        Ok(Self(value))
    }
}

impl TypedHeaderTrait for ContentLength {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::ContentLength
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::ContentLength {
            return Err(Error::InvalidHeader(format!(
                "Expected Content-Length header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Content-Length header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let cl = ContentLength::from_str("56").unwrap();
        assert_eq!(cl.value(), 56);
        assert_eq!(cl.to_string(), "56");
    }
}
