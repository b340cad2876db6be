//! # SIP CSeq Header
//!
//! Orders transactions within a dialog and disambiguates retransmissions
//! from new requests (RFC 3261 Section 8.1.1.5): a sequence number paired
//! with the method it was issued for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::method::Method;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CSeq {
    pub seq: u32,
    pub method: Method,
}

impl CSeq {
    pub fn new(seq: u32, method: Method) -> Self {
        Self { seq, method }
    }

    pub fn sequence(&self) -> u32 {
        self.seq
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}

impl FromStr for CSeq {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (seq_str, method_str) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::ParseError(format!("malformed CSeq header: {}", s)))?;
        let seq = seq_str
            .parse::<u32>()
            .map_err(|_| Error::ParseError(format!("invalid CSeq sequence number: {}", seq_str)))?;
        let method = Method::from_str(method_str.trim())?;
        Ok(Self { seq, method })
    }
}

impl TypedHeaderTrait for CSeq {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::CSeq
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::CSeq {
            return Err(Error::InvalidHeader(format!("Expected CSeq header, got {}", header.name)));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in CSeq header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
