//! # SIP Call-ID Header
//!
//! A globally unique identifier for a dialog (RFC 3261 Section 8.1.1.4),
//! conventionally `localid@host` but opaque beyond that convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl CallId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CallId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidHeader("empty Call-ID".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TypedHeaderTrait for CallId {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::CallId
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.0.clone().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::CallId {
            return Err(Error::InvalidHeader(format!("Expected Call-ID header, got {}", header.name)));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Call-ID header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
