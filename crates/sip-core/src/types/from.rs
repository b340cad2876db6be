//! # SIP From Header
//!
//! Identifies the logical originator of the request (RFC 3261 Section
//! 8.1.1.3). Carries the same `name-addr`/`addr-spec` grammar as `To`, and
//! for dialog-creating requests the UAC must add a fresh `tag` parameter.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::address::Address;
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct From(pub Address);

impl From {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn address(&self) -> &Address {
        &self.0
    }

    pub fn tag(&self) -> Option<&str> {
        self.0.tag()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.0.set_tag(tag)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }
}

impl fmt::Display for From {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for From {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s).map(From)
    }
}

impl Deref for From {
    type Target = Address;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TypedHeaderTrait for From {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::From
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::From {
            return Err(Error::InvalidHeader(format!(
                "Expected From header, got {}", header.name
            )));
        }

        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in From header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
