//! # SIP Expires Header
//!
//! Relative lifetime in seconds for a registration, subscription or offered
//! session (RFC 3261 Section 20.19).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Expires(pub u32);

impl Expires {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Expires {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::ParseError(format!("invalid Expires value: {}", s)))?;
        Ok(Self(value))
    }
}

impl TypedHeaderTrait for Expires {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Expires
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::Expires {
            return Err(Error::InvalidHeader(format!(
                "Expected Expires header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Expires header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
