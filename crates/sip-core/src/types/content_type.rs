//! # SIP Content-Type Header
//!
//! Identifies the media type of the message body (RFC 3261 Section 20.15),
//! most commonly `application/sdp` for offers/answers carried in INVITE and
//! its responses.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::media_type::MediaType;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType(pub MediaType);

impl ContentType {
    pub fn new(media_type: MediaType) -> Self {
        Self(media_type)
    }

    pub fn media_type(&self) -> &MediaType {
        &self.0
    }

    pub fn sdp() -> Self {
        Self(MediaType::sdp())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MediaType::from_str(s).map(Self)
    }
}

impl Deref for ContentType {
    type Target = MediaType;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TypedHeaderTrait for ContentType {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::ContentType
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::ContentType {
            return Err(Error::InvalidHeader(format!(
                "Expected Content-Type header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Content-Type header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
