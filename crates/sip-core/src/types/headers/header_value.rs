//! # Generic SIP Header Value
//!
//! Every header this stack parses arrives first as raw bytes carved out of the
//! message envelope; specific header types then parse that raw value on demand
//! via their own `FromStr`/[`super::typed_header::TypedHeaderTrait`] impls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value half of a generic [`super::header::Header`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderValue {
    /// The unparsed bytes of a header value, exactly as they appeared on the wire
    /// (after line-folding has been undone).
    Raw(Vec<u8>),
}

impl HeaderValue {
    /// Builds a raw value from a UTF-8 string.
    pub fn text(value: impl Into<String>) -> Self {
        HeaderValue::Raw(value.into().into_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            HeaderValue::Raw(bytes) => bytes,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Raw(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}
