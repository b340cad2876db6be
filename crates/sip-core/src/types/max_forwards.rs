//! # SIP Max-Forwards Header
//!
//! Bounds the number of hops a request may traverse (RFC 3261 Section
//! 20.22), decremented by one at each hop and used to detect forwarding
//! loops.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaxForwards(pub u8);

impl MaxForwards {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Decrements by one, saturating at zero for a request that has run out of hops.
    pub fn decrement(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    pub fn is_exhausted(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for MaxForwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MaxForwards {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::ParseError(format!("invalid Max-Forwards value: {}", s)))?;
        Ok(Self(value))
    }
}

impl TypedHeaderTrait for MaxForwards {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::MaxForwards
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::MaxForwards {
            return Err(Error::InvalidHeader(format!(
                "Expected Max-Forwards header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Max-Forwards header".to_string()))?;
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
        let mf = MaxForwards::from_str("70").unwrap();
        assert_eq!(mf.value(), 70);
        assert_eq!(mf.to_string(), "70");
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let mf = MaxForwards::new(0);
        assert!(mf.decrement().is_exhausted());
    }
}
