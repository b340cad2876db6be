//! # SIP Refer-To Header
//!
//! Carries the target URI of a REFER request (RFC 3515 Section 2.1),
//! telling the referee where to direct the resulting request.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::address::Address;
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferTo(pub Address);

impl ReferTo {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn address(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for ReferTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReferTo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s).map(Self)
    }
}

impl Deref for ReferTo {
    type Target = Address;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TypedHeaderTrait for ReferTo {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::ReferTo
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::ReferTo {
            return Err(Error::InvalidHeader(format!(
                "Expected Refer-To header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Refer-To header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::uri::Uri;

    #[test]
    fn parses_and_round_trips() {
        let uri = Uri::from_str("sip:bob@example.com").unwrap();
        let refer_to = ReferTo::new(Address::new(uri));
        let header = refer_to.to_header();
        let round_trip = ReferTo::from_header(&header).unwrap();
        assert_eq!(round_trip, refer_to);
    }
}
