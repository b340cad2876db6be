//! # SIP Contact Header
//!
//! RFC 3261 Section 20.10: the Contact header carries a URI (or `*` in a
//! REGISTER request removing all bindings) at which the UA can be reached
//! for the duration of the registration or dialog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::address::Address;
use crate::types::header::Header;
use crate::types::param::Param;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

/// A single `contact-param` entry: a name-addr/addr-spec plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactParamInfo {
    pub address: Address,
}

impl ContactParamInfo {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn expires(&self) -> Option<u32> {
        self.address.params.iter().find_map(|p| match p {
            Param::Expires(v) => Some(*v),
            _ => None,
        })
    }

    pub fn q(&self) -> Option<f32> {
        self.address.params.iter().find_map(|p| match p {
            Param::Q(v) => Some(v.into_inner()),
            _ => None,
        })
    }
}

impl fmt::Display for ContactParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// The value of a Contact header: either a wildcard (REGISTER unregistering
/// all bindings) or a list of contact-params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactValue {
    Star,
    Params(Vec<ContactParamInfo>),
}

impl fmt::Display for ContactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactValue::Star => write!(f, "*"),
            ContactValue::Params(params) => {
                let rendered: Vec<String> = params.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", rendered.join(", "))
            }
        }
    }
}

/// The typed Contact header: zero or more values, each a `ContactValue`
/// produced by one parse of the (possibly comma-separated) header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact(pub Vec<ContactValue>);

impl Contact {
    pub fn new(values: Vec<ContactValue>) -> Self {
        Self(values)
    }

    pub fn is_star(&self) -> bool {
        matches!(self.0.first(), Some(ContactValue::Star))
    }

    /// All contact-params across every value in this header, flattened.
    pub fn params(&self) -> impl Iterator<Item = &ContactParamInfo> {
        self.0.iter().flat_map(|v| match v {
            ContactValue::Star => [].iter(),
            ContactValue::Params(params) => params.iter(),
        })
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

impl FromStr for Contact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "*" {
            return Ok(Contact(vec![ContactValue::Star]));
        }
        let params = s
            .split(',')
            .map(|entry| Address::parse(entry.trim()).map(ContactParamInfo::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Contact(vec![ContactValue::Params(params)]))
    }
}

impl TypedHeaderTrait for Contact {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Contact
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::Contact {
            return Err(Error::InvalidHeader(format!(
                "Expected Contact header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Contact header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::uri::Uri;
    use std::str::FromStr;

    #[test]
    fn star_contact_has_no_params() {
        let contact = Contact::new(vec![ContactValue::Star]);
        assert!(contact.is_star());
        assert_eq!(contact.params().count(), 0);
    }

    #[test]
    fn params_contact_exposes_expires() {
        let uri = Uri::from_str("sip:bob@example.com").unwrap();
        let mut address = Address::new(uri);
        address.params.push(Param::Expires(3600));
        let info = ContactParamInfo::new(address);
        assert_eq!(info.expires(), Some(3600));
        let contact = Contact::new(vec![ContactValue::Params(vec![info])]);
        assert_eq!(contact.params().count(), 1);
    }

    #[test]
    fn parses_star_wildcard() {
        let contact = Contact::from_str("*").unwrap();
        assert!(contact.is_star());
    }

    #[test]
    fn round_trips_through_header() {
        let contact = Contact::from_str("<sip:bob@example.com>").unwrap();
        let header = contact.to_header();
        let round_trip = Contact::from_header(&header).unwrap();
        assert_eq!(round_trip, contact);
    }
}
