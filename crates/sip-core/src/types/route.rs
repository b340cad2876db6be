//! # SIP Route Header
//!
//! The Route header (RFC 3261 Section 20.34) carries the sequence of
//! proxies a request must be forced through, built by the UAC from a
//! preloaded route set or from Record-Route entries collected during
//! dialog establishment.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::header::Header;
use crate::types::{Address, HeaderName, HeaderValue, TypedHeaderTrait};

/// A single route-param: a strict name-addr with optional generic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry(pub Address);

impl RouteEntry {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    pub fn address(&self) -> &Address {
        &self.0
    }

    pub fn is_loose_routing(&self) -> bool {
        self.0.has_param("lr")
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RouteEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_str(s).map(Self)
    }
}

/// Typed Route header: an ordered list of [`RouteEntry`] forcing the
/// request through a specific sequence of proxies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route(pub Vec<RouteEntry>);

impl Route {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_entries(entries: Vec<RouteEntry>) -> Self {
        Self(entries)
    }

    pub fn push(&mut self, entry: RouteEntry) {
        self.0.push(entry);
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Route {
    type Target = Vec<RouteEntry>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", "))
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let entries = s
            .split(',')
            .map(|entry| RouteEntry::from_str(entry.trim()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(entries))
    }
}

impl TypedHeaderTrait for Route {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Route
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::Route {
            return Err(Error::InvalidHeader(format!("Expected Route header, got {}", header.name)));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Route header".to_string()))?;
                Self::from_str(s)
            }
            _ => Err(Error::InvalidHeader(format!("Unexpected value type for Route header: {:?}", header.value))),
        }
    }
}
