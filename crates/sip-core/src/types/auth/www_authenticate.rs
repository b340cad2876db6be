//! # SIP WWW-Authenticate Header
//!
//! Challenges a UA to authenticate itself to the registrar/proxy it is
//! talking to directly (as opposed to Proxy-Authenticate, scoped to an
//! intermediate proxy). RFC 3261 Section 22.2 / RFC 3261 Section 20.44.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::auth::challenge::Challenge;
use crate::types::auth::params::{AuthParam, DigestParam};
use crate::types::auth::scheme::{Algorithm, Qop};
use crate::types::header::Header;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WwwAuthenticate(pub Vec<Challenge>);

impl WwwAuthenticate {
    pub fn new(realm: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self(vec![Challenge::Digest {
            params: vec![DigestParam::Realm(realm.into()), DigestParam::Nonce(nonce.into())],
        }])
    }

    pub fn new_basic(realm: impl Into<String>) -> Self {
        Self(vec![Challenge::Basic {
            params: vec![AuthParam { name: "realm".to_string(), value: realm.into() }],
        }])
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        if let Some(Challenge::Digest { params }) = self.0.first_mut() {
            params.push(DigestParam::Algorithm(algorithm));
        }
        self
    }

    pub fn with_qop(mut self, qop: Qop) -> Self {
        if let Some(Challenge::Digest { params }) = self.0.first_mut() {
            params.push(DigestParam::Qop(vec![qop]));
        }
        self
    }

    pub fn with_opaque(mut self, opaque: impl Into<String>) -> Self {
        if let Some(Challenge::Digest { params }) = self.0.first_mut() {
            params.push(DigestParam::Opaque(opaque.into()));
        }
        self
    }

    pub fn with_stale(mut self, stale: bool) -> Self {
        if let Some(Challenge::Digest { params }) = self.0.first_mut() {
            params.push(DigestParam::Stale(stale));
        }
        self
    }

    pub fn first_digest(&self) -> Option<&Challenge> {
        self.0.iter().find(|c| matches!(c, Challenge::Digest { .. }))
    }

    pub fn realm(&self) -> Option<&str> {
        self.first_digest().and_then(|c| match c {
            Challenge::Digest { params } => params.iter().find_map(|p| match p {
                DigestParam::Realm(r) => Some(r.as_str()),
                _ => None,
            }),
            _ => None,
        })
    }

    pub fn nonce(&self) -> Option<&str> {
        self.first_digest().and_then(|c| match c {
            Challenge::Digest { params } => params.iter().find_map(|p| match p {
                DigestParam::Nonce(n) => Some(n.as_str()),
                _ => None,
            }),
            _ => None,
        })
    }
}

impl fmt::Display for WwwAuthenticate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

impl FromStr for WwwAuthenticate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Challenge::from_str(s).map(|challenge| WwwAuthenticate(vec![challenge]))
    }
}

impl TypedHeaderTrait for WwwAuthenticate {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::WwwAuthenticate
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::WwwAuthenticate {
            return Err(Error::InvalidHeader(format!(
                "Expected WWW-Authenticate header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in WWW-Authenticate header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}
