//! # SIP Authorization Header
//!
//! Carries the credentials a UA computes in response to a
//! `WWW-Authenticate` challenge (RFC 3261 Section 22.2 / 20.7).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::auth::credentials::Credentials;
use crate::types::auth::params::DigestParam;
use crate::types::auth::scheme::Algorithm;
use crate::types::header::Header;
use crate::types::uri::Uri;
use crate::types::{HeaderName, HeaderValue, TypedHeaderTrait};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization(pub Credentials);

impl Authorization {
    /// Builds Digest credentials from the parameters a UA computes locally;
    /// `response` is the already-hashed digest (RFC 2617 Section 3.2.2.1).
    pub fn digest(
        username: impl Into<String>,
        realm: impl Into<String>,
        nonce: impl Into<String>,
        uri: Uri,
        response: impl Into<String>,
    ) -> Self {
        Self(Credentials::Digest {
            params: vec![
                DigestParam::Username(username.into()),
                DigestParam::Realm(realm.into()),
                DigestParam::Nonce(nonce.into()),
                DigestParam::Uri(uri),
                DigestParam::Response(response.into()),
            ],
        })
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        if let Credentials::Digest { params } = &mut self.0 {
            params.push(DigestParam::Algorithm(algorithm));
        }
        self
    }

    pub fn with_cnonce(mut self, cnonce: impl Into<String>, nonce_count: u32) -> Self {
        if let Credentials::Digest { params } = &mut self.0 {
            params.push(DigestParam::Cnonce(cnonce.into()));
            params.push(DigestParam::NonceCount(nonce_count));
        }
        self
    }

    pub fn username(&self) -> Option<&str> {
        match &self.0 {
            Credentials::Digest { params } => params.iter().find_map(|p| match p {
                DigestParam::Username(u) => Some(u.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Authorization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Credentials::from_str(s).map(Authorization)
    }
}

impl TypedHeaderTrait for Authorization {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Authorization
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::Raw(self.to_string().into_bytes()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != HeaderName::Authorization {
            return Err(Error::InvalidHeader(format!(
                "Expected Authorization header, got {}", header.name
            )));
        }
        match &header.value {
            HeaderValue::Raw(bytes) => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::ParseError("Invalid UTF-8 in Authorization header".to_string()))?;
                Self::from_str(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn digest_credentials_carry_username() {
        let uri = Uri::from_str("sip:registrar.example.com").unwrap();
        let auth = Authorization::digest("alice", "example.com", "n0nce", uri, "deadbeef");
        assert_eq!(auth.username(), Some("alice"));
    }

    #[test]
    fn round_trips_through_header() {
        let uri = Uri::from_str("sip:registrar.example.com").unwrap();
        let auth = Authorization::digest("alice", "example.com", "n0nce", uri, "deadbeef")
            .with_algorithm(Algorithm::Md5);
        let header = auth.to_header();
        let round_trip = Authorization::from_header(&header).unwrap();
        assert_eq!(round_trip.username(), Some("alice"));
    }
}
