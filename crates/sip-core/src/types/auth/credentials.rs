//! # SIP Authentication Credentials
//!
//! This module defines the Credentials type used in Authorization and ProxyAuthorization headers.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::types::auth::params::{
    parse_digest_param, parse_param_pair, split_top_level_commas, AuthParam, DigestParam,
};

/// Represents credentials (Authorization, Proxy-Authorization)
///
/// Credentials are sent by clients in response to authentication challenges. They
/// contain the information needed for the server to authenticate the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Credentials {
    /// Digest authentication credentials with associated parameters
    Digest { params: Vec<DigestParam> },
    /// Basic authentication credentials (Base64 encoded "username:password")
    Basic { token: String }, // Base64 encoded "userid:password"
    /// Bearer token authentication (RFC 8898)
    Bearer { token: String },
    /// Other authentication scheme credentials
    Other { scheme: String, params: Vec<AuthParam> },
}

impl Credentials {
    /// Returns true if the credentials are of the Digest type
    ///
    /// # Returns
    ///
    /// `true` if these are Digest credentials, `false` otherwise
    pub fn is_digest(&self) -> bool {
        matches!(self, Credentials::Digest { .. })
    }
    
    /// Returns true if the credentials are of the Bearer type
    ///
    /// # Returns
    ///
    /// `true` if these are Bearer credentials, `false` otherwise
    pub fn is_bearer(&self) -> bool {
        matches!(self, Credentials::Bearer { .. })
    }
    
    /// Creates new Bearer credentials with the given token
    ///
    /// # Parameters
    ///
    /// - `token`: The Bearer token string
    ///
    /// # Returns
    ///
    /// Bearer credentials with the specified token
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer { token: token.into() }
    }
}

impl fmt::Display for Credentials {
     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Digest { params } => {
                write!(f, "Digest ")?;
                let params_str = params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{}", params_str)
            },
             Credentials::Basic { token } => {
                 write!(f, "Basic {}", token)
            },
            Credentials::Bearer { token } => {
                write!(f, "Bearer {}", token)
            },
            Credentials::Other { scheme, params } => {
                write!(f, "{} ", scheme)?;
                let params_str = params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{}", params_str)
            }
        }
    }
}

impl FromStr for Credentials {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (scheme, rest) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::ParseError(format!("malformed credentials: {}", s)))?;
        let rest = rest.trim_start();
        match scheme.to_ascii_lowercase().as_str() {
            "digest" => {
                let params = split_top_level_commas(rest)
                    .into_iter()
                    .map(|p| {
                        let (name, value) = parse_param_pair(p)
                            .ok_or_else(|| Error::ParseError(format!("malformed digest param: {}", p)))?;
                        parse_digest_param(name, value, true)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Credentials::Digest { params })
            }
            "basic" => Ok(Credentials::Basic { token: rest.to_string() }),
            "bearer" => Ok(Credentials::Bearer { token: rest.to_string() }),
            _ => {
                let params = split_top_level_commas(rest)
                    .into_iter()
                    .map(|p| {
                        let (name, value) = parse_param_pair(p)
                            .ok_or_else(|| Error::ParseError(format!("malformed auth param: {}", p)))?;
                        Ok(AuthParam { name: name.to_string(), value: value.to_string() })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Credentials::Other { scheme: scheme.to_string(), params })
            }
        }
    }
} 