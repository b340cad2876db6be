//! # SIP Authentication Challenge
//!
//! This module defines the Challenge type used in WWW-Authenticate and Proxy-Authenticate headers.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::types::auth::params::{
    parse_digest_param, parse_param_pair, split_top_level_commas, AuthParam, DigestParam,
};

/// Represents a challenge (WWW-Authenticate, Proxy-Authenticate)
///
/// A challenge is sent by a server in 401 Unauthorized or 407 Proxy Authentication Required
/// responses to request authentication from a client. Challenges can use different
/// authentication schemes, with Digest being the most common in SIP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Challenge {
    /// Digest authentication challenge with associated parameters
    Digest { params: Vec<DigestParam> },
    /// Basic authentication challenge (typically just realm)
    Basic { params: Vec<AuthParam> }, // Typically just realm
    /// Bearer authentication challenge (RFC 8898)
    Bearer { 
        /// The authentication realm
        realm: String,
        /// Optional scope requirement
        scope: Option<String>,
        /// Optional error code
        error: Option<String>,
        /// Optional error description
        error_description: Option<String>,
    },
    /// Other authentication scheme challenges
    Other { scheme: String, params: Vec<AuthParam> },
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Challenge::Digest { params } => {
                write!(f, "Digest ")?;
                let params_str = params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{}", params_str)
            },
            Challenge::Basic { params } => {
                 write!(f, "Basic ")?;
                 let params_str = params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                 write!(f, "{}", params_str)
            },
            Challenge::Bearer { realm, scope, error, error_description } => {
                write!(f, "Bearer realm=\"{}\"", realm)?;
                if let Some(scope) = scope {
                    write!(f, ", scope=\"{}\"", scope)?;
                }
                if let Some(error) = error {
                    write!(f, ", error=\"{}\"", error)?;
                }
                if let Some(error_desc) = error_description {
                    write!(f, ", error_description=\"{}\"", error_desc)?;
                }
                Ok(())
            },
            Challenge::Other { scheme, params } => {
                write!(f, "{} ", scheme)?;
                let params_str = params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{}", params_str)
            }
        }
    }
}

impl FromStr for Challenge {
    type Err = Error;

    /// Parses a single challenge (`scheme param=value, param=value, ...`).
    /// A `WWW-Authenticate` header offering several schemes at once is
    /// unusual in practice; this takes the whole value as one challenge.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (scheme, rest) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::ParseError(format!("malformed challenge: {}", s)))?;
        let rest = rest.trim_start();
        match scheme.to_ascii_lowercase().as_str() {
            "digest" => {
                let params = split_top_level_commas(rest)
                    .into_iter()
                    .map(|p| {
                        let (name, value) = parse_param_pair(p)
                            .ok_or_else(|| Error::ParseError(format!("malformed digest param: {}", p)))?;
                        parse_digest_param(name, value, false)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Challenge::Digest { params })
            }
            "basic" => {
                let params = split_top_level_commas(rest)
                    .into_iter()
                    .map(|p| {
                        let (name, value) = parse_param_pair(p)
                            .ok_or_else(|| Error::ParseError(format!("malformed auth param: {}", p)))?;
                        Ok(AuthParam { name: name.to_string(), value: value.to_string() })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Challenge::Basic { params })
            }
            "bearer" => {
                let mut realm = String::new();
                let mut scope = None;
                let mut error = None;
                let mut error_description = None;
                for p in split_top_level_commas(rest) {
                    if let Some((name, value)) = parse_param_pair(p) {
                        match name.to_ascii_lowercase().as_str() {
                            "realm" => realm = value.to_string(),
                            "scope" => scope = Some(value.to_string()),
                            "error" => error = Some(value.to_string()),
                            "error_description" => error_description = Some(value.to_string()),
                            _ => {}
                        }
                    }
                }
                Ok(Challenge::Bearer { realm, scope, error, error_description })
            }
            _ => {
                let params = split_top_level_commas(rest)
                    .into_iter()
                    .map(|p| {
                        let (name, value) = parse_param_pair(p)
                            .ok_or_else(|| Error::ParseError(format!("malformed auth param: {}", p)))?;
                        Ok(AuthParam { name: name.to_string(), value: value.to_string() })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Challenge::Other { scheme: scheme.to_string(), params })
            }
        }
    }
} 