//! Digest algorithm and quality-of-protection enums shared by the
//! challenge/credential types in this module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The `WWW-Authenticate`/`Authorization` auth-scheme token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScheme {
    Digest,
    Basic,
    Bearer,
    Other(String),
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Digest => write!(f, "Digest"),
            AuthScheme::Basic => write!(f, "Basic"),
            AuthScheme::Bearer => write!(f, "Bearer"),
            AuthScheme::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Digest `algorithm` parameter (RFC 7616 adds SHA-256/SHA-512-256 to RFC 3261's MD5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Md5,
    Md5Sess,
    Sha256,
    Sha256Sess,
    Sha512_256,
    Sha512_256Sess,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::Md5 => "MD5",
            Algorithm::Md5Sess => "MD5-sess",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha256Sess => "SHA-256-sess",
            Algorithm::Sha512_256 => "SHA-512-256",
            Algorithm::Sha512_256Sess => "SHA-512-256-sess",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Algorithm {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MD5" => Ok(Algorithm::Md5),
            "MD5-SESS" => Ok(Algorithm::Md5Sess),
            "SHA-256" => Ok(Algorithm::Sha256),
            "SHA-256-SESS" => Ok(Algorithm::Sha256Sess),
            "SHA-512-256" => Ok(Algorithm::Sha512_256),
            "SHA-512-256-SESS" => Ok(Algorithm::Sha512_256Sess),
            other => Err(Error::InvalidHeader(format!("unknown digest algorithm: {other}"))),
        }
    }
}

/// Digest `qop` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Qop {
    Auth,
    AuthInt,
}

impl fmt::Display for Qop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qop::Auth => write!(f, "auth"),
            Qop::AuthInt => write!(f, "auth-int"),
        }
    }
}

impl FromStr for Qop {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auth" => Ok(Qop::Auth),
            "auth-int" => Ok(Qop::AuthInt),
            other => Err(Error::InvalidHeader(format!("unknown qop value: {other}"))),
        }
    }
}
