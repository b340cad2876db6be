//! # SIP Version
//!
//! The `SIP-Version` token of a request-line or status-line (RFC 3261
//! Section 7.1/7.2), always "SIP/2.0" in practice but modeled with explicit
//! major/minor fields for forward compatibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    pub fn sip_2_0() -> Self {
        Self::new(2, 0)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::sip_2_0()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix("SIP/")
            .ok_or_else(|| Error::InvalidVersion)?;
        let (major, minor) = rest.split_once('.').ok_or(Error::InvalidVersion)?;
        let major = major.parse::<u8>().map_err(|_| Error::InvalidVersion)?;
        let minor = minor.parse::<u8>().map_err(|_| Error::InvalidVersion)?;
        Ok(Self { major, minor })
    }
}
