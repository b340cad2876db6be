//! # Generic SIP Header
//!
//! [`Header`] is the untyped `name: value` pair produced while splitting a
//! message envelope into header lines, before any individual header's own
//! parsing logic is applied.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl Header {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// Builds a header carrying a plain-text value.
    pub fn text(name: HeaderName, value: impl Into<String>) -> Self {
        Self::new(name, HeaderValue::text(value))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
