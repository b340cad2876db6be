//! # SIP Address
//!
//! `Address` is the common `[display-name] <uri> *(;param)` shape shared by
//! the From, To, Contact, Record-Route and Referred-By header values
//! (RFC 3261 Section 20.10).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::param::{GenericValue, Param};
use crate::types::uri::Uri;

/// An optionally-named URI with header parameters attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub display_name: Option<String>,
    pub uri: Uri,
    pub params: Vec<Param>,
}

impl Address {
    pub fn new(uri: Uri) -> Self {
        Self { display_name: None, uri, params: Vec::new() }
    }

    pub fn new_with_display_name(display_name: impl Into<String>, uri: Uri) -> Self {
        Self { display_name: Some(display_name.into()), uri, params: Vec::new() }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn tag(&self) -> Option<&str> {
        self.params.iter().find_map(|p| match p {
            Param::Tag(v) => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if let Some(existing) = self.params.iter_mut().find(|p| matches!(p, Param::Tag(_))) {
            *existing = Param::Tag(tag);
        } else {
            self.params.push(Param::Tag(tag));
        }
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| match p {
            Param::Other(key, _) => key.eq_ignore_ascii_case(name),
            _ => false,
        })
    }

    /// Checks whether a parameter with the given name is present, matching
    /// both dedicated [`Param`] variants (e.g. `lr`) and generic ones.
    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| match p {
            Param::Lr => name.eq_ignore_ascii_case("lr"),
            Param::Tag(_) => name.eq_ignore_ascii_case("tag"),
            Param::Expires(_) => name.eq_ignore_ascii_case("expires"),
            Param::Other(key, _) => key.eq_ignore_ascii_case(name),
            _ => false,
        })
    }

    /// Parses a `name-addr`/`addr-spec` plus `;param` list (RFC 3261 Section
    /// 20.10), shared by the From/To/Contact/Record-Route/Referred-By header
    /// values: `["Display Name"] "<" uri ">" *(";" param)` or a bare `uri`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let (display_name, uri_str, params_str) = if let Some(lt) = input.find('<') {
            let name_part = input[..lt].trim();
            let display_name = if name_part.is_empty() {
                None
            } else {
                Some(name_part.trim_matches('"').to_string())
            };
            let gt = input[lt..]
                .find('>')
                .ok_or_else(|| Error::InvalidUri("unterminated name-addr: missing '>'".to_string()))?
                + lt;
            (display_name, &input[lt + 1..gt], input[gt + 1..].trim_start())
        } else {
            match input.find(';') {
                Some(idx) => (None, &input[..idx], &input[idx..]),
                None => (None, input, ""),
            }
        };

        let uri = Uri::from_str(uri_str.trim())
            .map_err(|e| Error::InvalidUri(format!("{}: {}", uri_str.trim(), e)))?;

        let mut params = Vec::new();
        for segment in params_str.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            params.push(Self::parse_param(segment));
        }

        Ok(Self { display_name, uri, params })
    }

    fn parse_param(segment: &str) -> Param {
        match segment.split_once('=') {
            Some((name, value)) => {
                let value = value.trim_matches('"');
                match name.to_ascii_lowercase().as_str() {
                    "tag" => Param::Tag(value.to_string()),
                    "expires" => value
                        .parse()
                        .map(Param::Expires)
                        .unwrap_or_else(|_| Param::Other(name.to_string(), Some(GenericValue::Token(value.to_string())))),
                    _ => Param::Other(name.to_string(), Some(GenericValue::Token(value.to_string()))),
                }
            }
            None => {
                if segment.eq_ignore_ascii_case("lr") {
                    Param::Lr
                } else {
                    Param::Other(segment.to_string(), None)
                }
            }
        }
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.display_name {
            write!(f, "\"{}\" <{}>", name, self.uri)?;
        } else {
            write!(f, "<{}>", self.uri)?;
        }
        for param in &self.params {
            write!(f, ";{}", param)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tag_roundtrips() {
        let uri = Uri::from_str("sip:bob@example.com").unwrap();
        let mut addr = Address::new(uri);
        assert_eq!(addr.tag(), None);
        addr.set_tag("abc123");
        assert_eq!(addr.tag(), Some("abc123"));
        addr.set_tag("def456");
        assert_eq!(addr.tag(), Some("def456"));
    }

    #[test]
    fn display_name_is_optional() {
        let uri = Uri::from_str("sip:bob@example.com").unwrap();
        let addr = Address::new_with_display_name("Bob", uri);
        assert_eq!(addr.display_name(), Some("Bob"));
    }

    #[test]
    fn parses_name_addr_with_tag() {
        let addr = Address::parse("\"Bob\" <sip:bob@example.com>;tag=abc123").unwrap();
        assert_eq!(addr.display_name(), Some("Bob"));
        assert_eq!(addr.uri().to_string(), "sip:bob@example.com");
        assert_eq!(addr.tag(), Some("abc123"));
    }

    #[test]
    fn parses_bare_addr_spec() {
        let addr = Address::parse("sip:bob@example.com;expires=3600").unwrap();
        assert!(addr.display_name().is_none());
        assert_eq!(addr.params.iter().find_map(|p| match p {
            Param::Expires(v) => Some(*v),
            _ => None,
        }), Some(3600));
    }
}
