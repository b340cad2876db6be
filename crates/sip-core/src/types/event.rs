//! # SIP Event Header
//!
//! This module provides an implementation of the SIP Event header as defined in
//! [RFC 6665](https://datatracker.ietf.org/doc/html/rfc6665), which obsoletes RFC 3265.
//!
//! The Event header field is used to indicate a subscription to or notification of a
//! resource event. It is a crucial part of the SIP event notification framework,
//! allowing UAs to subscribe to changes in state (e.g., presence status, message waiting)
//! and receive notifications about these events.
//!
//! ## Structure
//!
//! The Event header typically contains an event type (which can be an event package
//! like "presence" or "message-summary", or a simple token) and an optional 'id'
//! parameter. Other generic parameters may also be present.
//!
//! Event Type:
//! - Can be a token (e.g., `dialog`)
//! - Or a package name enclosed in angle brackets (e.g., `<conference>`)
//!
//! Parameters:
//! - `id`: An optional parameter used to match subscriptions with notifications.
//! - Other generic parameters: Key-value pairs or flags.
//!
//! ## Format
//!
//! ```text
//! Event: presence;id=q876098
//! Event: <conference>;id=unique-call-id;param1=value1
//! Event: dialog;foo;bar=baz
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use rvoip_sip_core::types::event::{Event, EventType, ParamValue};
//! use rvoip_sip_core::types::header::TypedHeaderTrait; // For from_header/to_header if needed for testing
//! use rvoip_sip_core::types::Header; // For from_header/to_header if needed for testing
//! use std::str::FromStr;
//!
//! // Create an Event header for presence
//! let presence_event = Event::new(EventType::Token("presence".to_string()))
//!     .with_id("pres-123")
//!     .with_param("status", Some("online"));
//! assert_eq!(presence_event.to_string(), "presence;id=pres-123;status=online");
//!
//! // Create an Event header for a conference package
//! let conf_event = Event::new(EventType::Package("conference-info".to_string()))
//!     .with_id("conf-xyz")
//!     .with_param("version", Some("2"))
//!     .with_param("state", Some("full"));
//! assert_eq!(conf_event.to_string(), "<conference-info>;id=conf-xyz;state=full;version=2"); // Params sorted
//!
//! // Parse from a string (via TypedHeaderTrait if implemented, or direct for value)
//! // For direct value parsing, you'd typically use the parser in `parser::headers::event`
//! // This example assumes direct parsing of the value part for simplicity here.
//! // let parsed_event_val = "dialog;id=abc;custom-flag";
//! // // let event = Event::from_str(parsed_event_val) ... (if FromStr is on Event value)
//! ```

use std::fmt;
use std::str::FromStr;
use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::types::header::{Header, HeaderName, HeaderValue, TypedHeaderTrait};
use crate::{Error, Result}; // Assuming Result is crate::error::Result

/// Represents the value of a generic parameter in an Event header.
/// It can either have a value (String) or be a valueless flag.
///
/// # Examples
///
/// ```rust
/// use rvoip_sip_core::types::event::ParamValue;
///
/// let p_value = ParamValue::Value("some_data".to_string());
/// let p_flag = ParamValue::None;
///
/// assert_eq!(p_value.to_string(), "some_data"); // If Display is implemented, or for debug
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamValue {
    Value(String),
    None, // Represents a valueless parameter (a flag)
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Value(val) => write!(f, "{}", val),
            ParamValue::None => write!(f, ""),
        }
    }
}

/// Type alias for a collection of generic parameters in an Event header.
/// Keys are parameter names (String) and values are `ParamValue`.
///
/// Uses `BTreeMap` to ensure parameters are stored and displayed in a canonical,
/// sorted order by key, as is common practice for SIP headers.
pub type Params = BTreeMap<String, ParamValue>;

/// Represents the type of event in an Event header (RFC 6665).
/// It can be an event package enclosed in angle brackets or a simple token.
///
/// # Examples
///
/// ```rust
/// use rvoip_sip_core::types::event::EventType;
///
/// let pkg_type = EventType::Package("presence".to_string());
/// let tok_type = EventType::Token("dialog".to_string());
///
/// assert_eq!(pkg_type.to_string(), "<presence>");
/// assert_eq!(tok_type.to_string(), "dialog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// An event package, e.g., "`<presence>`"
    Package(String),
    /// A token representing an event type, e.g., "`dialog`"
    Token(String),
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Package(pkg) => write!(f, "<{}>", pkg),
            EventType::Token(tok) => write!(f, "{}", tok),
        }
    }
}

/// Structure for the SIP Event header (RFC 6665).
///
/// Encapsulates an event type, an optional 'id' parameter, and other generic parameters.
/// The 'id' parameter is special and has a dedicated field, while other parameters
/// are stored in a `BTreeMap`.
///
/// See [RFC 6665](https://datatracker.ietf.org/doc/html/rfc6665) for more details.
///
/// # Examples
///
/// ```rust
/// use rvoip_sip_core::types::event::{Event, EventType, ParamValue};
///
/// // Basic construction
/// let event = Event::new(EventType::Token("presence".to_string()));
/// assert_eq!(event.to_string(), "presence");
///
/// // With ID and parameters
/// let event_full = Event::new(EventType::Package("conference".to_string()))
///     .with_id("conf-123")
///     .with_param("version", Some("3"))
///     .with_param("notify-only", None::<String>); // A flag parameter
/// assert_eq!(event_full.to_string(), "<conference>;id=conf-123;notify-only;version=3");
///
/// // Accessing fields
/// assert_eq!(event_full.event_type, EventType::Package("conference".to_string()));
/// assert_eq!(event_full.id, Some("conf-123".to_string()));
/// assert_eq!(event_full.params.get("version"), Some(&ParamValue::Value("3".to_string())));
/// assert_eq!(event_full.params.get("notify-only"), Some(&ParamValue::None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// The type of event or event package.
    pub event_type: EventType,
    /// An optional 'id' parameter, used to match event subscriptions with notifications.
    /// The ABNF specifies `token` for the id value.
    pub id: Option<String>,
    /// Other generic parameters associated with the event.
    /// Stored in a `BTreeMap` for canonical ordering.
    pub params: Params,
}

impl Event {
    /// Creates a new `Event` header with the given event type.
    /// Initializes with no 'id' and no generic parameters.
    ///
    /// # Parameters
    /// - `event_type`: The [`EventType`] for this event.
    pub fn new(event_type: EventType) -> Self {
        Event {
            event_type,
            id: None,
            params: Params::new(),
        }
    }

    /// Sets or replaces the 'id' parameter for the `Event` header.
    ///
    /// # Parameters
    /// - `id`: The value for the 'id' parameter. Accepts any type that can be converted into a `String`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds or updates a generic parameter in the `Event` header.
    /// If `value` is `None`, the parameter is added as a flag (e.g., ";param_name").
    /// If `value` is `Some`, it's added as "key=value" (e.g., ";param_name=param_value").
    ///
    /// # Parameters
    /// - `key`: The name of the parameter. Accepts any type that can be converted into a `String`.
    /// - `value`: An `Option` for the parameter's value. Accepts `Option<impl Into<String>>`.
    ///            If `None`, it's a flag. If `Some`, its content is the value.
    pub fn with_param(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let param_val = match value.map(Into::into) {
            Some(v_str) => ParamValue::Value(v_str),
            None => ParamValue::None,
        };
        self.params.insert(key.into(), param_val);
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_type)?;
        if let Some(id_val) = &self.id {
            // 'id' parameter name is conventionally lowercase.
            write!(f, ";id={}", id_val)?;
        }
        // BTreeMap iterates in sorted order of keys, ensuring canonical output for params.
        for (key, param_value) in &self.params {
            write!(f, ";{}", key)?;
            match param_value {
                ParamValue::Value(val_str) => write!(f, "={}", val_str)?,
                ParamValue::None => {} // Valueless params are just ";key"
            }
        }
        Ok(())
    }
}

// Implement FromStr for the value part of the Event header
// This allows parsing "presence;id=123" into an Event struct.
impl FromStr for Event {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut segments = s.split(';');
        let event_type_str = segments
            .next()
            .ok_or_else(|| Error::Parser(format!("empty Event header value: '{}'", s)))?
            .trim();
        let event_type = if let Some(pkg) = event_type_str
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            EventType::Package(pkg.to_string())
        } else {
            EventType::Token(event_type_str.to_string())
        };

        let mut event = Event::new(event_type);
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some(("id", value)) => event.id = Some(value.trim_matches('"').to_string()),
                Some((key, value)) => {
                    event = event.with_param(key, Some(value.trim_matches('"')));
                }
                None => event = event.with_param(segment, None::<String>),
            }
        }
        Ok(event)
    }
}

impl TypedHeaderTrait for Event {
    type Name = HeaderName;

    fn header_name() -> Self::Name {
        HeaderName::Event
    }

    fn to_header(&self) -> Header {
        Header::new(Self::header_name(), HeaderValue::text(self.to_string()))
    }

    fn from_header(header: &Header) -> Result<Self> {
        if header.name != Self::header_name() {
            return Err(Error::InvalidHeader(format!(
                "Mismatched header for Event: expected {}, got {}", 
                Self::header_name(), header.name
            )));
        }

        match &header.value {
            HeaderValue::Raw(bytes) => {
                // Use the FromStr implementation for Event which calls the parser
                // This requires `bytes` to be valid UTF-8 for `from_str`.
                let value_str = std::str::from_utf8(bytes).map_err(|e| 
                    Error::Parser(format!("Invalid UTF-8 in Event header value: {}", e))
                )?;
                Event::from_str(value_str) // This now calls the FromStr for Event above
            }
            // No HeaderValue::Event variant expected as per previous discussion
            _ => Err(Error::InvalidHeader(format!(
                "Unexpected header value type for {}: expected Raw, got {:?}",
                Self::header_name(), header.value // Using Debug for header.value
            ))),
        }
    }
}
