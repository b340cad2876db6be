//! Common error types and the shared error-kind taxonomy every other crate's
//! own `Error` enum classifies into (spec §7: ConfigurationError,
//! NetworkError, AuthenticationError, NegotiationError, ProtocolError,
//! ResourceExhaustion).

pub mod context;
pub mod types;

pub use context::{ErrorContext, ErrorExt};
pub use types::{Error, Result};

/// The error-kind taxonomy every crate's own error type maps into via
/// [`Classify::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Authentication,
    Negotiation,
    Protocol,
    ResourceExhaustion,
}

/// Implemented by each crate's own `Error` enum to classify its variants
/// into the shared [`ErrorKind`] taxonomy, so callers that only care about
/// "is this retryable / a config problem / an auth failure" don't need to
/// match on every crate's concrete error type.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}
