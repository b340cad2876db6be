//! # SIP Authentication Types
//!
//! Digest authentication (RFC 3261 Section 22, RFC 7616) between a UA and
//! the registrar it registers with. Proxy-scoped authentication headers are
//! out of scope for this peer-to-peer stack (no SIP proxy hop).

mod scheme;
mod params;
mod challenge;
mod credentials;
mod www_authenticate;
mod authorization;

pub use self::scheme::{AuthScheme, Algorithm, Qop};
pub use self::params::{AuthParam, DigestParam, AuthenticationInfoParam};
pub use self::challenge::Challenge;
pub use self::credentials::Credentials;
pub use self::www_authenticate::WwwAuthenticate;
pub use self::authorization::Authorization;