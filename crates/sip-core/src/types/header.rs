//! Re-exports the header types from [`crate::types::headers`] under the
//! path most of this crate's modules already import from.

pub use crate::types::headers::{
    collect_typed_headers, Header, HeaderAccess, HeaderName, HeaderValue, TypedHeader,
    TypedHeaderTrait,
};
