//! # SIP Header Plumbing
//!
//! Three layers make up the header system:
//!
//! - [`header_name::HeaderName`]: standard and extension header names.
//! - [`header::Header`] / [`header_value::HeaderValue`]: the untyped
//!   `name: value` pair produced by the envelope parser.
//! - [`typed_header::TypedHeader`]: the strongly-typed representation used
//!   everywhere else in this crate.

pub mod header_name;
pub mod header_value;
pub mod header;
pub mod typed_header;
pub mod common;


pub use header_name::HeaderName;
pub use header_value::HeaderValue;
pub use header::Header;
pub use typed_header::{TypedHeader, TypedHeaderTrait};

/// Uniform read access to a message's headers, implemented by [`crate::types::sip_request::Request`],
/// [`crate::types::sip_response::Response`] and [`crate::types::sip_message::Message`].
pub trait HeaderAccess {
    /// All typed headers matching `T`'s header name, downcast to `T`.
    fn typed_headers<T: TypedHeaderTrait + 'static>(&self) -> Vec<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug;

    /// The first typed header matching `T`'s header name, downcast to `T`.
    fn typed_header<T: TypedHeaderTrait + 'static>(&self) -> Option<&T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug;

    fn headers(&self, name: &HeaderName) -> Vec<&TypedHeader>;
    fn header(&self, name: &HeaderName) -> Option<&TypedHeader>;
    fn headers_by_name(&self, name: &str) -> Vec<&TypedHeader>;
    fn raw_header_value(&self, name: &HeaderName) -> Option<String>;
    fn raw_headers(&self, name: &HeaderName) -> Vec<Vec<u8>>;
    fn header_names(&self) -> Vec<HeaderName>;
    fn has_header(&self, name: &HeaderName) -> bool;
}

/// Collects every header in `headers` matching `T`'s header name, downcast to `T`.
pub fn collect_typed_headers<'a, T: TypedHeaderTrait + 'static>(headers: &'a [TypedHeader]) -> Vec<&'a T>
where
    <T as TypedHeaderTrait>::Name: std::fmt::Debug,
    T: std::fmt::Debug,
{
    headers.iter().filter_map(|h| h.as_typed_ref::<T>()).collect()
}
