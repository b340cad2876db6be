//! Declarative macros for constructing SIP requests and responses without the
//! full builder call chain. Thin wrappers over [`crate::builder::SimpleRequestBuilder`]
//! and [`crate::builder::SimpleResponseBuilder`] for the common case of a
//! request/response with the mandatory header set populated.

/// Build a [`crate::types::sip_request::Request`] from named fields.
///
/// ```
/// use rvoip_sip_core::prelude::*;
/// use rvoip_sip_core::sip_request;
///
/// let request = sip_request! {
///     method: Method::Invite,
///     uri: "sip:bob@example.com",
///     from_name: "Alice",
///     from_uri: "sip:alice@example.com",
///     from_tag: "1928301774",
///     call_id: "a84b4c76e66710",
///     cseq: 1
/// };
/// assert_eq!(request.method(), Method::Invite);
/// ```
#[macro_export]
macro_rules! sip_request {
    (
        method: $method:expr,
        uri: $uri:expr,
        from_name: $from_name:expr,
        from_uri: $from_uri:expr,
        from_tag: $from_tag:expr,
        call_id: $call_id:expr,
        cseq: $cseq:expr
    ) => {{
        $crate::builder::SimpleRequestBuilder::new($method, $uri)
            .expect("valid request URI")
            .from($from_name, $from_uri, Some($from_tag))
            .to($from_name, $uri, None)
            .call_id($call_id)
            .cseq($cseq)
            .max_forwards(70)
            .build()
    }};
}

/// Build a [`crate::types::sip_response::Response`] from named fields.
///
/// ```
/// use rvoip_sip_core::prelude::*;
/// use rvoip_sip_core::sip_response;
///
/// let response = sip_response! {
///     status: StatusCode::Ok,
///     reason: "OK",
///     from_name: "Alice",
///     from_uri: "sip:alice@example.com",
///     to_name: "Bob",
///     to_uri: "sip:bob@example.com",
///     call_id: "a84b4c76e66710",
///     cseq: 1,
///     cseq_method: Method::Invite
/// };
/// assert_eq!(response.status_code(), 200);
/// ```
#[macro_export]
macro_rules! sip_response {
    (
        status: $status:expr,
        reason: $reason:expr,
        from_name: $from_name:expr,
        from_uri: $from_uri:expr,
        to_name: $to_name:expr,
        to_uri: $to_uri:expr,
        call_id: $call_id:expr,
        cseq: $cseq:expr,
        cseq_method: $cseq_method:expr
    ) => {{
        $crate::builder::SimpleResponseBuilder::new($status, Some($reason))
            .from($from_name, $from_uri, None)
            .to($to_name, $to_uri, None)
            .call_id($call_id)
            .cseq($cseq, $cseq_method)
            .build()
    }};
}
