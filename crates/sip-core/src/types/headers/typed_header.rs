use crate::error::{Error, Result};
use std::fmt;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::str::FromStr;

use crate::types::headers::header_name::HeaderName;
use crate::types::headers::header_value::HeaderValue;
use crate::types::headers::header::Header;

use crate::types::via::Via;
use crate::types::from::From as FromHeaderValue;
use crate::types::to::To as ToHeaderValue;
use crate::types::contact::Contact;
use crate::types::call_id::CallId;
use crate::types::cseq::CSeq;
use crate::types::route::Route;
use crate::types::record_route::RecordRoute;
use crate::types::max_forwards::MaxForwards;
use crate::types::content_type::ContentType;
use crate::types::content_length::ContentLength;
use crate::types::expires::Expires;
use crate::types::auth::{Authorization, WwwAuthenticate};
use crate::types::refer_to::ReferTo;
use crate::types::referred_by::ReferredBy;
use crate::types::event::Event;
use crate::types::subscription_state::SubscriptionState;

/// A strongly-typed representation of a SIP header.
///
/// This enum provides a type-safe way to work with parsed SIP headers. Each variant
/// corresponds to one of the header types this stack needs to construct or inspect;
/// anything else round-trips through [`TypedHeader::Other`] untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedHeader {
    Via(Via),
    From(FromHeaderValue),
    To(ToHeaderValue),
    Contact(Contact),
    CallId(CallId),
    CSeq(CSeq),
    Route(Route),
    RecordRoute(RecordRoute),
    MaxForwards(MaxForwards),
    ContentType(ContentType),
    ContentLength(ContentLength),
    Expires(Expires),
    Authorization(Authorization),
    WwwAuthenticate(WwwAuthenticate),
    ReferTo(ReferTo),
    ReferredBy(ReferredBy),
    Event(Event),
    SubscriptionState(SubscriptionState),

    /// Any header this stack doesn't model as its own variant.
    Other(HeaderName, HeaderValue),
}

impl TypedHeader {
    /// Returns the name of the header
    pub fn name(&self) -> HeaderName {
        match self {
            TypedHeader::Via(_) => HeaderName::Via,
            TypedHeader::From(_) => HeaderName::From,
            TypedHeader::To(_) => HeaderName::To,
            TypedHeader::Contact(_) => HeaderName::Contact,
            TypedHeader::CallId(_) => HeaderName::CallId,
            TypedHeader::CSeq(_) => HeaderName::CSeq,
            TypedHeader::Route(_) => HeaderName::Route,
            TypedHeader::RecordRoute(_) => HeaderName::RecordRoute,
            TypedHeader::MaxForwards(_) => HeaderName::MaxForwards,
            TypedHeader::ContentType(_) => HeaderName::ContentType,
            TypedHeader::ContentLength(_) => HeaderName::ContentLength,
            TypedHeader::Expires(_) => HeaderName::Expires,
            TypedHeader::Authorization(_) => HeaderName::Authorization,
            TypedHeader::WwwAuthenticate(_) => HeaderName::WwwAuthenticate,
            TypedHeader::ReferTo(_) => HeaderName::ReferTo,
            TypedHeader::ReferredBy(_) => HeaderName::ReferredBy,
            TypedHeader::Event(_) => HeaderName::Event,
            TypedHeader::SubscriptionState(_) => HeaderName::SubscriptionState,
            TypedHeader::Other(name, _) => name.clone(),
        }
    }

    /// Try to convert this TypedHeader to a reference of a specific header type.
    ///
    /// Used internally by [`crate::types::headers::HeaderAccess`] implementations to
    /// provide type-safe access to headers.
    pub fn as_typed_ref<'a, T: TypedHeaderTrait + 'static>(&'a self) -> Option<&'a T>
    where
        <T as TypedHeaderTrait>::Name: std::fmt::Debug,
        T: std::fmt::Debug,
    {
        if self.name() != T::header_name().into() {
            return None;
        }

        let type_id_t = std::any::TypeId::of::<T>();

        match self {
            TypedHeader::CallId(h) if type_id_t == std::any::TypeId::of::<CallId>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::From(h) if type_id_t == std::any::TypeId::of::<FromHeaderValue>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::To(h) if type_id_t == std::any::TypeId::of::<ToHeaderValue>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Via(h) if type_id_t == std::any::TypeId::of::<Via>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::CSeq(h) if type_id_t == std::any::TypeId::of::<CSeq>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::ContentLength(h) if type_id_t == std::any::TypeId::of::<ContentLength>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::MaxForwards(h) if type_id_t == std::any::TypeId::of::<MaxForwards>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Contact(h) if type_id_t == std::any::TypeId::of::<Contact>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::ContentType(h) if type_id_t == std::any::TypeId::of::<ContentType>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Expires(h) if type_id_t == std::any::TypeId::of::<Expires>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Route(h) if type_id_t == std::any::TypeId::of::<Route>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::RecordRoute(h) if type_id_t == std::any::TypeId::of::<RecordRoute>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Authorization(h) if type_id_t == std::any::TypeId::of::<Authorization>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::WwwAuthenticate(h) if type_id_t == std::any::TypeId::of::<WwwAuthenticate>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::ReferTo(h) if type_id_t == std::any::TypeId::of::<ReferTo>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::ReferredBy(h) if type_id_t == std::any::TypeId::of::<ReferredBy>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::Event(h) if type_id_t == std::any::TypeId::of::<Event>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            TypedHeader::SubscriptionState(h) if type_id_t == std::any::TypeId::of::<SubscriptionState>() =>
                Some(unsafe { &*(h as *const _ as *const T) }),
            _ => None,
        }
    }
}

impl fmt::Display for TypedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedHeader::Via(via) => write!(f, "{}: {}", HeaderName::Via, via),
            TypedHeader::From(from) => write!(f, "{}: {}", HeaderName::From, from),
            TypedHeader::To(to) => write!(f, "{}: {}", HeaderName::To, to),
            TypedHeader::Contact(contact) => write!(f, "{}: {}", HeaderName::Contact, contact),
            TypedHeader::CallId(call_id) => write!(f, "{}: {}", HeaderName::CallId, call_id),
            TypedHeader::CSeq(cseq) => write!(f, "{}: {}", HeaderName::CSeq, cseq),
            TypedHeader::Route(route) => write!(f, "{}: {}", HeaderName::Route, route),
            TypedHeader::RecordRoute(rr) => write!(f, "{}: {}", HeaderName::RecordRoute, rr),
            TypedHeader::MaxForwards(mf) => write!(f, "{}: {}", HeaderName::MaxForwards, mf),
            TypedHeader::ContentType(ct) => write!(f, "{}: {}", HeaderName::ContentType, ct),
            TypedHeader::ContentLength(cl) => write!(f, "{}: {}", HeaderName::ContentLength, cl),
            TypedHeader::Expires(e) => write!(f, "{}: {}", HeaderName::Expires, e),
            TypedHeader::Authorization(a) => write!(f, "{}: {}", HeaderName::Authorization, a),
            TypedHeader::WwwAuthenticate(w) => write!(f, "{}: {}", HeaderName::WwwAuthenticate, w),
            TypedHeader::ReferTo(r) => write!(f, "{}: {}", HeaderName::ReferTo, r),
            TypedHeader::ReferredBy(r) => write!(f, "{}: {}", HeaderName::ReferredBy, r),
            TypedHeader::Event(e) => write!(f, "{}: {}", HeaderName::Event, e),
            TypedHeader::SubscriptionState(s) => write!(f, "{}: {}", HeaderName::SubscriptionState, s),
            TypedHeader::Other(name, value) => write!(f, "{}: {}", name, value),
        }
    }
}

/// Trait for header types that can be converted to/from the generic [`Header`] type.
///
/// Implementing this trait lets a typed header be extracted from a generic [`Header`]
/// with `from_header` and converted back with `to_header`.
pub trait TypedHeaderTrait: Sized {
    type Name: Into<HeaderName> + Clone;

    fn header_name() -> Self::Name;
    fn to_header(&self) -> Header;
    fn from_header(header: &Header) -> Result<Self>;
}

impl From<&TypedHeader> for HeaderName {
    fn from(header: &TypedHeader) -> HeaderName {
        header.name()
    }
}

impl TryFrom<Header> for TypedHeader {
    type Error = Error;

    fn try_from(header: Header) -> Result<Self> {
        match header.name {
            HeaderName::From => FromHeaderValue::from_header(&header).map(TypedHeader::From),
            HeaderName::To => ToHeaderValue::from_header(&header).map(TypedHeader::To),
            HeaderName::Via => Via::from_header(&header).map(TypedHeader::Via),
            HeaderName::Contact => Contact::from_header(&header).map(TypedHeader::Contact),
            HeaderName::CallId => CallId::from_header(&header).map(TypedHeader::CallId),
            HeaderName::CSeq => CSeq::from_header(&header).map(TypedHeader::CSeq),
            HeaderName::Route => Route::from_header(&header).map(TypedHeader::Route),
            HeaderName::RecordRoute => RecordRoute::from_header(&header).map(TypedHeader::RecordRoute),
            HeaderName::MaxForwards => MaxForwards::from_header(&header).map(TypedHeader::MaxForwards),
            HeaderName::ContentType => ContentType::from_header(&header).map(TypedHeader::ContentType),
            HeaderName::ContentLength => ContentLength::from_header(&header).map(TypedHeader::ContentLength),
            HeaderName::Expires => Expires::from_header(&header).map(TypedHeader::Expires),
            HeaderName::Authorization => Authorization::from_header(&header).map(TypedHeader::Authorization),
            HeaderName::WwwAuthenticate => WwwAuthenticate::from_header(&header).map(TypedHeader::WwwAuthenticate),
            HeaderName::ReferTo => ReferTo::from_header(&header).map(TypedHeader::ReferTo),
            HeaderName::ReferredBy => ReferredBy::from_header(&header).map(TypedHeader::ReferredBy),
            HeaderName::Event => Event::from_header(&header).map(TypedHeader::Event),
            HeaderName::SubscriptionState =>
                SubscriptionState::from_header(&header).map(TypedHeader::SubscriptionState),
            _ => Ok(TypedHeader::Other(header.name.clone(), header.value.clone())),
        }
    }
}
