// Event Header Field
//
// The Event header field is used to indicate a subscription to or notification of a
// resource event. It is defined in RFC 6665, which obsoletes RFC 3265.
//
// ABNF (from RFC 6665):
// Event            = "Event" HCOLON event-type *( SEMI event-param )
// event-type       = LAQUOT event-package RAQUOT / token
// event-package    = token
// event-param      = generic-param / ( "id" EQUAL token )
//
// Note: generic-param is defined in RFC 3261.
// generic-param    = token [ EQUAL ( token / host / quoted-string ) ]

// Adjusted imports based on parser module structure
use crate::parser::token::token;
use crate::parser::separators::{laquot, raquot, hcolon}; // CHANGED to hcolon
use crate::parser::common_params::semicolon_params0;
use crate::types::param::{Param as RichParam, GenericValue as RichGenericValue}; // For processing semicolon_params0 output

// Import main Error type for the crate and Hdr (HeaderName, TypedHeader) + Event types
use crate::Error;
use crate::types::header::{Header, HeaderValue, TypedHeaderTrait};
use crate::types::headers::HeaderName;
use crate::types::event::{Event, EventType, Params, ParamValue};

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    combinator::{map, opt, eof},
    sequence::{delimited, pair, preceded, tuple, terminated},
    IResult,
    error::Error as NomError,
    character::complete::multispace0 // For SWS/OWS
};
use std::fmt;
use std::collections::BTreeMap;

// EventType enum, Event struct, and their impls are MOVED to types/headers/event.rs

// fmt::Display for Event is MOVED to types/headers/event.rs

// Parser for event-type: LAQUOT event-package RAQUOT / token
fn parse_event_type_value(input: &[u8]) -> IResult<&[u8], EventType, NomError<&[u8]>> { 
    alt((
        map(
            delimited(laquot, token, raquot),
            |pkg_bytes: &[u8]| EventType::Package(String::from_utf8_lossy(pkg_bytes).into_owned())
        ),
        map(
            token,
            |tok_bytes: &[u8]| EventType::Token(String::from_utf8_lossy(tok_bytes).into_owned())
        ),
    ))(input)
}

// Parser for event parameters using semicolon_params0
fn parse_event_params(input: &[u8]) -> IResult<&[u8], (Option<String>, Params), NomError<&[u8]>> { 
    map(semicolon_params0, |rich_params_vec: Vec<RichParam>| {
        let mut id_val = None;
        let mut other_params_map = Params::new();

        for rich_param in rich_params_vec {
            if let RichParam::Other(key_str, opt_rich_gen_val) = rich_param {
                if key_str.eq_ignore_ascii_case("id") && id_val.is_none() {
                    if let Some(rich_gen_val) = opt_rich_gen_val {
                        id_val = Some(rich_gen_val.to_string()); 
                    } else {
                        other_params_map.insert(key_str.clone(), ParamValue::None);
                    }
                } else {
                    let local_param_val = match opt_rich_gen_val {
                        Some(rich_gen_val) => ParamValue::Value(rich_gen_val.to_string()),
                        None => ParamValue::None,
                    };
                    other_params_map.insert(key_str, local_param_val);
                }
            } 
        }
        (id_val, other_params_map)
    })(input)
}

/// Parses the value part of an Event header (the content after "Event: ").
/// Example: "presence;id=123"
/// Returns types::headers::event::Event
pub fn parse_event_header_value(input: &[u8]) -> IResult<&[u8], Event, NomError<&[u8]>> { 
    let core_event_parser = map(
        tuple((
            parse_event_type_value,
            opt(parse_event_params) 
        )),
        |(event_type, params_opt)| {
            let (id, params) = params_opt.unwrap_or_else(|| (None, Params::new()));
            Event { 
                event_type,
                id,
                params,
            }
        }
    );

    // The event value itself, then ensure only optional whitespace and EOF remain.
    map(
        terminated(core_event_parser, tuple((multispace0, eof))), 
        |event| event // event is the output of core_event_parser
    )(input)
}

/// Parses a full Event header line, including the "Event:" part.
/// Example: "Event: <conference>;id=conf-xyz"
/// Returns types::headers::event::Event
pub fn parse_event_header(input: &[u8]) -> IResult<&[u8], Event, NomError<&[u8]>> { 
    preceded(
        pair(tag_no_case(b"Event"), hcolon), // Use hcolon
        parse_event_header_value
    )(input)
}
