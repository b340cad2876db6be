// Parser for the Accept header (RFC 3261 Section 20.1)
// Accept = "Accept" HCOLON [ accept-value *(COMMA accept-value) ]
// accept-value = media-range [ accept-params ]

use crate::parser::common::{comma_separated_list0};
use crate::parser::token::token; // Use the token parser instead
use crate::parser::common_params::{contact_param_item, semicolon_separated_params0, generic_param};
use crate::parser::separators::{slash, semi, equal};
use crate::parser::ParseResult;
use crate::types::accept::Accept as AcceptHeader; // Specific header type
use crate::types::param::Param;
use crate::types::media_type::MediaType;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    character::complete::{digit1, char},
    combinator::{map, map_res, value, opt, recognize},
    sequence::{pair, preceded, tuple},
    error::{ErrorKind, ParseError}
};
use std::str;
use std::collections::HashMap;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

// Define m_type and m_subtype functions since they're not available
fn m_type(input: &[u8]) -> ParseResult<&[u8]> {
    token(input)
}

fn m_subtype(input: &[u8]) -> ParseResult<&[u8]> {
    token(input)
}

// Define structure for Accept header value
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct AcceptValue { // Make struct pub
    pub m_type: String,
    pub m_subtype: String,
    pub q: Option<NotNan<f32>>,
    pub params: HashMap<String, String>, // Generic + media params combined
}

// For direct debug of the parser - remove in production
#[cfg(test)]
fn process_accept_value(t: String, s: String, params: Vec<Param>) -> AcceptValue {
    let mut media_params = HashMap::new();
    let mut q_value = None;
    
    for param in params {
        match param {
            Param::Q(q) => {
                q_value = Some(q);
            },
            Param::Other(name, Some(value)) => {
                media_params.insert(name, value.to_string());
            },
            _ => {} // Ignore other param types
        }
    }
    
    AcceptValue {
        m_type: t.to_lowercase(), // Ensure lowercase for case-insensitive comparison
        m_subtype: s.to_lowercase(), // Ensure lowercase for case-insensitive comparison
        q: q_value,
        params: media_params,
    }
}

// Parse qvalue according to RFC 3261:
// qvalue = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
fn qvalue(input: &[u8]) -> ParseResult<NotNan<f32>> {
    // Strictly enforce the ABNF format

    // Check for length after decimal point to ensure we don't exceed 3 digits
    if !input.is_empty() {
        let decimal_point_pos = input.iter().position(|&c| c == b'.');
        if let Some(pos) = decimal_point_pos {
            if input.len() - pos - 1 > 3 {
                return Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::TooLarge)));
            }
        }
    }

    // Check for "1.1" and other invalid values explicitly
    if input.len() >= 3 && input[0] == b'1' && input[1] == b'.' && 
       (input[2] != b'0' || (input.len() > 3 && input[3] != b'0')) {
        return Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Float)));
    }

    // Strict implementation per the ABNF
    alt((
        // "0" [ "." 0*3DIGIT ]
        map_res(
            recognize(tuple((
                char('0'),
                opt(tuple((
                    char('.'),
                    take_while_m_n(0, 3, |c: u8| c.is_ascii_digit())
                )))
            ))),
            |bytes| {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| nom::Err::Error(nom::error::Error::new(bytes, ErrorKind::Char)))?;
                let val = s.parse::<f32>()
                    .map_err(|_| nom::Err::Error(nom::error::Error::new(bytes, ErrorKind::Float)))?;
                NotNan::new(val)
                    .map_err(|_| nom::Err::Error(nom::error::Error::new(bytes, ErrorKind::Float)))
            }
        ),
        // "1" [ "." 0*3("0") ] - strictly using the ABNF definition
        alt((
            map(tag(b"1"), |_| NotNan::new(1.0).unwrap()),
            map(tag(b"1."), |_| NotNan::new(1.0).unwrap()),
            map(tag(b"1.0"), |_| NotNan::new(1.0).unwrap()),
            map(tag(b"1.00"), |_| NotNan::new(1.0).unwrap()),
            map(tag(b"1.000"), |_| NotNan::new(1.0).unwrap())
        ))
    ))(input)
}

// accept-param = ( "q" EQUAL qvalue ) / generic-param
fn accept_param(input: &[u8]) -> ParseResult<Param> {
    alt((
        // "q" EQUAL qvalue
        map(
            tuple((tag_no_case(b"q"), equal, qvalue)),
            |(_, _, q)| Param::Q(q)
        ),
        // generic-param
        generic_param
    ))(input)
}

// accept-range = media-range [ accept-params ]
fn accept_range(input: &[u8]) -> ParseResult<(String, String, Vec<Param>)> {
    map(
        pair(
            media_range, // (type, subtype)
            semicolon_separated_params0(accept_param) // *accept-params
        ),
        |((m_type, m_subtype), params)| {
            // Convert byte slices to strings using std::str::from_utf8 first
            let type_str = std::str::from_utf8(m_type).unwrap_or_default().to_string();
            let subtype_str = std::str::from_utf8(m_subtype).unwrap_or_default().to_string();
            (type_str, subtype_str, params)
        }
    )(input)
}

// media-range = ( "*/*" / ( m-type SLASH "*" ) / ( m-type SLASH m-subtype ) )
fn media_range(input: &[u8]) -> ParseResult<(&[u8], &[u8])> {
    alt((
        value((b"*" as &[u8], b"*" as &[u8]), tag(b"*/*")),
        pair(m_type, preceded(slash, tag(b"*"))),
        pair(m_type, preceded(slash, m_subtype)),
    ))(input)
}

// Accept = "Accept" HCOLON [ accept-value *(COMMA accept-value) ]
// Note: HCOLON handled elsewhere.
pub fn parse_accept(input: &[u8]) -> ParseResult<AcceptHeader> {
    // Use comma_separated_list0 as the list can be empty
    map(
        comma_separated_list0(accept_range),
        |values| {
            let mut accept_values = values.into_iter()
                .map(|(t, s, p)| {
                    // Convert parameters to HashMap
                    let mut params = HashMap::new();
                    let mut q_value = None;
                    
                    for param in p {
                        match param {
                            Param::Q(q) => {
                                q_value = Some(q);
                            },
                            Param::Other(name, Some(value)) => {
                                params.insert(name, value.to_string());
                            },
                            _ => {} // Ignore other param types
                        }
                    }
                    
                    // Create AcceptValue directly
                    AcceptValue {
                        m_type: t.to_lowercase(), // Ensure lowercase for case-insensitive comparison
                        m_subtype: s.to_lowercase(), // Ensure lowercase for case-insensitive comparison
                        q: q_value,
                        params,
                    }
                })
                .collect::<Vec<AcceptValue>>();
            
            // Sort by q-value (higher values first)
            accept_values.sort_by(|a, b| {
                let a_q = a.q.unwrap_or_else(|| NotNan::new(1.0).unwrap());
                let b_q = b.q.unwrap_or_else(|| NotNan::new(1.0).unwrap());
                // Sort in descending order (higher q values first)
                b_q.cmp(&a_q)
            });
            
            AcceptHeader(accept_values)
        }
    )(input)
}
