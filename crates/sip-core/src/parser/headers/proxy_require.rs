// Parser for Proxy-Require header (RFC 3261 Section 20.29)
//
// The Proxy-Require header field is used to indicate proxy-sensitive features
// that MUST be supported by the proxy. Any request containing a Proxy-Require
// header field with one or more option-tags that the proxy does not understand
// MUST be rejected with a 420 (Bad Extension) response.
//
// ABNF:
// Proxy-Require = "Proxy-Require" HCOLON option-tag *(COMMA option-tag)
// option-tag = token
//
// Example:
// Proxy-Require: sec-agree, precondition

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::space0,
    combinator::{map, map_res, verify, not, fail, recognize, all_consuming, peek},
    multi::separated_list1,
    sequence::{preceded, terminated, delimited},
    IResult,
};
use std::str;

// Import from new modules
use crate::parser::separators::comma;
use crate::parser::token::token;
use crate::parser::whitespace::{sws, lws, owsp};
use crate::parser::ParseResult;

/// Parses an option-tag (token) with surrounding whitespace
/// 
/// RFC 3261 defines option-tag as a token, which cannot contain whitespace
/// This function ensures we only parse valid tokens and strips any surrounding whitespace
fn option_tag(input: &[u8]) -> ParseResult<&[u8]> {
    delimited(
        sws,
        token,
        sws
    )(input)
}

/// Parses an option-tag and converts it to a String
fn option_tag_string(input: &[u8]) -> ParseResult<String> {
    map_res(
        option_tag,
        |tag| str::from_utf8(tag).map(String::from)
    )(input)
}

/// Custom implementation of comma-separated-list for option-tags
/// 
/// This implementation strictly follows RFC 3261 ABNF:
/// - Ensures at least one option-tag
/// - Ensures no empty elements (e.g., rejects "foo,,bar")
/// - Handles whitespace around tokens and commas
fn option_tag_list(input: &[u8]) -> ParseResult<Vec<String>> {
    // Parse first token (required)
    let (mut remaining, first_tag) = option_tag_string(input)?;
    let mut tags = vec![first_tag];
    
    // Parse remaining tokens
    loop {
        // Try to match a comma followed by a tag
        match delimited(
            sws,
            tag(b","),
            sws
        )(remaining) {
            Ok((after_comma, _)) => {
                // After a comma, we must have a tag (not another comma)
                // This prevents "foo,,bar" from being accepted
                match option_tag_string(after_comma) {
                    Ok((new_remaining, next_tag)) => {
                        tags.push(next_tag);
                        remaining = new_remaining;
                    },
                    Err(_) => {
                        // If we find a comma but no valid tag after it, it's an error
                        return Err(nom::Err::Error(nom::error::Error::new(
                            after_comma,
                            nom::error::ErrorKind::Tag
                        )));
                    }
                }
            },
            Err(_) => {
                // No more commas, we're done
                break;
            }
        }
    }
    
    // Final check: ensure there's no remaining input
    if !remaining.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            remaining,
            nom::error::ErrorKind::Verify
        )));
    }
    
    Ok((remaining, tags))
}

/// Parses the value of a Proxy-Require header.
///
/// This parser handles the part after "Proxy-Require:" in the SIP message.
/// The header name and HCOLON are handled by the top-level message_header parser.
///
/// The Proxy-Require header field is used to indicate proxy-sensitive features
/// that MUST be supported by the proxy. The header value contains a list of
/// option-tags, which are tokens representing SIP extensions.
///
/// Returns a vector of option-tags as strings.
pub fn parse_proxy_require(input: &[u8]) -> ParseResult<Vec<String>> {
    // Use our custom option_tag_list parser
    option_tag_list(input)
}
