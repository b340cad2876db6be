// Parser for Require header (RFC 3261 Section 20.32)
// Require = "Require" HCOLON option-tag *(COMMA option-tag)
// option-tag = token

use nom::{
    bytes::complete::tag,
    combinator::{map, map_res},
    sequence::delimited,
    IResult,
};
use std::str;

// Import from new modules
use crate::parser::token::token;
use crate::parser::whitespace::sws;
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

// Require = "Require" HCOLON option-tag *(COMMA option-tag)
// Note: HCOLON handled elsewhere. option-tag is token.
pub fn parse_require(input: &[u8]) -> ParseResult<Vec<String>> {
    // Use our custom option_tag_list parser
    option_tag_list(input)
}
