// Parser for Organization header (RFC 3261 Section 20.27)
// Organization = "Organization" HCOLON [TEXT-UTF8-TRIM]

use nom::{
    bytes::complete::tag_no_case,
    combinator::{map, opt, map_res, recognize},
    sequence::{pair, preceded, delimited},
    IResult,
};

// Import from new modules
use crate::parser::separators::hcolon;
use crate::parser::values::text_utf8_trim;
use crate::parser::whitespace::{sws, lws, owsp};
use crate::parser::ParseResult;
use crate::parser::utils::unfold_lws;
use crate::types::Organization;
use std::str;

/// Parses the Organization header value according to RFC 3261 Section 20.27
/// Organization = "Organization" HCOLON [TEXT-UTF8-TRIM]
///
/// Note: This parser handles only the value part ([TEXT-UTF8-TRIM]).
/// The "Organization" token and HCOLON are parsed separately.
/// 
/// The value is optional - an empty value is valid per the RFC.
/// Handles whitespace and line folding according to RFC 3261 Section 7.3.1.
pub fn parse_organization(input: &[u8]) -> ParseResult<Organization> {
    // Handle the empty case first
    if input.is_empty() {
        return Ok((input, Organization::new("")));
    }
    
    // Check if input is all whitespace
    let (remaining, whitespace) = owsp(input)?;
    if whitespace.len() == input.len() {
        // Input is all whitespace, treat as empty Organization
        return Ok((remaining, Organization::new("")));
    }
    
    // Check for semicolon which might indicate parameters
    if let Some(pos) = input.iter().position(|&b| b == b';') {
        let (text_part, params_part) = input.split_at(pos);
        
        // Parse the text part
        let (_, org) = delimited(
            sws,
            map(
                opt(map_res(
                    text_utf8_trim,
                    |bytes| {
                        // Apply line unfolding (returns Vec<u8>)
                        let unfolded = unfold_lws(bytes);
                        // Convert to UTF-8 string
                        let s = String::from_utf8(unfolded)
                            .map_err(|_| nom::Err::Error(nom::error::Error::new(bytes, nom::error::ErrorKind::Char)))?;
                        Ok::<String, nom::Err<nom::error::Error<&[u8]>>>(s)
                    }
                )),
                |opt_val| Organization::new(opt_val.unwrap_or_default())
            ),
            sws
        )(text_part)?;
        
        return Ok((params_part, org));
    }
    
    // Otherwise, parse without worrying about semicolons
    delimited(
        sws,
        map(
            opt(map_res(
                text_utf8_trim,
                |bytes| {
                    // Apply line unfolding (returns Vec<u8>)
                    let unfolded = unfold_lws(bytes);
                    // Convert to UTF-8 string
                    let s = String::from_utf8(unfolded)
                        .map_err(|_| nom::Err::Error(nom::error::Error::new(bytes, nom::error::ErrorKind::Char)))?;
                    Ok::<String, nom::Err<nom::error::Error<&[u8]>>>(s)
                }
            )),
            |opt_val| Organization::new(opt_val.unwrap_or_default())
        ),
        sws
    )(input)
}
