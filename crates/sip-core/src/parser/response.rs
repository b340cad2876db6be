use std::str;
use std::str::FromStr;
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while_m_n, take_till1},
    character::complete::{digit1, space1, line_ending},
    combinator::{map, map_res, recognize, opt, all_consuming},
    sequence::{tuple, preceded, terminated},
    IResult,
    error::{Error as NomError, ErrorKind, ParseError},
};
// Keep Result for FromStr impls if needed elsewhere
use crate::error::{Error, Result};
use crate::types::version::Version;
use crate::types::StatusCode;
use crate::parser::common::sip_version;
use crate::parser::whitespace::crlf;
use crate::parser::ParseResult;

/// Parser for SIP response status line (RFC 3261 Section 7.2)
///
/// ABNF Grammar:
/// Status-Line =  SIP-Version SP Status-Code SP Reason-Phrase CRLF
/// Status-Code =  3DIGIT
/// Reason-Phrase  =  *(reserved / unreserved / escaped / UTF8-NONASCII / UTF8-CONT / SP / HTAB)
///
/// Parser for a SIP response line
/// Returns components needed by IncrementalParser
pub fn parse_response_line(input: &str) -> IResult<&str, (Version, StatusCode, String)> {
    let (input, version) = map_res(
        take_till(|c| c == ' '),
        |s: &str| Version::from_str(s)
    )(input)?;

    let (input, _) = space1(input)?;

    let (input, status_code) = map_res(
        digit1,
        |s: &str| s.parse::<u16>()
    )(input)?;

    let status = match StatusCode::from_u16(status_code) {
        Ok(status) => status,
        // Use Failure for semantic errors, match nom::error::Error structure
        Err(_) => return Err(nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))), 
    };

    let (input, _) = space1(input)?;

    let (input, reason) = map(
        take_till(|c| c == '\r' || c == '\n'),
        |s: &str| s.to_string()
    )(input)?;

    // Consume the line ending
    let (input, _) = line_ending(input)?;

    Ok((input, (version, status, reason)))
} 

// Status-Code = 3DIGIT
pub fn status_code(input: &[u8]) -> ParseResult<StatusCode> {
    map_res(
        digit1,
        |code_bytes: &[u8]| -> Result<StatusCode> {
            if code_bytes.len() != 3 {
                return Err(Error::ParseError("Status code must be 3 digits".to_string()));
            }
            let s = str::from_utf8(code_bytes)?;
            let code = s.parse::<u16>()
                .map_err(|e| Error::ParseError(format!("Invalid status code digit: {}", e)))?;
                
            StatusCode::from_u16(code)
                .map_err(|_| Error::InvalidStatusCode(code))
        }
    )(input)
}

// Reason-Phrase = *(reserved / unreserved / escaped / UTF8-NONASCII / UTF8-CONT / SP / HTAB)
// Simplified: take bytes until CRLF
pub fn reason_phrase(input: &[u8]) -> ParseResult<&[u8]> {
    // The reason phrase can be empty, so we use take_till instead of take_till1
    take_till(|c| c == b'\r' || c == b'\n')(input)
}

// Status-Line = SIP-Version SP Status-Code SP Reason-Phrase CRLF
pub fn parse_status_line(input: &[u8]) -> ParseResult<(Version, StatusCode, &[u8])> {
    terminated(
        tuple((
            terminated(sip_version, space1),
            terminated(status_code, space1),
            reason_phrase
        )),
        crlf
    )(input)
}


// Removed response_parser, response_parser_nom, parse_headers_and_body functions. 