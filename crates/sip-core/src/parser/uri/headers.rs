use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{pair, preceded, separated_pair},
    IResult,
    error::{Error as NomError, ErrorKind},
};
use std::collections::HashMap;
use std::str;

// Import from new modules
use crate::parser::common_chars::{unreserved, escaped};
use crate::parser::ParseResult;
use crate::parser::utils::unescape_uri_component;
use crate::error::Error;

// hnv-unreserved = "[" / "]" / "/" / "?" / ":" / "+" / "$"
fn is_hnv_unreserved(c: u8) -> bool {
    matches!(c, b'[' | b']' | b'/' | b'?' | b':' | b'+' | b'$')
}

// hname = 1*( hnv-unreserved / unreserved / escaped )
// Return an unescaped string
pub fn hname(input: &[u8]) -> ParseResult<String> {
    let mut i = 0;
    let mut found_valid_char = false;
    
    while i < input.len() {
        match input[i] {
            // hnv-unreserved = "[" / "]" / "/" / "?" / ":" / "+" / "$"
            b'[' | b']' | b'/' | b'?' | b':' | b'+' | b'$' => {
                found_valid_char = true;
                i += 1;
            },
            // unreserved = alphanum / mark
            // mark = "-" / "_" / "." / "!" / "~" / "*" / "'" / "(" / ")"
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | 
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                found_valid_char = true;
                i += 1;
            },
            // escaped = "%" HEXDIG HEXDIG
            b'%' => {
                // Check for malformed escape sequences:
                // 1. % at the end of input
                if i + 2 >= input.len() {
                    // Incomplete escape sequence
                    return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
                }
                
                // 2. % followed by non-hex digits
                if !is_hex_digit(input[i+1]) || !is_hex_digit(input[i+2]) {
                    return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
                }
                
                found_valid_char = true;
                i += 3;
            },
            // If we hit an equals sign, we've reached the end
            b'=' => break,
            // If we encounter & or any other character, we've reached the end of this header name
            _ => break,
        }
    }
    
    if !found_valid_char {
        // If no valid chars found, this is not a valid hname
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::TakeWhile1)));
    }
    
    // Extract and unescape the name
    let name_bytes = &input[0..i];
    let name = unescape_uri_component(name_bytes)
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::MapRes)))?;
    
    Ok((&input[i..], name))
}

// hvalue = *( hnv-unreserved / unreserved / escaped )
// Return an unescaped string
pub fn hvalue(input: &[u8]) -> ParseResult<String> {
    let mut i = 0;
    
    while i < input.len() {
        match input[i] {
            // hnv-unreserved = "[" / "]" / "/" / "?" / ":" / "+" / "$"
            b'[' | b']' | b'/' | b'?' | b':' | b'+' | b'$' => {
                i += 1;
            },
            // unreserved = alphanum / mark
            // mark = "-" / "_" / "." / "!" / "~" / "*" / "'" / "(" / ")"
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | 
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                i += 1;
            },
            // escaped = "%" HEXDIG HEXDIG
            b'%' => {
                // Check for malformed escape sequences:
                // 1. % at the end of input
                if i + 2 >= input.len() {
                    // Incomplete escape sequence
                    return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
                }
                
                // 2. % followed by non-hex digits
                if !is_hex_digit(input[i+1]) || !is_hex_digit(input[i+2]) {
                    return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
                }
                
                // Special handling for percent-encoded ampersands and other delimiters
                // This helps with nested escaped sequences
                let hex_val = (parse_hex_digit(input[i+1]) << 4) | parse_hex_digit(input[i+2]);
                if hex_val == b'&' as u8 {
                    // Allow percent-encoded ampersands, they're part of the value
                } else if hex_val == b'?' as u8 {
                    // Allow percent-encoded question marks
                }
                
                i += 3;
            },
            // Additionally allow some characters that might appear in encoded headers
            b'<' | b'>' | b';' | b',' | b'"' | b'=' | b'@' | b' ' | b'#' | b'%' => {
                i += 1;
            },
            // If we encounter an actual ampersand (not percent-encoded), we've reached the end
            b'&' => break,
            // End of input or other characters
            _ => break,
        }
    }
    
    // Extract and unescape the value, which can be empty
    let value_bytes = &input[0..i];
    let value = unescape_uri_component(value_bytes)
        .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::MapRes)))?;
    
    Ok((&input[i..], value))
}

// Helper function to parse a single hex digit to its numeric value
fn parse_hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'F' => c - b'A' + 10,
        b'a'..=b'f' => c - b'a' + 10,
        _ => 0,  // Should never happen as we only call this after checking with is_hex_digit
    }
}

// header = hname "=" hvalue
pub fn header(input: &[u8]) -> ParseResult<(String, String)> {
    // Reject headers with no name (looking specifically for a starting equals sign)
    if input.is_empty() || input[0] == b'=' {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    
    let (remaining, name) = hname(input)?;
    
    if remaining.is_empty() || remaining[0] != b'=' {
        return Err(nom::Err::Error(nom::error::Error::new(
            remaining,
            nom::error::ErrorKind::Tag,
        )));
    }
    
    let (remaining, _) = tag(b"=")(remaining)?;
    let (remaining, value) = hvalue(remaining)?;

    // Ensure the header name is not empty after parsing
    if name.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    
    Ok((remaining, (name, value)))
}

// uri-headers = "?" header *( "&" header )
pub fn uri_headers(input: &[u8]) -> ParseResult<HashMap<String, String>> {
    if input.is_empty() || input[0] != b'?' {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    
    // We need to check specifically for "?=" which would be a header with no name
    // But we should allow complex values that might contain equals signs
    if input.len() >= 2 && input[1] == b'=' && (input.len() == 2 || input[2] != b'%') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }

    let (mut remaining, _) = tag(b"?")(input)?;
    let mut headers = HashMap::new();
    
    // Parse first header
    match header(remaining) {
        Ok((new_remaining, (name, value))) => {
            if !name.is_empty() {
                headers.insert(name, value);
            }
            remaining = new_remaining;
        }
        Err(e) => return Err(e),
    }

    // Parse additional headers
    while !remaining.is_empty() && remaining[0] == b'&' {
        // Skip '&'
        let (new_remaining, _) = tag(b"&")(remaining)?;
        
        match header(new_remaining) {
            Ok((next_remaining, (name, value))) => {
                if !name.is_empty() {
                    headers.insert(name, value);
                }
                remaining = next_remaining;
            }
            Err(_) => {
                // Can't parse more headers
                break;
            }
        }
    }

    Ok((remaining, headers))
}

// Helper function to check if a byte is a hex digit (0-9, A-F, a-f)
fn is_hex_digit(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
}
