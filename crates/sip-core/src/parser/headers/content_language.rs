// Parser for Content-Language header (RFC 3261 Section 20.14)
// Content-Language = "Content-Language" HCOLON language-tag *(COMMA language-tag)
// language-tag = primary-tag *( "-" subtag )
// primary-tag = 1*8ALPHA
// subtag = 1*8ALPHA
//
// Note: The language-tag syntax follows RFC 3066/5646
// - Language tags are case-insensitive, but lowercase is preferred
// - The parser should normalize to lowercase
// - Underscores are NOT allowed per RFC 5646

use nom::{
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{alpha1, space0},
    combinator::{map, fail, recognize, verify, opt},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, delimited, tuple},
    IResult, error::ErrorKind, Err,
};
use std::str;

// Import from parser modules
use crate::parser::separators::{hcolon, comma};
use crate::parser::common::{comma_separated_list1};
use crate::parser::ParseResult;
use crate::parser::whitespace::{lws, owsp, sws, crlf};

// Define the LanguageTag struct
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LanguageTag(pub String);

// Helper function to check if primary tag is valid (1-8 alpha characters)
fn is_valid_primary_tag(s: &[u8]) -> bool {
    !s.is_empty() && s.len() <= 8 && s.iter().all(|&c| c.is_ascii_alphabetic())
}

// Helper function to check if subtag is valid (1-8 alphanumeric characters)
fn is_valid_subtag(subtag: &str) -> bool {
    if subtag.is_empty() {
        return false;
    }
    
    // RFC 5646 allows subtags to be alphanumeric
    // Check if all characters are alphanumeric and length is 1-8 characters
    subtag.len() <= 8 && subtag.chars().all(|c| c.is_ascii_alphanumeric())
}

// Parse a language tag, which consists of a primary tag and optional subtags
fn parse_language_tag(input: &[u8]) -> IResult<&[u8], LanguageTag> {
    // Check for empty input
    if input.is_empty() {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // Check for leading or trailing hyphens
    if input[0] == b'-' || input[input.len() - 1] == b'-' {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // Check for underscores in the entire input first
    if input.contains(&b'_') {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // Check for CRLF within language tag - not allowed
    if input.windows(2).any(|w| w == b"\r\n") {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // We need to handle byte input correctly for nom
    let (input, parts) = separated_list1(tag(b"-"), take_while1(|c: u8| c.is_ascii_alphanumeric()))(input)?;
    
    if parts.is_empty() {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // Validate primary tag (1-8 alpha chars)
    let primary = parts[0];
    if primary.is_empty() || primary.len() > 8 || !primary.iter().all(|&c| c.is_ascii_alphabetic()) {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
    }
    
    // Validate subtags according to RFC 5646 rules
    if parts.len() > 1 {
        for (i, part) in parts.iter().enumerate().skip(1) {
            // Skip primary tag (i=0)
            if part.is_empty() || part.len() > 8 {
                return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
            }
            
            // Special case for identifying likely script tags
            // RFC 5646 Section 2.2.3: Script tags are 4 alpha characters
            // If the second position (index 1) has a 4-letter subtag with first letter capitalized,
            // it's likely a script tag and should only contain letters
            if i == 1 && part.len() == 4 && part[0].is_ascii_uppercase() {
                if !part.iter().all(|&c| c.is_ascii_alphabetic()) {
                    return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
                }
                continue;
            }
            
            // Check if this might be a region subtag (position 1 or 2, 2 letters or 3 digits)
            if (i == 1 || i == 2) && 
               ((part.len() == 2 && part.iter().all(|&c| c.is_ascii_alphabetic())) ||
                (part.len() == 3 && part.iter().all(|&c| c.is_ascii_digit()))) {
                // This is likely a region subtag
                continue;
            }
            
            // For other positions, allow general alphanumeric values
            // Non-script 4-digit tags are valid in various positions, including variants
            continue;
        }
    }
    
    let language_tag = parts
        .iter()
        .map(|part| std::str::from_utf8(part).unwrap().to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    
    Ok((input, LanguageTag(language_tag)))
}

// Add the wrapper function that is called in the tests
pub fn language_tag(input: &[u8]) -> IResult<&[u8], String> {
    let (rem, tag) = parse_language_tag(input)?;
    Ok((rem, tag.0))
}

// Parse a comma-separated list of language tags with proper whitespace handling
fn language_tag_list(input: &[u8]) -> ParseResult<Vec<String>> {
    // Reject empty input
    if input.is_empty() || input.iter().all(|&c| c.is_ascii_whitespace()) {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
    }
    
    // Skip initial whitespace using the imported whitespace function
    let (mut remaining, _) = sws(input)?;
    
    // Check for CRLF within language tag parts (not between commas)
    // If we find a CRLF that's not followed by a comma or whitespace,
    // it's likely inside a tag which isn't allowed
    for i in 0..remaining.len().saturating_sub(1) {
        if remaining[i] == b'\r' && remaining[i+1] == b'\n' {
            // If this CRLF is not at the end, and not followed by a comma or space,
            // then it's inside a tag - reject it
            if i+2 < remaining.len() && 
               remaining[i+2] != b',' && 
               !remaining[i+2].is_ascii_whitespace() {
                return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
            }
        }
    }
    
    // Manually parse comma-separated language tags with proper whitespace handling
    let mut result = Vec::new();
    
    while !remaining.is_empty() {
        // Handle line folding and skip whitespace before each tag
        let (rest, _) = sws(remaining)?;
        remaining = rest;
        
        if remaining.is_empty() {
            break;
        }
        
        // Find the end of the tag (before comma or whitespace)
        let tag_end = remaining.iter()
            .position(|&c| c == b',' || c.is_ascii_whitespace())
            .unwrap_or(remaining.len());
        
        if tag_end == 0 {
            // Empty element - reject
            return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
        }
        
        let tag_input = &remaining[..tag_end];
        match parse_language_tag(tag_input) {
            Ok((_, tag)) => result.push(tag.0),
            Err(_) => {
                // Return an error referencing the original input
                return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Alpha)));
            }
        }
        
        // Move past the tag
        remaining = &remaining[tag_end..];
        
        // Skip whitespace after tag
        let (rest, _) = sws(remaining)?;
        remaining = rest;
        
        // If we hit a comma, move past it and expect another tag
        if !remaining.is_empty() && remaining[0] == b',' {
            remaining = &remaining[1..];
            
            // Skip whitespace after comma, including line folding
            let (rest, _) = sws(remaining)?;
            remaining = rest;
            
            // Check for trailing comma at the end of input
            if remaining.is_empty() {
                // Trailing comma is an error
                return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
            }
            
            // Check for empty element (comma followed immediately by another comma)
            if !remaining.is_empty() && remaining[0] == b',' {
                return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
            }
        }
    }
    
    if result.is_empty() {
        return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
    }
    
    Ok((&b""[..], result))
}

// Parse Content-Language header
pub fn parse_content_language(input: &[u8]) -> ParseResult<Vec<String>> {
    // Skip header name and colon
    if let Some(idx) = input.windows(2).position(|w| w == b": " || w == b":") {
        let (header_part, value_part) = input.split_at(idx);
        
        // Verify header name
        if !header_part.eq_ignore_ascii_case(b"Content-Language") {
            return Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
        }
        
        // Skip colon and space
        let value_start = if value_part.starts_with(b": ") { 2 } else { 1 };
        let value = &value_part[value_start..];
        
        // Parse language tags
        language_tag_list(value)
    } else {
        Err(Err::Error(nom::error::Error::new(input, ErrorKind::Tag)))
    }
}
