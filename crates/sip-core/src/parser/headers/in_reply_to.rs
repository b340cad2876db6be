// Parser for In-Reply-To header (RFC 3261 Section 20.22)
// In-Reply-To = "In-Reply-To" HCOLON callid *(COMMA callid)

use nom::{
    bytes::complete::tag_no_case,
    combinator::map,
    sequence::{pair, preceded},
    IResult,
};

// Import from new modules
use crate::parser::separators::{hcolon, comma};
use super::call_id::callid; // Reuse callid parser logic
use crate::parser::common::comma_separated_list1;
use crate::parser::ParseResult;


// Return Vec<String> - each string is a call-id
pub fn parse_in_reply_to(input: &[u8]) -> ParseResult<Vec<String>> {
    preceded(
        pair(tag_no_case(b"In-Reply-To"), hcolon),
        comma_separated_list1(callid) // Use the callid parser
    )(input)
}
