// Parser for the Route header (RFC 3261 Section 20.34)
// Route        =  "Route" HCOLON route-param *(COMMA route-param)
// route-param  =  name-addr *( SEMI rr-param )
// rr-param     =  generic-param

use nom::{
    branch::alt,
    combinator::map,
    multi::{many0, separated_list1},
    sequence::{pair, preceded},
    IResult,
};

// Import from base parser modules
use crate::parser::separators::{hcolon, comma};
use crate::parser::address::name_addr; // Route uses name-addr strictly
use crate::parser::common_params::{generic_param, semicolon_separated_params0};
use crate::parser::common::comma_separated_list1; // Route requires at least one
use crate::parser::ParseResult;

use crate::types::param::Param;
use crate::types::uri::Uri;

// Import types (assuming)
use crate::types::address::Address;
use crate::types::route::Route as RouteHeader; // Use the specific header type
use crate::parser::parse_address;
use serde::{Serialize, Deserialize}; // Added serde
use crate::parser::address::name_addr_or_addr_spec;

/// Represents a single route entry (typically name-addr or addr-spec)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)] // Added Serialize, Deserialize
pub struct RouteEntry(pub Address);

impl std::fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// route-param = name-addr *( SEMI rr-param )
// rr-param = generic-param
fn route_param(input: &[u8]) -> ParseResult<Address> {
    map(
        pair(
            name_addr, // Requires name-addr format (must have < >)
            semicolon_separated_params0(generic_param) // rr-param = generic-param
        ),
        |(mut addr, params_vec)| {
            addr.params = params_vec;
            addr
        }
    )(input)
}

// Route = "Route" HCOLON route-param *(COMMA route-param)
pub fn parse_route(input: &[u8]) -> ParseResult<RouteHeader> {
    map(
        comma_separated_list1(route_param), // Use route_param which strictly enforces name-addr format
        |addresses: Vec<Address>| {
            // Convert Vec<Address> to Vec<RouteEntry>
            let entries = addresses.into_iter()
                .map(RouteEntry)
                .collect();
            
            RouteHeader(entries)
        }
    )(input)
}
