pub mod common;
pub mod challenge;
pub mod credentials;
