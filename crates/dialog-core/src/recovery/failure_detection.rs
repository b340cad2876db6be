//! Dialog Failure Detection
//!
//! This module implements failure detection mechanisms for SIP dialogs,
//! monitoring dialog health and identifying when recovery is needed.
//!
//! ## Failure Detection Methods
//!
//! - **Transaction Timeouts**: Detect when transactions fail to complete
//! - **Transport Failures**: Monitor underlying transport connectivity
//! - **Response Analysis**: Analyze SIP response codes for failure patterns
//! - **Keep-Alive Monitoring**: Use OPTIONS or other keep-alive mechanisms
//! - **Heartbeat Detection**: Monitor periodic dialog activity
//!
//! ## Failure Classifications
//!
//! - **Transient Failures**: Temporary network issues, recoverable
//! - **Persistent Failures**: Long-term connectivity problems
//! - **Protocol Violations**: Malformed or unexpected SIP messages
//! - **Authentication Failures**: Credential or authorization issues
//! - **Capacity Issues**: Server overload or resource exhaustion
//!
//! ## Implementation Status
//!
//! Basic failure detection is integrated into transaction event processing.
//! This module will contain enhanced detection algorithms when implemented.

// TODO: Implement advanced failure detection mechanisms 