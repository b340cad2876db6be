//! Top-level Session Coordinator
//!
//! This is the main orchestrator for the entire session-core system.
//! It coordinates between dialog, media, and other subsystems.

// Module declarations
mod coordinator;
mod event_handler;
mod session_ops;
mod bridge_ops;
mod sip_client;
mod server_manager;
pub mod registry;
pub mod call_director;

// Re-exports
pub use coordinator::SessionCoordinator;
pub use call_director::{
    busy_tone, bundled_ringtone_fallback, classify_destination, parse_voicemail_notify,
    play_dtmf_tone, OptionsCapabilities, RouteKind, WaitingCallSet,
}; 