//! dialog-core: the Account model, Invite Session FSM, SDP Negotiator, and
//! Registration Client (spec.md §3, §4.1, §4.2, §4.4) sitting above the
//! RFC 3261 `Dialog`/transaction layer.

pub mod account;
pub mod errors;
pub mod invite_session;
pub mod registration;
pub mod sdp;

pub use account::{Account, RegistrationState};
pub use errors::{DialogError, DialogResult, ErrorKind};
pub use invite_session::{
    classify_disconnect, DisconnectReason, InviteSession, InviteSessionAction, InviteSessionEvent,
    InviteSessionState,
};
pub use registration::{DigestCredentials, RegisterIntent, RegistrationClient};
