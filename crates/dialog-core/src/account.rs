//! Account data model (spec.md §3): configuration and dynamic registration
//! state for one identity the daemon can place or receive calls as.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One identity's registration status. Transitions form a DAG rooted at
/// `Unregistered` — every error variant is reachable only from `Trying`,
/// and `Registered` is reachable only from `Trying` on a 2xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationState {
    Unregistered,
    Trying,
    Registered,
    ErrorAuth,
    ErrorHost,
    ErrorNetwork,
    ErrorExistStun,
    ErrorConfStun,
    Error,
}

impl RegistrationState {
    /// `Registered` implies a non-expired credential per spec.md §3's
    /// invariant; every other state is treated as not usable for placing
    /// a call through this account.
    pub fn is_usable(&self) -> bool {
        matches!(self, RegistrationState::Registered)
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RegistrationState::ErrorAuth
                | RegistrationState::ErrorHost
                | RegistrationState::ErrorNetwork
                | RegistrationState::ErrorExistStun
                | RegistrationState::ErrorConfStun
                | RegistrationState::Error
        )
    }
}

/// Configuration and dynamic state for a single server-mediated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub host: String,
    pub password: String,
    pub expiry: Duration,
    pub enabled: bool,
    /// Ordered, most-preferred first; intersected against the peer's offer
    /// by the SDP negotiator.
    pub codec_preferences: Vec<String>,
    pub registration_state: RegistrationState,
    #[serde(skip, default)]
    pub registered_at: Option<Instant>,
}

impl Account {
    pub fn new(id: impl Into<String>, username: impl Into<String>, host: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            host: host.into(),
            password: password.into(),
            expiry: Duration::from_secs(3600),
            enabled: true,
            codec_preferences: Vec::new(),
            registration_state: RegistrationState::Unregistered,
            registered_at: None,
        }
    }

    /// The address-of-record this account registers and is called at.
    pub fn address_of_record(&self) -> String {
        format!("sip:{}@{}", self.username, self.host)
    }

    /// Registration request-URI: just the registrar host, no user part.
    pub fn registrar_uri(&self) -> String {
        format!("sip:{}", self.host)
    }

    /// A credential has expired once `expiry` has elapsed since the last
    /// successful REGISTER; an account that was never registered is not
    /// expired (there's nothing to expire).
    pub fn credential_expired(&self) -> bool {
        match self.registered_at {
            Some(at) => at.elapsed() >= self.expiry,
            None => false,
        }
    }

    pub fn mark_registered(&mut self) {
        self.registration_state = RegistrationState::Registered;
        self.registered_at = Some(Instant::now());
    }

    pub fn mark_unregistered(&mut self) {
        self.registration_state = RegistrationState::Unregistered;
        self.registered_at = None;
    }

    pub fn mark_error(&mut self, state: RegistrationState) {
        debug_assert!(state.is_error(), "mark_error called with a non-error state");
        self.registration_state = state;
        self.registered_at = None;
    }
}
