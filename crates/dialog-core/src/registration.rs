//! Registration Client (spec.md §4.4): composes REGISTER requests for an
//! [`Account`](crate::account::Account), maps `regc_cb`-style responses
//! onto [`RegistrationState`](crate::account::RegistrationState), and
//! gates sends on STUN availability.

use std::net::SocketAddr;

use rvoip_sip_core::types::auth::credentials::Credentials;
use rvoip_sip_core::types::auth::params::DigestParam;
use rvoip_sip_core::{Method, Request, Response, TypedHeader};
use rvoip_sip_core::types::{Contact, ContactValue, Expires};
use rvoip_sip_core::types::contact::ContactParamInfo;
use rvoip_sip_core::types::address::Address;

use crate::account::{Account, RegistrationState};
use crate::errors::{DialogError, DialogResult};

/// What a REGISTER exchange was sent to accomplish; `regc_cb` interprets a
/// success response differently depending on which one this was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterIntent {
    Register,
    Unregister,
}

/// Digest credentials to attach to a REGISTER once challenged. Computed by
/// the caller (the realm/nonce come from a prior 401/407); this client only
/// assembles the header, it doesn't run the MD5 itself here since that
/// belongs to whatever already parsed the challenge.
pub struct DigestCredentials {
    pub username: String,
    pub realm: String,
    pub nonce: String,
    pub response: String,
    pub algorithm: Option<String>,
    pub opaque: Option<String>,
}

/// Drives the REGISTER/refresh/un-REGISTER flow for one account.
pub struct RegistrationClient {
    cseq: u32,
    external_addr: SocketAddr,
}

impl RegistrationClient {
    pub fn new(external_addr: SocketAddr) -> Self {
        Self { cseq: 1, external_addr }
    }

    /// Checked before every REGISTER send. Returns `false` (and sets
    /// `ErrorExistStun`) when STUN is required and the last probe failed,
    /// per spec.md §4.4's STUN gating rule.
    pub fn gate_on_stun(&self, account: &mut Account, stun_enabled: bool, last_stun_probe_failed: bool) -> bool {
        if stun_enabled && last_stun_probe_failed {
            account.mark_error(RegistrationState::ErrorExistStun);
            return false;
        }
        true
    }

    /// Builds a REGISTER request: request-URI `sip:<host>`, From/To the
    /// account's AoR, Contact `sip:<user>@<externalIp>:<externalPort>`,
    /// and an `Expires` header (0 to unregister).
    pub fn build_register(
        &mut self,
        account: &Account,
        intent: RegisterIntent,
        credentials: Option<&DigestCredentials>,
    ) -> DialogResult<Request> {
        let registrar_uri: rvoip_sip_core::Uri = account
            .registrar_uri()
            .parse()
            .map_err(|e| DialogError::protocol_error(format!("invalid registrar host: {}", e)))?;
        let aor_uri: rvoip_sip_core::Uri = account
            .address_of_record()
            .parse()
            .map_err(|e| DialogError::protocol_error(format!("invalid address-of-record: {}", e)))?;

        let call_id = format!("reg-{}@{}", account.id, account.host);
        let cseq = self.cseq;
        self.cseq += 1;

        let expires = match intent {
            RegisterIntent::Register => account.expiry.as_secs() as u32,
            RegisterIntent::Unregister => 0,
        };

        let contact_uri: rvoip_sip_core::Uri = format!(
            "sip:{}@{}:{}",
            account.username,
            self.external_addr.ip(),
            self.external_addr.port()
        )
        .parse()
        .map_err(|e| DialogError::protocol_error(format!("invalid contact address: {}", e)))?;

        let mut request = Request::new_with_essentials(
            Method::Register,
            registrar_uri,
            aor_uri,
            &call_id,
            cseq,
        )
        .with_header(TypedHeader::Contact(Contact::new(vec![ContactValue::Params(vec![
            ContactParamInfo::new(Address::new(contact_uri)),
        ])])))
        .with_header(TypedHeader::Expires(Expires::new(expires)));

        if let Some(creds) = credentials {
            let mut params = vec![
                DigestParam::Username(creds.username.clone()),
                DigestParam::Realm(creds.realm.clone()),
                DigestParam::Nonce(creds.nonce.clone()),
                DigestParam::Uri(request.uri().clone()),
                DigestParam::Response(creds.response.clone()),
            ];
            if let Some(opaque) = &creds.opaque {
                params.push(DigestParam::Opaque(opaque.clone()));
            }
            request = request.with_header(TypedHeader::Authorization(
                rvoip_sip_core::types::auth::authorization::Authorization(Credentials::Digest { params }),
            ));
        }

        Ok(request)
    }

    /// Maps a REGISTER response onto the account's registration state per
    /// spec.md §4.4's `regc_cb` table.
    pub fn handle_response(&self, account: &mut Account, intent: RegisterIntent, response: &Response) {
        let status = response.status_code();
        if (200..300).contains(&status) {
            match intent {
                RegisterIntent::Register => account.mark_registered(),
                RegisterIntent::Unregister => account.mark_unregistered(),
            }
            return;
        }

        let state = match status {
            606 => RegistrationState::ErrorConfStun,
            503 | 408 => RegistrationState::ErrorHost,
            401 | 403 | 404 => RegistrationState::ErrorAuth,
            _ => RegistrationState::Error,
        };
        account.mark_error(state);
    }

    /// A transport-level failure (no response at all) classifies as
    /// `ErrorNetwork`, per SPEC_FULL.md §10's resolution of the historical
    /// `regc_cb` mapping to `ErrorAuth`.
    pub fn handle_transport_error(&self, account: &mut Account) {
        account.mark_error(RegistrationState::ErrorNetwork);
    }
}
