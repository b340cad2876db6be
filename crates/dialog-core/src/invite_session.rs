//! Invite Session FSM (spec.md §4.1): the RFC 3261/3264 dialog and
//! offer/answer state machine layered above a bare [`Dialog`](crate::dialog::Dialog).

use serde::{Deserialize, Serialize};

/// States the session moves through from creation to teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteSessionState {
    Null,
    Calling,
    Incoming,
    Early,
    Connecting,
    Confirmed,
    Disconnected,
}

/// Why the session reached `Disconnected`, classified for the Manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    /// {OK, DECLINE, REQUEST_TERMINATED}: the call ended the way either
    /// side asked it to.
    NormalClose,
    /// {NOT_FOUND, REQUEST_TIMEOUT, NOT_ACCEPTABLE_HERE,
    /// UNSUPPORTED_MEDIA_TYPE, UNAUTHORIZED, REQUEST_PENDING}: the peer or
    /// a server in the path rejected the request.
    ServerFailure,
    /// Any other status code; logged as unhandled rather than acted on.
    Unhandled,
}

/// Classifies a final SIP status code per spec.md §4.1's table.
pub fn classify_disconnect(status_code: u16) -> DisconnectReason {
    match status_code {
        200 | 603 | 487 => DisconnectReason::NormalClose,
        404 | 408 | 488 | 415 | 401 | 491 => DisconnectReason::ServerFailure,
        _ => DisconnectReason::Unhandled,
    }
}

/// Events that drive the FSM. `Accept`/`Refuse` only apply from `Incoming`;
/// `Hangup` applies from any non-terminal state.
#[derive(Debug, Clone)]
pub enum InviteSessionEvent {
    InviteSent,
    InviteReceived,
    Provisional,
    AcceptWithAnswerOk,
    AcceptWithAnswerFailed,
    Refuse,
    FinalSuccess,
    AckReceived,
    ByeReceived,
    Hangup,
    ReinviteOk,
    ReinviteFailed,
}

/// Actions the caller (the dialog manager) must take after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteSessionAction {
    None,
    NotifyPeerRinging,
    FireMediaUpdate,
    Send488NotAcceptable,
    Send603Decline,
    SendByeOrCancel,
    RecomputeOfferAnswer,
}

/// One call's invite-session state, independent of the underlying
/// [`Dialog`](crate::dialog::Dialog) it will eventually be paired with.
#[derive(Debug, Clone)]
pub struct InviteSession {
    pub state: InviteSessionState,
    pub is_initiator: bool,
    pub disconnect_reason: Option<DisconnectReason>,
}

impl InviteSession {
    pub fn new_outbound() -> Self {
        Self { state: InviteSessionState::Null, is_initiator: true, disconnect_reason: None }
    }

    pub fn new_inbound() -> Self {
        Self { state: InviteSessionState::Null, is_initiator: false, disconnect_reason: None }
    }

    /// Applies `event`, returning the follow-up action the manager must
    /// perform. Events invalid for the current state leave it unchanged
    /// and return `InviteSessionAction::None`.
    pub fn apply(&mut self, event: InviteSessionEvent) -> InviteSessionAction {
        use InviteSessionEvent as E;
        use InviteSessionState as S;

        match (self.state, event) {
            (S::Null, E::InviteSent) => {
                self.state = S::Calling;
                InviteSessionAction::None
            }
            (S::Null, E::InviteReceived) => {
                self.state = S::Incoming;
                InviteSessionAction::None
            }
            (S::Calling, E::Provisional) => {
                self.state = S::Early;
                InviteSessionAction::NotifyPeerRinging
            }
            (S::Calling, E::FinalSuccess) | (S::Early, E::FinalSuccess) => {
                self.state = S::Connecting;
                InviteSessionAction::FireMediaUpdate
            }
            (S::Connecting, E::AckReceived) => {
                self.state = S::Confirmed;
                InviteSessionAction::None
            }
            (S::Incoming, E::AcceptWithAnswerOk) => {
                self.state = S::Connecting;
                InviteSessionAction::FireMediaUpdate
            }
            (S::Incoming, E::AcceptWithAnswerFailed) => {
                self.state = S::Disconnected;
                self.disconnect_reason = Some(DisconnectReason::ServerFailure);
                InviteSessionAction::Send488NotAcceptable
            }
            (S::Incoming, E::Refuse) => {
                self.state = S::Disconnected;
                self.disconnect_reason = Some(DisconnectReason::NormalClose);
                InviteSessionAction::Send603Decline
            }
            (_, E::Hangup) if self.state != S::Disconnected => {
                self.state = S::Disconnected;
                self.disconnect_reason = Some(DisconnectReason::NormalClose);
                InviteSessionAction::SendByeOrCancel
            }
            (_, E::ByeReceived) if self.state != S::Disconnected => {
                self.state = S::Disconnected;
                self.disconnect_reason = Some(DisconnectReason::NormalClose);
                InviteSessionAction::None
            }
            (S::Confirmed, E::ReinviteOk) => InviteSessionAction::RecomputeOfferAnswer,
            (S::Confirmed, E::ReinviteFailed) => InviteSessionAction::Send488NotAcceptable,
            _ => InviteSessionAction::None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state == InviteSessionState::Disconnected
    }
}
