//! RFC 3261 dialog lifecycle states, distinct from the richer call-semantics
//! states the Invite Session FSM tracks on top of a `Dialog` (spec.md
//! §4.1; see `crate::invite_session`).

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    Initial,
    Early,
    Confirmed,
    Recovering,
    Terminated,
}
