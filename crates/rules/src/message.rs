//! Message creation.

use crate::{Actor, Decision, DenyReason, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Recipient id that addresses every user at once.
pub const BROADCAST_RECIPIENT: &str = "all";

/// The parts of a new message that matter for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub sender_id: UserId,
    /// A user id, a group id, or [`BROADCAST_RECIPIENT`].
    pub receiver_id: String,
}

impl MessageDraft {
    pub fn new(sender_id: impl Into<UserId>, receiver_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.receiver_id == BROADCAST_RECIPIENT
    }
}

/// Decide whether `actor` may send `draft`.
///
/// Anyone signed in may message a specific recipient, but only as
/// themselves. Broadcasts are reserved to directors and superadmins.
#[instrument(level = "debug", skip(actor, draft), fields(actor = ?actor.identity(), broadcast = draft.is_broadcast()))]
pub fn evaluate_message_create(actor: &Actor, draft: &MessageDraft) -> Decision {
    let Some(role) = actor.authenticated_role() else {
        return Decision::deny(DenyReason::Unauthenticated);
    };

    if !actor.is(&draft.sender_id) {
        tracing::debug!(sender = %draft.sender_id, "message denied: sender mismatch");
        return Decision::deny(DenyReason::SenderMismatch);
    }

    if draft.is_broadcast() && !role.is_administrative() {
        tracing::debug!(%role, "message denied: broadcast");
        return Decision::deny(DenyReason::BroadcastRestricted);
    }

    Decision::Allow
}
