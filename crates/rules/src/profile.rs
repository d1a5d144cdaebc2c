//! Updates to user profiles.

use crate::{Actor, Decision, DenyReason, Payload, UserId};
use std::collections::BTreeSet;
use tracing::instrument;

/// Fields a user may change on their own profile.
pub const SELF_EDITABLE_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "avatar",
    "birthDate",
    "mustChangePassword",
];

/// Keys added, removed or changed between two versions of a document.
pub fn affected_keys(old: &Payload, new: &Payload) -> BTreeSet<String> {
    let changed = new
        .iter()
        .filter(|(key, value)| old.get(*key) != Some(*value))
        .map(|(key, _)| key);
    let removed = old.keys().filter(|key| !new.contains_key(*key));

    changed.chain(removed).cloned().collect()
}

/// Decide whether `actor` may replace profile `target`'s document `old`
/// with `new`.
#[instrument(level = "debug", skip(actor, target, old, new), fields(actor = ?actor.identity(), target = %target))]
pub fn evaluate_profile_update(
    actor: &Actor,
    target: &UserId,
    old: &Payload,
    new: &Payload,
) -> Decision {
    let Some(role) = actor.authenticated_role() else {
        return Decision::deny(DenyReason::Unauthenticated);
    };

    if role.is_administrative() {
        return Decision::Allow;
    }

    if !actor.is(target) {
        return Decision::deny(DenyReason::NotProfileOwner);
    }

    let forbidden: Vec<String> = affected_keys(old, new)
        .into_iter()
        .filter(|key| !SELF_EDITABLE_FIELDS.contains(&key.as_str()))
        .collect();

    if forbidden.is_empty() {
        Decision::Allow
    } else {
        tracing::debug!(fields = ?forbidden, "profile update denied");
        Decision::deny(DenyReason::FieldsNotEditable { fields: forbidden })
    }
}
