//! Authorization for writes to class-scoped records.
//!
//! Homework, grades, courses and events all belong to exactly one class.
//! [`evaluate`] decides whether an actor may create, update or delete such a
//! record:
//!
//! 1. **Authentication**: an actor without identity or role is denied.
//!    A record with an empty class id is then denied for everyone.
//! 2. **Administrative roles**: directors and superadmins may do anything.
//! 3. **Teachers**: may write records of the classes they teach, and may
//!    never move a record from one class to another.
//! 4. **Students and parents**: never.
//!
//! Every function here is pure; repeated calls with the same inputs give the
//! same answer.

use crate::{ClassScopedRecord, Decision, DenyReason, Error, Method, Operation, Payload, Result};
use crate::{Actor, Role};
use tracing::instrument;

/// Decide whether `actor` may perform `operation`.
#[instrument(
    level = "debug",
    skip(actor, operation),
    fields(
        actor = ?actor.identity(),
        role = ?actor.role(),
        method = %operation.method(),
    )
)]
pub fn evaluate(actor: &Actor, operation: &Operation) -> Decision {
    let decision = match actor.authenticated_role() {
        None => Decision::deny(DenyReason::Unauthenticated),
        Some(_) if !operation.has_classes() => Decision::deny(DenyReason::MissingClass),
        Some(Role::Director | Role::SuperAdmin) => Decision::Allow,
        Some(Role::Teacher) => evaluate_teacher(actor, operation),
        Some(role @ (Role::Student | Role::Parent)) => {
            Decision::deny(DenyReason::RoleNotPermitted { role })
        }
    };

    if let Some(reason) = decision.reason() {
        tracing::debug!(%reason, "write denied");
    }
    decision
}

/// Boolean form of [`evaluate`].
pub fn is_authorized(actor: &Actor, operation: &Operation) -> bool {
    evaluate(actor, operation).is_allowed()
}

/// Like [`is_authorized`], but turns a denial into [`Error::NotAuthorized`].
pub fn authorize(actor: &Actor, operation: &Operation) -> Result<()> {
    if is_authorized(actor, operation) {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}

/// Evaluate a write given as raw snapshots.
///
/// Fails closed: if the snapshots the method needs are missing or lack a
/// class, the write is denied without consulting the actor's role.
pub fn evaluate_request(
    actor: &Actor,
    method: Method,
    old: Option<&Payload>,
    new: Option<&Payload>,
) -> Decision {
    match Operation::from_parts(method, old, new) {
        Some(operation) => evaluate(actor, &operation),
        None => {
            tracing::debug!(%method, "write denied: missing snapshot");
            Decision::deny(DenyReason::MissingSnapshot)
        }
    }
}

fn evaluate_teacher(actor: &Actor, operation: &Operation) -> Decision {
    match operation {
        Operation::Create { new } => owned(actor, new),
        Operation::Update { old, new } => {
            if old.class_id != new.class_id {
                return Decision::deny(DenyReason::ClassMove {
                    from: old.class_id.clone(),
                    to: new.class_id.clone(),
                });
            }
            owned(actor, new)
        }
        Operation::Delete { old } => owned(actor, old),
    }
}

fn owned(actor: &Actor, record: &ClassScopedRecord) -> Decision {
    if actor.teaches(&record.class_id) {
        Decision::Allow
    } else {
        Decision::deny(DenyReason::ClassNotOwned {
            class_id: record.class_id.clone(),
        })
    }
}
