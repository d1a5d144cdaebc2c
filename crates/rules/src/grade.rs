//! Grade writes.
//!
//! A grade is a class-scoped record, so the class rules of
//! [`evaluate`](crate::evaluate) apply first. On top of that every written
//! grade must carry a score within `0..=maxScore`, whoever writes it.

use crate::{Actor, Decision, DenyReason, Method, Operation, Payload, evaluate};
use serde_json::Value;
use tracing::instrument;

pub const SCORE_FIELD: &str = "score";
pub const MAX_SCORE_FIELD: &str = "maxScore";

/// Whether a grade document holds a numeric score between zero and its
/// maximum.
pub fn is_valid_grade(payload: &Payload) -> bool {
    let number = |field: &str| payload.get(field).and_then(Value::as_f64);

    match (number(SCORE_FIELD), number(MAX_SCORE_FIELD)) {
        (Some(score), Some(max)) => score >= 0.0 && score <= max,
        _ => false,
    }
}

/// Decide whether `actor` may perform `operation` on a grade.
#[instrument(
    level = "debug",
    skip(actor, operation),
    fields(actor = ?actor.identity(), method = %operation.method())
)]
pub fn evaluate_grade_write(actor: &Actor, operation: &Operation) -> Decision {
    let decision = evaluate(actor, operation);
    if !decision.is_allowed() {
        return decision;
    }

    match operation.new_record() {
        Some(grade) if !is_valid_grade(&grade.payload) => {
            tracing::debug!(class_id = %grade.class_id, "grade write denied: invalid score");
            Decision::deny(DenyReason::InvalidGrade)
        }
        _ => Decision::Allow,
    }
}

/// Evaluate a grade write given as raw snapshots.
///
/// Fails closed like [`evaluate_request`](crate::evaluate_request) when the
/// snapshots the method needs are missing or lack a class.
pub fn evaluate_grade_request(
    actor: &Actor,
    method: Method,
    old: Option<&Payload>,
    new: Option<&Payload>,
) -> Decision {
    match Operation::from_parts(method, old, new) {
        Some(operation) => evaluate_grade_write(actor, &operation),
        None => {
            tracing::debug!(%method, "grade write denied: missing snapshot");
            Decision::deny(DenyReason::MissingSnapshot)
        }
    }
}
