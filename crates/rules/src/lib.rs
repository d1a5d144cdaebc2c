//! Write rules for the school database.
//!
//! Core principle: **every write is checked against an explicit actor.**
//! There is no ambient session; callers pass the [`Actor`] derived from the
//! authenticated request along with the write being attempted.
//!
//! - [`evaluate`] / [`is_authorized`]: class-scoped records (homework,
//!   grades, courses, events)
//! - [`evaluate_grade_write`]: grades, which additionally need a valid score
//! - [`evaluate_message_create`]: new messages and broadcasts
//! - [`evaluate_profile_update`]: user profile edits

mod actor;
mod decision;
mod engine;
mod error;
mod grade;
mod message;
mod profile;
mod record;

pub use actor::{Actor, ClassId, Role, UserId};
pub use decision::{Decision, DenyReason};
pub use engine::{authorize, evaluate, evaluate_request, is_authorized};
pub use error::{Error, Result};
pub use grade::{
    MAX_SCORE_FIELD, SCORE_FIELD, evaluate_grade_request, evaluate_grade_write, is_valid_grade,
};
pub use message::{BROADCAST_RECIPIENT, MessageDraft, evaluate_message_create};
pub use profile::{SELF_EDITABLE_FIELDS, affected_keys, evaluate_profile_update};
pub use record::{CLASS_ID_FIELD, ClassScopedRecord, Method, Operation, Payload};
