//! Outcome of a rule evaluation.

use crate::{ClassId, Role};
use serde::Serialize;
use std::fmt;

/// Result of a rule check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn deny(reason: DenyReason) -> Self {
        Decision::Deny { reason }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny { reason } => Some(reason),
        }
    }
}

/// Why a check was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenyReason {
    /// No identity or no recognised role.
    Unauthenticated,
    /// The role may never perform this write.
    RoleNotPermitted { role: Role },
    /// The teacher does not teach the class.
    ClassNotOwned { class_id: ClassId },
    /// An update tried to move the record to another class.
    ClassMove { from: ClassId, to: ClassId },
    /// The write request did not carry the snapshots its method requires.
    MissingSnapshot,
    /// A snapshot has an empty class id.
    MissingClass,
    /// Score outside `0..=maxScore`, or not numeric.
    InvalidGrade,
    /// The message names someone else as its sender.
    SenderMismatch,
    /// Only administrators may address every user at once.
    BroadcastRestricted,
    /// The actor does not own the profile.
    NotProfileOwner,
    /// The update touches fields users cannot edit on their own profile.
    FieldsNotEditable { fields: Vec<String> },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => write!(f, "actor is not authenticated"),
            DenyReason::RoleNotPermitted { role } => write!(f, "role {role} may not write this record"),
            DenyReason::ClassNotOwned { class_id } => write!(f, "teacher does not teach class {class_id}"),
            DenyReason::ClassMove { from, to } => {
                write!(f, "record cannot be moved from class {from} to class {to}")
            }
            DenyReason::MissingSnapshot => write!(f, "request is missing a record snapshot"),
            DenyReason::MissingClass => write!(f, "record does not name its class"),
            DenyReason::InvalidGrade => write!(f, "score must be between 0 and maxScore"),
            DenyReason::SenderMismatch => write!(f, "sender does not match the authenticated user"),
            DenyReason::BroadcastRestricted => {
                write!(f, "only directors and superadmins may message everyone")
            }
            DenyReason::NotProfileOwner => write!(f, "profile belongs to another user"),
            DenyReason::FieldsNotEditable { fields } => {
                write!(f, "fields not editable on own profile: {}", fields.join(", "))
            }
        }
    }
}
