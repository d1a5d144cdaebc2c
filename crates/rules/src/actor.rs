//! The actor requesting an operation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a class (a group of students taught together).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClassId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Roles a user can hold. Exactly one per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Parent,
    Teacher,
    Director,
    SuperAdmin,
}

impl Role {
    /// Directors and superadmins hold blanket administrative authority.
    pub fn is_administrative(self) -> bool {
        matches!(self, Role::Director | Role::SuperAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Parent => "parent",
            Role::Teacher => "teacher",
            Role::Director => "director",
            Role::SuperAdmin => "superadmin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            "teacher" => Ok(Role::Teacher),
            "director" => Ok(Role::Director),
            "superadmin" => Ok(Role::SuperAdmin),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// The entity requesting an operation, as derived from the authenticated
/// session.
///
/// An actor without an identity, with an empty one, or without a role is
/// unauthenticated and is denied everything. `owned_class_ids` is only
/// meaningful for teachers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    identity: Option<UserId>,
    role: Option<Role>,
    owned_class_ids: HashSet<ClassId>,
}

impl Actor {
    /// An actor with no session at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(identity: impl Into<UserId>, role: Role) -> Self {
        Self {
            identity: Some(identity.into()),
            role: Some(role),
            owned_class_ids: HashSet::new(),
        }
    }

    /// A teacher owning the given classes.
    pub fn teacher<I, C>(identity: impl Into<UserId>, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ClassId>,
    {
        Self::new(identity, Role::Teacher).with_classes(classes)
    }

    pub fn with_classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ClassId>,
    {
        self.owned_class_ids.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Build an actor from raw session claims.
    ///
    /// Claims that cannot be trusted never fail the caller: an empty identity
    /// is dropped and an unknown role becomes no role, which leaves the actor
    /// unauthenticated.
    pub fn from_claims<I, C>(identity: Option<&str>, role: Option<&str>, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ClassId>,
    {
        let role = role.and_then(|r| match r.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring role claim");
                None
            }
        });

        Self {
            identity: identity.filter(|id| !id.is_empty()).map(UserId::from),
            role,
            owned_class_ids: HashSet::new(),
        }
        .with_classes(classes)
    }

    pub fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// The role, if and only if the actor is authenticated.
    pub fn authenticated_role(&self) -> Option<Role> {
        self.identity.as_ref().filter(|id| !id.as_str().is_empty())?;
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_role().is_some()
    }

    /// Whether this actor is `user`.
    pub fn is(&self, user: &UserId) -> bool {
        self.is_authenticated() && self.identity.as_ref() == Some(user)
    }

    /// Whether a teacher owns `class_id`. Always false for other roles.
    pub fn teaches(&self, class_id: &ClassId) -> bool {
        self.authenticated_role() == Some(Role::Teacher) && self.owned_class_ids.contains(class_id)
    }
}
