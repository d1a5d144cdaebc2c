//! Class-scoped records and the write operations performed on them.

use crate::ClassId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A raw document as stored in the database.
pub type Payload = serde_json::Map<String, Value>;

/// Field naming the owning class in stored documents.
pub const CLASS_ID_FIELD: &str = "classId";

/// Snapshot of a homework, grade, course or event record.
///
/// Only the owning class matters for authorization; everything else is
/// carried as opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScopedRecord {
    pub class_id: ClassId,
    pub payload: Payload,
}

impl ClassScopedRecord {
    /// A record owned by `class_id`.
    ///
    /// An empty class id is accepted here, but such a record never names its
    /// class and every write involving it is denied.
    pub fn new(class_id: impl Into<ClassId>) -> Self {
        Self {
            class_id: class_id.into(),
            payload: Payload::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Read a record out of a raw document.
    ///
    /// Returns `None` unless the document has a non-empty string `classId`.
    pub fn from_document(document: &Payload) -> Option<Self> {
        let class_id = document
            .get(CLASS_ID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())?;

        let mut payload = document.clone();
        payload.remove(CLASS_ID_FIELD);

        Some(Self {
            class_id: ClassId::new(class_id),
            payload,
        })
    }
}

/// Kind of write being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Create => "create",
            Method::Update => "update",
            Method::Delete => "delete",
        })
    }
}

/// A write against a single class-scoped record.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create { new: ClassScopedRecord },
    Update {
        old: ClassScopedRecord,
        new: ClassScopedRecord,
    },
    Delete { old: ClassScopedRecord },
}

impl Operation {
    pub fn create(new: ClassScopedRecord) -> Self {
        Self::Create { new }
    }

    pub fn update(old: ClassScopedRecord, new: ClassScopedRecord) -> Self {
        Self::Update { old, new }
    }

    pub fn delete(old: ClassScopedRecord) -> Self {
        Self::Delete { old }
    }

    /// Assemble an operation from raw snapshots.
    ///
    /// Returns `None` if a snapshot the method requires is missing or does
    /// not name its class. Snapshots the method does not use are ignored.
    pub fn from_parts(method: Method, old: Option<&Payload>, new: Option<&Payload>) -> Option<Self> {
        let record = |doc: Option<&Payload>| doc.and_then(ClassScopedRecord::from_document);

        match method {
            Method::Create => Some(Self::create(record(new)?)),
            Method::Update => Some(Self::update(record(old)?, record(new)?)),
            Method::Delete => Some(Self::delete(record(old)?)),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Create { .. } => Method::Create,
            Self::Update { .. } => Method::Update,
            Self::Delete { .. } => Method::Delete,
        }
    }

    /// Whether every snapshot in the operation names its class.
    pub fn has_classes(&self) -> bool {
        match self {
            Self::Create { new } => !new.class_id.is_empty(),
            Self::Update { old, new } => !old.class_id.is_empty() && !new.class_id.is_empty(),
            Self::Delete { old } => !old.class_id.is_empty(),
        }
    }

    /// The proposed record, absent for deletes.
    pub fn new_record(&self) -> Option<&ClassScopedRecord> {
        match self {
            Self::Create { new } | Self::Update { new, .. } => Some(new),
            Self::Delete { .. } => None,
        }
    }
}
