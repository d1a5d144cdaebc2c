//! Rule error types.

use thiserror::Error;

/// Rule errors.
///
/// Predicates in this crate never fail; these errors exist for callers that
/// need to turn a denial or a malformed claim into something diagnosable.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A write to a class-scoped record was denied.
    #[error("not authorized to modify this record for your class")]
    NotAuthorized,

    /// A role claim did not name one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, Error>;
