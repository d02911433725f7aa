//! Error types for the value model.

use crate::node::Kind;
use crate::slot::Slot;

/// Result type alias for jsonlight operations.
pub type Result<T> = std::result::Result<T, JsonError>;

/// Errors returned by handles, accessors and the codec.
///
/// Every variant is a local, recoverable condition. The `opt_*` accessor
/// family absorbs all of them.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The key or index is absent.
    #[error("element not found at {slot}")]
    NotFound { slot: Slot },

    /// The slot is present but holds null.
    #[error("null value at {slot} cannot be converted")]
    NilConversion { slot: Slot },

    /// The slot holds a value of the wrong shape.
    #[error("type conversion error: expected {expected}, found {found}")]
    TypeConversion {
        expected: &'static str,
        found: &'static str,
    },

    /// The handle's alias target is no longer reachable.
    #[error("{kind} handle expired")]
    Expired { kind: Kind },

    /// Array index outside `[0, len)`.
    #[error("index {index} out of range (len={len})")]
    OutOfRange { index: usize, len: usize },

    /// A container was placed inside itself.
    #[error("self-referencing put detected")]
    SelfReference,

    /// The handle being moved is expired.
    #[error("attempt to move an expired handle")]
    ExpiredSource,

    /// A decoded document or record did not produce an object.
    #[error("expected a JSON object at the root, found {found}")]
    NotAnObject { found: &'static str },

    /// JSON codec or record mapping failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JsonError {
    /// Create a type conversion error.
    #[inline]
    pub fn type_conversion(expected: &'static str, found: &'static str) -> Self {
        JsonError::TypeConversion { expected, found }
    }

    /// Create an expired error for a handle of the given kind.
    #[inline]
    pub fn expired(kind: Kind) -> Self {
        JsonError::Expired { kind }
    }
}
