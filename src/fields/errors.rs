//! # Field Resolution Errors
//!
//! Error types for the fields module.

use thiserror::Error;

use crate::schema::KindTag;

/// Result type for field resolution operations
pub type FieldResult<T> = Result<T, FieldError>;

/// Field resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Form root did not resolve to an object schema
    #[error("Form root must resolve to an object schema, got {found}")]
    RootNotObject {
        /// Kind the root resolved to instead
        found: KindTag,
    },

    /// Two fields resolved to the same identifier
    #[error("Duplicate field identifier '{id}'")]
    DuplicateFieldId {
        /// The colliding identifier
        id: String,
    },

    /// Enum field with no admissible values
    #[error("Enum field '{field}' has an empty value set")]
    EmptyEnum {
        /// Name of the offending field
        field: String,
    },
}
