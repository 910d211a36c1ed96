//! formbind - schema unwrapping and form-field binding
//!
//! Schemas built from composite wrappers (optional, nullable, branded,
//! default, effects) are unwrapped to their base kind, carrying along the
//! stable field identifier that may be attached to any wrapper layer, and
//! resolved into the descriptors a form renderer consumes.

pub mod fields;
pub mod schema;
