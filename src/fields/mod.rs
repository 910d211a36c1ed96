//! Field resolution subsystem
//!
//! Maps schemas to the flat descriptors a form renderer consumes. Built on
//! the schema module's unwrapping: the base schema and field identifier are
//! what `unwrap` resolves, and the wrapper chain contributes per-layer
//! facts (optionality, nullability, default, brand).

mod errors;
mod resolver;

pub use errors::{FieldError, FieldResult};
pub use resolver::{resolve_field, resolve_form, FieldDescriptor, ResolveOptions};
