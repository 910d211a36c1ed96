//! Schema object model and wrapper unwrapping
//!
//! Schemas are trees of [`SchemaKind`] values. Wrapper kinds (optional,
//! nullable, branded, default, effects) each hold exactly one inner schema,
//! so every chain is finite and ends in a base kind. Any layer may carry a
//! stable field identifier; `unwrap` resolves which one a consumer sees.
//!
//! # Design Principles
//!
//! - Wrapper dispatch is an exhaustive match, never a tag-set lookup
//! - Unwrapping is a pure read over borrowed schema values
//! - The identifier closest to the base wins; the base itself wins outright
//! - Effects wrappers are a separate family, stripped one layer at a time

mod types;
mod unwrap;

pub use types::{EffectKind, KindTag, Schema, SchemaKind};
pub use unwrap::{resolved_kind, unwrap, unwrap_effects, Unwrapped};
