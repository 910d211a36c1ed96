//! Wrapper-chain unwrapping
//!
//! Strips optional/nullable/branded/default layers off a schema to expose
//! the base schema underneath, resolving the field identifier that may be
//! attached to any layer of the chain.
//!
//! # Identifier resolution
//!
//! - Each stripped layer that carries an identifier overwrites the one
//!   recorded so far, so with several identifier-carrying layers the one
//!   closest to the base wins.
//! - A non-empty identifier on the base schema itself always wins over any
//!   wrapper-layer identifier.
//!
//! Effects wrappers are a distinct family and are not stripped by the main
//! loop; [`unwrap_effects`] sees through exactly one of them.

use tracing::trace;

use super::types::{KindTag, Schema, SchemaKind};

/// Result of stripping the wrapper chain off a schema.
///
/// Borrows from the input schema; nothing is cloned or constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unwrapped<'a> {
    /// The first layer whose kind is not strippable
    pub base: &'a Schema,
    /// Field identifier resolved across the chain, if any layer carried one
    pub field_id: Option<&'a str>,
}

/// Strips all optional/nullable/branded/default layers off `schema`.
///
/// Returns the base schema together with the resolved field identifier.
/// A schema with no wrapper layers is returned unchanged with its own
/// identifier (if any). Idempotent: unwrapping a returned base again is a
/// fixpoint.
pub fn unwrap(schema: &Schema) -> Unwrapped<'_> {
    let mut current = schema;
    let mut wrapper_id: Option<&str> = None;

    while let Some(inner) = strip_once(current) {
        if let Some(id) = current.field_id.as_deref() {
            wrapper_id = Some(id);
        }
        trace!(layer = current.kind.type_name(), "stripping wrapper layer");
        current = inner;
    }

    // An empty identifier on the base does not take precedence.
    let base_id = current.field_id.as_deref().filter(|id| !id.is_empty());

    Unwrapped {
        base: current,
        field_id: base_id.or(wrapper_id),
    }
}

/// Sees through a single effects layer.
///
/// Returns the wrapped schema if `schema` is an effects wrapper, otherwise
/// returns `schema` unchanged. Exactly one layer is stripped; a doubly
/// wrapped effects schema still has one layer remaining after one call.
pub fn unwrap_effects(schema: &Schema) -> &Schema {
    match &schema.kind {
        SchemaKind::Effects { schema: wrapped, .. } => wrapped,
        _ => schema,
    }
}

/// Kind a consumer should dispatch on after seeing through at most one
/// optional/nullable layering.
///
/// - `optional(x)` resolves to `x`'s tag.
/// - `nullable(optional(x))` resolves to `x`'s tag; `nullable(x)` to `x`'s.
/// - Anything else resolves to its own tag.
///
/// Deeper stacks or other layer orderings fall through to the catch-all and
/// report the outer wrapper's tag; use [`unwrap`] when the true base is
/// needed. Enum value sets are erased by construction since a [`KindTag`]
/// carries no payload.
pub fn resolved_kind(schema: &Schema) -> KindTag {
    match &schema.kind {
        SchemaKind::Optional { inner } => inner.kind.tag(),
        SchemaKind::Nullable { inner } => match &inner.kind {
            SchemaKind::Optional { inner } => inner.kind.tag(),
            other => other.tag(),
        },
        other => other.tag(),
    }
}

/// Advances one step along the inner-type relation for strippable kinds.
///
/// Matching is exhaustive so that a new wrapper kind forces a decision
/// about whether the loop strips it.
fn strip_once(schema: &Schema) -> Option<&Schema> {
    match &schema.kind {
        SchemaKind::Optional { inner }
        | SchemaKind::Nullable { inner }
        | SchemaKind::Branded { inner, .. }
        | SchemaKind::Default { inner, .. } => Some(inner),
        SchemaKind::String
        | SchemaKind::Int
        | SchemaKind::Float
        | SchemaKind::Bool
        | SchemaKind::Enum { .. }
        | SchemaKind::Array { .. }
        | SchemaKind::Object { .. }
        | SchemaKind::Effects { .. } => None,
    }
}
