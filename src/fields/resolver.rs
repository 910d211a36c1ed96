//! Schema-to-form-field resolution
//!
//! Turns a schema (with any stack of wrapper layers) into the flat facts a
//! form renderer needs: which control kind to draw, whether the field is
//! required, its default value, and the identifier that keys it.
//!
//! Resolution never mutates or clones schemas; descriptors borrow from the
//! resolved schema tree.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use super::errors::{FieldError, FieldResult};
use crate::schema::{unwrap, unwrap_effects, KindTag, Schema, SchemaKind};

/// Options controlling field resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// See through one effects layer before inspecting the schema
    pub see_through_effects: bool,
    /// Treat a field with a default layer as not required
    pub default_fills_required: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            see_through_effects: true,
            default_fills_required: true,
        }
    }
}

/// Everything a renderer needs to draw one form field.
///
/// Borrows from the schema it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor<'a> {
    /// Identifier keying this field, resolved across the wrapper chain
    pub field_id: Option<&'a str>,
    /// Kind of the base schema
    pub kind: KindTag,
    /// False when an optional layer (or, by policy, a default layer) is present
    pub required: bool,
    /// True when a nullable layer is present
    pub nullable: bool,
    /// Outermost default layer's replacement value, if any
    pub default_value: Option<&'a Value>,
    /// Outermost brand name, if a branded layer is present
    pub brand: Option<&'a str>,
    /// Admissible values when the base schema is an enum
    pub enum_values: Option<&'a [String]>,
    /// The base schema after all strippable layers are removed
    pub base: &'a Schema,
}

/// Resolves a single schema into a [`FieldDescriptor`].
///
/// The base schema and field identifier come from `unwrap`; the wrapper
/// chain is additionally scanned for the per-layer facts (optionality,
/// default value, brand).
pub fn resolve_field<'a>(schema: &'a Schema, options: &ResolveOptions) -> FieldDescriptor<'a> {
    let schema = if options.see_through_effects {
        unwrap_effects(schema)
    } else {
        schema
    };

    let unwrapped = unwrap(schema);

    let mut required = true;
    let mut nullable = false;
    let mut default_value = None;
    let mut brand = None;

    let mut current = schema;
    loop {
        match &current.kind {
            SchemaKind::Optional { inner } => {
                required = false;
                current = inner;
            }
            SchemaKind::Nullable { inner } => {
                nullable = true;
                current = inner;
            }
            SchemaKind::Branded { brand: name, inner } => {
                if brand.is_none() {
                    brand = Some(name.as_str());
                }
                current = inner;
            }
            SchemaKind::Default { value, inner } => {
                if options.default_fills_required {
                    required = false;
                }
                if default_value.is_none() {
                    default_value = Some(value);
                }
                current = inner;
            }
            _ => break,
        }
    }

    let enum_values = match &unwrapped.base.kind {
        SchemaKind::Enum { values } => Some(values.as_slice()),
        _ => None,
    };

    FieldDescriptor {
        field_id: unwrapped.field_id,
        kind: unwrapped.base.kind.tag(),
        required,
        nullable,
        default_value,
        brand,
        enum_values,
        base: unwrapped.base,
    }
}

/// Resolves an object-rooted schema into its named form fields.
///
/// The root may itself sit under wrapper layers; it must unwrap to an
/// object. Fields are returned in key order.
///
/// # Errors
///
/// Returns `FieldError` if:
/// - The root does not unwrap to an object (RootNotObject)
/// - Two fields resolve to the same identifier (DuplicateFieldId)
/// - A field's base is an enum with no values (EmptyEnum)
pub fn resolve_form<'a>(
    schema: &'a Schema,
    options: &ResolveOptions,
) -> FieldResult<Vec<(String, FieldDescriptor<'a>)>> {
    let root = if options.see_through_effects {
        unwrap_effects(schema)
    } else {
        schema
    };

    let base = unwrap(root).base;
    let fields = match &base.kind {
        SchemaKind::Object { fields } => fields,
        other => {
            return Err(FieldError::RootNotObject { found: other.tag() });
        }
    };

    let mut seen_ids = HashSet::new();
    let mut resolved = Vec::with_capacity(fields.len());

    for (name, field_schema) in fields {
        let descriptor = resolve_field(field_schema, options);

        if let Some(id) = descriptor.field_id {
            if !seen_ids.insert(id) {
                return Err(FieldError::DuplicateFieldId { id: id.to_string() });
            }
        }

        if descriptor.enum_values.map_or(false, |values| values.is_empty()) {
            return Err(FieldError::EmptyEnum {
                field: name.clone(),
            });
        }

        resolved.push((name.clone(), descriptor));
    }

    debug!(fields = resolved.len(), "resolved form schema");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EffectKind;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn options() -> ResolveOptions {
        ResolveOptions::default()
    }

    #[test]
    fn test_bare_field_is_required() {
        let schema = Schema::string();
        let descriptor = resolve_field(&schema, &options());
        assert_eq!(descriptor.kind, KindTag::String);
        assert!(descriptor.required);
        assert!(!descriptor.nullable);
        assert_eq!(descriptor.default_value, None);
    }

    #[test]
    fn test_optional_layer_clears_required() {
        let schema = Schema::optional(Schema::int());
        let descriptor = resolve_field(&schema, &options());
        assert!(!descriptor.required);
        assert_eq!(descriptor.kind, KindTag::Int);
    }

    #[test]
    fn test_default_layer_clears_required_by_policy() {
        let schema = Schema::defaulted(json!(10), Schema::int());

        let descriptor = resolve_field(&schema, &options());
        assert!(!descriptor.required);
        assert_eq!(descriptor.default_value, Some(&json!(10)));

        let strict = ResolveOptions {
            default_fills_required: false,
            ..ResolveOptions::default()
        };
        let descriptor = resolve_field(&schema, &strict);
        assert!(descriptor.required);
        assert_eq!(descriptor.default_value, Some(&json!(10)));
    }

    #[test]
    fn test_outermost_default_value_wins() {
        let schema = Schema::defaulted(json!("outer"), Schema::defaulted(json!("inner"), Schema::string()));
        let descriptor = resolve_field(&schema, &options());
        assert_eq!(descriptor.default_value, Some(&json!("outer")));
    }

    #[test]
    fn test_nullable_and_brand_are_surfaced() {
        let schema = Schema::nullable(Schema::branded("UserId", Schema::string()));
        let descriptor = resolve_field(&schema, &options());
        assert!(descriptor.nullable);
        assert_eq!(descriptor.brand, Some("UserId"));
        assert_eq!(descriptor.kind, KindTag::String);
    }

    #[test]
    fn test_field_id_resolution_matches_unwrap() {
        let schema = Schema::optional(Schema::string().with_field_id("idB")).with_field_id("idW");
        let descriptor = resolve_field(&schema, &options());
        assert_eq!(descriptor.field_id, Some("idB"));
    }

    #[test]
    fn test_effects_layer_is_seen_through_by_default() {
        let schema = Schema::effects(EffectKind::Transform, Schema::optional(Schema::boolean()));
        let descriptor = resolve_field(&schema, &options());
        assert_eq!(descriptor.kind, KindTag::Bool);
        assert!(!descriptor.required);

        let opaque = ResolveOptions {
            see_through_effects: false,
            ..ResolveOptions::default()
        };
        let descriptor = resolve_field(&schema, &opaque);
        assert_eq!(descriptor.kind, KindTag::Effects);
    }

    #[test]
    fn test_enum_base_surfaces_values() {
        let schema = Schema::optional(Schema::enumeration(vec!["a".into(), "b".into()]));
        let descriptor = resolve_field(&schema, &options());
        assert_eq!(descriptor.kind, KindTag::Enum);
        assert_eq!(
            descriptor.enum_values,
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    fn sample_form() -> Schema {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), Schema::string().with_field_id("name"));
        fields.insert("age".to_string(), Schema::optional(Schema::int()));
        Schema::object(fields)
    }

    #[test]
    fn test_resolve_form_returns_fields_in_key_order() {
        let schema = sample_form();
        let resolved = resolve_form(&schema, &options()).unwrap();
        let names: Vec<&str> = resolved.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["age", "name"]);
    }

    #[test]
    fn test_resolve_form_root_may_be_wrapped() {
        let schema = Schema::optional(sample_form());
        assert!(resolve_form(&schema, &options()).is_ok());
    }

    #[test]
    fn test_resolve_form_rejects_non_object_root() {
        let schema = Schema::optional(Schema::string());
        let err = resolve_form(&schema, &options()).unwrap_err();
        assert_eq!(
            err,
            FieldError::RootNotObject {
                found: KindTag::String
            }
        );
    }

    #[test]
    fn test_resolve_form_rejects_duplicate_field_ids() {
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), Schema::string().with_field_id("dup"));
        fields.insert(
            "b".to_string(),
            Schema::optional(Schema::int()).with_field_id("dup"),
        );
        let schema = Schema::object(fields);

        let err = resolve_form(&schema, &options()).unwrap_err();
        assert_eq!(err, FieldError::DuplicateFieldId { id: "dup".into() });
    }

    #[test]
    fn test_resolve_form_rejects_empty_enum() {
        let mut fields = BTreeMap::new();
        fields.insert("status".to_string(), Schema::enumeration(Vec::new()));
        let schema = Schema::object(fields);

        let err = resolve_form(&schema, &options()).unwrap_err();
        assert_eq!(
            err,
            FieldError::EmptyEnum {
                field: "status".into()
            }
        );
    }
}
