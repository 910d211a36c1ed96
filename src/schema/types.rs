//! Schema type definitions
//!
//! Base kinds:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - enum: closed set of string values
//! - array: Homogeneous array with element schema
//! - object: Nested object with named field schemas
//!
//! Wrapper kinds modify another schema's acceptance policy or behavior
//! without being a terminal type themselves:
//! - optional: value may be absent
//! - nullable: value may be null
//! - branded: nominally distinct alias of the inner schema
//! - default: absent value is replaced by a default
//! - effects: refinement/transform/preprocess step over the inner schema

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A schema value: a kind plus an optional stable field identifier.
///
/// The identifier correlates a schema with a form field key. It may sit on
/// any layer of a wrapper chain; `unwrap` resolves which one a consumer
/// sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema kind, including any wrapper layers
    #[serde(flatten)]
    pub kind: SchemaKind,
    /// Stable field identifier, if one was attached to this layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
}

/// Supported schema kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Closed set of admissible string values
    Enum {
        /// Admissible values, in declaration order
        values: Vec<String>,
    },
    /// Homogeneous array with single element schema
    Array {
        /// Element schema (boxed to allow recursive types)
        element: Box<Schema>,
    },
    /// Nested object with its own named field schemas
    Object {
        /// Named field schemas, iterated in key order
        fields: BTreeMap<String, Schema>,
    },
    /// Value may be absent
    Optional {
        /// Wrapped schema
        inner: Box<Schema>,
    },
    /// Value may be null
    Nullable {
        /// Wrapped schema
        inner: Box<Schema>,
    },
    /// Nominally distinct alias of the wrapped schema
    Branded {
        /// Brand name
        brand: String,
        /// Wrapped schema
        inner: Box<Schema>,
    },
    /// Absent value is replaced by a default
    Default {
        /// Replacement value applied when the input is absent
        value: Value,
        /// Wrapped schema
        inner: Box<Schema>,
    },
    /// Refinement, transform, or preprocess step over the wrapped schema
    Effects {
        /// Which effect family this wrapper applies
        effect: EffectKind,
        /// Wrapped schema
        schema: Box<Schema>,
    },
}

/// Effect families an effects wrapper can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Predicate that narrows accepted values
    Refinement,
    /// Output-changing transformation
    Transform,
    /// Input normalization applied before validation
    Preprocess,
}

/// Payload-free copy of the kind discriminator.
///
/// Used for dispatch and error messages. An `Enum` tag carries no value
/// set, so call sites dispatching on a tag never depend on the specific
/// values baked into a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    String,
    Int,
    Float,
    Bool,
    Enum,
    Array,
    Object,
    Optional,
    Nullable,
    Branded,
    Default,
    Effects,
}

impl KindTag {
    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            KindTag::String => "string",
            KindTag::Int => "int",
            KindTag::Float => "float",
            KindTag::Bool => "bool",
            KindTag::Enum => "enum",
            KindTag::Array => "array",
            KindTag::Object => "object",
            KindTag::Optional => "optional",
            KindTag::Nullable => "nullable",
            KindTag::Branded => "branded",
            KindTag::Default => "default",
            KindTag::Effects => "effects",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl SchemaKind {
    /// Returns the payload-free discriminator for this kind
    pub fn tag(&self) -> KindTag {
        match self {
            SchemaKind::String => KindTag::String,
            SchemaKind::Int => KindTag::Int,
            SchemaKind::Float => KindTag::Float,
            SchemaKind::Bool => KindTag::Bool,
            SchemaKind::Enum { .. } => KindTag::Enum,
            SchemaKind::Array { .. } => KindTag::Array,
            SchemaKind::Object { .. } => KindTag::Object,
            SchemaKind::Optional { .. } => KindTag::Optional,
            SchemaKind::Nullable { .. } => KindTag::Nullable,
            SchemaKind::Branded { .. } => KindTag::Branded,
            SchemaKind::Default { .. } => KindTag::Default,
            SchemaKind::Effects { .. } => KindTag::Effects,
        }
    }

    /// Returns the kind name for error messages
    pub fn type_name(&self) -> &'static str {
        self.tag().type_name()
    }
}

impl Schema {
    /// Create a schema with no field identifier
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            field_id: None,
        }
    }

    /// Create a string schema
    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    /// Create an int schema
    pub fn int() -> Self {
        Self::new(SchemaKind::Int)
    }

    /// Create a float schema
    pub fn float() -> Self {
        Self::new(SchemaKind::Float)
    }

    /// Create a bool schema
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Bool)
    }

    /// Create an enum schema over the given values
    pub fn enumeration(values: Vec<String>) -> Self {
        Self::new(SchemaKind::Enum { values })
    }

    /// Create an array schema with the given element schema
    pub fn array(element: Schema) -> Self {
        Self::new(SchemaKind::Array {
            element: Box::new(element),
        })
    }

    /// Create an object schema with the given named fields
    pub fn object(fields: BTreeMap<String, Schema>) -> Self {
        Self::new(SchemaKind::Object { fields })
    }

    /// Wrap a schema in an optional layer
    pub fn optional(inner: Schema) -> Self {
        Self::new(SchemaKind::Optional {
            inner: Box::new(inner),
        })
    }

    /// Wrap a schema in a nullable layer
    pub fn nullable(inner: Schema) -> Self {
        Self::new(SchemaKind::Nullable {
            inner: Box::new(inner),
        })
    }

    /// Wrap a schema in a branded layer
    pub fn branded(brand: impl Into<String>, inner: Schema) -> Self {
        Self::new(SchemaKind::Branded {
            brand: brand.into(),
            inner: Box::new(inner),
        })
    }

    /// Wrap a schema in a default layer with the given replacement value
    pub fn defaulted(value: Value, inner: Schema) -> Self {
        Self::new(SchemaKind::Default {
            value,
            inner: Box::new(inner),
        })
    }

    /// Wrap a schema in an effects layer
    pub fn effects(effect: EffectKind, schema: Schema) -> Self {
        Self::new(SchemaKind::Effects {
            effect,
            schema: Box::new(schema),
        })
    }

    /// Attach a stable field identifier to this schema layer
    pub fn with_field_id(mut self, id: impl Into<String>) -> Self {
        self.field_id = Some(id.into());
        self
    }
}
