//! Field declarations and their normalized form.
//!
//! Callers declare fields as either a bare name or a full descriptor; the
//! union is resolved once at model-type registration into [`Field`], the
//! canonical record the hydrator and extractor run on.

use crate::Model;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Derived-value function for a computed field.
///
/// Receives the raw input and the in-progress model (defaults and mapped
/// fields already hydrated, plus any earlier-declared computed fields).
pub type ConvertFn = Arc<dyn Fn(&Value, &Model) -> Value + Send + Sync>;

/// A field as declared by the caller.
///
/// Untagged on the serde side so a schema file may mix bare strings and
/// descriptor objects: `["foo", {"name": "bar", "mapping": "attributes.bar"}]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// Shorthand: the attribute name doubles as its mapping path.
    Name(String),
    /// Full descriptor with explicit mapping, default, or computation.
    Descriptor(FieldDescriptor),
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<FieldDescriptor> for FieldSpec {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

/// User-facing field descriptor.
///
/// `mapping` defaults to `name` when absent. `convert` makes the field
/// computed: its mapping is ignored and the function's result is written
/// after all mapped fields have hydrated.
#[derive(Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Dotted path into the raw input (e.g., "attributes.bar").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<String>,
    /// Value assigned when the mapping resolves to nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Computation for derived fields. Not serializable.
    #[serde(skip)]
    pub convert: Option<ConvertFn>,
}

impl FieldDescriptor {
    /// Creates a descriptor with only a name (mapping defaults to it).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapping: None,
            default_value: None,
            convert: None,
        }
    }

    /// Sets the dotted mapping path.
    #[must_use]
    pub fn mapping(mut self, path: impl Into<String>) -> Self {
        self.mapping = Some(path.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Makes the field computed.
    #[must_use]
    pub fn convert(mut self, f: impl Fn(&Value, &Model) -> Value + Send + Sync + 'static) -> Self {
        self.convert = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("mapping", &self.mapping)
            .field("default_value", &self.default_value)
            .field("convert", &self.convert.is_some())
            .finish()
    }
}

/// A normalized field: name resolved, mapping defaulted and pre-split.
#[derive(Clone)]
pub struct Field {
    pub name: String,
    /// Mapping path segments, split once at registration.
    pub path: Vec<String>,
    pub default_value: Option<Value>,
    pub convert: Option<ConvertFn>,
}

impl Field {
    /// Whether this field is produced by a `convert` function rather than
    /// a mapping lookup.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.convert.is_some()
    }
}

impl From<FieldSpec> for Field {
    fn from(spec: FieldSpec) -> Self {
        match spec {
            FieldSpec::Name(name) => Self {
                path: veneer_path::split(&name),
                name,
                default_value: None,
                convert: None,
            },
            FieldSpec::Descriptor(descriptor) => {
                let mapping = descriptor
                    .mapping
                    .unwrap_or_else(|| descriptor.name.clone());
                Self {
                    name: descriptor.name,
                    path: veneer_path::split(&mapping),
                    default_value: descriptor.default_value,
                    convert: descriptor.convert,
                }
            }
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("default_value", &self.default_value)
            .field("convert", &self.convert.is_some())
            .finish()
    }
}
