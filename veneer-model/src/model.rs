//! Model types and hydrated model instances.
//!
//! A [`ModelType`] is a value: the normalized field list plus an optional
//! extraction hook. It is the factory for [`Model`] instances and is carried
//! by each instance so extraction can reverse the mapping.

use crate::Result;
use crate::field::{Field, FieldSpec};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type ExtractHookFn = Arc<dyn Fn(&mut Value, &Model) + Send + Sync>;

/// A registered model type.
///
/// Field declarations are normalized exactly once here, so repeated
/// construction does not re-derive mappings. Cloning is cheap (shared
/// internals), and the same `ModelType` may hydrate any number of inputs
/// concurrently.
#[derive(Clone, Default)]
pub struct ModelType {
    fields: Arc<[Field]>,
    extract_hook: Option<ExtractHookFn>,
}

impl ModelType {
    /// Registers a model type from a list of field declarations.
    ///
    /// Accepts bare names, descriptors, or a mix. Duplicate names are not
    /// rejected; within each hydration phase the last-declared one wins.
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        let fields: Vec<Field> = specs
            .into_iter()
            .map(|spec| Field::from(spec.into()))
            .collect();
        Self {
            fields: fields.into(),
            extract_hook: None,
        }
    }

    /// Registers a post-processing hook run at the end of [`Model::extract`].
    ///
    /// The hook sees the structurally-extracted output and may add, remove,
    /// or transform keys freely. Without one, extraction ends after the
    /// structural pass.
    #[must_use]
    pub fn with_extract_hook(
        mut self,
        hook: impl Fn(&mut Value, &Model) + Send + Sync + 'static,
    ) -> Self {
        self.extract_hook = Some(Arc::new(hook));
        self
    }

    /// The normalized fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Hydrates a model from raw input in three ordered phases:
    /// defaults, then mapped fields, then computed fields.
    ///
    /// Mapped fields overwrite defaults when their path resolves; a path
    /// through a `null` or missing branch leaves the default (or nothing)
    /// standing. Computed fields run in declaration order, each seeing all
    /// mapped fields and every earlier computed field via [`Model::get`].
    #[must_use]
    pub fn create(&self, raw: Value) -> Model {
        trace!("hydrating model: {} declared fields", self.fields.len());
        let mut model = Model {
            ty: self.clone(),
            raw: Arc::new(raw),
            attributes: Map::new(),
        };

        for field in self.fields.iter() {
            if let Some(default) = &field.default_value {
                model.attributes.insert(field.name.clone(), default.clone());
            }
        }

        for field in self.fields.iter().filter(|f| !f.is_computed()) {
            if let Some(value) = veneer_path::resolve(&model.raw, &field.path) {
                let value = value.clone();
                model.attributes.insert(field.name.clone(), value);
            }
        }

        for field in self.fields.iter() {
            let Some(convert) = field.convert.as_deref() else {
                continue;
            };
            let value = convert(model.raw(), &model);
            model.attributes.insert(field.name.clone(), value);
        }

        debug!(
            "hydrated model: {}/{} fields set",
            model.attributes.len(),
            self.fields.len()
        );
        model
    }

    /// Hydrates a model with no raw input (an empty object).
    #[must_use]
    pub fn create_empty(&self) -> Model {
        self.create(Value::Object(Map::new()))
    }

    /// Hydrates one model per raw input, in order.
    pub fn create_all<I>(&self, raws: I) -> Vec<Model>
    where
        I: IntoIterator<Item = Value>,
    {
        raws.into_iter().map(|raw| self.create(raw)).collect()
    }

    /// Builds a model from attribute pairs instead of raw input: an empty
    /// instance with one `set` applied per pair in iteration order.
    pub fn from_attributes<I>(&self, attributes: I) -> Model
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        attributes
            .into_iter()
            .fold(self.create_empty(), |model, (name, value)| {
                model.set(name, value)
            })
    }

    /// Parses raw input from JSON text and hydrates a model from it.
    pub fn parse(&self, json: &str) -> Result<Model> {
        Ok(self.create(serde_json::from_str(json)?))
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("fields", &self.fields)
            .field("extract_hook", &self.extract_hook.is_some())
            .finish()
    }
}

/// One hydrated entity: the original raw input plus the flat attribute store.
///
/// Instances are immutable after construction. [`Model::set`] and `clone`
/// each produce an independent new instance; the raw input itself is shared
/// structurally (it is never written to).
#[derive(Debug, Clone)]
pub struct Model {
    ty: ModelType,
    raw: Arc<Value>,
    attributes: Map<String, Value>,
}

impl Model {
    /// Returns the attribute value, or `None` if the field was never set.
    ///
    /// A field set to JSON `null` is present: `get` returns
    /// `Some(&Value::Null)` for it, not `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether the attribute was ever set (by default, mapping, computation,
    /// or an explicit `set`).
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns the attribute as a string slice, if set and a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the attribute as a boolean, if set and a boolean.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns the attribute as an f64, if set and numeric.
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// The raw input this model was hydrated from, verbatim.
    #[must_use]
    pub fn raw(&self) -> &Value {
        self.raw.as_ref()
    }

    /// The flat attribute store.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// The model type this instance was created from.
    #[must_use]
    pub fn model_type(&self) -> &ModelType {
        &self.ty
    }

    /// Returns a new model with `name` set to `value`.
    ///
    /// Copy-on-write: the receiver is untouched, the raw input is re-shared
    /// so a later [`extract`](Self::extract) still works against the true
    /// original, and all other attributes carry over. Setting a computed
    /// field's name overrides its value directly; `convert` is not re-run.
    #[must_use]
    pub fn set(&self, name: impl Into<String>, value: Value) -> Self {
        let mut attributes = self.attributes.clone();
        attributes.insert(name.into(), value);
        Self {
            ty: self.ty.clone(),
            raw: Arc::clone(&self.raw),
            attributes,
        }
    }

    /// Reconstructs a nested structure from the flat attribute store.
    ///
    /// Every non-computed field whose name is present in the attributes is
    /// written back at its mapping path, creating intermediate objects as
    /// needed. Computed fields are never emitted; never-set fields produce
    /// no path at all. The model type's extraction hook, if any, then runs
    /// over the result.
    #[must_use]
    pub fn extract(&self) -> Value {
        let mut out = Map::new();
        for field in self.ty.fields.iter().filter(|f| !f.is_computed()) {
            if let Some(value) = self.attributes.get(&field.name) {
                veneer_path::insert(&mut out, &field.path, value.clone());
            }
        }

        let mut out = Value::Object(out);
        if let Some(hook) = self.ty.extract_hook.as_deref() {
            trace!("running extraction hook");
            hook(&mut out, self);
        }
        out
    }
}

/// Serializes as the flat attribute store.
impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}
