//! Declarative field mapping from nested JSON into flat attribute models.
//!
//! Given a list of field declarations, a [`ModelType`] hydrates any
//! JSON-like raw input into an immutable [`Model`] — a flat name→value
//! attribute store — and can reverse the mapping back into a nested
//! structure:
//! - [`FieldSpec`]/[`FieldDescriptor`] — declare fields by bare name or
//!   with a dotted mapping path, a default value, or a `convert` function
//! - [`ModelType`] — a registered field list; the factory for instances
//! - [`Model`] — one hydrated entity: `get`/`has` accessors, copy-on-write
//!   `set`, and `extract` to rebuild the nested shape
//!
//! Hydration runs in three ordered phases (defaults, mapped fields,
//! computed fields), so a computed field can always read any mapped field
//! regardless of declaration order. Resolving a mapping through a `null`
//! or missing branch is never an error; the field is simply left unset or
//! at its default.
//!
//! This is a shape-mapping layer for loosely-structured data (API
//! responses and the like), not an ORM: no validation, no persistence, no
//! relationships, no queries.

mod field;
mod model;

pub use field::{ConvertFn, Field, FieldDescriptor, FieldSpec};
pub use model::{Model, ModelType};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building models.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid raw input: {0}")]
    Json(#[from] serde_json::Error),
}
