//! # odp-schema
//!
//! JSON Schema generation and validation for text2odp.
//!
//! Stage output types are defined in `odp-core` with `#[derive(JsonSchema)]`.
//! This crate compiles those schemas once, validates raw model JSON against
//! them, and only then deserializes into the typed entity. A missing required
//! field, a wrong field type, or an unknown field therefore surfaces as a
//! [`SchemaError::ValidationFailed`] listing every violation, instead of the
//! first serde error.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
