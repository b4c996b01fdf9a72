//! Schema validation for plx documents
//!
//! Validates a JSON value against a named draft-7 schema and reports every
//! violation as a `[dotted.path] message` string, ordered by path so the
//! output is stable between runs.

pub mod errors;
pub mod validator;
pub mod violation;

pub use errors::SchemaError;
pub use validator::{validate_object, SchemaStore};
pub use violation::{PathSegment, SchemaViolation};
