//! Schema subsystem
//!
//! Declarative field definitions and a validator that checks write
//! payloads before any store call.

mod catalog;
mod errors;
mod types;
mod validator;

pub use catalog::{embedded_singer_schema, lookup_singer_schema};
pub use errors::{SchemaError, SchemaResult, ValidationDetails};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::validate_document;
