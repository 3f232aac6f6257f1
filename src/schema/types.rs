//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer, with optional range bounds
//! - bool: Boolean
//! - float: 64-bit floating point
//! - object: Nested object with field schema
//! - array: Homogeneous array with element type

use std::collections::BTreeMap;

/// Supported field types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer, optionally bounded inclusively
    Int {
        /// Smallest accepted value
        min: Option<i64>,
        /// Largest accepted value
        max: Option<i64>,
    },
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Nested object with its own field schema
    Object {
        /// Nested field definitions
        fields: BTreeMap<String, FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Unbounded integer type
    pub fn int() -> Self {
        FieldType::Int {
            min: None,
            max: None,
        }
    }

    /// Integer type bounded to an inclusive range
    pub fn int_in(min: i64, max: i64) -> Self {
        FieldType::Int {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int { .. } => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field data type
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required field of the given type
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
        }
    }

    /// Create an optional field of the given type
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self::required(FieldType::String)
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self::optional(FieldType::String)
    }

    /// Create an optional array field
    pub fn optional_array(element_type: FieldType) -> Self {
        Self::optional(FieldType::Array {
            element_type: Box::new(element_type),
        })
    }
}

/// Complete schema for one collection's write payloads
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Schema name, used in error messages
    pub name: String,
    /// Field definitions, in deterministic order
    pub fields: BTreeMap<String, FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}
