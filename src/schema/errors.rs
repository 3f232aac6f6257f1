//! Schema validation error types

use std::fmt;

use thiserror::Error;

/// Result type for schema validation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "band_members[0].singer_name")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn out_of_range(field: impl Into<String>, expected: impl Into<String>, actual: i64) -> Self {
        Self::new(field, expected, actual.to_string())
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema '{schema}' rejected document: {details}")]
pub struct SchemaError {
    /// Schema that rejected the document
    pub schema: String,
    /// What failed and where
    pub details: ValidationDetails,
}

impl SchemaError {
    /// Create a validation failure for the given schema
    pub fn validation_failed(schema: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            schema: schema.into(),
            details,
        }
    }
}
