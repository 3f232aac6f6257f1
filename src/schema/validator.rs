//! Schema validator for write payloads
//!
//! Validation semantics:
//! - All required fields are present
//! - No undeclared fields exist
//! - Field types exactly match schema types
//! - Integer bounds are enforced inclusively
//!
//! Forbidden behaviors:
//! - Implicit type coercion
//! - Default values
//! - Null values
//! - Partial validation
//!
//! Validation occurs BEFORE any store call, does not mutate documents, and
//! is deterministic: fields are checked in schema order, so the same
//! document always reports the same first violation.

use serde_json::Value;
use std::collections::BTreeMap;

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldDef, FieldType, Schema};

/// Validates a document against a schema.
///
/// # Errors
///
/// Returns `SchemaError` describing the first violation found.
pub fn validate_document(schema: &Schema, document: &Value) -> SchemaResult<()> {
    // Document must be an object
    let doc_obj = document.as_object().ok_or_else(|| {
        SchemaError::validation_failed(
            &schema.name,
            ValidationDetails::type_mismatch("$root", "object", json_type_name(document)),
        )
    })?;

    validate_object(&schema.name, doc_obj, &schema.fields, "")
}

/// Validates an object against field definitions.
fn validate_object(
    schema_name: &str,
    obj: &serde_json::Map<String, Value>,
    fields: &BTreeMap<String, FieldDef>,
    path_prefix: &str,
) -> SchemaResult<()> {
    // Check for extra fields (no undeclared fields allowed)
    for key in obj.keys() {
        if !fields.contains_key(key) {
            let field_path = make_path(path_prefix, key);
            return Err(SchemaError::validation_failed(
                schema_name,
                ValidationDetails::extra_field(field_path),
            ));
        }
    }

    // Validate each declared field
    for (field_name, field_def) in fields {
        let field_path = make_path(path_prefix, field_name);

        match obj.get(field_name) {
            Some(value) => {
                // Null is never a valid value
                if value.is_null() {
                    return Err(SchemaError::validation_failed(
                        schema_name,
                        ValidationDetails::null_value(&field_path),
                    ));
                }

                validate_value(schema_name, value, &field_def.field_type, &field_path)?;
            }
            None => {
                if field_def.required {
                    return Err(SchemaError::validation_failed(
                        schema_name,
                        ValidationDetails::missing_field(field_path),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Validates a value against a field type.
fn validate_value(
    schema_name: &str,
    value: &Value,
    expected_type: &FieldType,
    field_path: &str,
) -> SchemaResult<()> {
    match expected_type {
        FieldType::String => {
            if !value.is_string() {
                return Err(type_error(schema_name, field_path, "string", value));
            }
        }
        FieldType::Int { min, max } => {
            // Must be an integer (not a float)
            let Some(n) = value.as_i64() else {
                return Err(type_error(schema_name, field_path, "int", value));
            };
            if min.map_or(false, |lo| n < lo) || max.map_or(false, |hi| n > hi) {
                return Err(SchemaError::validation_failed(
                    schema_name,
                    ValidationDetails::out_of_range(field_path, range_label(*min, *max), n),
                ));
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                return Err(type_error(schema_name, field_path, "bool", value));
            }
        }
        FieldType::Float => {
            // Accept both integers and floats as float
            if !value.is_number() {
                return Err(type_error(schema_name, field_path, "float", value));
            }
        }
        FieldType::Object { fields } => {
            let obj = value
                .as_object()
                .ok_or_else(|| type_error(schema_name, field_path, "object", value))?;
            validate_object(schema_name, obj, fields, field_path)?;
        }
        FieldType::Array { element_type } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_error(schema_name, field_path, "array", value))?;

            // Validate each element
            for (i, elem) in arr.iter().enumerate() {
                let elem_path = format!("{}[{}]", field_path, i);

                if elem.is_null() {
                    return Err(SchemaError::validation_failed(
                        schema_name,
                        ValidationDetails::null_value(&elem_path),
                    ));
                }

                validate_value(schema_name, elem, element_type, &elem_path)?;
            }
        }
    }

    Ok(())
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Renders an integer bound for error messages.
fn range_label(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("int in [{}, {}]", lo, hi),
        (Some(lo), None) => format!("int >= {}", lo),
        (None, Some(hi)) => format!("int <= {}", hi),
        (None, None) => "int".to_string(),
    }
}

/// Creates a type mismatch error.
fn type_error(schema_name: &str, field_path: &str, expected: &str, actual: &Value) -> SchemaError {
    SchemaError::validation_failed(
        schema_name,
        ValidationDetails::type_mismatch(field_path, expected, json_type_name(actual)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        let mut fields = BTreeMap::new();
        fields.insert("name".into(), FieldDef::required_string());
        fields.insert(
            "age".into(),
            FieldDef::optional(FieldType::int_in(0, 150)),
        );
        fields.insert("active".into(), FieldDef::optional(FieldType::Bool));

        Schema::new("users", fields)
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = json!({"name": "Alice", "active": true});
        assert!(validate_document(&sample_schema(), &doc).is_ok());
    }

    #[test]
    fn test_valid_document_with_optional_field() {
        let doc = json!({"name": "Alice", "age": 30});
        assert!(validate_document(&sample_schema(), &doc).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let doc = json!({"age": 30});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.field, "name");
        assert_eq!(err.details.actual, "missing");
    }

    #[test]
    fn test_undeclared_field_fails() {
        let doc = json!({"name": "Alice", "nickname": "Al"});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.field, "nickname");
    }

    #[test]
    fn test_type_mismatch_fails() {
        let doc = json!({"name": 42});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.expected, "string");
        assert_eq!(err.details.actual, "int");
    }

    #[test]
    fn test_float_is_not_an_int() {
        let doc = json!({"name": "Alice", "age": 30.5});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.expected, "int in [0, 150]");
    }

    #[test]
    fn test_null_value_fails() {
        let doc = json!({"name": null});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.actual, "null");
    }

    #[test]
    fn test_int_out_of_range_fails() {
        let doc = json!({"name": "Alice", "age": 200});
        let err = validate_document(&sample_schema(), &doc).unwrap_err();
        assert_eq!(err.details.expected, "int in [0, 150]");
        assert_eq!(err.details.actual, "200");
    }

    #[test]
    fn test_int_at_bounds_passes() {
        for age in [0, 150] {
            let doc = json!({"name": "Alice", "age": age});
            assert!(validate_document(&sample_schema(), &doc).is_ok());
        }
    }

    #[test]
    fn test_non_object_document_fails() {
        let err = validate_document(&sample_schema(), &json!(["a"])).unwrap_err();
        assert_eq!(err.details.field, "$root");
    }

    #[test]
    fn test_nested_array_of_objects() {
        let mut member_fields = BTreeMap::new();
        member_fields.insert("singer_name".into(), FieldDef::optional_string());
        member_fields.insert(
            "instruments".into(),
            FieldDef::optional_array(FieldType::String),
        );

        let mut fields = BTreeMap::new();
        fields.insert("artistname".into(), FieldDef::required_string());
        fields.insert(
            "band_members".into(),
            FieldDef::optional_array(FieldType::Object {
                fields: member_fields,
            }),
        );
        let schema = Schema::new("singers", fields);

        let ok = json!({
            "artistname": "Queen",
            "band_members": [{"singer_name": "Freddie", "instruments": ["vocals"]}]
        });
        assert!(validate_document(&schema, &ok).is_ok());

        let bad = json!({
            "artistname": "Queen",
            "band_members": [{"singer_name": "Freddie", "instruments": [1]}]
        });
        let err = validate_document(&schema, &bad).unwrap_err();
        assert_eq!(err.details.field, "band_members[0].instruments[0]");
    }

    #[test]
    fn test_validation_is_deterministic() {
        // Two violations present; the reported one never changes
        let doc = json!({"name": 42, "age": "old"});
        let first = validate_document(&sample_schema(), &doc).unwrap_err();
        for _ in 0..100 {
            let again = validate_document(&sample_schema(), &doc).unwrap_err();
            assert_eq!(again, first);
        }
    }
}
