//! Collection schemas served by this deployment
//!
//! Two singer schemas exist, one per read variant. The embedded variant
//! stores band members inside the singer document; the lookup variant
//! stores a numeric singer id that instruments reference at read time.

use std::collections::BTreeMap;

use super::types::{FieldDef, FieldType, Schema};

/// Singer payload schema for the embedded variant.
///
/// `artistname` is required; `band_members` is an optional array of
/// `{singer_name, instruments}` objects embedded in the document.
pub fn embedded_singer_schema() -> Schema {
    let mut member_fields = BTreeMap::new();
    member_fields.insert("singer_name".to_string(), FieldDef::optional_string());
    member_fields.insert(
        "instruments".to_string(),
        FieldDef::optional_array(FieldType::String),
    );

    let mut fields = BTreeMap::new();
    fields.insert("artistname".to_string(), FieldDef::required_string());
    fields.insert(
        "band_members".to_string(),
        FieldDef::optional_array(FieldType::Object {
            fields: member_fields,
        }),
    );

    Schema::new("singers", fields)
}

/// Singer payload schema for the lookup variant.
///
/// `artistname` is required; `id` is a required integer in [1, 1000] that
/// instrument documents reference through their `artist_id` field.
pub fn lookup_singer_schema() -> Schema {
    let mut fields = BTreeMap::new();
    fields.insert("artistname".to_string(), FieldDef::required_string());
    fields.insert(
        "id".to_string(),
        FieldDef::required(FieldType::int_in(1, 1000)),
    );

    Schema::new("singers", fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_document;
    use serde_json::json;

    #[test]
    fn test_embedded_schema_accepts_full_payload() {
        let doc = json!({
            "artistname": "Queen",
            "band_members": [
                {"singer_name": "Freddie", "instruments": ["vocals", "piano"]}
            ]
        });
        assert!(validate_document(&embedded_singer_schema(), &doc).is_ok());
    }

    #[test]
    fn test_embedded_schema_accepts_bare_artistname() {
        let doc = json!({"artistname": "Queen"});
        assert!(validate_document(&embedded_singer_schema(), &doc).is_ok());
    }

    #[test]
    fn test_embedded_schema_requires_artistname() {
        let doc = json!({"band_members": []});
        let err = validate_document(&embedded_singer_schema(), &doc).unwrap_err();
        assert_eq!(err.details.field, "artistname");
    }

    #[test]
    fn test_embedded_schema_rejects_undeclared_field() {
        let doc = json!({"artistname": "Queen", "genre": "rock"});
        assert!(validate_document(&embedded_singer_schema(), &doc).is_err());
    }

    #[test]
    fn test_lookup_schema_accepts_valid_payload() {
        let doc = json!({"id": 7, "artistname": "Rush"});
        assert!(validate_document(&lookup_singer_schema(), &doc).is_ok());
    }

    #[test]
    fn test_lookup_schema_requires_id() {
        let doc = json!({"artistname": "Rush"});
        let err = validate_document(&lookup_singer_schema(), &doc).unwrap_err();
        assert_eq!(err.details.field, "id");
    }

    #[test]
    fn test_lookup_schema_enforces_id_range() {
        for id in [0, 1001, -5] {
            let doc = json!({"id": id, "artistname": "Rush"});
            assert!(validate_document(&lookup_singer_schema(), &doc).is_err());
        }
        for id in [1, 1000] {
            let doc = json!({"id": id, "artistname": "Rush"});
            assert!(validate_document(&lookup_singer_schema(), &doc).is_ok());
        }
    }

    #[test]
    fn test_lookup_schema_rejects_embedded_members() {
        // band_members is computed at read time, never written
        let doc = json!({"id": 7, "artistname": "Rush", "band_members": []});
        assert!(validate_document(&lookup_singer_schema(), &doc).is_err());
    }
}
