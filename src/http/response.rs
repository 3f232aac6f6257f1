//! # Response Formatting
//!
//! Typed response bodies for the singer routes. Reads return documents
//! directly; only the create route wraps its result.

use serde::Serialize;
use serde_json::Value;

/// Summary of a completed insert
#[derive(Debug, Clone, Serialize)]
pub struct InsertSummary {
    /// Primary key assigned to the new document
    pub inserted_id: String,
}

/// Body returned by the create route
#[derive(Debug, Clone, Serialize)]
pub struct InsertResponse {
    /// Insert summary
    pub result: InsertSummary,
    /// The stored document, `_id` included
    pub document: Value,
    /// Human-readable confirmation
    pub msg: String,
    /// Always null on success; failures never reach this body
    pub error: Option<Value>,
}

impl InsertResponse {
    pub fn new(inserted_id: impl Into<String>, document: Value) -> Self {
        Self {
            result: InsertSummary {
                inserted_id: inserted_id.into(),
            },
            document,
            msg: "document inserted".to_string(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_response_serialization() {
        let response = InsertResponse::new(
            "00000000aaaaaaaaaaaaaaaa",
            json!({"_id": "00000000aaaaaaaaaaaaaaaa", "artistname": "Queen"}),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"]["inserted_id"], "00000000aaaaaaaaaaaaaaaa");
        assert_eq!(json["document"]["artistname"], "Queen");
        assert_eq!(json["msg"], "document inserted");
        assert!(json["error"].is_null());
    }
}
