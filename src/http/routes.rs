//! # Singer Routes
//!
//! Maps the HTTP surface onto store operations: one route, one store call,
//! wrapped in schema validation on the write path.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::ReadVariant;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{embedded_singer_schema, lookup_singer_schema, validate_document, Schema};
use crate::store::{LookupSpec, ObjectId, Store};

use super::errors::{ApiError, ApiResult};
use super::response::InsertResponse;

/// Collection holding singer documents
pub const SINGERS: &str = "singers";
/// Collection holding instrument documents (lookup variant only)
pub const INSTRUMENTS: &str = "instruments";

/// Shared state for the singer routes
pub struct AppState {
    pub store: Store,
    pub read_variant: ReadVariant,
    schema: Schema,
}

impl AppState {
    pub fn new(store: Store, read_variant: ReadVariant) -> Self {
        let schema = match read_variant {
            ReadVariant::Embedded => embedded_singer_schema(),
            ReadVariant::Lookup => lookup_singer_schema(),
        };
        Self {
            store,
            read_variant,
            schema,
        }
    }
}

/// Join description used by the lookup variant read paths
fn band_members_lookup() -> LookupSpec {
    LookupSpec {
        from: INSTRUMENTS.to_string(),
        local_field: "id".to_string(),
        foreign_field: "artist_id".to_string(),
        as_field: "band_members".to_string(),
    }
}

/// Build the router for the singer routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/singers", get(list_singers))
        .route("/singer", post(create_singer))
        .route("/singer/{id}", get(get_singer))
        .route("/singer/{id}", patch(update_singer))
        .route("/singer/{id}", delete(delete_singer))
        .with_state(state)
}

/// Static welcome response at the root
async fn welcome() -> &'static str {
    "welcome"
}

/// List all singers
async fn list_singers(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    let singers = state.store.collection(SINGERS);

    let results = match state.read_variant {
        ReadVariant::Embedded => singers.find_all()?,
        ReadVariant::Lookup => singers.find_with_lookup(&band_members_lookup(), None)?,
    };

    // An empty collection reports the error branch, not an empty array
    if results.is_empty() {
        return Err(ApiError::NoDocuments);
    }
    Ok(Json(results))
}

/// Get one singer by id.
///
/// The embedded variant treats the path id as the primary key and returns
/// a single object. The lookup variant treats it as the integer singer id,
/// runs the join filtered to that id, and returns the resulting array.
async fn get_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let singers = state.store.collection(SINGERS);

    match state.read_variant {
        ReadVariant::Embedded => {
            let key = ObjectId::parse(&id)?;
            let document = singers.find_one(&key)?.ok_or(ApiError::NoDocuments)?;
            Ok(Json(document))
        }
        ReadVariant::Lookup => {
            let singer_id: i64 = id.parse().map_err(|_| ApiError::InvalidSingerId(id))?;
            let results =
                singers.find_with_lookup(&band_members_lookup(), Some(("id", &json!(singer_id))))?;
            Ok(Json(Value::Array(results)))
        }
    }
}

/// Create a singer
async fn create_singer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<InsertResponse>> {
    if let Err(violation) = validate_document(&state.schema, &payload) {
        return Err(match state.read_variant {
            ReadVariant::Embedded => ApiError::Validation(violation),
            // The lookup variant hides the violation detail
            ReadVariant::Lookup => ApiError::InvalidInput,
        });
    }

    let document = state.store.collection(SINGERS).insert_one(payload)?;
    let inserted_id = document
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    log_event_with_fields(Event::DocumentInserted, &[("id", &inserted_id)]);
    Ok(Json(InsertResponse::new(inserted_id, document)))
}

/// Merge-patch a singer.
///
/// Responds 200 with the post-update document, or 200 `null` when no
/// document matched the primary key.
async fn update_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let key = ObjectId::parse(&id)?;
    let changes = payload
        .as_object()
        .ok_or_else(|| ApiError::InvalidBody("patch body must be a JSON object".to_string()))?;

    let updated = state
        .store
        .collection(SINGERS)
        .find_one_and_update(&key, changes)?;

    if updated.is_some() {
        log_event_with_fields(Event::DocumentUpdated, &[("id", &id)]);
    }
    Ok(Json(updated.unwrap_or(Value::Null)))
}

/// Delete a singer.
///
/// Responds 200 with the deleted document, or 200 `null` when no document
/// matched the primary key.
async fn delete_singer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let key = ObjectId::parse(&id)?;

    let removed = state
        .store
        .collection(SINGERS)
        .find_one_and_delete(&key)?;

    if removed.is_some() {
        log_event_with_fields(Event::DocumentDeleted, &[("id", &id)]);
    }
    Ok(Json(removed.unwrap_or(Value::Null)))
}
