//! # Embedded Document Store
//!
//! Named collections of JSON documents keyed by [`ObjectId`]. The full
//! store persists as a JSON snapshot after each mutation; opening a store
//! reloads the snapshot. Collections spring into existence on first write
//! and behave as empty before that.

mod key;
mod snapshot;

pub use key::{KeyError, ObjectId};
pub use snapshot::Snapshot;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};

/// Documents per collection, keyed by rendered primary key
pub type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Primary key conversion failed
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Document to insert is not a JSON object
    #[error("document must be a JSON object")]
    NotAnObject,

    /// Data file could not be read or written
    #[error("data file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data file exists but does not parse as a snapshot
    #[error("corrupt data file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A lock was poisoned by a panicking writer
    #[error("store lock poisoned")]
    LockPoisoned,
}

struct Inner {
    collections: Collections,
    data_path: Option<PathBuf>,
}

/// Handle to an open document store
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    /// Opens a store backed by the given data file.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt file
    /// is an error; callers treat that as fatal at boot.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let collections = Snapshot::load(&path)?.unwrap_or_default();

        Ok(Self {
            inner: Arc::new(RwLock::new(Inner {
                collections,
                data_path: Some(path),
            })),
        })
    }

    /// Opens a store with no backing file. State is lost on drop.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                collections: Collections::new(),
                data_path: None,
            })),
        }
    }

    /// Returns a handle to the named collection
    pub fn collection(&self, name: &str) -> Collection {
        Collection {
            inner: Arc::clone(&self.inner),
            name: name.to_string(),
        }
    }

    /// Persists the current state to the data file, if one is configured
    pub fn flush(&self) -> StoreResult<()> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        persist(&inner)
    }
}

/// Handle to a named collection
pub struct Collection {
    inner: Arc<RwLock<Inner>>,
    name: String,
}

impl Collection {
    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All documents, in primary-key order
    pub fn find_all(&self) -> StoreResult<Vec<Value>> {
        let inner = self.read()?;
        Ok(inner
            .collections
            .get(&self.name)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    /// One document by primary key
    pub fn find_one(&self, id: &ObjectId) -> StoreResult<Option<Value>> {
        let inner = self.read()?;
        Ok(inner
            .collections
            .get(&self.name)
            .and_then(|docs| docs.get(&id.to_string()))
            .cloned())
    }

    /// Inserts a document, assigning a fresh `_id`.
    ///
    /// Returns the stored document, `_id` included.
    pub fn insert_one(&self, document: Value) -> StoreResult<Value> {
        let Value::Object(mut fields) = document else {
            return Err(StoreError::NotAnObject);
        };

        let id = ObjectId::generate();
        fields.insert("_id".to_string(), Value::String(id.to_string()));
        let stored = Value::Object(fields);

        let mut inner = self.write()?;
        inner
            .collections
            .entry(self.name.clone())
            .or_default()
            .insert(id.to_string(), stored.clone());
        persist(&inner)?;

        Ok(stored)
    }

    /// Merge-patches the document matching the primary key.
    ///
    /// Only the provided fields are overwritten. `_id` is immutable and is
    /// skipped if present in `changes`. Returns the post-update document,
    /// or `None` when no document matched.
    pub fn find_one_and_update(
        &self,
        id: &ObjectId,
        changes: &Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let mut inner = self.write()?;

        let Some(doc) = inner
            .collections
            .get_mut(&self.name)
            .and_then(|docs| docs.get_mut(&id.to_string()))
        else {
            return Ok(None);
        };

        if let Some(fields) = doc.as_object_mut() {
            for (key, value) in changes {
                if key == "_id" {
                    continue;
                }
                fields.insert(key.clone(), value.clone());
            }
        }
        let updated = doc.clone();

        persist(&inner)?;
        Ok(Some(updated))
    }

    /// Removes the document matching the primary key.
    ///
    /// Returns the removed document, or `None` when no document matched.
    pub fn find_one_and_delete(&self, id: &ObjectId) -> StoreResult<Option<Value>> {
        let mut inner = self.write()?;

        let removed = inner
            .collections
            .get_mut(&self.name)
            .and_then(|docs| docs.remove(&id.to_string()));

        if removed.is_some() {
            persist(&inner)?;
        }
        Ok(removed)
    }

    /// Left-outer join read.
    ///
    /// For every local document (optionally filtered to one field value),
    /// collects the documents from `spec.from` whose foreign field equals
    /// the local field value into the computed `spec.as_field` array.
    /// Stored documents are never mutated; the joined field exists only in
    /// the result.
    pub fn find_with_lookup(
        &self,
        spec: &LookupSpec,
        filter: Option<(&str, &Value)>,
    ) -> StoreResult<Vec<Value>> {
        let inner = self.read()?;

        let foreigns: Vec<&Value> = inner
            .collections
            .get(&spec.from)
            .map(|docs| docs.values().collect())
            .unwrap_or_default();

        let mut results = Vec::new();
        let locals = inner.collections.get(&self.name);
        for doc in locals.map(|docs| docs.values()).into_iter().flatten() {
            if let Some((field, expected)) = filter {
                if doc.get(field) != Some(expected) {
                    continue;
                }
            }

            let members: Vec<Value> = match doc.get(&spec.local_field) {
                Some(local_value) => foreigns
                    .iter()
                    .filter(|foreign| foreign.get(&spec.foreign_field) == Some(local_value))
                    .map(|foreign| (*foreign).clone())
                    .collect(),
                None => Vec::new(),
            };

            let mut joined = doc.clone();
            if let Some(fields) = joined.as_object_mut() {
                fields.insert(spec.as_field.clone(), Value::Array(members));
            }
            results.push(joined);
        }

        Ok(results)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

/// Read-time join description
#[derive(Debug, Clone)]
pub struct LookupSpec {
    /// Collection joined in
    pub from: String,
    /// Field on the local document
    pub local_field: String,
    /// Field on the joined documents
    pub foreign_field: String,
    /// Name of the computed array field on the result
    pub as_field: String,
}

fn persist(inner: &Inner) -> StoreResult<()> {
    if let Some(path) = &inner.data_path {
        Snapshot::write(path, &inner.collections)?;
        log_event_with_fields(
            Event::SnapshotWritten,
            &[("path", &path.display().to_string())],
        );
    }
    Ok(())
}
