//! Store snapshots
//!
//! The entire store serializes to a single JSON file after every mutation
//! and is reloaded on open. A missing file yields an empty store; an
//! unreadable or corrupt file is an open error.

use std::fs::{self, File};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Collections, StoreError, StoreResult};

/// On-disk snapshot format
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
    /// Documents per collection, keyed by primary key
    pub collections: Collections,
}

impl Snapshot {
    /// Loads a snapshot from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> StoreResult<Option<Collections>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Some(snapshot.collections))
    }

    /// Writes a snapshot to disk.
    ///
    /// Writes to a sibling temp file first, syncs, then renames over the
    /// target so a crash mid-write never leaves a truncated snapshot.
    pub fn write(path: &Path, collections: &Collections) -> StoreResult<()> {
        let snapshot = Snapshot {
            saved_at: Utc::now(),
            collections: collections.clone(),
        };

        let content = serde_json::to_string_pretty(&snapshot).map_err(|source| {
            StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let tmp_path = path.with_extension("tmp");
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&tmp_path, content).map_err(io_err)?;
        File::open(&tmp_path).and_then(|f| f.sync_all()).map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;

        Ok(())
    }
}
