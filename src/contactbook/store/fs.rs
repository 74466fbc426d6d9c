use super::{ensure_path, parse_records, render_records, ContactStore, StoreResult};
use crate::error::StorageError;
use crate::model::RecordMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// File-backed store writing each book as a single JSON document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_dir(&self, path: &Path) -> StoreResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| StorageError::io(path, e))?;
        }
        Ok(())
    }
}

impl ContactStore for JsonStore {
    fn save(&self, records: &RecordMap, path: &Path) -> StoreResult<()> {
        ensure_path(path)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        self.ensure_dir(dir)?;

        let content = render_records(records)?;

        // Atomic write: a failed save never truncates the previous book
        let tmp_path = dir.join(format!(".contacts-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(|e| StorageError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::io(path, e));
        }

        debug!(path = %path.display(), records = records.len(), "book file written");
        Ok(())
    }

    fn load(&self, path: &Path) -> StoreResult<RecordMap> {
        ensure_path(path)?;

        if !path.is_file() {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }

        let content = fs::read(path).map_err(|e| StorageError::io(path, e))?;
        let records = parse_records(&content)?;

        debug!(path = %path.display(), records = records.len(), "book file read");
        Ok(records)
    }
}
