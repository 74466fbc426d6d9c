//! # Storage Layer
//!
//! The address book never touches the filesystem itself. It hands a
//! [`RecordMap`] to a [`ContactStore`] on save and asks one for a
//! [`RecordMap`] on load, so the backing store can be swapped without
//! touching the core.
//!
//! ## Implementations
//!
//! - [`fs::JsonStore`]: one pretty-printed JSON object per book file
//! - [`memory::InMemoryStore`]: keeps "files" in memory, for tests
//!
//! ## File Format
//!
//! ```text
//! {
//!     "5b1e…": {
//!         "id": "5b1e…",
//!         "first_name": "Albert",
//!         "last_name": "Einstein",
//!         "phone": "+393393842348",
//!         "email": null
//!     }
//! }
//! ```
//!
//! A zero-byte file is an empty book. Anything that is not a JSON object of
//! records is reported as [`StorageError::Corrupted`].
//!
//! Stores only check the *shape* of the data. Whether the records are valid
//! contacts is decided by the address book when it loads them.

use crate::error::StorageError;
use crate::model::RecordMap;
use std::path::Path;

pub mod fs;
pub mod memory;

pub type StoreResult<T> = std::result::Result<T, StorageError>;

/// Abstract persistence capability for address books.
pub trait ContactStore {
    /// Persist the full set of records at `path`, replacing what was there.
    fn save(&self, records: &RecordMap, path: &Path) -> StoreResult<()>;

    /// Read back every record stored at `path`.
    fn load(&self, path: &Path) -> StoreResult<RecordMap>;
}

/// Shared path check: an empty path never reaches the backend.
pub(crate) fn ensure_path(path: &Path) -> StoreResult<()> {
    if path.as_os_str().is_empty() {
        return Err(StorageError::EmptyPath);
    }
    Ok(())
}

/// Decodes the text of a book file.
pub(crate) fn parse_records(content: &[u8]) -> StoreResult<RecordMap> {
    if content.is_empty() {
        return Ok(RecordMap::new());
    }

    let value: serde_json::Value = serde_json::from_slice(content)
        .map_err(|e| StorageError::Corrupted(format!("invalid JSON file ({})", e)))?;

    if !value.is_object() {
        return Err(StorageError::Corrupted(
            "invalid format, expected an object of contacts".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| StorageError::Corrupted(format!("invalid contact record ({})", e)))
}

/// Encodes records the way book files are written: 4-space indented JSON.
pub(crate) fn render_records(records: &RecordMap) -> StoreResult<String> {
    use serde::Serialize;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| StorageError::Corrupted(e.to_string()))
}
