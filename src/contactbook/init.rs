use crate::book::AddressBook;
use crate::config::ContactBookConfig;
use crate::error::{ContactError, Result};
use crate::store::fs::JsonStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the data directory (config and default book live there).
pub const HOME_ENV: &str = "CONTACTBOOK_HOME";

pub struct BookContext {
    pub book: AddressBook<JsonStore>,
    pub book_path: PathBuf,
    pub data_dir: PathBuf,
    pub config: ContactBookConfig,
}

impl BookContext {
    /// Loads the book at `book_path` if the file exists. A missing file
    /// leaves the book empty; returns whether anything was loaded.
    pub fn open_existing(&mut self) -> Result<bool> {
        if !self.book_path.exists() {
            debug!(path = %self.book_path.display(), "no book file yet, starting empty");
            return Ok(false);
        }
        self.book.load(&self.book_path)?;
        Ok(true)
    }

    pub fn save(&mut self) -> Result<()> {
        self.book.save(&self.book_path)
    }
}

/// Resolves the data directory: `$CONTACTBOOK_HOME`, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "contactbook", "contactbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ContactError::Api("Could not determine the data directory".to_string()))
}

pub fn initialize(file: Option<&Path>) -> Result<BookContext> {
    initialize_in(data_dir()?, file)
}

/// Builds the context for `data_dir`. `file` takes precedence over the
/// configured book.
pub fn initialize_in(data_dir: PathBuf, file: Option<&Path>) -> Result<BookContext> {
    let config = ContactBookConfig::load(&data_dir)?;
    let book_path = match file {
        Some(path) => path.to_path_buf(),
        None => config.book_path(&data_dir),
    };
    debug!(data_dir = %data_dir.display(), book = %book_path.display(), "context initialized");

    Ok(BookContext {
        book: AddressBook::new(JsonStore::new()),
        book_path,
        data_dir,
        config,
    })
}
