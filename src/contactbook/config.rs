use crate::error::{ContactError, Result, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BOOK_FILE: &str = "contacts.json";

/// Configuration for contactbook, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactBookConfig {
    /// Address book opened when no `--file` is given. Relative paths are
    /// resolved against the data directory.
    #[serde(default = "default_book_file")]
    pub book_file: String,

    /// Ask before deleting a contact in the interactive shell
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_book_file() -> String {
    DEFAULT_BOOK_FILE.to_string()
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for ContactBookConfig {
    fn default() -> Self {
        Self {
            book_file: default_book_file(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl ContactBookConfig {
    pub const KEYS: [&'static str; 2] = ["book-file", "confirm-delete"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| StorageError::io(&config_path, e))?;
        let config = serde_json::from_str(&content).map_err(StorageError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| StorageError::io(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StorageError::Serialization)?;
        fs::write(&config_path, content).map_err(|e| StorageError::io(&config_path, e))?;
        Ok(())
    }

    /// Full path of the default address book.
    pub fn book_path(&self, data_dir: &Path) -> PathBuf {
        let file = Path::new(&self.book_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.join(file)
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "book-file" => Some(self.book_file.clone()),
            "confirm-delete" => Some(self.confirm_delete.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "book-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(ContactError::Api("book-file cannot be empty".to_string()));
                }
                self.book_file = value.to_string();
            }
            "confirm-delete" => {
                self.confirm_delete = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(ContactError::Api(format!(
                            "confirm-delete expects true or false, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => return Err(ContactError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
