use std::path::PathBuf;
use thiserror::Error;

/// Input failed one of the field validators. Always caller-correctable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid phone: expected a mobile number like +39 344 555 4466, got '{0}'")]
    InvalidPhone(String),

    #[error("Invalid email (expected email like name@example.com), got '{0}'")]
    InvalidEmail(String),
}

/// Which index rejected a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Phone,
    Email,
}

impl std::fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateField::Phone => write!(f, "Phone number"),
            DuplicateField::Email => write!(f, "Email"),
        }
    }
}

/// Failures raised by a [`crate::store::ContactStore`].
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage path is empty")]
    EmptyPath,

    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Could not access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is corrupted: {0}")]
    Corrupted(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, StorageError::Corrupted(_))
    }
}

#[derive(Error, Debug)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} already used by another contact")]
    Duplicate(DuplicateField),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ContactError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContactError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
