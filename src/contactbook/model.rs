use crate::error::ValidationError;
use crate::validators::{capitalize, validate_email, validate_name, validate_phone_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Opaque, stable identifier of a contact.
///
/// Freshly created contacts get a random UUID; identifiers read back from a
/// book file are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated contact.
///
/// Fields are only reachable through accessors: once built, a contact always
/// holds a title-cased name, a canonical phone number and either a valid email
/// or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    first_name: String,
    last_name: String,
    phone_number: String,
    email: Option<String>,
}

impl Contact {
    /// Builds a contact with a fresh id, running every field validator.
    /// An empty `email` means the contact has no email.
    pub fn new(
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email: &str,
    ) -> Result<Self, ValidationError> {
        Self::build(ContactId::new(), first_name, last_name, phone_number, email)
    }

    fn build(
        id: ContactId,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            first_name: validate_name(first_name)?,
            last_name: validate_name(last_name)?,
            phone_number: validate_phone_number(phone_number)?,
            email: validate_email(email)?,
        })
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// First and last name, each capitalized, joined by a single space.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            capitalize(&self.first_name),
            capitalize(&self.last_name)
        )
    }

    /// Same fields under another identity. Used when an edited contact takes
    /// over the id of the record it replaces.
    pub(crate) fn with_id(mut self, id: ContactId) -> Self {
        self.id = id;
        self
    }

    pub fn to_record(&self) -> ContactRecord {
        ContactRecord {
            id: self.id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone_number.clone(),
            email: self.email.clone(),
        }
    }

    /// Rebuilds a contact from its persisted record, validating every field.
    pub fn from_record(record: &ContactRecord) -> Result<Self, ValidationError> {
        if record.id.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField("id"));
        }
        Self::build(
            ContactId::from(record.id.as_str()),
            &record.first_name,
            &record.last_name,
            &record.phone,
            record.email.as_deref().unwrap_or_default(),
        )
    }

    /// Key used for every listing: last name, then first name, then id.
    pub(crate) fn sort_key(&self) -> (&str, &str, &ContactId) {
        (&self.last_name, &self.first_name, &self.id)
    }
}

/// Persisted shape of a contact, as written to a book file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Records keyed by contact id. Ordered so book files diff cleanly.
pub type RecordMap = BTreeMap<String, ContactRecord>;
