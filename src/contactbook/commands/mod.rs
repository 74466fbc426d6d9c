//! # Command Layer
//!
//! Each submodule implements one user-facing command on top of an
//! [`AddressBook`](crate::book::AddressBook): it turns raw user input into
//! validated contacts, calls the book, and describes the outcome as a
//! [`CmdResult`]. Nothing here prints or reads from a terminal, so the CLI
//! one-shot commands and the interactive shell share the same code.

use crate::config::ContactBookConfig;
use crate::error::Result;
use crate::model::Contact;
use crate::validators::{validate_email, validate_name, validate_phone_number};

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod helpers;
pub mod list;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_contacts: Vec<Contact>,
    pub listed_contacts: Vec<Contact>,
    pub config: Option<ContactBookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_config(mut self, config: ContactBookConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Raw field values for a new contact, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl ContactInput {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    pub fn build(&self) -> Result<Contact> {
        Ok(Contact::new(
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
        )?)
    }
}

/// Changes to an existing contact. `None` or blank keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Drop the email altogether. Takes precedence over `email`.
    pub clear_email: bool,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        !self.clear_email
            && [&self.first_name, &self.last_name, &self.phone, &self.email]
                .iter()
                .all(|field| provided(field).is_none())
    }

    /// Builds the edited contact. Its id is a placeholder: the book keeps
    /// the id of the contact being replaced.
    pub fn apply(&self, current: &Contact) -> Result<Contact> {
        let first_name = match provided(&self.first_name) {
            Some(raw) => validate_name(raw)?,
            None => current.first_name().to_string(),
        };
        let last_name = match provided(&self.last_name) {
            Some(raw) => validate_name(raw)?,
            None => current.last_name().to_string(),
        };
        let phone = match provided(&self.phone) {
            Some(raw) => validate_phone_number(raw)?,
            None => current.phone_number().to_string(),
        };
        let email = if self.clear_email {
            None
        } else {
            match provided(&self.email) {
                Some(raw) => validate_email(raw)?,
                None => current.email().map(str::to_string),
            }
        };

        Ok(Contact::new(
            &first_name,
            &last_name,
            &phone,
            email.as_deref().unwrap_or_default(),
        )?)
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}
