use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult, ContactPatch};
use crate::error::Result;
use crate::model::Contact;
use crate::store::ContactStore;
use tracing::warn;

use super::helpers::resolve_one;

pub fn run<S: ContactStore>(
    book: &mut AddressBook<S>,
    query: &str,
    patch: &ContactPatch,
) -> Result<CmdResult> {
    let current = resolve_one(book, query)?;
    apply(book, current, patch)
}

/// Applies `patch` to an already selected contact.
pub fn apply<S: ContactStore>(
    book: &mut AddressBook<S>,
    current: Contact,
    patch: &ContactPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if patch.is_empty() {
        warn!(id = %current.id(), "edit requested without changes");
        result.add_message(CmdMessage::warning(format!(
            "Nothing to change for '{}'.",
            current.full_name()
        )));
        return Ok(result.with_affected_contacts(vec![current]));
    }

    let edited = patch.apply(&current)?;
    book.update(&current, edited)?;

    let stored = book.get(current.id()).cloned().unwrap_or(current);
    result.add_message(CmdMessage::success(format!(
        "Contact '{}' updated successfully.",
        stored.full_name()
    )));
    Ok(result.with_affected_contacts(vec![stored]))
}
