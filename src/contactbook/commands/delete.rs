use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Contact;
use crate::store::ContactStore;

use super::helpers::resolve_one;

pub fn run<S: ContactStore>(book: &mut AddressBook<S>, query: &str) -> Result<CmdResult> {
    let target = resolve_one(book, query)?;
    remove(book, &target)
}

/// Deletes an already selected contact.
pub fn remove<S: ContactStore>(book: &mut AddressBook<S>, target: &Contact) -> Result<CmdResult> {
    let removed = book.delete(target)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact '{}' removed successfully.",
        removed.full_name()
    )));
    Ok(result.with_affected_contacts(vec![removed]))
}
