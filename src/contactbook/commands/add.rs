use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult, ContactInput};
use crate::error::Result;
use crate::store::ContactStore;

pub fn run<S: ContactStore>(book: &mut AddressBook<S>, input: &ContactInput) -> Result<CmdResult> {
    let contact = input.build()?;
    book.add(contact.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact '{}' added successfully.",
        contact.full_name()
    )));
    Ok(result.with_affected_contacts(vec![contact]))
}
