use crate::book::AddressBook;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ContactStore;

/// Runs a name search. Zero matches is a normal outcome here: it yields an
/// empty listing and an info message rather than an error.
pub fn run<S: ContactStore>(book: &AddressBook<S>, query: &str) -> Result<CmdResult> {
    match book.search(query) {
        Ok(found) => {
            let listed = found.into_iter().cloned().collect();
            Ok(CmdResult::default().with_listed_contacts(listed))
        }
        Err(e) if e.is_not_found() => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("No contacts found."));
            Ok(result)
        }
        Err(e) => Err(e),
    }
}
