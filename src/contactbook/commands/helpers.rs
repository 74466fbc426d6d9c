use crate::book::AddressBook;
use crate::error::{ContactError, Result};
use crate::model::Contact;
use crate::store::ContactStore;

/// Resolves a search query to exactly one contact.
///
/// No match is [`ContactError::NotFound`]; more than one asks the caller to
/// refine the query.
pub fn resolve_one<S: ContactStore>(book: &AddressBook<S>, query: &str) -> Result<Contact> {
    let found = book.search(query)?;
    match found.as_slice() {
        [only] => Ok((*only).clone()),
        many => Err(ContactError::Api(format!(
            "'{}' matches {} contacts ({}), refine the query",
            query.trim(),
            many.len(),
            many.iter()
                .map(|c| c.full_name())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}
