use crate::book::AddressBook;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ContactStore;

pub fn run<S: ContactStore>(book: &AddressBook<S>) -> Result<CmdResult> {
    let listed = book.list().into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_contacts(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::BookFixture;

    #[test]
    fn lists_in_display_order() {
        let book = BookFixture::new()
            .with_contact("Albert", "Einstein", "339 384 2348", "")
            .with_contact("Leonardo", "Da Vinci", "344 555 4466", "")
            .build();

        let result = run(&book).unwrap();
        let names: Vec<String> = result
            .listed_contacts
            .iter()
            .map(|c| c.full_name())
            .collect();
        assert_eq!(names, vec!["Leonardo Da vinci", "Albert Einstein"]);
    }

    #[test]
    fn empty_book_lists_nothing() {
        let book = BookFixture::new().build();
        assert!(run(&book).unwrap().listed_contacts.is_empty());
    }
}
