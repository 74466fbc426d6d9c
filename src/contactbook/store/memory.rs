use super::{ensure_path, ContactStore, StoreResult};
use crate::error::StorageError;
use crate::model::RecordMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory store for testing. "Files" are keyed by path and vanish with
/// the store.
///
/// Uses `RefCell` since the address book is single-threaded; this keeps the
/// `ContactStore` methods on `&self`.
#[derive(Default)]
pub struct InMemoryStore {
    files: RefCell<HashMap<PathBuf, RecordMap>>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail until switched off again.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Places raw records at `path`, bypassing any validation.
    pub fn put(&self, path: impl Into<PathBuf>, records: RecordMap) {
        self.files.borrow_mut().insert(path.into(), records);
    }

    /// What is currently stored at `path`, if anything.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<RecordMap> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl ContactStore for InMemoryStore {
    fn save(&self, records: &RecordMap, path: &Path) -> StoreResult<()> {
        ensure_path(path)?;
        if *self.simulate_write_error.borrow() {
            return Err(StorageError::io(
                path,
                std::io::Error::other("simulated write error"),
            ));
        }
        self.put(path, records.clone());
        Ok(())
    }

    fn load(&self, path: &Path) -> StoreResult<RecordMap> {
        ensure_path(path)?;
        self.get(path)
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::book::AddressBook;
    use crate::model::Contact;

    /// Builder for address books pre-populated with contacts.
    pub struct BookFixture {
        pub book: AddressBook<InMemoryStore>,
    }

    impl Default for BookFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BookFixture {
        pub fn new() -> Self {
            Self {
                book: AddressBook::new(InMemoryStore::new()),
            }
        }

        /// Adds `count` contacts with distinct phones and emails.
        pub fn with_contacts(mut self, count: usize) -> Self {
            for i in 0..count {
                let contact = Contact::new(
                    &format!("Person{}", i + 1),
                    "Tester",
                    &format!("+39 333 000 {:04}", i + 1),
                    &format!("person{}@test.com", i + 1),
                )
                .unwrap();
                self.book.add(contact).unwrap();
            }
            self
        }

        pub fn with_contact(mut self, first: &str, last: &str, phone: &str, email: &str) -> Self {
            let contact = Contact::new(first, last, phone, email).unwrap();
            self.book.add(contact).unwrap();
            self
        }

        pub fn build(self) -> AddressBook<InMemoryStore> {
            self.book
        }
    }
}
