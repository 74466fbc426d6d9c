//! # Address Book
//!
//! The address book owns every [`Contact`] of a session together with two
//! secondary indexes:
//!
//! - `phone_index`: canonical phone number → contact id
//! - `email_index`: email → contact id (contacts without email are absent)
//!
//! The indexes exist to enforce uniqueness: two different contacts never share
//! a phone number or an email. They are derived data, so they are rebuilt from
//! scratch on [`AddressBook::load`] and patched in lock-step on every mutation.
//!
//! ## Consistency
//!
//! Every operation validates first and mutates second. A rejected `add`,
//! `update` or `delete` returns before anything is touched, and `load` builds a
//! complete replacement before swapping it in, so the collection and both
//! indexes always agree with each other.
//!
//! ## Dirty Tracking
//!
//! [`AddressBook::is_dirty`] reports unsaved changes. It is set by every
//! successful mutation and cleared only by a successful `save` or `load`.
//!
//! The book performs no field validation of its own: contacts arrive already
//! validated (see [`crate::validators`]).

use crate::error::{ContactError, DuplicateField, Result, StorageError};
use crate::model::{Contact, ContactId, RecordMap};
use crate::store::ContactStore;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub struct AddressBook<S: ContactStore> {
    contacts: HashMap<ContactId, Contact>,
    phone_index: HashMap<String, ContactId>,
    email_index: HashMap<String, ContactId>,
    dirty: bool,
    store: S,
}

impl<S: ContactStore> AddressBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            contacts: HashMap::new(),
            phone_index: HashMap::new(),
            email_index: HashMap::new(),
            dirty: false,
            store,
        }
    }

    pub fn add(&mut self, contact: Contact) -> Result<()> {
        self.check_duplicate(&contact, None)?;

        debug!(id = %contact.id(), "adding contact");
        self.phone_index
            .insert(contact.phone_number().to_string(), contact.id().clone());
        if let Some(email) = contact.email() {
            self.email_index
                .insert(email.to_string(), contact.id().clone());
        }
        self.contacts.insert(contact.id().clone(), contact);

        self.dirty = true;
        Ok(())
    }

    /// Removes the stored contact with the same id as `contact`.
    ///
    /// Index entries are cleared using the stored record, so a stale copy of
    /// the contact still removes the right entries.
    pub fn delete(&mut self, contact: &Contact) -> Result<Contact> {
        let removed = self
            .contacts
            .remove(contact.id())
            .ok_or_else(|| ContactError::NotFound(contact.full_name()))?;

        debug!(id = %removed.id(), "deleting contact");
        self.phone_index.remove(removed.phone_number());
        if let Some(email) = removed.email() {
            self.email_index.remove(email);
        }

        self.dirty = true;
        Ok(removed)
    }

    /// Replaces the contact stored under `old.id()` with `new`.
    ///
    /// The stored contact keeps `old`'s id, whatever id `new` carries.
    pub fn update(&mut self, old: &Contact, new: Contact) -> Result<()> {
        let id = old.id().clone();
        let current = self
            .contacts
            .get(&id)
            .ok_or_else(|| ContactError::NotFound(old.full_name()))?;

        self.check_duplicate(&new, Some(&id))?;

        let new = new.with_id(id.clone());
        let old_phone = current.phone_number().to_string();
        let old_email = current.email().map(str::to_string);

        debug!(id = %id, "updating contact");
        if new.phone_number() != old_phone {
            self.phone_index.remove(&old_phone);
            self.phone_index
                .insert(new.phone_number().to_string(), id.clone());
        }

        if new.email() != old_email.as_deref() {
            if let Some(email) = &old_email {
                self.email_index.remove(email);
            }
            if let Some(email) = new.email() {
                self.email_index.insert(email.to_string(), id.clone());
            }
        }

        self.contacts.insert(id, new);
        self.dirty = true;
        Ok(())
    }

    /// Every contact ordered by last name, first name, then id.
    pub fn list(&self) -> Vec<&Contact> {
        let mut contacts: Vec<&Contact> = self.contacts.values().collect();
        contacts.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        contacts
    }

    /// Case-insensitive substring search over full names.
    ///
    /// An empty query matches everything. No match is reported as
    /// [`ContactError::NotFound`].
    pub fn search(&self, query: &str) -> Result<Vec<&Contact>> {
        let needle = query.trim().to_lowercase();

        let found: Vec<&Contact> = self
            .list()
            .into_iter()
            .filter(|c| c.full_name().to_lowercase().contains(&needle))
            .collect();

        if found.is_empty() {
            return Err(ContactError::NotFound(format!(
                "no contacts match '{}'",
                query.trim()
            )));
        }
        Ok(found)
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.get(id)
    }

    pub fn size(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Id of the contact indexed under `phone_number` (canonical form).
    pub fn id_for_phone(&self, phone_number: &str) -> Option<&ContactId> {
        self.phone_index.get(phone_number)
    }

    pub fn id_for_email(&self, email: &str) -> Option<&ContactId> {
        self.email_index.get(email)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        let records: RecordMap = self
            .contacts
            .values()
            .map(|c| (c.id().to_string(), c.to_record()))
            .collect();

        self.store.save(&records, path)?;

        info!(path = %path.display(), contacts = records.len(), "address book saved");
        self.dirty = false;
        Ok(())
    }

    /// Replaces the whole book with the contents at `path`.
    ///
    /// Records are validated and indexed into fresh maps first; the current
    /// state is only replaced once the whole file proved consistent.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let records = self.store.load(path)?;

        let mut contacts = HashMap::with_capacity(records.len());
        let mut phone_index = HashMap::with_capacity(records.len());
        let mut email_index = HashMap::new();

        for (key, record) in &records {
            if key != &record.id {
                return Err(corrupted(format!(
                    "record '{}' is stored under key '{}'",
                    record.id, key
                )));
            }

            let contact = Contact::from_record(record)
                .map_err(|e| corrupted(format!("record '{}': {}", key, e)))?;

            if phone_index
                .insert(contact.phone_number().to_string(), contact.id().clone())
                .is_some()
            {
                return Err(corrupted(format!(
                    "phone number {} appears more than once",
                    contact.phone_number()
                )));
            }
            if let Some(email) = contact.email() {
                if email_index
                    .insert(email.to_string(), contact.id().clone())
                    .is_some()
                {
                    return Err(corrupted(format!("email {} appears more than once", email)));
                }
            }
            contacts.insert(contact.id().clone(), contact);
        }

        self.contacts = contacts;
        self.phone_index = phone_index;
        self.email_index = email_index;
        self.dirty = false;

        info!(path = %path.display(), contacts = self.contacts.len(), "address book loaded");
        Ok(())
    }

    fn check_duplicate(&self, contact: &Contact, exclude: Option<&ContactId>) -> Result<()> {
        let taken_by_other = |owner: Option<&ContactId>| match owner {
            Some(id) => Some(id) != exclude,
            None => false,
        };

        if taken_by_other(self.phone_index.get(contact.phone_number())) {
            return Err(ContactError::Duplicate(DuplicateField::Phone));
        }

        if let Some(email) = contact.email() {
            if taken_by_other(self.email_index.get(email)) {
                return Err(ContactError::Duplicate(DuplicateField::Email));
            }
        }

        Ok(())
    }
}

fn corrupted(reason: String) -> ContactError {
    ContactError::Storage(StorageError::Corrupted(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContactRecord;
    use crate::store::memory::fixtures::BookFixture;
    use crate::store::fs::JsonStore;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn einstein() -> Contact {
        Contact::new(
            "Albert",
            "Einstein",
            "+39 339 3842348",
            "alberteinstein@test.com",
        )
        .unwrap()
    }

    fn da_vinci() -> Contact {
        Contact::new("Leonardo", "Da Vinci", "344 555 4466", "leonardo@test.com").unwrap()
    }

    fn book() -> AddressBook<InMemoryStore> {
        AddressBook::new(InMemoryStore::new())
    }

    #[test]
    fn test_add_contact() {
        let mut book = book();
        let contact = einstein();
        book.add(contact.clone()).unwrap();

        assert_eq!(book.get(contact.id()), Some(&contact));
        assert_eq!(book.id_for_phone("+393393842348"), Some(contact.id()));
        assert_eq!(
            book.id_for_email("alberteinstein@test.com"),
            Some(contact.id())
        );
        assert!(book.is_dirty());
    }

    #[test]
    fn test_add_two_distinct_contacts() {
        let mut book = book();
        book.add(einstein()).unwrap();
        book.add(da_vinci()).unwrap();
        assert_eq!(book.size(), 2);
    }

    #[test]
    fn test_add_without_email_is_not_indexed() {
        let mut book = book();
        let a = Contact::new("Ada", "Lovelace", "333 000 0001", "").unwrap();
        let b = Contact::new("Alan", "Turing", "333 000 0002", "").unwrap();
        book.add(a).unwrap();
        book.add(b).unwrap();

        assert_eq!(book.size(), 2);
        assert!(book.email_index.is_empty());
    }

    #[test]
    fn test_duplicate_phone_is_rejected() {
        let mut book = book();
        let first = einstein();
        book.add(first.clone()).unwrap();

        let clash = Contact::new(
            "Leonardo",
            "Da Vinci",
            "+39 339 3842348",
            "leonardo@test.com",
        )
        .unwrap();
        let err = book.add(clash).unwrap_err();

        assert!(matches!(err, ContactError::Duplicate(DuplicateField::Phone)));
        assert_eq!(book.size(), 1);
        assert_eq!(book.phone_index.len(), 1);
        assert_eq!(book.email_index.len(), 1);
        assert!(book.id_for_email("leonardo@test.com").is_none());
        assert_eq!(book.id_for_phone("+393393842348"), Some(first.id()));
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut book = book();
        book.add(einstein()).unwrap();

        let clash =
            Contact::new("Leonardo", "Da Vinci", "344 555 4466", "alberteinstein@test.com")
                .unwrap();
        let err = book.add(clash).unwrap_err();

        assert!(matches!(err, ContactError::Duplicate(DuplicateField::Email)));
        assert!(book.id_for_phone("+393445554466").is_none());
        assert_eq!(book.size(), 1);
    }

    #[test]
    fn test_email_is_compared_exactly() {
        let mut book = book();
        book.add(einstein()).unwrap();

        let other =
            Contact::new("Leonardo", "Da Vinci", "344 555 4466", "AlbertEinstein@test.com")
                .unwrap();
        book.add(other).unwrap();
        assert_eq!(book.size(), 2);
    }

    #[test]
    fn test_delete_contact() {
        let mut book = book();
        let contact = einstein();
        book.add(contact.clone()).unwrap();
        book.save(Path::new("book.json")).unwrap();

        book.delete(&contact).unwrap();

        assert!(book.list().is_empty());
        assert!(book.id_for_phone(contact.phone_number()).is_none());
        assert!(book.id_for_email("alberteinstein@test.com").is_none());
        assert!(book.is_dirty());
    }

    #[test]
    fn test_delete_absent_contact() {
        let mut book = BookFixture::new().with_contacts(2).build();
        book.save(Path::new("book.json")).unwrap();

        let err = book.delete(&einstein()).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(book.size(), 2);
        assert_eq!(book.phone_index.len(), 2);
        assert_eq!(book.email_index.len(), 2);
        assert!(!book.is_dirty());
    }

    #[test]
    fn test_delete_with_stale_copy_clears_stored_entries() {
        let mut book = book();
        let original = einstein();
        book.add(original.clone()).unwrap();

        let edited = Contact::new("Albert", "Einstein", "333 111 2222", "albert@new.com").unwrap();
        book.update(&original, edited).unwrap();

        // `original` still carries the old phone and email
        book.delete(&original).unwrap();

        assert!(book.phone_index.is_empty());
        assert!(book.email_index.is_empty());
    }

    #[test]
    fn test_update_email_only() {
        let mut book = book();
        let old = einstein();
        book.add(old.clone()).unwrap();

        let new = Contact::new(
            "Albert",
            "Einstein",
            "+39 339 3842348",
            "alberteinstein@newtest.com",
        )
        .unwrap();
        let new_id = new.id().clone();
        book.update(&old, new).unwrap();

        let stored = book.get(old.id()).unwrap();
        assert_eq!(stored.email(), Some("alberteinstein@newtest.com"));
        assert_eq!(stored.id(), old.id());
        assert!(book.get(&new_id).is_none());
        assert!(book.id_for_email("alberteinstein@test.com").is_none());
        assert_eq!(
            book.id_for_email("alberteinstein@newtest.com"),
            Some(old.id())
        );
        assert_eq!(book.id_for_phone("+393393842348"), Some(old.id()));
        assert_eq!(book.phone_index.len(), 1);
        assert_eq!(book.size(), 1);
    }

    #[test]
    fn test_update_phone_moves_index_entry() {
        let mut book = book();
        let old = einstein();
        book.add(old.clone()).unwrap();

        let new =
            Contact::new("Albert", "Einstein", "333 111 2222", "alberteinstein@test.com").unwrap();
        book.update(&old, new).unwrap();

        assert!(book.id_for_phone("+393393842348").is_none());
        assert_eq!(book.id_for_phone("+393331112222"), Some(old.id()));
        assert_eq!(
            book.id_for_email("alberteinstein@test.com"),
            Some(old.id())
        );
    }

    #[test]
    fn test_update_clearing_email() {
        let mut book = book();
        let old = einstein();
        book.add(old.clone()).unwrap();

        let new = Contact::new("Albert", "Einstein", "+39 339 3842348", "").unwrap();
        book.update(&old, new).unwrap();

        assert_eq!(book.get(old.id()).unwrap().email(), None);
        assert!(book.email_index.is_empty());
    }

    #[test]
    fn test_update_to_other_contacts_phone_fails() {
        let mut book = book();
        let a = einstein();
        let b = da_vinci();
        book.add(a.clone()).unwrap();
        book.add(b.clone()).unwrap();
        book.save(Path::new("book.json")).unwrap();

        let new = Contact::new("Albert", "Einstein", "344 555 4466", "").unwrap();
        let err = book.update(&a, new).unwrap_err();

        assert!(matches!(err, ContactError::Duplicate(DuplicateField::Phone)));
        assert_eq!(book.get(a.id()), Some(&a));
        assert_eq!(book.id_for_phone("+393445554466"), Some(b.id()));
        assert_eq!(book.id_for_email("alberteinstein@test.com"), Some(a.id()));
        assert!(!book.is_dirty());
    }

    #[test]
    fn test_update_missing_contact() {
        let mut book = book();
        let err = book.update(&einstein(), da_vinci()).unwrap_err();
        assert!(err.is_not_found());
        assert!(book.is_empty());
    }

    #[test]
    fn test_list_order() {
        let mut book = book();
        book.add(einstein()).unwrap();
        book.add(da_vinci()).unwrap();

        let names: Vec<&str> = book.list().iter().map(|c| c.last_name()).collect();
        assert_eq!(names, vec!["Da Vinci", "Einstein"]);
    }

    #[test]
    fn test_list_ties_break_on_id() {
        let mut book = book();
        book.add(Contact::new("Ada", "Lovelace", "333 000 0001", "").unwrap())
            .unwrap();
        book.add(Contact::new("Ada", "Lovelace", "333 000 0002", "").unwrap())
            .unwrap();
        book.add(Contact::new("Ada", "Lovelace", "333 000 0003", "").unwrap())
            .unwrap();

        let ids: Vec<&ContactId> = book.list().iter().map(|c| c.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search_contact() {
        let mut book = book();
        book.add(einstein()).unwrap();

        assert_eq!(book.search("Alb").unwrap()[0].first_name(), "Albert");
        assert_eq!(book.search("einst").unwrap()[0].first_name(), "Albert");
        assert_eq!(book.search("  ALBERT EIN ").unwrap().len(), 1);
        assert!(book.search("leonardo").unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let book = BookFixture::new().with_contacts(3).build();
        assert_eq!(book.search("").unwrap().len(), 3);
    }

    #[test]
    fn test_search_on_empty_book() {
        assert!(book().search("").unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_clears_dirty() {
        let mut book = BookFixture::new().with_contacts(2).build();
        assert!(book.is_dirty());

        book.save(Path::new("book.json")).unwrap();

        assert!(!book.is_dirty());
        let saved = book.store().get("book.json").unwrap();
        assert_eq!(saved.len(), 2);
        for (key, record) in &saved {
            assert_eq!(key, &record.id);
        }
    }

    #[test]
    fn test_failed_save_keeps_dirty() {
        let mut book = BookFixture::new().with_contacts(1).build();
        book.store().set_simulate_write_error(true);

        let err = book.save(Path::new("book.json")).unwrap_err();

        assert!(matches!(err, ContactError::Storage(StorageError::Io { .. })));
        assert!(book.is_dirty());
    }

    #[test]
    fn test_save_to_empty_path() {
        let mut book = BookFixture::new().with_contacts(1).build();
        let err = book.save(Path::new("")).unwrap_err();
        assert!(matches!(err, ContactError::Storage(StorageError::EmptyPath)));
        assert!(book.is_dirty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("contacts.json");

        let mut original = AddressBook::new(JsonStore::new());
        original.add(einstein()).unwrap();
        original.add(da_vinci()).unwrap();
        original
            .add(Contact::new("Marie", "Curie", "333 123 4567", "").unwrap())
            .unwrap();
        original.save(&path).unwrap();

        let mut restored = AddressBook::new(JsonStore::new());
        restored.load(&path).unwrap();

        assert_eq!(restored.size(), original.size());
        for contact in original.list() {
            assert_eq!(restored.get(contact.id()), Some(contact));
        }
        assert_eq!(restored.phone_index, original.phone_index);
        assert_eq!(restored.email_index, original.email_index);
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_roundtrip_keeps_names_with_expanding_uppercase() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("contacts.json");

        let mut original = AddressBook::new(JsonStore::new());
        let stefan = Contact::new("ßtefan", "straße", "333 123 4567", "").unwrap();
        assert_eq!(stefan.first_name(), "Sstefan");
        original.add(stefan.clone()).unwrap();
        original.save(&path).unwrap();

        let mut restored = AddressBook::new(JsonStore::new());
        restored.load(&path).unwrap();
        assert_eq!(restored.get(stefan.id()), Some(&stefan));
    }

    #[test]
    fn test_load_replaces_instead_of_merging() {
        let store = InMemoryStore::new();
        let mut source = AddressBook::new(store);
        source.add(einstein()).unwrap();
        source.save(Path::new("one.json")).unwrap();

        let mut book = source;
        book.add(da_vinci()).unwrap();
        book.load(Path::new("one.json")).unwrap();

        assert_eq!(book.size(), 1);
        assert!(book.id_for_phone("+393445554466").is_none());
        assert!(!book.is_dirty());
    }

    #[test]
    fn test_load_zero_byte_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.json");
        std::fs::write(&path, "").unwrap();

        let mut book = AddressBook::new(JsonStore::new());
        book.load(&path).unwrap();
        assert!(book.is_empty());
    }

    #[test]
    fn test_load_array_is_corruption() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("array.json");
        std::fs::write(&path, "[]").unwrap();

        let mut book = AddressBook::new(JsonStore::new());
        book.add(einstein()).unwrap();
        let err = book.load(&path).unwrap_err();

        assert!(matches!(err, ContactError::Storage(ref e) if e.is_corruption()));
        assert_eq!(book.size(), 1);
        assert!(book.is_dirty());
    }

    fn raw_record(id: &str, phone: &str, email: Option<&str>) -> ContactRecord {
        ContactRecord {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
            phone: phone.to_string(),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_load_rejects_invalid_records_without_mutating() {
        let mut book = book();
        let kept = einstein();
        book.add(kept.clone()).unwrap();

        let mut records = RecordMap::new();
        records.insert("a".into(), raw_record("a", "+393330000001", None));
        records.insert("b".into(), raw_record("b", "555", None));
        book.store().put("bad.json", records);

        let err = book.load(Path::new("bad.json")).unwrap_err();

        assert!(matches!(err, ContactError::Storage(ref e) if e.is_corruption()));
        assert_eq!(book.size(), 1);
        assert_eq!(book.get(kept.id()), Some(&kept));
        assert_eq!(book.id_for_phone("+393393842348"), Some(kept.id()));
        assert!(book.id_for_phone("+393330000001").is_none());
    }

    #[test]
    fn test_load_rejects_duplicates_and_key_mismatch() {
        let mut book = book();

        let mut dup_phone = RecordMap::new();
        dup_phone.insert("a".into(), raw_record("a", "+393330000001", None));
        dup_phone.insert("b".into(), raw_record("b", "+393330000001", None));
        book.store().put("phone.json", dup_phone);
        assert!(book.load(Path::new("phone.json")).is_err());

        let mut dup_email = RecordMap::new();
        dup_email.insert("a".into(), raw_record("a", "+393330000001", Some("x@y.com")));
        dup_email.insert("b".into(), raw_record("b", "+393330000002", Some("x@y.com")));
        book.store().put("email.json", dup_email);
        assert!(book.load(Path::new("email.json")).is_err());

        let mut mismatch = RecordMap::new();
        mismatch.insert("a".into(), raw_record("z", "+393330000001", None));
        book.store().put("mismatch.json", mismatch);
        assert!(book.load(Path::new("mismatch.json")).is_err());

        assert!(book.is_empty());
    }

    #[test]
    fn test_load_missing_file_keeps_state() {
        let mut book = BookFixture::new().with_contacts(2).build();
        let err = book.load(Path::new("missing.json")).unwrap_err();

        assert!(matches!(err, ContactError::Storage(StorageError::NotFound(_))));
        assert_eq!(book.size(), 2);
        assert!(book.is_dirty());
    }
}
