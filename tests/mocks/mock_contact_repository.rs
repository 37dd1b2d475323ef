use async_trait::async_trait;
use contact_book::domain::ContactId;
use contact_book::error::{StoreError, StoreResult};
use contact_book::models::{Contact, NewContact};
use contact_book::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory, insertion-ordered implementation of
/// ContactRepository that tracks method calls and can be switched into a
/// failing mode to exercise store errors.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failure: Arc<Mutex<Option<String>>>,
    next_id: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failure: Arc::new(Mutex::new(None)),
            next_id: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Snapshot of the stored contacts, in insertion order.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn create(&self, contact: &NewContact) -> StoreResult<Contact> {
        self.track_call("create")?;

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            ContactId::new(format!("mock-{}", *next_id)).unwrap()
        };

        let contact = contact.with_id(id);
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list")?;
        Ok(self.contacts())
    }

    async fn get(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("get")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| &c.id == id).cloned())
    }

    async fn update(&self, id: &ContactId, contact: &NewContact) -> StoreResult<Option<Contact>> {
        self.track_call("update")?;

        let mut contacts = self.contacts.lock().unwrap();
        let Some(slot) = contacts.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };

        *slot = contact.with_id(id.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<bool> {
        self.track_call("delete")?;

        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        Ok(contacts.len() < before)
    }
}
