use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, NewContact};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage so handlers can run against the
/// SQLite document store in production and an in-memory double in tests.
/// Lookups by identifier return `None` for unknown IDs rather than an error.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persist a new contact; the store assigns its identifier.
    async fn create(&self, contact: &NewContact) -> StoreResult<Contact>;

    /// Retrieve every contact in storage (insertion) order.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// Retrieve a single contact by ID.
    async fn get(&self, id: &ContactId) -> StoreResult<Option<Contact>>;

    /// Replace the fields of an existing contact.
    ///
    /// Returns `None` if no contact has this ID.
    async fn update(&self, id: &ContactId, contact: &NewContact) -> StoreResult<Option<Contact>>;

    /// Delete a contact, reporting whether one was removed.
    async fn delete(&self, id: &ContactId) -> StoreResult<bool>;
}
