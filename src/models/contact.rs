//! Contact model and the form payload it is created from.

use crate::domain::{ContactId, ContactName, EmailAddress, PhoneNumber};
use serde::{Deserialize, Serialize};

/// A stored contact.
///
/// Field names on the wire match the form fields (`nama`, `email`, `nohp`)
/// and the document key `_id`. Every field is required: a document missing
/// one fails to deserialize instead of producing a half-empty contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: ContactId,

    /// Display name
    #[serde(rename = "nama")]
    pub name: String,

    /// Email address
    pub email: String,

    /// Mobile phone number
    #[serde(rename = "nohp")]
    pub phone: String,
}

/// A validated contact that has not been assigned an identifier yet.
///
/// This is the only shape the store accepts for writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: ContactName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

impl NewContact {
    /// Attach an identifier, producing the record to persist.
    pub fn with_id(&self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            phone: self.phone.as_str().to_string(),
        }
    }
}

/// Raw text submitted by the add and edit forms.
///
/// Absent fields decode as empty strings so that validation, not the
/// extractor, reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    /// Target of an update; only sent by the edit form
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "nama")]
    pub name: String,

    pub email: String,

    #[serde(rename = "nohp")]
    pub phone: String,
}

impl ContactForm {
    /// The update target, if the form carried a non-blank one.
    pub fn target_id(&self) -> Option<ContactId> {
        self.id.as_deref().and_then(|id| ContactId::new(id).ok())
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id.to_string()),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}
