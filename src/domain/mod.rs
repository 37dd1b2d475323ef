//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for the contact fields: ids,
//! names, email addresses, and phone numbers. Each value object validates at
//! construction time, so a value that exists is a value that passed the form
//! rules.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod name;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use name::ContactName;
pub use phone::PhoneNumber;
