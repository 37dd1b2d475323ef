//! Data models for the contact book.
//!
//! `Contact` is what the store holds, `NewContact` is what it accepts, and
//! `ContactForm` is what the browser submits.

pub mod contact;

pub use contact::{Contact, ContactForm, NewContact};
