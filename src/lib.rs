//! Contact Book - a server-rendered contact manager.
//!
//! List, add, view, edit and delete contacts (name, email, phone) through
//! plain HTML forms, with inline validation errors and one-time confirmation
//! messages after every change.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (id, name, email, phone)
//! - **models**: The stored contact, the validated draft and the raw form
//! - **validation**: Form rules producing field-level errors
//! - **repositories**: Contact store trait and its SQLite document store
//! - **session**: Session cookie middleware and flash messages
//! - **views**: Embedded minijinja templates
//! - **server**: Router, handlers and method override middleware
//! - **config** / **error**: Environment configuration and error types

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod session;
pub mod validation;
pub mod views;

pub use config::Config;
pub use error::{AppError, ConfigError, StoreError};
pub use models::{Contact, ContactForm, NewContact};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use server::{app, AppState};
pub use session::{FlashStore, SessionId};
pub use validation::{parse_contact, validate_contact, FieldError};
