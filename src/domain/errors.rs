//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
///
/// The `Display` output is the message shown next to the offending form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The contact name is empty or whitespace only.
    EmptyName,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),
}

impl ValidationError {
    /// Name of the form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "_id",
            Self::EmptyName => "nama",
            Self::InvalidEmail(_) => "email",
            Self::InvalidPhone(_) => "nohp",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::EmptyName => write!(f, "Name is required"),
            Self::InvalidEmail(_) => write!(f, "Invalid email format"),
            Self::InvalidPhone(_) => write!(f, "Invalid phone number format"),
        }
    }
}

impl std::error::Error for ValidationError {}
