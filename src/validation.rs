//! Form validation for contact submissions.
//!
//! Every rule runs on every submission and all failures are reported
//! together, in field order (name, email, phone), so the form can show each
//! problem at once.

use crate::domain::{ContactName, EmailAddress, PhoneNumber, ValidationError};
use crate::models::{ContactForm, NewContact};
use serde::Serialize;

/// A single problem with one submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name (`nama`, `email`, `nohp`)
    pub field: &'static str,

    /// Message shown to the user
    pub message: String,
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        Self {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

/// Turn a submitted form into a validated `NewContact`.
///
/// # Errors
///
/// Returns every failed rule, in field order.
pub fn parse_contact(form: &ContactForm) -> Result<NewContact, Vec<FieldError>> {
    let name = ContactName::new(form.name.as_str());
    let email = EmailAddress::new(form.email.as_str());
    let phone = PhoneNumber::new(form.phone.as_str());

    match (name, email, phone) {
        (Ok(name), Ok(email), Ok(phone)) => Ok(NewContact { name, email, phone }),
        (name, email, phone) => Err([name.err(), email.err(), phone.err()]
            .into_iter()
            .flatten()
            .map(FieldError::from)
            .collect()),
    }
}

/// Check a submitted form; an empty list means it is valid.
pub fn validate_contact(form: &ContactForm) -> Vec<FieldError> {
    parse_contact(form).err().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: &str) -> ContactForm {
        ContactForm {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_valid_form() {
        let errors = validate_contact(&form("Alice", "alice@example.com", "081234567890"));
        assert!(errors.is_empty());

        let contact = parse_contact(&form("Alice", "alice@example.com", "081234567890")).unwrap();
        assert_eq!(contact.name.as_str(), "Alice");
        assert_eq!(contact.email.as_str(), "alice@example.com");
        assert_eq!(contact.phone.as_str(), "081234567890");
    }

    #[test]
    fn test_blank_name() {
        for name in ["", " ", "\t\n"] {
            let errors = validate_contact(&form(name, "alice@example.com", "081234567890"));
            assert_eq!(messages(&errors), vec!["Name is required"]);
            assert_eq!(errors[0].field, "nama");
        }
    }

    #[test]
    fn test_invalid_email() {
        for email in ["", "alice", "alice@", "alice@example", "@example.com"] {
            let errors = validate_contact(&form("Alice", email, "081234567890"));
            assert_eq!(messages(&errors), vec!["Invalid email format"], "{email}");
            assert_eq!(errors[0].field, "email");
        }
    }

    #[test]
    fn test_invalid_phone() {
        for phone in ["", "12345", "+1 555 1234", "0812"] {
            let errors = validate_contact(&form("Alice", "alice@example.com", phone));
            assert_eq!(messages(&errors), vec!["Invalid phone number format"], "{phone}");
            assert_eq!(errors[0].field, "nohp");
        }
    }

    #[test]
    fn test_all_errors_collected_in_field_order() {
        let errors = validate_contact(&form("", "nope", "123"));
        assert_eq!(
            messages(&errors),
            vec![
                "Name is required",
                "Invalid email format",
                "Invalid phone number format"
            ]
        );
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["nama", "email", "nohp"]);
    }

    #[test]
    fn test_field_error_serializes_for_templates() {
        let error = FieldError::from(ValidationError::EmptyName);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["field"], "nama");
        assert_eq!(json["message"], "Name is required");
    }
}
