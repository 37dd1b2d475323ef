//! Route handlers.
//!
//! Reads render a view; writes validate, touch the store, leave one flash
//! message and redirect to the listing.

use crate::domain::ContactId;
use crate::error::{AppError, AppResult};
use crate::models::ContactForm;
use crate::server::AppState;
use crate::session::SessionId;
use crate::validation::{parse_contact, FieldError};
use crate::views;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use minijinja::context;
use tracing::{debug, info};

pub const CONTACT_ADDED: &str = "Contact added successfully!";
pub const CONTACT_UPDATED: &str = "Contact updated successfully!";
pub const CONTACT_DELETED: &str = "Contact deleted successfully";

const CONTACT_LIST_PATH: &str = "/contact";

fn contact_not_found() -> AppError {
    AppError::NotFound("Contact not found".to_string())
}

/// Path segments are never empty, but an ID made of blanks is still no ID.
fn path_id(id: String) -> AppResult<ContactId> {
    ContactId::new(id).map_err(|_| contact_not_found())
}

pub async fn home() -> AppResult<Html<String>> {
    Ok(Html(views::render(
        views::INDEX,
        context! { title => "Contact Book" },
    )?))
}

pub async fn about() -> AppResult<Html<String>> {
    Ok(Html(views::render(
        views::ABOUT,
        context! { title => "About Us" },
    )?))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    session: SessionId,
) -> AppResult<Html<String>> {
    let contacts = state.contacts.list().await?;
    let msg = state.flash.take(&session);

    Ok(Html(views::render(
        views::CONTACT_LIST,
        context! { title => "Contacts", contacts, msg },
    )?))
}

pub async fn add_contact_form() -> AppResult<Html<String>> {
    render_add_form(&[], &ContactForm::default())
}

pub async fn create_contact(
    State(state): State<AppState>,
    session: SessionId,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    let contact = match parse_contact(&form) {
        Ok(contact) => contact,
        Err(errors) => {
            debug!("Rejected new contact with {} field error(s)", errors.len());
            return Ok(render_add_form(&errors, &form)?.into_response());
        }
    };

    let created = state.contacts.create(&contact).await?;
    info!("Created contact {}", created.id);

    state.flash.set(&session, CONTACT_ADDED);
    Ok(Redirect::to(CONTACT_LIST_PATH).into_response())
}

pub async fn show_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(id)?;
    let contact = state.contacts.get(&id).await?.ok_or_else(contact_not_found)?;

    Ok(Html(views::render(
        views::CONTACT_DETAIL,
        context! { title => "Contact Detail", contact },
    )?))
}

pub async fn edit_contact_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = path_id(id)?;
    let contact = state.contacts.get(&id).await?.ok_or_else(contact_not_found)?;

    render_edit_form(&[], &ContactForm::from(&contact))
}

pub async fn update_contact(
    State(state): State<AppState>,
    session: SessionId,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    let contact = match parse_contact(&form) {
        Ok(contact) => contact,
        Err(errors) => {
            debug!("Rejected contact update with {} field error(s)", errors.len());
            return Ok(render_edit_form(&errors, &form)?.into_response());
        }
    };

    let id = form.target_id().ok_or_else(contact_not_found)?;
    let updated = state
        .contacts
        .update(&id, &contact)
        .await?
        .ok_or_else(contact_not_found)?;
    info!("Updated contact {}", updated.id);

    state.flash.set(&session, CONTACT_UPDATED);
    Ok(Redirect::to(CONTACT_LIST_PATH).into_response())
}

pub async fn delete_contact(
    State(state): State<AppState>,
    session: SessionId,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    match ContactId::new(id) {
        Ok(id) => {
            if state.contacts.delete(&id).await? {
                info!("Deleted contact {}", id);
            } else {
                debug!("Delete of unknown contact {} ignored", id);
            }
        }
        Err(_) => debug!("Delete with blank contact id ignored"),
    }

    state.flash.set(&session, CONTACT_DELETED);
    Ok(Redirect::to(CONTACT_LIST_PATH))
}

/// Fallback for unknown routes and missing static files.
pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

fn render_add_form(errors: &[FieldError], data: &ContactForm) -> AppResult<Html<String>> {
    Ok(Html(views::render(
        views::ADD_CONTACT,
        context! { title => "Add Contact", errors, data },
    )?))
}

fn render_edit_form(errors: &[FieldError], contact: &ContactForm) -> AppResult<Html<String>> {
    Ok(Html(views::render(
        views::EDIT_CONTACT,
        context! { title => "Edit Contact", errors, contact },
    )?))
}
