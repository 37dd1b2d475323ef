//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::views;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use thiserror::Error;
use tracing::error;

/// Errors that can occur when talking to the contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying database rejected an operation
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored document could not be encoded or decoded
    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    /// The database URL names a backend this build cannot open
    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    /// The blocking task running the operation died
    #[error("Store task failed: {0}")]
    TaskFailed(String),

    /// The store cannot serve requests right now
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors a request handler can end with.
///
/// Validation failures are not errors here: handlers answer them with the
/// re-rendered form.
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested page or contact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The contact store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A template failed to render
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for handler Results
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, what.clone()),
            AppError::Store(_) | AppError::Render(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our side.".to_string(),
                )
            }
        };

        let title = status.canonical_reason().unwrap_or("Error");
        let body = views::render(
            views::ERROR,
            context! { title, status => status.as_u16(), message },
        )
        .unwrap_or_else(|err| {
            error!("Failed to render error page: {}", err);
            format!("{} {}", status.as_u16(), title)
        });

        (status, Html(body)).into_response()
    }
}
