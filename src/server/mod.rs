//! HTTP server: shared state, routes and middleware.

pub mod handlers;
pub mod method_override;

pub use method_override::{MethodOverride, MethodOverrideLayer};

use crate::repositories::ContactRepository;
use crate::session::{FlashStore, SessionLayer};
use axum::extract::Request;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::get;
use axum::{Router, ServiceExt};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactRepository>,
    pub flash: FlashStore,
}

impl AppState {
    pub fn new(contacts: Arc<dyn ContactRepository>, flash: FlashStore) -> Self {
        Self { contacts, flash }
    }
}

/// The complete application service.
pub type App = MethodOverride<Router>;

/// Build the router with every route, static files and middleware.
///
/// Session cookies live as long as flash messages do.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> App {
    let session_ttl = state.flash.ttl();
    let static_files = ServeDir::new(static_dir.as_ref())
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());

    let router = Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route(
            "/contact",
            get(handlers::list_contacts)
                .post(handlers::create_contact)
                .put(handlers::update_contact),
        )
        .route("/contact/add", get(handlers::add_contact_form))
        .route("/contact/edit/{id}", get(handlers::edit_contact_form))
        .route(
            "/contact/{id}",
            get(handlers::show_contact).delete(handlers::delete_contact),
        )
        .fallback_service(static_files)
        .layer(SessionLayer::new(session_ttl))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    MethodOverrideLayer.layer(router)
}

/// Serve `app` on `addr` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(app: App, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
