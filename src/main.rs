//! Contact Book - Main entry point

use anyhow::Result;
use contact_book::repositories::{ContactRepository, SqliteContactRepository};
use contact_book::server::{self, AppState};
use contact_book::session::FlashStore;
use contact_book::Config;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before the subscriber so LOG_LEVEL from .env applies
    let loaded = Config::from_env();

    // RUST_LOG wins over LOG_LEVEL so per-module filters stay possible
    let level = loaded.as_ref().map_or("info", |cfg| cfg.log_level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let store = SqliteContactRepository::open_url(&config.database_url)?;
    info!("Connected to contact store at {}", store.location());
    let contacts = Arc::new(store) as Arc<dyn ContactRepository>;

    let flash = FlashStore::new(config.session_ttl());
    info!(
        "Session TTL: {} seconds, static files from {}",
        config.session_ttl_secs,
        config.static_dir.display()
    );

    let app = server::app(AppState::new(contacts, flash), &config.static_dir);
    server::serve(app, &config.bind_address()).await?;

    info!("Contact Book shutdown complete");
    Ok(())
}
