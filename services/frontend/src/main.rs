use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod screen;
mod session;
mod state;
mod validation;
mod views;

use common::backend::BackendClient;

use crate::{config::Settings, session::SessionStore, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting frontend service");

    let backend = BackendClient::new(settings.backend());

    let app_state = AppState {
        backend,
        sessions: SessionStore::new(settings.session_idle_timeout()),
        max_upload_bytes: settings.max_upload_bytes(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    info!("Frontend service listening on {}", settings.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
