//! menu-server — restaurant menu & booking service
//!
//! Long-running HTTP service that:
//! - Serves the customer menu for a date (date-specific menu falls
//!   back to the default menu) and the deals listing
//! - Provides the admin food library / menu planner / deals CRUD
//! - Accepts table bookings
//! - Stores dish images in S3 and resolves them for display

mod api;
mod config;
mod db;
mod error;
mod images;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menu_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting menu-server");

    // Initialize application state
    let state = AppState::new(&config).await?;

    // Build router and serve
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("menu-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
