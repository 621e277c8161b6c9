//! Application state

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::images::ImageStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// S3-backed image store
    pub images: ImageStore,
}

impl AppState {
    /// Create a new AppState
    ///
    /// The pool connects lazily: the server starts even when the store
    /// is down, and requests surface 503 until it comes back.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max)
            .connect_lazy(&config.database_url)?;

        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => {
                tracing::info!("Database connected");
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database migrations applied");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Database unreachable at startup; continuing without migrations"
                );
            }
        }

        let images = ImageStore::new(config).await;

        Ok(Self { pool, images })
    }
}
