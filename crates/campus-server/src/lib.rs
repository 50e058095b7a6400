//! Settings and profile API for Campus.
//!
//! Every settings route is a `PUT` guarded by a CSRF check and a session
//! check, validates its body, and performs one write against the caller's
//! own user record.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod schema;
pub mod store;
pub mod username;

use std::sync::Arc;

pub use config::Config;
pub use error::AppError;
pub use routes::{create_router, AppState};

use store::{MemoryUserStore, PgUserStore, UserStore};

/// Picks the user store from configuration: Postgres when a database URL is
/// set, otherwise an in-memory store.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            tracing::info!("Connected to Postgres");
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
