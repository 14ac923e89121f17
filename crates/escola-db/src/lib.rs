//! # Escola DB
//!
//! PostgreSQL connection pool initialization for the Escola API.
//!
//! The pool is configured from environment variables:
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)

use sqlx::postgres::PgPoolOptions;
use std::env;

/// Initializes a PostgreSQL connection pool.
///
/// Should be called once during startup; the returned pool is cheaply
/// cloneable and is shared through the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
