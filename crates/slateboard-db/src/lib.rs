//! # Slateboard DB
//!
//! Database connection pool initialization for the Slateboard API.

use std::env;

/// Initializes a PostgreSQL connection pool.
///
/// Reads the database URL from the `DATABASE_URL` environment variable. The
/// returned pool is cheaply cloneable and should be created once at startup.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails; there is no
/// meaningful way to continue without a database.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
