//! Database operations for the Tiffin `PostgreSQL` store.
//!
//! # Tables
//!
//! - `users` - Registered accounts for all three roles
//! - `restaurants` - One row per restaurant owner
//! - `menu_items` - Menu items scoped to a restaurant
//! - `orders` - Placed orders (one row per selected menu item)
//! - `session` - Tower-sessions storage (created by the session store)
//!
//! Cross-table references are plain integer columns rather than foreign
//! keys; the orders listing relies on inner-join semantics to drop rows
//! whose referenced user or menu item has been deleted.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p tiffin-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod users;

pub use menu_items::MenuItemRepository;
pub use orders::OrderRepository;
pub use restaurants::RestaurantRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
