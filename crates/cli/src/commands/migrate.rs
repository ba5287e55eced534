//! Database migration command.
//!
//! Applies the migrations embedded from `crates/web/migrations/`. The
//! session table is not covered here; the web server migrates it at
//! startup.

use super::{CommandError, connect};

/// Run all pending application migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
