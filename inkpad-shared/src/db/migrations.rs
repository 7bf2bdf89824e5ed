/// Database migration runner
///
/// Migrations are plain SQL files in `migrations/` at the workspace root,
/// embedded into the binary at compile time with `sqlx::migrate!` and
/// applied in order at startup. sqlx tracks applied versions in the
/// `_sqlx_migrations` table, so running them repeatedly is a no-op.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file fails to execute or the
/// connection is lost mid-run. A failed migration is rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
