/// Database migration runner
///
/// Runs the SQL migrations embedded from this crate's `migrations/`
/// directory using sqlx's migration system.
///
/// # Example
///
/// ```no_run
/// use tasktrail_shared::db::pool::{create_pool, DatabaseConfig};
/// use tasktrail_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///
///     Ok(())
/// }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations that were already applied are skipped; each pending migration
/// runs in its own transaction where Postgres allows it.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or a previously applied
/// migration was modified on disk.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

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
