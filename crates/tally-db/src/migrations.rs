//! # Schema Migrations
//!
//! The SQL files under `migrations/sqlite/` are compiled into the binary and
//! applied by [`run_migrations`], normally from `Database::new`.
//!
//! ```text
//! migrations/sqlite/
//!   001_initial_schema.sql   items, invoices, invoice_lines
//!   002_...                  next change goes in a new file
//! ```
//!
//! sqlx records each applied file (with its checksum) in
//! `_sqlx_migrations`, so editing an applied file makes startup fail.
//! Schema changes always go in a new numbered file.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every embedded migration not yet recorded. Idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying migrations");
    MIGRATOR.run(pool).await?;
    info!("Migrations applied");
    Ok(())
}

/// `(embedded, applied)` migration counts, for diagnostics and the seed
/// binary's summary.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((MIGRATOR.migrations.len(), usize::try_from(applied).unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_rerun_is_a_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        run_migrations(db.pool()).await.unwrap();
        run_migrations(db.pool()).await.unwrap();

        let (embedded, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(embedded, applied);
        assert_eq!(embedded, 1);
    }

    #[tokio::test]
    async fn test_status_before_migrating_is_an_error() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        assert!(migration_status(db.pool()).await.is_err());

        run_migrations(db.pool()).await.unwrap();
        assert_eq!(migration_status(db.pool()).await.unwrap(), (1, 1));
    }
}
