//! # Store Handle
//!
//! `DbConfig` describes where the SQLite database lives and how the pool is
//! sized. `Database` owns the resulting pool and hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup      DbConfig::new("./data/tally.db")                          │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │               Database::new(config) ── open pool ── apply migrations    │
//! │                    │                                                    │
//! │  requests          ├──► db.items()    ──► ItemRepository    ┐           │
//! │  (concurrent)      └──► db.invoices() ──► InvoiceRepository ┘ share     │
//! │                                                    one SqlitePool       │
//! │                    │                                                    │
//! │  shutdown     db.close() ── later calls fail with ConnectionFailed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every connection runs in WAL journal mode with `foreign_keys = ON`.
//! Each invoice create holds one pooled connection for the life of its
//! transaction.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::item::ItemRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how its pool behaves.
///
/// ```rust,ignore
/// let config = DbConfig::new("./data/tally.db")
///     .max_connections(8)
///     .acquire_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created on first connect. `:memory:` for a private
    /// in-memory database.
    pub database_path: PathBuf,

    /// Upper bound on pooled connections (default 5).
    pub max_connections: u32,

    /// Connections opened eagerly and kept warm (default 1).
    pub min_connections: u32,

    /// How long a caller waits for a free connection before
    /// `DbError::PoolExhausted` (default 30s).
    pub acquire_timeout: Duration,

    /// Idle connections beyond `min_connections` are closed after this
    /// (default 10 min). Ignored for in-memory databases.
    pub idle_timeout: Duration,

    /// Apply embedded migrations when the pool opens (default true).
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(10 * 60),
            run_migrations: true,
        }
    }

    /// A private in-memory database, one per pool.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// the data disappears with the connection. Tests build one of these
    /// each so they never observe each other's rows.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY_PATH)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    /// Per-connection SQLite settings.
    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let url = if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.database_path.display())
        };

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // off by default in SQLite; invoice_lines depends on it
            .foreign_keys(true)
            .create_if_missing(true);

        Ok(options)
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.acquire_timeout);

        if self.is_in_memory() {
            options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            options.idle_timeout(Some(self.idle_timeout))
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared store handle. Cloning is cheap and clones share one pool.
///
/// Components take a `Database` as a parameter; nothing reaches for a
/// process-wide instance.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool described by `config` and, unless disabled, brings
    /// the schema up to date.
    ///
    /// ## Errors
    /// * `DbError::ConnectionFailed` - bad path or the file cannot be opened
    /// * `DbError::MigrationFailed` - a migration did not apply
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let connect_options = config.connect_options()?;
        debug!(in_memory = config.is_in_memory(), "Connect options ready");

        let pool = config
            .pool_options()
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool open");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to call repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Schema up to date");
        Ok(())
    }

    /// The underlying pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.pool.clone())
    }

    /// Closes every pooled connection and waits for them to finish.
    ///
    /// Any later repository call returns `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// True when the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
