#![cfg_attr(
    not(any(feature = "pg", feature = "sqlite")),
    allow(unused_imports, unused_variables, dead_code, unreachable_code)
)]

//! Database connection layer for the catalog service.
//!
//! [`resolver::resolve`] turns the configured connection string into a
//! normalized descriptor plus pool settings, [`DbHandle`] opens a sqlx pool
//! with a SeaORM connection on top, and [`LazyDb`] defers that until the first
//! request that needs storage.
//!
//! ```rust,no_run
//! # async fn demo() -> catalog_db::Result<()> {
//! use catalog_db::{resolve, LazyDb};
//!
//! let db = LazyDb::new(resolve(std::env::var("DATABASE_URL").ok().as_deref()));
//! let handle = db.get().await?;
//! handle.ping().await?;
//! # Ok(())
//! # }
//! ```

pub mod lazy;
pub mod policy;
mod pool_opts;
pub mod resolver;
pub mod sqlite;

pub use lazy::LazyDb;
pub use policy::{require_database_url, UrlPolicy};
pub use resolver::{
    redact_credentials, resolve, Backend, ConnectionDescriptor, EngineParams, PoolPolicy,
    QueryParams, ResolvedDatabase, DEFAULT_DATABASE_URL,
};
pub use sqlite::SqliteFile;

#[cfg(feature = "sqlite")]
use std::str::FromStr;
#[cfg(feature = "sqlite")]
use std::time::Duration;

#[cfg(feature = "pg")]
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
#[cfg(feature = "sqlite")]
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use sea_orm::DatabaseConnection;
#[cfg(feature = "pg")]
use sea_orm::SqlxPostgresConnector;
#[cfg(feature = "sqlite")]
use sea_orm::SqlxSqliteConnector;

use thiserror::Error;

use crate::pool_opts::ApplyEngineParams;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL must be set in this deployment")]
    MissingDatabaseUrl,

    #[error("unsupported database backend: {0}")]
    UnsupportedBackend(String),

    #[error("feature not enabled: {0}")]
    FeatureDisabled(&'static str),

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Storage could not be reached; callers map this to 503.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "sqlite")]
const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// One concrete sqlx pool.
#[derive(Clone, Debug)]
enum DbPool {
    #[cfg(feature = "pg")]
    Postgres(PgPool),
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

/// Open pool plus the SeaORM connection sharing it.
#[derive(Debug)]
pub struct DbHandle {
    backend: Backend,
    pool: DbPool,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Open a pool for a resolved connection string.
    pub async fn connect(resolved: &ResolvedDatabase) -> Result<Self> {
        let descriptor = &resolved.descriptor;
        let backend = descriptor.backend();
        tracing::debug!(
            dsn = %descriptor.redacted(),
            backend = backend.as_str(),
            "opening database pool"
        );

        match backend {
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => Self::connect_sqlite(resolved).await,
            #[cfg(not(feature = "sqlite"))]
            Backend::Sqlite => Err(DbError::FeatureDisabled("SQLite feature not enabled")),
            #[cfg(feature = "pg")]
            Backend::Postgres => Self::connect_pg(resolved).await,
            #[cfg(not(feature = "pg"))]
            Backend::Postgres => Err(DbError::FeatureDisabled("PostgreSQL feature not enabled")),
            Backend::Other(scheme) => Err(DbError::UnsupportedBackend(scheme)),
        }
    }

    #[cfg(feature = "sqlite")]
    async fn connect_sqlite(resolved: &ResolvedDatabase) -> Result<Self> {
        let descriptor = &resolved.descriptor;
        let params = &resolved.engine;
        let file = descriptor.sqlite_file().ok_or_else(|| {
            DbError::InvalidConnectionString("not a SQLite connection string".into())
        })?;

        let flags = sqlite::open_flags(descriptor.query_parameters());
        if !flags.ignored.is_empty() {
            tracing::debug!(
                params = ?flags.ignored,
                "ignoring SQLite query parameters the driver does not support"
            );
        }

        let mut pool_opts = SqlitePoolOptions::new().apply(params);
        let connect_opts = match &file {
            SqliteFile::Memory => {
                // Every in-memory connection is its own database: keep exactly one alive.
                pool_opts = pool_opts
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                SqliteConnectOptions::from_str("sqlite::memory:")?
            }
            SqliteFile::Path(path) if flags.read_only => {
                SqliteConnectOptions::new().filename(path)
            }
            SqliteFile::Path(path) => {
                sqlite::prepare_parent_dir(path)?;
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
            }
        };
        let connect_opts = connect_opts
            .read_only(flags.read_only)
            .shared_cache(flags.shared_cache)
            .busy_timeout(SQLITE_BUSY_TIMEOUT)
            .serialized(params.allow_cross_thread());

        let pool = pool_opts.connect_with(connect_opts).await?;
        let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
        Ok(Self {
            backend: Backend::Sqlite,
            pool: DbPool::Sqlite(pool),
            dsn: descriptor.redacted(),
            sea,
        })
    }

    #[cfg(feature = "pg")]
    async fn connect_pg(resolved: &ResolvedDatabase) -> Result<Self> {
        let descriptor = &resolved.descriptor;
        let connect_opts: PgConnectOptions = descriptor
            .to_string()
            .parse()
            .map_err(|e: sqlx::Error| DbError::InvalidConnectionString(e.to_string()))?;

        let pool = PgPoolOptions::new()
            .apply(&resolved.engine)
            .connect_with(connect_opts)
            .await?;
        let sea = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
        Ok(Self {
            backend: Backend::Postgres,
            pool: DbPool::Postgres(pool),
            dsn: descriptor.redacted(),
            sea,
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Connection string with credentials masked.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection (cheap to clone, shares the pool).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Borrow the SeaORM connection without cloning.
    pub fn seaorm(&self) -> &DatabaseConnection {
        &self.sea
    }

    /// Round-trip `SELECT 1`.
    pub async fn ping(&self) -> Result<i64> {
        match &self.pool {
            #[cfg(feature = "pg")]
            DbPool::Postgres(p) => {
                let v: i32 = sqlx::query_scalar("SELECT 1").fetch_one(p).await?;
                Ok(i64::from(v))
            }
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite(p) => Ok(sqlx::query_scalar("SELECT 1").fetch_one(p).await?),
        }
    }

    pub async fn close(&self) {
        match &self.pool {
            #[cfg(feature = "pg")]
            DbPool::Postgres(p) => p.close().await,
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite(p) => p.close().await,
        }
    }
}
