//! bb8 pool of `diesel-async` PostgreSQL connections, plus the embedded
//! migration runner.
//!
//! Repositories borrow a connection per call through [`DbPool::get`]. The
//! migration harness only speaks synchronous Diesel, so [`run_migrations`]
//! opens its own `PgConnection` on a blocking thread before the pool exists.

use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::domain::ports::define_port_error;

/// Migrations compiled in from `backend/migrations`.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const DEFAULT_MAX_SIZE: u32 = 8;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

define_port_error! {
    /// Failures while preparing or using the connection pool.
    pub enum PoolError {
        /// No connection became available before the checkout timeout.
        Checkout { message: String } =>
            "failed to get connection from pool: {message}",
        /// The pool could not be constructed.
        Build { message: String } =>
            "failed to build connection pool: {message}",
        /// Embedded migrations could not be applied.
        Migration { message: String } =>
            "failed to run migrations: {message}",
    }
}

/// Pool sizing and timeouts.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use chengyu_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://chengyu@localhost/chengyu")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(3));
/// assert_eq!(config.database_url(), "postgres://chengyu@localhost/chengyu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for `database_url` with at most eight connections, no
    /// idle floor and a ten second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: None,
            connection_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the number of open connections.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Keep at least `min_idle` connections open.
    #[must_use]
    pub const fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Give up on checkout after `timeout`.
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// The connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Shared handle to the connection pool; cloning is cheap.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool described by `config`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when bb8 cannot set up the pool.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            min_idle,
            connection_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        debug!(max_size, "database pool ready");
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when none frees up within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

fn apply_pending(database_url: &str) -> Result<usize, PoolError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|err| PoolError::migration(err.to_string()))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::migration(err.to_string()))?;
    Ok(applied.len())
}

/// Apply pending embedded migrations and return how many ran.
///
/// # Errors
///
/// [`PoolError::Migration`] when the database is unreachable, a migration
/// fails, or the blocking task dies.
pub async fn run_migrations(database_url: &str) -> Result<usize, PoolError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply_pending(&url))
        .await
        .map_err(|err| PoolError::migration(err.to_string()))??;
    info!(applied, "database migrations applied");
    Ok(applied)
}
