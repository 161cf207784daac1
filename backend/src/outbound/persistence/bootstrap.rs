//! Startup connector: wait for PostgreSQL, then make sure `usuarios` exists.
//!
//! One attempt opens a single-connection probe pool with a short checkout
//! timeout, runs the idempotent DDL through it, then builds the serving pool
//! with the regular defaults. Attempts repeat on a fixed delay until the budget
//! is spent; the caller decides what exhaustion means for the process.

use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{error, info};

use crate::config::{DatabaseSettings, DatabaseUrlError};
use crate::domain::{FixedRetryPolicy, RetryError, Sleeper, retry_with_fixed_delay};

use super::pool::{DbPool, PoolConfig, PoolError};

/// DDL run on every start. Existing rows and columns are left untouched.
pub const CREATE_USUARIOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS usuarios (\
    id SERIAL PRIMARY KEY, \
    nome TEXT NOT NULL, \
    idade INTEGER, \
    email TEXT)";

/// Checkout timeout of the short-lived pool used to probe the server, kept
/// short so a dead database fails an attempt quickly. The pool handed back
/// for serving uses [`PoolConfig::DEFAULT_CONNECTION_TIMEOUT`].
pub const STARTUP_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure of a single connect-and-prepare attempt.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("schema statement failed: {0}")]
    Statement(#[from] DieselError),
}

impl SchemaError {
    /// Whether another attempt could succeed once the server is up.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Statement(DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)) => {
                true
            }
            Self::Statement(_) => false,
        }
    }
}

/// The service cannot start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid database settings: {0}")]
    Settings(#[from] DatabaseUrlError),
    #[error("database unavailable: {0}")]
    Database(#[from] RetryError<SchemaError>),
}

/// Create the `usuarios` table if it does not exist yet.
///
/// # Errors
///
/// Returns [`SchemaError::Pool`] when no connection can be checked out and
/// [`SchemaError::Statement`] when the server rejects the DDL.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaError> {
    let mut conn = pool.get().await?;
    diesel::sql_query(CREATE_USUARIOS_TABLE)
        .execute(&mut conn)
        .await?;
    Ok(())
}

async fn open_and_prepare(database_url: &str) -> Result<DbPool, SchemaError> {
    let probe = PoolConfig::new(database_url)
        .with_min_idle(Some(1))
        .with_max_size(1)
        .with_connection_timeout(STARTUP_CHECKOUT_TIMEOUT);
    ensure_schema(&DbPool::new(probe).await?).await?;

    Ok(DbPool::new(PoolConfig::new(database_url)).await?)
}

/// Connect to the configured server, retrying per `policy`.
///
/// Returns a pool whose schema is ready for the repository.
///
/// # Errors
///
/// [`StartupError::Settings`] when the settings do not form a URL;
/// [`StartupError::Database`] when every attempt failed or the DDL was
/// rejected.
pub async fn connect_with_retry(
    settings: &DatabaseSettings,
    policy: FixedRetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<DbPool, StartupError> {
    let database_url = settings.database_url()?;

    let outcome = retry_with_fixed_delay(
        "database",
        policy,
        sleeper,
        |_| open_and_prepare(&database_url),
        SchemaError::is_transient,
    )
    .await;

    match outcome {
        Ok(pool) => {
            info!(
                host = settings.host(),
                port = settings.port(),
                database = settings.name(),
                "connected to database"
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                host = settings.host(),
                port = settings.port(),
                error = %err,
                "could not connect to database"
            );
            Err(err.into())
        }
    }
}
