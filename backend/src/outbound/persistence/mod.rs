//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `UserRepository` implementation over `diesel-async` with a
//! `bb8` pool, plus the startup connector that waits for the server and
//! creates the `usuarios` table.
//!
//! Row structs (`models.rs`) and the table definition (`schema.rs`) stay
//! private to this module; only domain types cross the boundary.
//!
//! ```no_run
//! use usuarios::config::DatabaseSettings;
//! use usuarios::domain::{FixedRetryPolicy, TokioSleeper};
//! use usuarios::outbound::persistence::{DieselUserRepository, connect_with_retry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = connect_with_retry(
//!     &DatabaseSettings::default(),
//!     FixedRetryPolicy::default(),
//!     &TokioSleeper,
//! )
//! .await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{
    CREATE_USUARIOS_TABLE, STARTUP_CHECKOUT_TIMEOUT, SchemaError, StartupError, connect_with_retry,
    ensure_schema,
};
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
