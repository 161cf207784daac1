//! Driving port for user-facing reads.
//!
//! Inbound adapters (HTTP handlers) depend on this port rather than on
//! persistence, so handlers stay testable without a database.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every stored user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
