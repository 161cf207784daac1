//! Driven port for persisting user records, plus its error type.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established or was lost.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for the `usuarios` table.
///
/// Every method runs exactly one statement. Mutations report whether a row
/// matched so callers decide how to treat unknown ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return the identifier storage assigned.
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError>;

    /// Read every stored record.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Overwrite all mutable fields of `id`; `false` when no row matched.
    async fn replace(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError>;

    /// Remove `id`; `false` when no row matched.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
