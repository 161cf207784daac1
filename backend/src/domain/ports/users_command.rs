//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId};

/// Domain use-case port for creating, replacing and removing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return its storage-assigned identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Replace every mutable field of an existing user.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error>;

    /// Remove a user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
