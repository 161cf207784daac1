//! User registry domain service.
//!
//! Implements the driving ports for users on top of a [`UserRepository`]. The
//! only policy decision here is what an update or delete that matched no row
//! means, see [`MissingUserPolicy`].

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// Outcome of an update or delete whose id matched no stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingUserPolicy {
    /// Report the missing id as `not_found`.
    #[default]
    NotFound,
    /// Treat the mutation as successful, matching the original service.
    Ignore,
}

/// Rejected textual [`MissingUserPolicy`] value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown missing-id policy {0:?}; expected \"not_found\" or \"ignore\"")]
pub struct UnknownMissingUserPolicy(pub String);

impl FromStr for MissingUserPolicy {
    type Err = UnknownMissingUserPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not_found" | "not-found" | "404" => Ok(Self::NotFound),
            "ignore" | "legacy" => Ok(Self::Ignore),
            other => Err(UnknownMissingUserPolicy(other.to_owned())),
        }
    }
}

/// User registry service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserRegistryService<R> {
    repository: Arc<R>,
    missing_user: MissingUserPolicy,
}

impl<R> UserRegistryService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>, missing_user: MissingUserPolicy) -> Self {
        Self {
            repository,
            missing_user,
        }
    }
}

impl<R> UserRegistryService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        error!(error = %error, "user repository call failed");
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn resolve_match(&self, id: UserId, matched: bool) -> Result<(), Error> {
        if matched || self.missing_user == MissingUserPolicy::Ignore {
            return Ok(());
        }
        Err(Error::not_found(format!("user {id} not found"))
            .with_details(json!({ "id": id.get(), "code": "user_not_found" })))
    }
}

#[async_trait]
impl<R> UsersQuery for UserRegistryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserRegistryService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error> {
        let id = self
            .repository
            .insert(&draft)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %id, "user created");
        Ok(id)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error> {
        let matched = self
            .repository
            .replace(id, &draft)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %id, matched, "user update applied");
        self.resolve_match(id, matched)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let matched = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %id, matched, "user delete applied");
        self.resolve_match(id, matched)
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
