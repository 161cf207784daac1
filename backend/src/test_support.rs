//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled under `cfg(test)` or the `test-support` feature.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
    failure: Option<UserPersistenceError>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
            failure: None,
        }
    }
}

/// `UserRepository` backed by an in-memory map.
///
/// Ids start at 1 and are never reused, mirroring a `SERIAL` column.
///
/// ```
/// use usuarios::domain::UserDraft;
/// use usuarios::domain::ports::UserRepository;
/// use usuarios::test_support::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let draft = UserDraft::try_from_parts(Some("Maria".into()), Some(25), Some("m@x.com".into()))
///     .unwrap();
/// let id = repo.insert(&draft).await.unwrap();
/// assert_eq!(id.get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// Seed a row as if it had been written by an earlier deployment.
    ///
    /// Advances the id sequence past `user.id()`.
    pub fn with_row(self, user: User) -> Self {
        {
            let mut table = self.lock();
            let id = user.id().get();
            table.next_id = table.next_id.max(id + 1);
            table.rows.insert(id, user);
        }
        self
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: UserPersistenceError) {
        self.lock().failure = Some(error);
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().expect("in-memory user table lock")
    }

    fn check(table: &Table) -> Result<(), UserPersistenceError> {
        match &table.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError> {
        let mut table = self.lock();
        Self::check(&table)?;
        let id = UserId::new(table.next_id);
        table.next_id += 1;
        table.rows.insert(id.get(), User::from_draft(id, draft.clone()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let table = self.lock();
        Self::check(&table)?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn replace(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError> {
        let mut table = self.lock();
        Self::check(&table)?;
        match table.rows.get_mut(&id.get()) {
            Some(row) => {
                *row = User::from_draft(id, draft.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut table = self.lock();
        Self::check(&table)?;
        Ok(table.rows.remove(&id.get()).is_some())
    }
}
