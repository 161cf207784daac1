//! User record model.
//!
//! A [`User`] is one stored row. A [`UserDraft`] is the full set of mutable
//! fields a caller must supply to create or replace a record; the identifier
//! is always assigned by storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mutable user fields, named by their domain meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Age,
    Email,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Email => "email",
        })
    }
}

/// Validation errors returned by [`UserDraft::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("missing required field: {0}")]
    MissingField(UserField),
}

/// Storage-assigned user identifier.
///
/// Identifiers are generated by the database sequence and never minted or
/// changed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap an identifier read from storage or a request path.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Complete replacement values for a user record.
///
/// ## Invariants
/// - every field is present; partial updates are not representable.
///
/// # Examples
/// ```
/// use usuarios::domain::{UserDraft, UserField, UserValidationError};
///
/// let draft = UserDraft::try_from_parts(Some("Maria".into()), Some(25), Some("m@x.com".into()))
///     .expect("complete draft");
/// assert_eq!(draft.name(), "Maria");
///
/// let missing = UserDraft::try_from_parts(Some("Maria".into()), None, Some("m@x.com".into()));
/// assert_eq!(missing, Err(UserValidationError::MissingField(UserField::Age)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    age: i32,
    email: String,
}

impl UserDraft {
    /// Build a draft, reporting the first absent field in name, age, email
    /// order.
    pub fn try_from_parts(
        name: Option<String>,
        age: Option<i32>,
        email: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.ok_or(UserValidationError::MissingField(UserField::Name))?;
        let age = age.ok_or(UserValidationError::MissingField(UserField::Age))?;
        let email = email.ok_or(UserValidationError::MissingField(UserField::Email))?;
        Ok(Self { name, age, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A stored user record.
///
/// `age` and `email` are nullable in storage, so rows written outside this
/// service may lack them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    age: Option<i32>,
    email: Option<String>,
}

impl User {
    /// Assemble a record from stored values.
    pub fn new(id: UserId, name: impl Into<String>, age: Option<i32>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            email,
        }
    }

    /// Materialise a draft as the record storage would hold under `id`.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        let UserDraft { name, age, email } = draft;
        Self {
            id,
            name,
            age: Some(age),
            email: Some(email),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
