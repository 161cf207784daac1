//! Domain primitives, ports and services.
//!
//! Purpose: define the user record, its validation rules and the use-cases the
//! HTTP adapter drives, independent of Actix and Diesel.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport agnostic failure payload.
//! - `User`, `UserDraft`, `UserId`: the single entity and its write contract.
//! - `UserRegistryService`: use-cases over a `UserRepository`.
//! - `retry_with_fixed_delay`: startup retry helper.

pub mod error;
pub mod ports;
pub mod retry;
pub mod trace_id;
pub mod user;
pub mod user_registry_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::retry::{FixedRetryPolicy, RetryError, Sleeper, TokioSleeper, retry_with_fixed_delay};
pub use self::trace_id::TraceId;
pub use self::user::{User, UserDraft, UserField, UserId, UserValidationError};
pub use self::user_registry_service::{
    MissingUserPolicy, UnknownMissingUserPolicy, UserRegistryService,
};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
