//! Bounded fixed-interval retry.
//!
//! Used at startup to wait for dependencies that come up after the service
//! (the database container, typically). The helper never terminates the
//! process: it reports exhaustion as an error and leaves the decision to the
//! caller.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

/// Attempt budget and constant delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl FixedRetryPolicy {
    /// Attempts made by [`FixedRetryPolicy::default`].
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
    /// Delay used by [`FixedRetryPolicy::default`].
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    /// Build a policy; `max_attempts` is clamped to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Total attempts, including the first.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between consecutive attempts.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedRetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

/// Async sleeping abstraction so retry loops can be driven without real time.
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use std::sync::Mutex;
/// use std::time::Duration;
/// use usuarios::domain::Sleeper;
///
/// #[derive(Default)]
/// struct RecordingSleeper(Mutex<Vec<Duration>>);
///
/// #[async_trait]
/// impl Sleeper for RecordingSleeper {
///     async fn sleep(&self, duration: Duration) {
///         self.0.lock().expect("sleeper mutex").push(duration);
///     }
/// }
/// ```
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer backed sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Failure returned once retrying stops.
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every attempt failed with a transient error.
    #[error("gave up after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: E,
    },
    /// An attempt failed with an error retrying cannot fix.
    #[error(transparent)]
    Permanent(E),
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// The error raised by the last attempt.
    pub fn last_error(&self) -> &E {
        match self {
            Self::Exhausted { source, .. } => source,
            Self::Permanent(source) => source,
        }
    }
}

/// Run `attempt` until it succeeds, fails permanently, or the budget runs out.
///
/// `attempt` receives the 1-based attempt number. The policy delay is slept
/// between attempts only, never after the last one. `is_transient` decides
/// whether an error is worth another attempt.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use usuarios::domain::{FixedRetryPolicy, RetryError, TokioSleeper, retry_with_fixed_delay};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let policy = FixedRetryPolicy::new(3, Duration::ZERO);
/// let outcome = retry_with_fixed_delay(
///     "example",
///     policy,
///     &TokioSleeper,
///     |attempt| async move {
///         if attempt < 2 {
///             Err(std::io::Error::other("not yet"))
///         } else {
///             Ok(attempt)
///         }
///     },
///     |_| true,
/// )
/// .await;
/// assert_eq!(outcome.ok(), Some(2));
/// # });
/// ```
pub async fn retry_with_fixed_delay<T, E, F, Fut>(
    operation: &str,
    policy: FixedRetryPolicy,
    sleeper: &dyn Sleeper,
    mut attempt: F,
    is_transient: impl Fn(&E) -> bool,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + 'static,
{
    let max_attempts = policy.max_attempts();
    let mut current = 1;
    loop {
        match attempt(current).await {
            Ok(value) => {
                if current > 1 {
                    info!(attempts = current, "{operation} succeeded after retrying");
                }
                return Ok(value);
            }
            Err(error) if !is_transient(&error) => return Err(RetryError::Permanent(error)),
            Err(error) if current >= max_attempts => {
                return Err(RetryError::Exhausted {
                    attempts: current,
                    source: error,
                });
            }
            Err(error) => {
                warn!(
                    attempt = current,
                    max_attempts,
                    delay_ms = u64::try_from(policy.delay().as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "waiting for {operation} to become available"
                );
                sleeper.sleep(policy.delay()).await;
                current += 1;
            }
        }
    }
}
