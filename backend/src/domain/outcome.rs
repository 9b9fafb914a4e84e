//! Result helpers for railway-style composition.
//!
//! `std::result::Result` already provides `map`, `map_err`, `and_then` and
//! `unwrap_or`. This module adds the pieces it lacks: predicate functions
//! usable as `filter` arguments, an order-preserving `combine`, and
//! converters that turn panicking code into a `Result`.

use std::any::Any;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};

use futures_util::FutureExt;

/// Failure produced by [`try_catch`] and [`try_async`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CaughtError {
    message: String,
}

impl CaughtError {
    /// Build an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message carried by the panic payload.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => "unknown panic payload".to_owned(),
            },
        };
        Self { message }
    }
}

/// `true` when `result` holds a success value.
pub fn is_success<T, E>(result: &Result<T, E>) -> bool {
    result.is_ok()
}

/// `true` when `result` holds an error.
pub fn is_failure<T, E>(result: &Result<T, E>) -> bool {
    result.is_err()
}

/// Collect every success value in input order, or return the first failure.
///
/// # Examples
/// ```
/// use folio::domain::combine;
///
/// let all: Result<Vec<i32>, &str> = combine([Ok(1), Ok(2), Ok(3)]);
/// assert_eq!(all, Ok(vec![1, 2, 3]));
///
/// let first: Result<Vec<i32>, &str> = combine([Ok(1), Err("a"), Err("b")]);
/// assert_eq!(first, Err("a"));
/// ```
pub fn combine<T, E, I>(results: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    results.into_iter().collect()
}

/// Run `f`, converting a panic into [`CaughtError`].
///
/// String payloads become the error message verbatim.
///
/// # Examples
/// ```
/// use folio::domain::try_catch;
///
/// assert_eq!(try_catch(|| 2 + 2), Ok(4));
/// ```
pub fn try_catch<T, F>(f: F) -> Result<T, CaughtError>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(CaughtError::from_payload)
}

/// Await `fut`, converting a panic raised while polling into [`CaughtError`].
pub async fn try_async<T, Fut>(fut: Fut) -> Result<T, CaughtError>
where
    Fut: Future<Output = T>,
{
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(CaughtError::from_payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn predicates_follow_the_variant() {
        let ok: Result<i32, &str> = Ok(1);
        let err: Result<i32, &str> = Err("boom");
        assert!(is_success(&ok) && !is_failure(&ok));
        assert!(is_failure(&err) && !is_success(&err));
    }

    #[rstest]
    fn combine_returns_first_failure_in_input_order() {
        let results: Vec<Result<i32, &str>> = vec![Ok(1), Err("first"), Ok(3), Err("second")];
        assert_eq!(combine(results), Err("first"));
    }

    #[rstest]
    fn combine_of_nothing_is_empty_success() {
        let results: Vec<Result<i32, &str>> = Vec::new();
        assert_eq!(combine(results), Ok(Vec::new()));
    }

    #[rstest]
    fn try_catch_uses_str_payload_as_message() {
        let result: Result<(), _> = try_catch(|| panic!("x"));
        assert_eq!(result.map_err(|err| err.message().to_owned()), Err("x".to_owned()));
    }

    #[rstest]
    fn try_catch_uses_formatted_payload_as_message() {
        let code = 7;
        let result: Result<(), _> = try_catch(|| panic!("code {code}"));
        assert_eq!(result.expect_err("panics").message(), "code 7");
    }

    #[rstest]
    fn try_catch_handles_non_string_payloads() {
        let result: Result<(), _> = try_catch(|| std::panic::panic_any(42_u8));
        assert_eq!(result.expect_err("panics").message(), "unknown panic payload");
    }

    #[tokio::test]
    async fn try_async_passes_through_values() {
        let result = try_async(async { 5 }).await;
        assert_eq!(result, Ok(5));
    }

    #[tokio::test]
    async fn try_async_catches_panics() {
        let result: Result<(), _> = try_async(async { panic!("async boom") }).await;
        assert_eq!(result.expect_err("panics").message(), "async boom");
    }
}
