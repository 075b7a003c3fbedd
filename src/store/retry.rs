//! Exponential backoff for rate-limited store calls.
//!
//! Only [`DossierError::RateLimited`] is retried; every other error
//! propagates on the first attempt. When attempts are exhausted the
//! terminal error is still the rate-limit error so the surface can tell
//! the user to try again later.

use crate::config::RetryConfig;
use crate::errors::{DossierError, Result};
use std::thread;
use std::time::Duration;

pub fn with_backoff<T, F>(config: &RetryConfig, mut call: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let attempts = config.max_attempts.max(1);
    for attempt in 0..attempts {
        match call() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < attempts => {
                let delay = config.base_delay_ms.saturating_mul(1 << attempt);
                log::debug!(
                    "rate limit hit, retrying in {}ms (attempt {}/{})",
                    delay,
                    attempt + 1,
                    attempts
                );
                thread::sleep(Duration::from_millis(delay));
            }
            Err(err) => return Err(err),
        }
    }
    Err(DossierError::RateLimited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 0,
        }
    }

    #[test]
    fn succeeds_without_retry() {
        let calls = Cell::new(0);
        let result = with_backoff(&fast_retry(), || {
            calls.set(calls.get() + 1);
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn retries_rate_limit_until_success() {
        let calls = Cell::new(0);
        let result = with_backoff(&fast_retry(), || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(DossierError::RateLimited)
            } else {
                Ok("done")
            }
        });
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhausted_retries_surface_rate_limit() {
        let calls = Cell::new(0);
        let result: Result<()> = with_backoff(&fast_retry(), || {
            calls.set(calls.get() + 1);
            Err(DossierError::RateLimited)
        });
        assert!(matches!(result, Err(DossierError::RateLimited)));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn other_errors_propagate_immediately() {
        let calls = Cell::new(0);
        let result: Result<()> = with_backoff(&fast_retry(), || {
            calls.set(calls.get() + 1);
            Err(DossierError::NotFound("gone".into()))
        });
        assert!(matches!(result, Err(DossierError::NotFound(_))));
        assert_eq!(calls.get(), 1);
    }
}
