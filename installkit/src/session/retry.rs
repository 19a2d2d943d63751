//! Bounded retry for transient operations.

use std::thread;
use std::time::Duration;

/// Run an operation up to `max_attempts` times with a fixed pause between
/// attempts.
///
/// The final error is returned once attempts are exhausted. `max_attempts`
/// below 1 is treated as 1.
pub fn retry_with_delay<T, E, F>(max_attempts: usize, delay: Duration, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "transient operation failed, retrying"
                );
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_first_try() {
        let mut calls = 0;
        let result: Result<i32, String> = retry_with_delay(5, Duration::ZERO, || {
            calls += 1;
            Ok(42)
        });

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_recovers_after_transient_failures() {
        let mut calls = 0;
        let result: Result<i32, String> = retry_with_delay(5, Duration::ZERO, || {
            calls += 1;
            if calls < 3 {
                Err("locked".to_string())
            } else {
                Ok(7)
            }
        });

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_exhausts_attempts() {
        let mut calls = 0;
        let result: Result<(), String> = retry_with_delay(5, Duration::ZERO, || {
            calls += 1;
            Err("still locked".to_string())
        });

        assert_eq!(result.unwrap_err(), "still locked");
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let mut calls = 0;
        let result: Result<(), String> = retry_with_delay(0, Duration::ZERO, || {
            calls += 1;
            Err("nope".to_string())
        });

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
