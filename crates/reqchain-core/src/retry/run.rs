//! Retry loop: run a closure a fixed number of times until it succeeds.

use super::policy::RetryPolicy;

/// Runs `f` up to `policy.attempts` times, returning on the first success.
///
/// Sleeps `policy.wait` before each attempt that follows a failure. Every
/// failure is passed to `on_failure` (1-based attempt number) and the loop
/// continues regardless of the error. Returns the last error once attempts
/// run out, or `Ok(None)` when the policy allows zero attempts.
pub fn run_with_retry<T, E, F, L>(policy: &RetryPolicy, mut f: F, mut on_failure: L) -> Result<Option<T>, E>
where
    F: FnMut() -> Result<T, E>,
    L: FnMut(u32, &E),
{
    let mut last_error: Option<E> = None;
    let mut remaining = policy.attempts;
    let mut attempt = 0u32;

    while remaining > 0 {
        remaining -= 1;
        attempt += 1;

        if let Some(delay) = policy.delay_after_failure(last_error.is_some()) {
            std::thread::sleep(delay);
        }

        match f() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                on_failure(attempt, &e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e),
        None => Ok(None),
    }
}
