// ABOUTME: Exponential backoff delay computation.
// ABOUTME: Doubles the base delay per attempt with overflow saturation.

use std::time::Duration;

/// Delay before the retry that follows `attempt` (1-based).
/// attempt 1 -> base, attempt 2 -> 2x base, attempt 3 -> 4x base.
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    base.saturating_mul(1u32 << exponent)
}
