//! Synthetic CPU load for the `/work` endpoint.
//!
//! The duration comes from the `ms` query parameter: anything that is not an
//! integer is rejected, while out-of-range integers are clamped into
//! `[WORK_MIN_MS, WORK_MAX_MS]`. The load itself is a tight counter loop bounded
//! by a monotonic deadline. It never sleeps or yields, so it holds its thread
//! for the whole duration like a real compute-bound request would.

use std::num::IntErrorKind;
use std::time::{Duration, Instant};

use crate::config::{INVALID_MS_MESSAGE, WORK_MAX_MS, WORK_MIN_MS};
use crate::error::AppError;

/// Parse and clamp a raw `ms` value into a duration in milliseconds.
///
/// Surrounding whitespace, a leading sign and single underscores between digits
/// (`1_000`) are accepted. Integers that overflow `i64` are still integers and
/// clamp to the nearest bound.
pub fn parse_ms(raw: &str) -> Result<u64, AppError> {
    let invalid = || AppError::InvalidParameter(INVALID_MS_MESSAGE.to_string());
    let digits = strip_digit_separators(raw.trim()).ok_or_else(invalid)?;

    match digits.parse::<i64>() {
        Ok(ms) => Ok(clamp_ms(ms)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(WORK_MAX_MS),
            IntErrorKind::NegOverflow => Ok(WORK_MIN_MS),
            _ => Err(invalid()),
        },
    }
}

/// Remove digit-group underscores, which may only sit between two digits.
fn strip_digit_separators(s: &str) -> Option<String> {
    if !s.contains('_') {
        return Some(s.to_string());
    }

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            if !before.is_some_and(char::is_ascii_digit) || !after.is_some_and(char::is_ascii_digit) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Clamp a millisecond count into `[WORK_MIN_MS, WORK_MAX_MS]`.
pub fn clamp_ms(ms: i64) -> u64 {
    u64::try_from(ms)
        .unwrap_or(WORK_MIN_MS)
        .clamp(WORK_MIN_MS, WORK_MAX_MS)
}

/// Spin until `duration` has elapsed on the monotonic clock.
///
/// Returns the number of completed loop iterations.
pub fn busy_wait(duration: Duration) -> u64 {
    let deadline = Instant::now() + duration;
    let mut iterations: u64 = 0;
    while Instant::now() < deadline {
        iterations += 1;
    }
    iterations
}
