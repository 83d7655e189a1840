//! Clock helpers: wall-clock milliseconds, collision-free folder id stamps, and file dates.

use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Highest stamp handed out by [`next_monotonic_timestamp_ms`].
static LAST_FOLDER_STAMP: AtomicU64 = AtomicU64::new(0);

/// Milliseconds since the unix epoch: `Date.now()` in the browser, the system clock elsewhere.
///
/// A clock set before 1970 reads as `0`.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    let now = js_sys::Date::now().max(0.0) as u64;

    #[cfg(not(target_arch = "wasm32"))]
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64);

    now
}

/// Millisecond stamp for naming new folders.
///
/// Two folders created within the same millisecond still get distinct stamps: each call
/// returns the current time or one past the previous stamp, whichever is larger.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    let previous = LAST_FOLDER_STAMP
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or_else(|last| last);
    now.max(previous.saturating_add(1))
}

/// Formats a unix millisecond timestamp as a UTC `YYYY-MM-DD` date.
///
/// Timestamps outside chrono's representable range fall back to the unix epoch date.
pub fn calendar_date(unix_ms: u64) -> String {
    let millis = i64::try_from(unix_ms).unwrap_or(i64::MAX);
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .format("%Y-%m-%d")
        .to_string()
}
