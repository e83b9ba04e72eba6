//! Timestamps for `created_date` / `last_modified_date`.
//!
//! Values are truncated to microseconds, the resolution of Postgres `timestamptz`,
//! so a stored record reads back equal to the one that was written.

use chrono::{DateTime, Duration, SubsecRound, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next modification stamp; strictly after `previous` even if the clock has not moved.
pub fn advance(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::microseconds(1),
        _ => now,
    }
}
