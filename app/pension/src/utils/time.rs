//! Fixed 30-day month vesting utilities.
//! - lock_end = deposit + 30 days
//! - months_between = floor((now - deposit) / 30 days), negative if now precedes the deposit
//! - a month boundary counts as reached at the exact second (inclusive)

use chrono::{DateTime, Utc};

use crate::constants::{LOCK_DURATION_SECS, MONTH_SECS};

/// Wall-clock source. Injected so derived values can be recomputed against a fixed time.
pub trait Clock {
    fn now_ts(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ts(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Frozen clock, used by tests and by one-shot CLI renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ts(&self) -> i64 {
        self.0
    }
}

pub fn lock_end_ts(deposit_ts: i64) -> i64 {
    deposit_ts.saturating_add(LOCK_DURATION_SECS)
}

/// True while a deposit exists and its initial lock has not expired.
pub fn is_locked(now_ts: i64, deposit_ts: Option<i64>) -> bool {
    match deposit_ts {
        Some(start) => now_ts < lock_end_ts(start),
        None => false,
    }
}

/// Whole 30-day months between `start_ts` and `now_ts`, floored.
pub fn months_between(now_ts: i64, start_ts: i64) -> i64 {
    now_ts.saturating_sub(start_ts).div_euclid(MONTH_SECS)
}

/// Human-readable UTC time, or the raw number when out of chrono's range.
pub fn format_utc(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => ts.to_string(),
    }
}
