//! Display-only vesting and claim figures derived from an `AccountSnapshot`.
//!
//! Pure and deterministic given `(snapshot, now)`. A figure is `None` while any
//! read it depends on is loading or failed; it never stands in as zero.

use alloy::primitives::U256;

use crate::constants::VESTING_MONTHS;
use crate::state::AccountSnapshot;
use crate::utils::time;
use crate::utils::units::to_display_f64;

#[derive(Clone, Debug, PartialEq)]
pub struct DerivedSchedule {
    /// Deposit time + 30 days; `None` with no deposit or an unread timestamp.
    pub lock_end_ts: Option<i64>,
    /// `None` until the deposit timestamp is read.
    pub is_locked: Option<bool>,
    pub months_elapsed: Option<i64>,
    pub claimed_months: Option<i64>,
    /// `months_elapsed - claimed_months`. May be negative; read through `claimable()`.
    pub claimable_months_raw: Option<i64>,
    /// Total deposited / 360, human units.
    pub monthly_principal: Option<f64>,
    /// Monthly principal × claimable months, human units.
    pub estimated_monthly: Option<f64>,
    /// Sum of sub-vault asset values, human units. `None` until every position resolves.
    pub estimated_yield: Option<f64>,
}

impl DerivedSchedule {
    pub fn derive(snapshot: &AccountSnapshot, now_ts: i64) -> Self {
        // outer Option: read resolved; inner: a deposit exists
        let deposit_ts = snapshot.deposit_timestamp.ready().copied();
        let claimed_months = snapshot.claimed_months.ready().map(|c| (*c).min(i64::MAX as u64) as i64);

        let months_elapsed =
            deposit_ts.map(|ts| ts.map_or(0, |start| time::months_between(now_ts, start)));
        let claimable_months_raw = match (months_elapsed, claimed_months) {
            (Some(elapsed), Some(claimed)) => Some(elapsed.saturating_sub(claimed)),
            _ => None,
        };
        let monthly_principal = snapshot.total_deposited.ready().map(|t| monthly_principal(*t));
        let estimated_monthly = match (monthly_principal, claimable_months_raw) {
            (Some(principal), Some(raw)) => Some(estimated_monthly(principal, raw)),
            _ => None,
        };

        Self {
            lock_end_ts: deposit_ts.flatten().map(time::lock_end_ts),
            is_locked: deposit_ts.map(|ts| time::is_locked(now_ts, ts)),
            months_elapsed,
            claimed_months,
            claimable_months_raw,
            monthly_principal,
            estimated_monthly,
            estimated_yield: estimated_yield(snapshot),
        }
    }

    /// Claimable months clamped at zero. Display and every claim gate use this.
    pub fn claimable(&self) -> Option<u64> {
        self.claimable_months_raw.map(|raw| raw.max(0) as u64)
    }

    pub fn has_claimable(&self) -> bool {
        matches!(self.claimable(), Some(n) if n > 0)
    }

    /// True only once the lock is known to have expired (or never started).
    pub fn is_unlocked(&self) -> bool {
        self.is_locked == Some(false)
    }
}

/// Real division: a display estimate, not a transfer amount.
pub fn monthly_principal(total_deposited: U256) -> f64 {
    to_display_f64(total_deposited) / VESTING_MONTHS as f64
}

pub fn estimated_monthly(monthly_principal: f64, claimable_months_raw: i64) -> f64 {
    monthly_principal * claimable_months_raw.max(0) as f64
}

pub fn estimated_yield(snapshot: &AccountSnapshot) -> Option<f64> {
    snapshot
        .yield_positions
        .iter()
        .map(|p| p.assets.ready().map(|a| to_display_f64(*a)))
        .sum()
}
