use alloy::primitives::{Address, U256};

use crate::config::YieldSource;
use crate::constants::ZERO_ADDRESS;

/// One independently fetched read. Fields resolve in any order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Field<T> {
    /// Skipped: no wallet connected.
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Field<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Field::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Field::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Field::Failed(_))
    }
}

impl<T: Clone> Field<T> {
    pub fn ready_or(&self, default: T) -> T {
        self.ready().cloned().unwrap_or(default)
    }
}

/// Position of the connected account in one yield sub-vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YieldPosition {
    pub name: String,
    pub sub_vault: Address,
    /// Assets backing the account's shares, in base units.
    pub assets: Field<U256>,
}

/// Last successful reads of vault state for the connected account.
/// A cache only; the contract stays authoritative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Connected account, or the zero sentinel.
    pub address: Address,
    pub share_balance: Field<U256>,
    pub total_deposited: Field<U256>,
    /// `None` when the contract reports 0 (no deposit yet).
    pub deposit_timestamp: Field<Option<i64>>,
    /// `None` when the contract reports the zero address.
    pub beneficiary: Field<Option<Address>>,
    pub claimed_months: Field<u64>,
    pub underlying_balance: Field<U256>,
    pub underlying_allowance: Field<U256>,
    pub yield_positions: Vec<YieldPosition>,
}

impl AccountSnapshot {
    /// Snapshot for a disconnected session: every read skipped.
    pub fn disconnected(yield_sources: &[YieldSource]) -> Self {
        Self::blank(ZERO_ADDRESS, yield_sources, false)
    }

    /// Snapshot for `address` with every read in flight.
    pub fn loading(address: Address, yield_sources: &[YieldSource]) -> Self {
        Self::blank(address, yield_sources, true)
    }

    fn blank(address: Address, yield_sources: &[YieldSource], loading: bool) -> Self {
        fn start<T>(loading: bool) -> Field<T> {
            if loading {
                Field::Loading
            } else {
                Field::Idle
            }
        }
        Self {
            address,
            share_balance: start(loading),
            total_deposited: start(loading),
            deposit_timestamp: start(loading),
            beneficiary: start(loading),
            claimed_months: start(loading),
            underlying_balance: start(loading),
            underlying_allowance: start(loading),
            yield_positions: yield_sources
                .iter()
                .map(|src| YieldPosition {
                    name: src.name.clone(),
                    sub_vault: src.address,
                    assets: start(loading),
                })
                .collect(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address != ZERO_ADDRESS
    }

    /// True while any read is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.share_balance.is_pending()
            || self.total_deposited.is_pending()
            || self.deposit_timestamp.is_pending()
            || self.beneficiary.is_pending()
            || self.claimed_months.is_pending()
            || self.underlying_balance.is_pending()
            || self.underlying_allowance.is_pending()
            || self.yield_positions.iter().any(|p| p.assets.is_pending())
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::ShareBalance(f) => self.share_balance = f,
            FieldUpdate::TotalDeposited(f) => self.total_deposited = f,
            FieldUpdate::DepositTimestamp(f) => self.deposit_timestamp = f,
            FieldUpdate::Beneficiary(f) => self.beneficiary = f,
            FieldUpdate::ClaimedMonths(f) => self.claimed_months = f,
            FieldUpdate::UnderlyingBalance(f) => self.underlying_balance = f,
            FieldUpdate::UnderlyingAllowance(f) => self.underlying_allowance = f,
            FieldUpdate::YieldAssets(idx, f) => {
                if let Some(p) = self.yield_positions.get_mut(idx) {
                    p.assets = f;
                }
            }
        }
    }
}

/// A single read landing in the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    ShareBalance(Field<U256>),
    TotalDeposited(Field<U256>),
    DepositTimestamp(Field<Option<i64>>),
    Beneficiary(Field<Option<Address>>),
    ClaimedMonths(Field<u64>),
    UnderlyingBalance(Field<U256>),
    UnderlyingAllowance(Field<U256>),
    /// Index into `yield_positions`.
    YieldAssets(usize, Field<U256>),
}
