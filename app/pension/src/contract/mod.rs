//! Typed boundary to the external pension strategy contract.
//!
//! Reads take the account explicitly; callers skip them when no wallet is
//! connected. Writes resolve once the transaction is mined and return its
//! hash. Reverts (at submission or in the receipt) and transport failures
//! come back as `DashboardError::ExternalCallFailed`.

pub mod bindings;
pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::AlloyPensionContract;

use alloy::primitives::{Address, TxHash, U256};

use crate::error::DashboardError;

pub trait PensionContract {
    /// Strategy address, also the spender for underlying approvals.
    fn vault_address(&self) -> Address;

    async fn share_balance(&self, account: Address) -> Result<U256, DashboardError>;

    /// `None` when the account never deposited.
    async fn deposit_timestamp(&self, account: Address) -> Result<Option<i64>, DashboardError>;

    /// `None` when no beneficiary is set.
    async fn beneficiary(&self, account: Address) -> Result<Option<Address>, DashboardError>;

    async fn total_deposited(&self, account: Address) -> Result<U256, DashboardError>;

    async fn claimed_months(&self, account: Address) -> Result<u64, DashboardError>;

    async fn underlying_balance(&self, account: Address) -> Result<U256, DashboardError>;

    async fn underlying_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, DashboardError>;

    async fn convert_shares_to_assets(
        &self,
        sub_vault: Address,
        shares: U256,
    ) -> Result<U256, DashboardError>;

    async fn approve_underlying(&self, spender: Address, amount: U256) -> Result<TxHash, DashboardError>;

    async fn deposit(&self, amount: U256, receiver: Address) -> Result<TxHash, DashboardError>;

    async fn withdraw(
        &self,
        amount: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, DashboardError>;

    async fn set_beneficiary(&self, beneficiary: Address) -> Result<TxHash, DashboardError>;

    async fn claim_monthly_pension(&self) -> Result<TxHash, DashboardError>;

    async fn claim_as_beneficiary(&self, owner: Address) -> Result<TxHash, DashboardError>;
}

/// On-chain 0 means "never deposited".
pub fn timestamp_from_raw(raw: U256) -> Option<i64> {
    if raw.is_zero() {
        return None;
    }
    Some(u64::try_from(raw).map_or(i64::MAX, |v| v.min(i64::MAX as u64) as i64))
}

/// On-chain zero address means "no beneficiary".
pub fn beneficiary_from_raw(raw: Address) -> Option<Address> {
    (raw != Address::ZERO).then_some(raw)
}

pub fn count_from_raw(raw: U256) -> u64 {
    u64::try_from(raw).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timestamp_is_unset() {
        assert_eq!(timestamp_from_raw(U256::ZERO), None);
        assert_eq!(timestamp_from_raw(U256::from(1_700_000_000u64)), Some(1_700_000_000));
        assert_eq!(timestamp_from_raw(U256::MAX), Some(i64::MAX));
    }

    #[test]
    fn zero_beneficiary_is_unset() {
        assert_eq!(beneficiary_from_raw(Address::ZERO), None);
        let b = Address::repeat_byte(4);
        assert_eq!(beneficiary_from_raw(b), Some(b));
    }

    #[test]
    fn counts_saturate() {
        assert_eq!(count_from_raw(U256::from(3u64)), 3);
        assert_eq!(count_from_raw(U256::MAX), u64::MAX);
    }
}
