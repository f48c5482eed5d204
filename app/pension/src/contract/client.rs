use alloy::contract::Error as ContractError;
use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use tracing::{debug, info, warn};

use super::bindings::{IERC20, IERC4626, IPensionStrategy};
use super::{beneficiary_from_raw, count_from_raw, timestamp_from_raw, PensionContract};
use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// `PensionContract` over any alloy provider. Writes need a provider with a wallet filler
/// and resolve once the transaction is mined.
#[derive(Clone, Debug)]
pub struct AlloyPensionContract<P> {
    provider: P,
    vault: Address,
    underlying: Address,
}

impl<P: Provider + Clone> AlloyPensionContract<P> {
    pub fn new(provider: P, vault: Address, underlying: Address) -> Self {
        Self { provider, vault, underlying }
    }

    pub fn from_config(provider: P, config: &DashboardConfig) -> Self {
        Self::new(provider, config.vault_address, config.underlying_address)
    }

    fn strategy(&self) -> IPensionStrategy::IPensionStrategyInstance<P> {
        IPensionStrategy::new(self.vault, self.provider.clone())
    }

    fn underlying(&self) -> IERC20::IERC20Instance<P> {
        IERC20::new(self.underlying, self.provider.clone())
    }
}

/// Prefers the node's error payload (carries the revert reason) over the full error chain.
fn call_failed(err: ContractError, fallback: &str) -> DashboardError {
    let message = match &err {
        ContractError::TransportError(e) => e
            .as_error_resp()
            .map(|payload| payload.message.to_string())
            .unwrap_or_else(|| e.to_string()),
        other => other.to_string(),
    };
    debug!(error = %err, "contract call failed");
    DashboardError::external(&message, fallback)
}

/// Waits for the receipt so reads issued afterwards see the new state.
async fn confirmed(
    function: &str,
    pending: PendingTransactionBuilder<Ethereum>,
    fallback: &str,
) -> Result<TxHash, DashboardError> {
    let hash = *pending.tx_hash();
    info!(function, tx = %hash, "transaction submitted");
    let receipt = pending.get_receipt().await.map_err(|e| {
        debug!(function, tx = %hash, error = %e, "receipt wait failed");
        DashboardError::external(&e.to_string(), fallback)
    })?;
    receipt_outcome(function, hash, ReceiptResponse::status(&receipt), fallback)
}

fn receipt_outcome(
    function: &str,
    hash: TxHash,
    success: bool,
    fallback: &str,
) -> Result<TxHash, DashboardError> {
    if !success {
        warn!(function, tx = %hash, "transaction reverted");
        return Err(DashboardError::external(
            &format!("Transaction reverted: {hash}"),
            fallback,
        ));
    }
    info!(function, tx = %hash, "transaction confirmed");
    Ok(hash)
}

impl<P: Provider + Clone> PensionContract for AlloyPensionContract<P> {
    fn vault_address(&self) -> Address {
        self.vault
    }

    async fn share_balance(&self, account: Address) -> Result<U256, DashboardError> {
        self.strategy()
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Share balance read failed"))
    }

    async fn deposit_timestamp(&self, account: Address) -> Result<Option<i64>, DashboardError> {
        let raw = self
            .strategy()
            .depositTimestamps(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Deposit timestamp read failed"))?;
        Ok(timestamp_from_raw(raw))
    }

    async fn beneficiary(&self, account: Address) -> Result<Option<Address>, DashboardError> {
        let raw = self
            .strategy()
            .beneficiaries(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Beneficiary read failed"))?;
        Ok(beneficiary_from_raw(raw))
    }

    async fn total_deposited(&self, account: Address) -> Result<U256, DashboardError> {
        self.strategy()
            .totalDeposited(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Total deposited read failed"))
    }

    async fn claimed_months(&self, account: Address) -> Result<u64, DashboardError> {
        let raw = self
            .strategy()
            .claimedMonths(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Claimed months read failed"))?;
        Ok(count_from_raw(raw))
    }

    async fn underlying_balance(&self, account: Address) -> Result<U256, DashboardError> {
        self.underlying()
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| call_failed(e, "Balance read failed"))
    }

    async fn underlying_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, DashboardError> {
        self.underlying()
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| call_failed(e, "Allowance read failed"))
    }

    async fn convert_shares_to_assets(
        &self,
        sub_vault: Address,
        shares: U256,
    ) -> Result<U256, DashboardError> {
        IERC4626::new(sub_vault, self.provider.clone())
            .convertToAssets(shares)
            .call()
            .await
            .map_err(|e| call_failed(e, "Yield read failed"))
    }

    async fn approve_underlying(&self, spender: Address, amount: U256) -> Result<TxHash, DashboardError> {
        let pending = self
            .underlying()
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| call_failed(e, "Approval failed"))?;
        confirmed("approve", pending, "Approval failed").await
    }

    async fn deposit(&self, amount: U256, receiver: Address) -> Result<TxHash, DashboardError> {
        let pending = self
            .strategy()
            .deposit(amount, receiver)
            .send()
            .await
            .map_err(|e| call_failed(e, "Deposit failed"))?;
        confirmed("deposit", pending, "Deposit failed").await
    }

    async fn withdraw(
        &self,
        amount: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, DashboardError> {
        let pending = self
            .strategy()
            .withdraw(amount, receiver, owner)
            .send()
            .await
            .map_err(|e| call_failed(e, "Withdraw failed"))?;
        confirmed("withdraw", pending, "Withdraw failed").await
    }

    async fn set_beneficiary(&self, beneficiary: Address) -> Result<TxHash, DashboardError> {
        let pending = self
            .strategy()
            .setBeneficiary(beneficiary)
            .send()
            .await
            .map_err(|e| call_failed(e, "Failed to set beneficiary"))?;
        confirmed("setBeneficiary", pending, "Failed to set beneficiary").await
    }

    async fn claim_monthly_pension(&self) -> Result<TxHash, DashboardError> {
        let pending = self
            .strategy()
            .claimMonthlyPension()
            .send()
            .await
            .map_err(|e| call_failed(e, "Monthly claim failed"))?;
        confirmed("claimMonthlyPension", pending, "Monthly claim failed").await
    }

    async fn claim_as_beneficiary(&self, owner: Address) -> Result<TxHash, DashboardError> {
        let pending = self
            .strategy()
            .claimAsBeneficiary(owner)
            .send()
            .await
            .map_err(|e| call_failed(e, "Claim failed"))?;
        confirmed("claimAsBeneficiary", pending, "Claim failed").await
    }
}
