//! In-memory stand-in for the strategy contract. Mirrors its storage and the
//! reverts the real contract raises, so orchestrator tests can race it.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, TxHash, B256, U256};

use super::PensionContract;
use crate::constants::{LOCK_DURATION_SECS, MONTH_SECS};
use crate::error::DashboardError;
use crate::state::PendingSlot;

#[derive(Clone, Debug, Default)]
pub struct MockAccount {
    pub underlying: U256,
    pub allowance: U256,
    pub shares: U256,
    pub total_deposited: U256,
    pub deposit_ts: u64,
    pub claimed_months: u64,
    pub beneficiary: Address,
}

pub struct MockPensionContract {
    pub vault: Address,
    pub caller: Cell<Address>,
    pub now: Cell<i64>,
    pub accounts: RefCell<HashMap<Address, MockAccount>>,
    /// Sub-vault -> assets per share (plain multiplier).
    pub share_price: RefCell<HashMap<Address, U256>>,
    /// Next write reverts with this message.
    pub revert_next: RefCell<Option<String>>,
    /// Reads by function name that fail.
    pub failing_reads: RefCell<HashSet<&'static str>>,
    pub calls: RefCell<Vec<String>>,
    /// Pending state observed while each write ran.
    pub pending_probe: RefCell<Option<PendingSlot>>,
    pub pending_seen: RefCell<Vec<bool>>,
    tx_counter: Cell<u8>,
}

impl MockPensionContract {
    pub fn new(caller: Address, now: i64) -> Self {
        Self {
            vault: Address::repeat_byte(0xAA),
            caller: Cell::new(caller),
            now: Cell::new(now),
            accounts: RefCell::new(HashMap::new()),
            share_price: RefCell::new(HashMap::new()),
            revert_next: RefCell::new(None),
            failing_reads: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            pending_probe: RefCell::new(None),
            pending_seen: RefCell::new(Vec::new()),
            tx_counter: Cell::new(0),
        }
    }

    pub fn with_account(self, who: Address, account: MockAccount) -> Self {
        self.accounts.borrow_mut().insert(who, account);
        self
    }

    pub fn account(&self, who: Address) -> MockAccount {
        self.accounts.borrow().get(&who).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn read(&self, name: &'static str) -> Result<(), DashboardError> {
        self.calls.borrow_mut().push(name.to_string());
        if self.failing_reads.borrow().contains(name) {
            return Err(DashboardError::external("rpc timeout", "Read failed"));
        }
        Ok(())
    }

    fn begin_write(&self, name: &str) -> Result<(), DashboardError> {
        self.calls.borrow_mut().push(name.to_string());
        if let Some(slot) = self.pending_probe.borrow().as_ref() {
            self.pending_seen.borrow_mut().push(slot.is_pending());
        }
        match self.revert_next.borrow_mut().take() {
            Some(reason) => Err(DashboardError::external(&reason, "Transaction failed")),
            None => Ok(()),
        }
    }

    fn revert(reason: &str) -> DashboardError {
        DashboardError::external(&format!("execution reverted: {reason}"), "Transaction failed")
    }

    fn next_hash(&self) -> TxHash {
        let n = self.tx_counter.get().wrapping_add(1);
        self.tx_counter.set(n);
        B256::with_last_byte(n)
    }

    fn update<F>(&self, who: Address, f: F) -> Result<(), DashboardError>
    where
        F: FnOnce(&mut MockAccount) -> Result<(), DashboardError>,
    {
        let mut accounts = self.accounts.borrow_mut();
        f(accounts.entry(who).or_default())
    }

    fn months_due(&self, acct: &MockAccount) -> u64 {
        if acct.deposit_ts == 0 {
            return 0;
        }
        let elapsed = (self.now.get() - acct.deposit_ts as i64).div_euclid(MONTH_SECS).max(0) as u64;
        elapsed.saturating_sub(acct.claimed_months)
    }
}

impl PensionContract for MockPensionContract {
    fn vault_address(&self) -> Address {
        self.vault
    }

    async fn share_balance(&self, account: Address) -> Result<U256, DashboardError> {
        self.read("balanceOf")?;
        Ok(self.account(account).shares)
    }

    async fn deposit_timestamp(&self, account: Address) -> Result<Option<i64>, DashboardError> {
        self.read("depositTimestamps")?;
        Ok(super::timestamp_from_raw(U256::from(self.account(account).deposit_ts)))
    }

    async fn beneficiary(&self, account: Address) -> Result<Option<Address>, DashboardError> {
        self.read("beneficiaries")?;
        Ok(super::beneficiary_from_raw(self.account(account).beneficiary))
    }

    async fn total_deposited(&self, account: Address) -> Result<U256, DashboardError> {
        self.read("totalDeposited")?;
        Ok(self.account(account).total_deposited)
    }

    async fn claimed_months(&self, account: Address) -> Result<u64, DashboardError> {
        self.read("claimedMonths")?;
        Ok(self.account(account).claimed_months)
    }

    async fn underlying_balance(&self, account: Address) -> Result<U256, DashboardError> {
        self.read("underlying.balanceOf")?;
        Ok(self.account(account).underlying)
    }

    async fn underlying_allowance(
        &self,
        owner: Address,
        _spender: Address,
    ) -> Result<U256, DashboardError> {
        self.read("allowance")?;
        Ok(self.account(owner).allowance)
    }

    async fn convert_shares_to_assets(
        &self,
        sub_vault: Address,
        shares: U256,
    ) -> Result<U256, DashboardError> {
        self.read("convertToAssets")?;
        let price = self.share_price.borrow().get(&sub_vault).copied().unwrap_or(U256::ZERO);
        Ok(shares * price)
    }

    async fn approve_underlying(&self, _spender: Address, amount: U256) -> Result<TxHash, DashboardError> {
        self.begin_write("approve")?;
        self.update(self.caller.get(), |a| {
            a.allowance = amount;
            Ok(())
        })?;
        Ok(self.next_hash())
    }

    async fn deposit(&self, amount: U256, receiver: Address) -> Result<TxHash, DashboardError> {
        self.begin_write("deposit")?;
        let now = self.now.get() as u64;
        self.update(self.caller.get(), |a| {
            if a.allowance < amount {
                return Err(Self::revert("ERC20: insufficient allowance"));
            }
            if a.underlying < amount {
                return Err(Self::revert("ERC20: transfer amount exceeds balance"));
            }
            a.allowance -= amount;
            a.underlying -= amount;
            Ok(())
        })?;
        self.update(receiver, |a| {
            a.shares += amount;
            a.total_deposited += amount;
            if a.deposit_ts == 0 {
                a.deposit_ts = now;
            }
            Ok(())
        })?;
        Ok(self.next_hash())
    }

    async fn withdraw(
        &self,
        amount: U256,
        receiver: Address,
        owner: Address,
    ) -> Result<TxHash, DashboardError> {
        self.begin_write("withdraw")?;
        let now = self.now.get();
        self.update(owner, |a| {
            if a.deposit_ts != 0 && now < a.deposit_ts as i64 + LOCK_DURATION_SECS {
                return Err(Self::revert("Locked"));
            }
            if a.shares < amount {
                return Err(Self::revert("ERC4626: withdraw more than max"));
            }
            a.shares -= amount;
            Ok(())
        })?;
        self.update(receiver, |a| {
            a.underlying += amount;
            Ok(())
        })?;
        Ok(self.next_hash())
    }

    async fn set_beneficiary(&self, beneficiary: Address) -> Result<TxHash, DashboardError> {
        self.begin_write("setBeneficiary")?;
        self.update(self.caller.get(), |a| {
            a.beneficiary = beneficiary;
            Ok(())
        })?;
        Ok(self.next_hash())
    }

    async fn claim_monthly_pension(&self) -> Result<TxHash, DashboardError> {
        self.begin_write("claimMonthlyPension")?;
        let caller = self.caller.get();
        let due = self.months_due(&self.account(caller));
        if due == 0 {
            return Err(Self::revert("No months to claim"));
        }
        self.update(caller, |a| {
            a.claimed_months += due;
            Ok(())
        })?;
        Ok(self.next_hash())
    }

    async fn claim_as_beneficiary(&self, owner: Address) -> Result<TxHash, DashboardError> {
        self.begin_write("claimAsBeneficiary")?;
        if self.account(owner).beneficiary != self.caller.get() {
            return Err(Self::revert("Not beneficiary"));
        }
        Ok(self.next_hash())
    }
}
