use alloy::primitives::U256;

use crate::schedule::DerivedSchedule;
use crate::state::{AccountSnapshot, FormState};
use crate::utils::units::{is_valid_address, is_valid_amount};

/// Approve-then-deposit state. Deposit is only reachable from `Approved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalState {
    /// Allowance not read yet (or the read failed). Treated like `Required`.
    Unknown,
    /// Observed allowance is zero.
    Required,
    Approved(U256),
}

impl ApprovalState {
    pub fn from_snapshot(snapshot: &AccountSnapshot) -> Self {
        match snapshot.underlying_allowance.ready() {
            None => ApprovalState::Unknown,
            Some(a) if a.is_zero() => ApprovalState::Required,
            Some(a) => ApprovalState::Approved(*a),
        }
    }

    pub fn next_step(&self) -> DepositStep {
        match self {
            ApprovalState::Approved(_) => DepositStep::Deposit,
            _ => DepositStep::Approve,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositStep {
    Approve,
    Deposit,
}

/// Enablement of every action control for one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub approve_visible: bool,
    pub approve_enabled: bool,
    pub deposit_enabled: bool,
    pub withdraw_enabled: bool,
    pub claim_enabled: bool,
    pub offramp_enabled: bool,
    pub virtual_bank_enabled: bool,
    pub set_beneficiary_enabled: bool,
    pub claim_as_beneficiary_enabled: bool,
}

impl Controls {
    /// A pending write disables every write control, regardless of input validity.
    /// Claim and withdraw stay off until the figures gating them have been read.
    pub fn derive(
        snapshot: &AccountSnapshot,
        schedule: &DerivedSchedule,
        form: &FormState,
        pending: bool,
    ) -> Self {
        let idle = !pending;
        let balance = snapshot.underlying_balance.ready_or(U256::ZERO);
        let step = ApprovalState::from_snapshot(snapshot).next_step();

        Self {
            approve_visible: step == DepositStep::Approve,
            approve_enabled: idle && step == DepositStep::Approve,
            deposit_enabled: idle
                && step == DepositStep::Deposit
                && is_valid_amount(&form.deposit_amount, balance),
            withdraw_enabled: idle
                && schedule.is_unlocked()
                && is_valid_amount(&form.withdraw_amount, balance),
            claim_enabled: idle && schedule.has_claimable(),
            offramp_enabled: idle && schedule.has_claimable() && schedule.estimated_monthly.is_some(),
            virtual_bank_enabled: idle,
            set_beneficiary_enabled: idle && is_valid_address(&form.beneficiary_address),
            claim_as_beneficiary_enabled: idle && is_valid_address(&form.claim_owner_address),
        }
    }
}
