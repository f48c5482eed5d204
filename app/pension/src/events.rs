use std::fmt;

use alloy::primitives::TxHash;

use crate::error::DashboardError;

/// User-facing actions on the vault view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Approve,
    Deposit,
    Withdraw,
    SetBeneficiary,
    ClaimAsBeneficiary,
    ClaimMonthly,
    ClaimAndOfframp,
    CreateVirtualBankAccount,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Approve => "approve",
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
            Action::SetBeneficiary => "set-beneficiary",
            Action::ClaimAsBeneficiary => "claim-as-beneficiary",
            Action::ClaimMonthly => "claim",
            Action::ClaimAndOfframp => "claim-offramp",
            Action::CreateVirtualBankAccount => "virtual-bank",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A toast. The dashboard keeps them in order; the binary prints them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub action: Action,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Result of one action, after it has been announced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Submitted(TxHash),
    /// Finished without a transaction (demo side effects).
    Completed,
    Rejected(DashboardError),
}

impl ActionOutcome {
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            ActionOutcome::Submitted(h) => Some(*h),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ActionOutcome::Rejected(_))
    }
}
