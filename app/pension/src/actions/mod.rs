pub mod beneficiary;
pub mod claim;
pub mod deposit;
pub mod virtual_bank;
pub mod withdraw;

pub use claim::*;
pub use virtual_bank::*;

use alloy::primitives::{Address, TxHash, U256};

use crate::contract::PensionContract;
use crate::error::DashboardError;
use crate::state::PendingCall;
use crate::utils::units::format_amount;

/// One contract write, with arguments already validated and scaled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteRequest {
    Approve { spender: Address, amount: U256 },
    Deposit { amount: U256, receiver: Address },
    Withdraw { amount: U256, receiver: Address, owner: Address },
    SetBeneficiary { beneficiary: Address },
    ClaimMonthlyPension,
    ClaimAsBeneficiary { owner: Address },
}

impl WriteRequest {
    pub fn pending_call(&self) -> PendingCall {
        match self {
            WriteRequest::Approve { spender, amount } => {
                PendingCall::new("approve", vec![spender.to_string(), format_amount(*amount)])
            }
            WriteRequest::Deposit { amount, receiver } => {
                PendingCall::new("deposit", vec![format_amount(*amount), receiver.to_string()])
            }
            WriteRequest::Withdraw { amount, receiver, owner } => PendingCall::new(
                "withdraw",
                vec![format_amount(*amount), receiver.to_string(), owner.to_string()],
            ),
            WriteRequest::SetBeneficiary { beneficiary } => {
                PendingCall::new("setBeneficiary", vec![beneficiary.to_string()])
            }
            WriteRequest::ClaimMonthlyPension => PendingCall::new("claimMonthlyPension", vec![]),
            WriteRequest::ClaimAsBeneficiary { owner } => {
                PendingCall::new("claimAsBeneficiary", vec![owner.to_string()])
            }
        }
    }

    pub async fn submit<C: PensionContract>(&self, contract: &C) -> Result<TxHash, DashboardError> {
        match *self {
            WriteRequest::Approve { spender, amount } => contract.approve_underlying(spender, amount).await,
            WriteRequest::Deposit { amount, receiver } => contract.deposit(amount, receiver).await,
            WriteRequest::Withdraw { amount, receiver, owner } => {
                contract.withdraw(amount, receiver, owner).await
            }
            WriteRequest::SetBeneficiary { beneficiary } => contract.set_beneficiary(beneficiary).await,
            WriteRequest::ClaimMonthlyPension => contract.claim_monthly_pension().await,
            WriteRequest::ClaimAsBeneficiary { owner } => contract.claim_as_beneficiary(owner).await,
        }
    }
}
