use alloy::primitives::U256;

use super::WriteRequest;
use crate::constants::{APPROVAL_AMOUNT, UNDERLYING_SYMBOL};
use crate::contract::PensionContract;
use crate::dashboard::{Dashboard, Prepared};
use crate::error::DashboardError;
use crate::events::{Action, ActionOutcome};
use crate::state::{ApprovalState, FormField};
use crate::utils::time::Clock;
use crate::utils::units::{is_valid_amount, parse_amount};

fn approval_amount() -> U256 {
    parse_amount(APPROVAL_AMOUNT).unwrap_or(U256::MAX)
}

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    /// Step one of approve-then-deposit: lets the strategy pull the underlying token.
    pub async fn approve(&mut self) -> ActionOutcome {
        let prepared = self.session.require_account().map(|_| Prepared {
            request: WriteRequest::Approve {
                spender: self.contract.vault_address(),
                amount: approval_amount(),
            },
            clears: None,
            success: format!("Approved {UNDERLYING_SYMBOL}!"),
        });
        self.execute(Action::Approve, prepared).await
    }

    /// Step two: only reachable once a nonzero allowance has been observed.
    pub async fn deposit(&mut self) -> ActionOutcome {
        let prepared = self.prepare_deposit();
        self.execute(Action::Deposit, prepared).await
    }

    fn prepare_deposit(&self) -> Result<Prepared, DashboardError> {
        let account = self.session.require_account()?;
        if !matches!(self.approval_state(), ApprovalState::Approved(_)) {
            return Err(DashboardError::ApprovalRequired);
        }
        let text = &self.form.deposit_amount;
        if !is_valid_amount(text, self.underlying_balance()) {
            return Err(DashboardError::InvalidAmount);
        }
        Ok(Prepared {
            request: WriteRequest::Deposit {
                amount: parse_amount(text)?,
                receiver: account,
            },
            clears: Some(FormField::DepositAmount),
            success: format!("Deposited {UNDERLYING_SYMBOL} to sDAI/sUSDS!"),
        })
    }
}
