use super::WriteRequest;
use crate::constants::UNDERLYING_SYMBOL;
use crate::contract::PensionContract;
use crate::dashboard::{Dashboard, Prepared};
use crate::error::DashboardError;
use crate::events::{Action, ActionOutcome};
use crate::state::FormField;
use crate::utils::time::Clock;
use crate::utils::units::{is_valid_amount, parse_amount};

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    /// Withdraws to the connected account. Refused client-side while the initial lock runs.
    pub async fn withdraw(&mut self) -> ActionOutcome {
        let prepared = self.prepare_withdraw();
        self.execute(Action::Withdraw, prepared).await
    }

    fn prepare_withdraw(&self) -> Result<Prepared, DashboardError> {
        let account = self.session.require_account()?;
        match self.schedule().is_locked {
            Some(false) => {}
            Some(true) => return Err(DashboardError::VestingLocked),
            None => return Err(DashboardError::DataUnavailable),
        }
        // same predicate as deposits: bounded by the wallet's underlying balance
        let text = &self.form.withdraw_amount;
        if !is_valid_amount(text, self.underlying_balance()) {
            return Err(DashboardError::InvalidAmount);
        }
        Ok(Prepared {
            request: WriteRequest::Withdraw {
                amount: parse_amount(text)?,
                receiver: account,
                owner: account,
            },
            clears: Some(FormField::WithdrawAmount),
            success: format!("Withdrawn {UNDERLYING_SYMBOL}!"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{connected, human, user, NOW};
    use crate::config::DashboardConfig;
    use crate::constants::SECONDS_PER_DAY;
    use crate::contract::mock::{MockAccount, MockPensionContract};
    use crate::dashboard::Session;
    use crate::utils::time::FixedClock;

    fn position(deposit_ts: u64) -> MockAccount {
        MockAccount {
            underlying: human(100),
            shares: human(100),
            total_deposited: human(100),
            deposit_ts,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn locked_withdraw_never_reaches_contract() {
        let mut dash = connected(position(NOW as u64 - 10 * SECONDS_PER_DAY as u64)).await;
        dash.form.set(FormField::WithdrawAmount, "5");
        assert_eq!(dash.withdraw().await, ActionOutcome::Rejected(DashboardError::VestingLocked));
        assert_eq!(dash.notifications().last().unwrap().message, "Vesting locked");
        assert!(!dash.contract().calls().contains(&"withdraw".to_string()));
        assert_eq!(dash.form.withdraw_amount, "5");
    }

    #[tokio::test]
    async fn unlocked_withdraw_submits_and_clears() {
        let mut dash = connected(position(NOW as u64 - 31 * SECONDS_PER_DAY as u64)).await;
        dash.form.set(FormField::WithdrawAmount, "5");
        assert!(dash.withdraw().await.tx_hash().is_some());
        assert_eq!(dash.form.withdraw_amount, "");
        assert_eq!(dash.snapshot().share_balance.ready(), Some(&human(95)));
        assert_eq!(dash.snapshot().underlying_balance.ready(), Some(&human(105)));
    }

    #[tokio::test]
    async fn unknown_lock_state_refuses_withdraw() {
        let contract = MockPensionContract::new(user(), NOW)
            .with_account(user(), position(NOW as u64 - 31 * SECONDS_PER_DAY as u64));
        contract.failing_reads.borrow_mut().insert("depositTimestamps");
        let mut dash = Dashboard::new(contract, FixedClock(NOW), &DashboardConfig::default());
        dash.set_session(Session::connected(user()));
        dash.refresh().await;

        dash.form.set(FormField::WithdrawAmount, "5");
        assert_eq!(dash.withdraw().await, ActionOutcome::Rejected(DashboardError::DataUnavailable));
        assert!(!dash.contract().calls().contains(&"withdraw".to_string()));
    }

    #[tokio::test]
    async fn invalid_amount_rejected() {
        let mut dash = connected(position(NOW as u64 - 31 * SECONDS_PER_DAY as u64)).await;
        dash.form.set(FormField::WithdrawAmount, "0");
        assert_eq!(dash.withdraw().await, ActionOutcome::Rejected(DashboardError::InvalidAmount));
    }
}
