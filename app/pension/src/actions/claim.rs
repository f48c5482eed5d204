use alloy::primitives::Address;
use url::Url;

use super::WriteRequest;
use crate::constants::{RAMP_HOST_APP_NAME, UNDERLYING_SYMBOL};
use crate::contract::PensionContract;
use crate::dashboard::{Dashboard, Prepared};
use crate::error::DashboardError;
use crate::events::{Action, ActionOutcome, Level};
use crate::utils::time::Clock;

/// Parameters handed to the hosted fiat off-ramp widget (demo environment).
#[derive(Clone, Debug, PartialEq)]
pub struct OfframpRequest {
    pub host_app_name: String,
    pub swap_asset: String,
    pub fiat_currency: String,
    /// Estimated payout, two decimals.
    pub fiat_value: String,
    pub user_address: Address,
    pub api_url: String,
    pub widget_url: Url,
}

impl OfframpRequest {
    pub fn new(
        app_url: &str,
        api_url: &str,
        user_address: Address,
        estimated_monthly: f64,
    ) -> Result<Self, DashboardError> {
        let fiat_value = format!("{estimated_monthly:.2}");
        let user = user_address.to_string();
        let widget_url = Url::parse_with_params(
            app_url,
            &[
                ("hostAppName", RAMP_HOST_APP_NAME),
                ("swapAsset", UNDERLYING_SYMBOL),
                ("fiatCurrency", "USD"),
                ("fiatValue", fiat_value.as_str()),
                ("defaultFlow", "OFFRAMP"),
                ("userAddress", user.as_str()),
            ],
        )
        .map_err(|e| DashboardError::Config(format!("offramp_app_url: {e}")))?;

        Ok(Self {
            host_app_name: RAMP_HOST_APP_NAME.to_string(),
            swap_asset: UNDERLYING_SYMBOL.to_string(),
            fiat_currency: "USD".to_string(),
            fiat_value,
            user_address,
            api_url: api_url.to_string(),
            widget_url,
        })
    }
}

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    /// Claims every vested month not yet paid.
    pub async fn claim_monthly(&mut self) -> ActionOutcome {
        let prepared = self.prepare_claim().map(|(prepared, _)| prepared);
        self.execute(Action::ClaimMonthly, prepared).await
    }

    /// Claims, then opens the fiat off-ramp for the estimated payout.
    /// Refused while the estimate cannot be computed.
    pub async fn claim_and_offramp(&mut self) -> ActionOutcome {
        let prepared = self.prepare_claim().and_then(|(prepared, estimate)| {
            let estimate = estimate.ok_or(DashboardError::DataUnavailable)?;
            Ok((prepared, estimate))
        });
        let estimate = prepared.as_ref().map(|(_, est)| *est).unwrap_or(0.0);
        let outcome = self
            .execute(Action::ClaimAndOfframp, prepared.map(|(p, _)| Prepared {
                success: "Claimed + Offramp to bank opened!".to_string(),
                ..p
            }))
            .await;

        let (ActionOutcome::Submitted(_), Some(account)) = (&outcome, self.session.account()) else {
            return outcome;
        };
        match OfframpRequest::new(&self.offramp_app_url, &self.offramp_api_url, account, estimate) {
            Ok(req) => {
                self.announce(
                    Action::ClaimAndOfframp,
                    Level::Success,
                    format!("Open off-ramp: {}", req.widget_url),
                );
                self.last_offramp = Some(req);
            }
            Err(e) => {
                self.announce(Action::ClaimAndOfframp, Level::Error, e.to_string());
            }
        }
        outcome
    }

    /// Estimate is taken before the claim lands; the contract pays the exact amount.
    fn prepare_claim(&self) -> Result<(Prepared, Option<f64>), DashboardError> {
        self.session.require_account()?;
        let schedule = self.schedule();
        match schedule.claimable() {
            None => return Err(DashboardError::DataUnavailable),
            Some(0) => return Err(DashboardError::NothingClaimable),
            Some(_) => {}
        }
        let estimate = schedule.estimated_monthly;
        let success = match estimate {
            Some(est) => format!("Monthly pension claimed (~{est:.2} {UNDERLYING_SYMBOL})!"),
            None => "Monthly pension claimed!".to_string(),
        };
        Ok((
            Prepared {
                request: WriteRequest::ClaimMonthlyPension,
                clears: None,
                success,
            },
            estimate,
        ))
    }
}
