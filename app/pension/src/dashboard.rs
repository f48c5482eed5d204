//! Vault view orchestration: session, reads, derived state, and the write pipeline
//! every action goes through (validate → pending → write → announce → refresh).

use alloy::primitives::{Address, U256};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

use crate::actions::{OfframpRequest, VirtualBankAccount, WriteRequest};
use crate::config::{DashboardConfig, YieldSource};
use crate::contract::PensionContract;
use crate::error::DashboardError;
use crate::events::{Action, ActionOutcome, Level, Notification};
use crate::schedule::DerivedSchedule;
use crate::state::{
    AccountSnapshot, ApprovalState, Controls, Field, FieldUpdate, FormField, FormState, PendingSlot,
};
use crate::utils::time::{Clock, SystemClock};

/// Wallet connection, owned by the external wallet layer and injected here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Address>,
}

impl Session {
    pub fn connected(account: Address) -> Self {
        Self { account: Some(account) }
    }

    pub fn disconnected() -> Self {
        Self { account: None }
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub(crate) fn require_account(&self) -> Result<Address, DashboardError> {
        self.account.ok_or(DashboardError::WalletNotConnected)
    }
}

/// A validated write, ready to submit.
pub(crate) struct Prepared {
    pub request: WriteRequest,
    /// Form field cleared once the write succeeds.
    pub clears: Option<FormField>,
    /// Success toast text; the transaction hash is appended.
    pub success: String,
}

pub struct Dashboard<C, K = SystemClock> {
    pub(crate) contract: C,
    pub(crate) clock: K,
    pub(crate) session: Session,
    pub(crate) yield_sources: Vec<YieldSource>,
    pub(crate) offramp_app_url: String,
    pub(crate) offramp_api_url: String,
    pub form: FormState,
    pub(crate) snapshot: AccountSnapshot,
    pub(crate) pending: PendingSlot,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) last_offramp: Option<OfframpRequest>,
    pub(crate) bank_accounts: Vec<VirtualBankAccount>,
}

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    pub fn new(contract: C, clock: K, config: &DashboardConfig) -> Self {
        Self {
            contract,
            clock,
            session: Session::disconnected(),
            yield_sources: config.yield_vaults.clone(),
            offramp_app_url: config.offramp_app_url.clone(),
            offramp_api_url: config.offramp_api_url.clone(),
            form: FormState::default(),
            snapshot: AccountSnapshot::disconnected(&config.yield_vaults),
            pending: PendingSlot::new(),
            notifications: Vec::new(),
            last_offramp: None,
            bank_accounts: Vec::new(),
        }
    }

    /// Swaps the injected session. The old account's snapshot is dropped immediately.
    pub fn set_session(&mut self, session: Session) {
        if session == self.session {
            return;
        }
        self.session = session;
        self.snapshot = match session.account() {
            Some(account) => AccountSnapshot::loading(account, &self.yield_sources),
            None => AccountSnapshot::disconnected(&self.yield_sources),
        };
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }

    pub fn snapshot(&self) -> &AccountSnapshot {
        &self.snapshot
    }

    pub fn now_ts(&self) -> i64 {
        self.clock.now_ts()
    }

    /// Recomputed from the latest snapshot on every call.
    pub fn schedule(&self) -> DerivedSchedule {
        DerivedSchedule::derive(&self.snapshot, self.now_ts())
    }

    pub fn approval_state(&self) -> ApprovalState {
        ApprovalState::from_snapshot(&self.snapshot)
    }

    pub fn controls(&self) -> Controls {
        Controls::derive(&self.snapshot, &self.schedule(), &self.form, self.pending.is_pending())
    }

    /// Shared handle on the in-flight write.
    pub fn pending(&self) -> &PendingSlot {
        &self.pending
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn last_offramp(&self) -> Option<&OfframpRequest> {
        self.last_offramp.as_ref()
    }

    pub fn bank_accounts(&self) -> &[VirtualBankAccount] {
        &self.bank_accounts
    }

    pub async fn refresh(&mut self) {
        self.refresh_with(|_| {}).await
    }

    /// Re-reads every field. Reads run concurrently and land one by one;
    /// `on_update` sees each partial snapshot. Skipped entirely without a wallet.
    pub async fn refresh_with<F>(&mut self, mut on_update: F)
    where
        F: FnMut(&AccountSnapshot),
    {
        let Some(account) = self.session.account() else {
            self.snapshot = AccountSnapshot::disconnected(&self.yield_sources);
            on_update(&self.snapshot);
            return;
        };

        let mut snapshot = AccountSnapshot::loading(account, &self.yield_sources);
        on_update(&snapshot);

        let contract = &self.contract;
        let vault = contract.vault_address();
        let mut reads: FuturesUnordered<LocalBoxFuture<'_, FieldUpdate>> = FuturesUnordered::new();

        reads.push(
            async move { FieldUpdate::ShareBalance(field("balanceOf", contract.share_balance(account).await)) }
                .boxed_local(),
        );
        reads.push(
            async move {
                FieldUpdate::TotalDeposited(field("totalDeposited", contract.total_deposited(account).await))
            }
            .boxed_local(),
        );
        reads.push(
            async move {
                FieldUpdate::DepositTimestamp(field(
                    "depositTimestamps",
                    contract.deposit_timestamp(account).await,
                ))
            }
            .boxed_local(),
        );
        reads.push(
            async move { FieldUpdate::Beneficiary(field("beneficiaries", contract.beneficiary(account).await)) }
                .boxed_local(),
        );
        reads.push(
            async move {
                FieldUpdate::ClaimedMonths(field("claimedMonths", contract.claimed_months(account).await))
            }
            .boxed_local(),
        );
        reads.push(
            async move {
                FieldUpdate::UnderlyingBalance(field(
                    "underlying balanceOf",
                    contract.underlying_balance(account).await,
                ))
            }
            .boxed_local(),
        );
        reads.push(
            async move {
                FieldUpdate::UnderlyingAllowance(field(
                    "allowance",
                    contract.underlying_allowance(account, vault).await,
                ))
            }
            .boxed_local(),
        );
        for (idx, source) in self.yield_sources.iter().enumerate() {
            let sub_vault = source.address;
            reads.push(
                async move {
                    FieldUpdate::YieldAssets(idx, field("convertToAssets", yield_assets(contract, sub_vault, account).await))
                }
                .boxed_local(),
            );
        }

        while let Some(update) = reads.next().await {
            snapshot.apply(update);
            on_update(&snapshot);
        }
        drop(reads);
        self.snapshot = snapshot;
    }

    pub(crate) async fn execute(
        &mut self,
        action: Action,
        prepared: Result<Prepared, DashboardError>,
    ) -> ActionOutcome {
        if self.pending.is_pending() {
            return self.reject(action, DashboardError::ActionPending);
        }
        let prepared = match prepared {
            Ok(p) => p,
            Err(e) => return self.reject(action, e),
        };
        let guard = match self.pending.begin(prepared.request.pending_call()) {
            Ok(g) => g,
            Err(e) => return self.reject(action, e),
        };
        info!(%action, call = %prepared.request.pending_call(), "submitting");
        let result = prepared.request.submit(&self.contract).await;
        drop(guard);

        match result {
            Ok(hash) => {
                if let Some(field) = prepared.clears {
                    self.form.clear(field);
                }
                self.announce(action, Level::Success, format!("{} Tx: {hash}", prepared.success));
                self.refresh().await;
                ActionOutcome::Submitted(hash)
            }
            Err(e) => self.reject(action, e),
        }
    }

    pub(crate) fn reject(&mut self, action: Action, err: DashboardError) -> ActionOutcome {
        self.announce(action, Level::Error, err.to_string());
        ActionOutcome::Rejected(err)
    }

    pub(crate) fn announce(&mut self, action: Action, level: Level, message: String) {
        match level {
            Level::Success => info!(%action, %message, "action succeeded"),
            Level::Error => warn!(%action, %message, "action failed"),
        }
        self.notifications.push(Notification { level, action, message });
    }

    /// Underlying balance used by the amount predicate; zero until read.
    pub(crate) fn underlying_balance(&self) -> U256 {
        self.snapshot.underlying_balance.ready_or(U256::ZERO)
    }
}

/// Assets behind the account's strategy shares in one sub-vault. No conversion call for zero shares.
async fn yield_assets<C: PensionContract>(
    contract: &C,
    sub_vault: Address,
    account: Address,
) -> Result<U256, DashboardError> {
    let shares = contract.share_balance(account).await?;
    if shares.is_zero() {
        return Ok(U256::ZERO);
    }
    contract.convert_shares_to_assets(sub_vault, shares).await
}

fn field<T>(name: &str, result: Result<T, DashboardError>) -> Field<T> {
    match result {
        Ok(v) => Field::Ready(v),
        Err(e) => {
            warn!(read = name, error = %e, "read failed");
            Field::Failed(e.to_string())
        }
    }
}
