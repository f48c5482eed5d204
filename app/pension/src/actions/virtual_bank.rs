//! Demo-only "virtual US bank account". Nothing leaves the process: the numbers
//! are fabricated locally and are not a banking integration.

use alloy::primitives::Address;

use crate::constants::{DEMO_ACCOUNT_PREFIX, DEMO_ROUTING_NUMBER};
use crate::contract::PensionContract;
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::events::{Action, ActionOutcome, Level};
use crate::utils::time::Clock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualBankAccount {
    pub owner: Address,
    pub routing_number: String,
    pub account_number: String,
}

impl VirtualBankAccount {
    /// Account suffix is derived from the owner and a per-session counter.
    pub fn fabricate(owner: Address, nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(owner.as_slice());
        hasher.update(&nonce.to_le_bytes());
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        let suffix = u64::from_le_bytes(head) % 1000;

        Self {
            owner,
            routing_number: DEMO_ROUTING_NUMBER.to_string(),
            account_number: format!("{DEMO_ACCOUNT_PREFIX}{suffix:03}"),
        }
    }
}

impl<C: PensionContract, K: Clock> Dashboard<C, K> {
    /// No contract call, but still held back while a write is pending.
    pub fn create_virtual_bank_account(&mut self) -> ActionOutcome {
        let action = Action::CreateVirtualBankAccount;
        if self.pending.is_pending() {
            return self.reject(action, DashboardError::ActionPending);
        }
        let owner = match self.session.require_account() {
            Ok(a) => a,
            Err(e) => return self.reject(action, e),
        };

        let account = VirtualBankAccount::fabricate(owner, self.bank_accounts.len() as u64);
        self.announce(
            action,
            Level::Success,
            format!(
                "Virtual US bank account created (demo mode)!\nRouting: {}\nAccount: {}\nSaved for Ramp offramps.",
                account.routing_number, account.account_number
            ),
        );
        self.bank_accounts.push(account);
        ActionOutcome::Completed
    }
}
