use thiserror::Error;

use crate::constants::MAX_ERROR_MESSAGE_LEN;

/// Errors surfaced by the dashboard. Every action converts these into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Connect wallet")]
    WalletNotConnected,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid address")]
    InvalidAddress,

    #[error("Vesting locked")]
    VestingLocked,

    #[error("No monthly claimable")]
    NothingClaimable,

    #[error("Approve DAI before depositing")]
    ApprovalRequired,

    #[error("Another transaction is pending")]
    ActionPending,

    /// A figure the action depends on is still loading or its read failed.
    #[error("Vault data unavailable, refresh and retry")]
    DataUnavailable,

    #[error("{0}")]
    ExternalCallFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// Builds an `ExternalCallFailed` from a raw transport or revert message.
    /// Falls back to `fallback` when the message is blank.
    pub fn external(message: &str, fallback: &str) -> Self {
        DashboardError::ExternalCallFailed(short_message(message, fallback))
    }
}

/// First line of `message`, capped at `MAX_ERROR_MESSAGE_LEN` chars.
pub fn short_message(message: &str, fallback: &str) -> String {
    let line = message.lines().map(str::trim).find(|l| !l.is_empty());
    match line {
        None => fallback.to_string(),
        Some(l) if l.chars().count() > MAX_ERROR_MESSAGE_LEN => {
            let mut s: String = l.chars().take(MAX_ERROR_MESSAGE_LEN - 3).collect();
            s.push_str("...");
            s
        }
        Some(l) => l.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_keeps_first_line() {
        let msg = "execution reverted: Locked\nRequest body: {...}";
        assert_eq!(short_message(msg, "Deposit failed"), "execution reverted: Locked");
    }

    #[test]
    fn short_message_falls_back_when_blank() {
        assert_eq!(short_message("  \n ", "Withdraw failed"), "Withdraw failed");
        assert_eq!(
            DashboardError::external("", "Claim failed"),
            DashboardError::ExternalCallFailed("Claim failed".into())
        );
    }

    #[test]
    fn short_message_truncates_long_reasons() {
        let long = "x".repeat(500);
        let s = short_message(&long, "fallback");
        assert_eq!(s.chars().count(), MAX_ERROR_MESSAGE_LEN);
        assert!(s.ends_with("..."));
    }
}
