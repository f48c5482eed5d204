//! Client-wide constants for the pension vault deployment.

use alloy::primitives::{address, Address};

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days in one vesting month. The contract counts fixed 30-day months, not calendar months.
pub const DAYS_PER_MONTH: i64 = 30;

/// Seconds in one vesting month.
pub const MONTH_SECS: i64 = DAYS_PER_MONTH * SECONDS_PER_DAY;

/// Initial lock after a deposit (one vesting month).
pub const LOCK_DURATION_SECS: i64 = MONTH_SECS;

/// Monthly claims over the full pension (30 years).
pub const VESTING_MONTHS: u32 = 360;

/// Inactivity period before a beneficiary may claim.
pub const BENEFICIARY_INACTIVITY_DAYS: u32 = 365;

/// Decimals of the underlying token and of vault shares.
pub const TOKEN_DECIMALS: u8 = 18;

/// Display symbol of the underlying token.
pub const UNDERLYING_SYMBOL: &str = "DAI";

/// Human-unit amount granted by the approve action.
pub const APPROVAL_AMOUNT: &str = "1000000";

/// Sentinel used when no wallet is connected.
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Pension strategy (vault) contract. Placeholder until deployment.
pub const STRATEGY_ADDRESS: Address = address!("0x0000000000000000000000000000000000000000");

/// DAI on mainnet, the strategy's underlying asset.
pub const DAI_ADDRESS: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");

/// Savings DAI yield sub-vault.
pub const SDAI_ADDRESS: Address = address!("0x83F20F44975D03b1b09e64809B757c47f942BEeA");

/// Savings USDS yield sub-vault.
pub const SUSDS_ADDRESS: Address = address!("0xa3931d71877C0E7a3148CB7Eb4463524FEc27fbD");

/// Default RPC endpoint (Sepolia public node).
pub const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Sepolia chain id.
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

/// Ramp demo environment used for fiat off-ramps.
pub const RAMP_DEMO_APP_URL: &str = "https://app.demo.rampnetwork.com/";
pub const RAMP_DEMO_API_URL: &str = "https://api.demo.rampnetwork.com/api";
pub const RAMP_HOST_APP_NAME: &str = "Onchain Pension";

/// Routing number handed out by the demo virtual bank.
pub const DEMO_ROUTING_NUMBER: &str = "021000021";
pub const DEMO_ACCOUNT_PREFIX: &str = "123456789";

/// Max length of an external error message shown to the user.
pub const MAX_ERROR_MESSAGE_LEN: usize = 160;
