//! Plain-text renders of the three routes.

use std::fmt::{self, Write};

use alloy::primitives::U256;

use crate::constants::{BENEFICIARY_INACTIVITY_DAYS, UNDERLYING_SYMBOL, VESTING_MONTHS};
use crate::contract::PensionContract;
use crate::dashboard::Dashboard;
use crate::state::{Controls, Field};
use crate::utils::time::{format_utc, Clock};
use crate::utils::units::format_amount;

const LOADING: &str = "…";
const UNAVAILABLE: &str = "unavailable";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Vault,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Vault => "/pension",
        })
    }
}

pub fn render<C: PensionContract, K: Clock>(route: Route, dash: &Dashboard<C, K>) -> String {
    match route {
        Route::Home => render_home(),
        Route::About => render_about(),
        Route::Vault => render_vault(dash),
    }
}

pub fn render_home() -> String {
    format!(
        "Onchain Pension Fund\n\
         \n\
         1. Connect wallet. Sepolia by default, mainnet compatible.\n\
         2. Deposit {UNDERLYING_SYMBOL}. Approve once, then deposit. Funds lock for 30 days,\n   \
            then vest over {VESTING_MONTHS} monthly claims. Yield from sDAI and sUSDS.\n\
         3. Set a beneficiary. They may claim after {BENEFICIARY_INACTIVITY_DAYS} days of inactivity.\n\
         4. Claim monthly: principal plus 99% of yield, 1% fee to management.\n\
         5. Off-ramp: claim and convert to USD in one step via Ramp.\n\
         6. Yield donation: excess yield funds public goods.\n\
         \n\
         Run `pension status` to open the vault, `pension about` for details.\n"
    )
}

pub fn render_about() -> String {
    format!(
        "About Onchain Pension Fund\n\
         \n\
         A decentralized pension administrator built on yield donating vaults.\n\
         \n\
         - Permissionless: anyone can deposit {UNDERLYING_SYMBOL}, no intermediaries.\n\
         - Transparent yield: deposits are split across ERC-4626 savings vaults.\n\
         - Vesting: withdrawals locked for 30 days; {VESTING_MONTHS} monthly claims afterwards.\n\
         - Inheritance: a beneficiary can claim after {BENEFICIARY_INACTIVITY_DAYS} days of owner inactivity.\n\
         - Public goods: excess yield is donated to a configurable DAO multisig.\n\
         - Fees: 1% on yield only.\n\
         \n\
         All rules are enforced by the strategy contract. This client only reads\n\
         state, estimates payouts, and submits transactions.\n"
    )
}

fn amount(field: &Field<U256>) -> String {
    match field {
        Field::Ready(v) => format_amount(*v),
        Field::Loading => LOADING.to_string(),
        Field::Failed(_) => UNAVAILABLE.to_string(),
        Field::Idle => "0".to_string(),
    }
}

/// A derived figure, or the marker for why it is missing.
fn figure(value: Option<String>, input_failed: bool) -> String {
    match value {
        Some(v) => v,
        None if input_failed => UNAVAILABLE.to_string(),
        None => LOADING.to_string(),
    }
}

fn mark(enabled: bool) -> char {
    if enabled {
        'x'
    } else {
        ' '
    }
}

/// Vault stats, the in-flight call, and which controls are live.
pub fn render_vault<C: PensionContract, K: Clock>(dash: &Dashboard<C, K>) -> String {
    let mut out = String::from("Onchain Pension Fund\nMonthly claims + one-click bank offramp + virtual accounts\n\n");
    let snap = dash.snapshot();

    if !dash.session().is_connected() {
        out.push_str("Connect wallet to see stats\n");
    } else {
        let schedule = dash.schedule();
        let _ = writeln!(out, "Account: {}", snap.address);
        let _ = writeln!(out, "Your Shares: {}", amount(&snap.share_balance));
        let _ = writeln!(out, "Total Deposited: {}", amount(&snap.total_deposited));
        let _ = writeln!(out, "{UNDERLYING_SYMBOL} Balance: {}", amount(&snap.underlying_balance));
        let _ = writeln!(out, "{UNDERLYING_SYMBOL} Allowance: {}", amount(&snap.underlying_allowance));
        for pos in &snap.yield_positions {
            let _ = writeln!(out, "{} Yield Estimate: {}", pos.name, amount(&pos.assets));
        }

        let yield_failed = snap.yield_positions.iter().any(|p| p.assets.is_failed());
        let total_yield = schedule.estimated_yield.map(|y| format!("~{y:.2}"));
        let _ = writeln!(out, "Total Yield Estimate: {}", figure(total_yield, yield_failed));

        let lock_failed = snap.deposit_timestamp.is_failed();
        let lock = match (schedule.is_locked, schedule.lock_end_ts) {
            (Some(true), Some(end)) => Some(format!("Locked until ~{}", format_utc(end))),
            (Some(_), _) => Some("Unlocked".to_string()),
            (None, _) => None,
        };
        let _ = writeln!(out, "Vesting Lock: {}", figure(lock, lock_failed));

        let months_failed = lock_failed || snap.claimed_months.is_failed();
        let claimable = schedule.claimable().map(|n| n.to_string());
        let _ = writeln!(out, "Claimable Months: {}", figure(claimable, months_failed));

        let estimate_failed = months_failed || snap.total_deposited.is_failed();
        let monthly = schedule.estimated_monthly.map(|m| format!("~${m:.2}"));
        let _ = writeln!(out, "Estimated Monthly: {}", figure(monthly, estimate_failed));

        let beneficiary = match &snap.beneficiary {
            Field::Ready(Some(b)) => b.to_string(),
            Field::Ready(None) | Field::Idle => "None".to_string(),
            Field::Loading => LOADING.to_string(),
            Field::Failed(_) => UNAVAILABLE.to_string(),
        };
        let _ = writeln!(out, "Current Beneficiary: {beneficiary}");
    }

    if let Some(call) = dash.pending().current() {
        let _ = writeln!(out, "\nPending: {call}");
    }

    out.push('\n');
    render_controls(&mut out, &dash.controls(), dash.schedule().estimated_monthly);
    out
}

fn render_controls(out: &mut String, c: &Controls, estimated_monthly: Option<f64>) {
    out.push_str("Actions:\n");
    if c.approve_visible {
        let _ = writeln!(out, "  [{}] approve             Approve {UNDERLYING_SYMBOL}", mark(c.approve_enabled));
    }
    let rows = [
        (c.deposit_enabled, "deposit <amount>", "Deposit & Start Vesting (to sDAI/sUSDS)".to_string()),
        (c.withdraw_enabled, "withdraw <amount>", "Withdraw".to_string()),
        (
            c.claim_enabled,
            "claim",
            match estimated_monthly {
                Some(est) => format!("Claim Monthly Pension (~${est:.2} {UNDERLYING_SYMBOL})"),
                None => "Claim Monthly Pension".to_string(),
            },
        ),
        (c.offramp_enabled, "claim-offramp", "Claim + Offramp to Bank".to_string()),
        (c.virtual_bank_enabled, "virtual-bank", "Create Virtual US Bank Account (demo)".to_string()),
        (c.set_beneficiary_enabled, "set-beneficiary <addr>", "Set Beneficiary".to_string()),
        (c.claim_as_beneficiary_enabled, "claim-as-beneficiary <owner>", "Claim as Beneficiary".to_string()),
    ];
    for (enabled, command, label) in rows {
        let _ = writeln!(out, "  [{}] {command:<20} {label}", mark(enabled));
    }
}
