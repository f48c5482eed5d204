use std::path::PathBuf;
use std::process::ExitCode;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use pension_dashboard::state::FormField;
use pension_dashboard::utils::time::SystemClock;
use pension_dashboard::utils::units::parse_address;
use pension_dashboard::views::{self, Route};
use pension_dashboard::{
    ActionOutcome, AlloyPensionContract, Dashboard, DashboardConfig, DashboardError, Session,
};

#[derive(Parser, Debug)]
#[command(name = "pension", about = "Onchain pension vault dashboard")]
struct Cli {
    /// TOML file overriding the built-in deployment defaults.
    #[arg(long, env = "PENSION_CONFIG")]
    config: Option<PathBuf>,

    /// Hex private key of the connected wallet. Required for writes.
    #[arg(long, env = "PENSION_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Watch an account read-only (ignored when a private key is set).
    #[arg(long)]
    account: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing page.
    Home,
    /// Project background.
    About,
    /// Vault stats and available actions.
    Status,
    /// Approve the strategy to pull DAI.
    Approve,
    Deposit { amount: String },
    Withdraw { amount: String },
    SetBeneficiary { address: String },
    ClaimAsBeneficiary { owner: String },
    /// Claim every vested month.
    Claim,
    /// Claim, then open the fiat off-ramp.
    ClaimOfframp,
    /// Create a demo virtual US bank account.
    VirtualBank,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "pension dashboard failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, DashboardError> {
    match cli.command {
        Command::Home => {
            print!("{}", views::render_home());
            return Ok(ExitCode::SUCCESS);
        }
        Command::About => {
            print!("{}", views::render_about());
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = DashboardConfig::load(cli.config.as_deref())?;
    if config.vault_is_placeholder() {
        warn!("vault_address is the zero placeholder; set it in the config file");
    }
    let rpc_url = Url::parse(&config.rpc_url).map_err(|e| DashboardError::Config(format!("rpc_url: {e}")))?;

    match cli.private_key.as_deref() {
        Some(key) => {
            let signer: PrivateKeySigner = key
                .trim()
                .parse()
                .map_err(|_| DashboardError::Config("invalid private key".to_string()))?;
            let account = signer.address();
            let provider = ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_http(rpc_url);
            drive(provider, &config, Session::connected(account), cli.command).await
        }
        None => {
            let session = match cli.account.as_deref() {
                Some(text) => Session::connected(parse_address(text)?),
                None => Session::disconnected(),
            };
            let provider = ProviderBuilder::new().connect_http(rpc_url);
            drive(provider, &config, session, cli.command).await
        }
    }
}

async fn drive<P: Provider + Clone>(
    provider: P,
    config: &DashboardConfig,
    session: Session,
    command: Command,
) -> Result<ExitCode, DashboardError> {
    match provider.get_chain_id().await {
        Ok(id) if id != config.chain_id => {
            warn!(expected = config.chain_id, actual = id, "connected to an unexpected chain")
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "could not read chain id"),
    }

    let contract = AlloyPensionContract::from_config(provider, config);
    let mut dash = Dashboard::new(contract, SystemClock, config);
    dash.set_session(session);
    info!(account = ?session.account().unwrap_or(Address::ZERO), "session ready");
    dash.refresh().await;

    let outcome = match command {
        Command::Home | Command::About | Command::Status => None,
        Command::Approve => Some(dash.approve().await),
        Command::Deposit { amount } => {
            dash.form.set(FormField::DepositAmount, amount);
            Some(dash.deposit().await)
        }
        Command::Withdraw { amount } => {
            dash.form.set(FormField::WithdrawAmount, amount);
            Some(dash.withdraw().await)
        }
        Command::SetBeneficiary { address } => {
            dash.form.set(FormField::BeneficiaryAddress, address);
            Some(dash.set_beneficiary().await)
        }
        Command::ClaimAsBeneficiary { owner } => {
            dash.form.set(FormField::ClaimOwnerAddress, owner);
            Some(dash.claim_as_beneficiary().await)
        }
        Command::Claim => Some(dash.claim_monthly().await),
        Command::ClaimOfframp => Some(dash.claim_and_offramp().await),
        Command::VirtualBank => Some(dash.create_virtual_bank_account()),
    };

    for note in dash.drain_notifications() {
        println!("{note}");
    }
    println!();
    print!("{}", views::render(Route::Vault, &dash));

    Ok(match outcome {
        Some(ActionOutcome::Rejected(_)) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
