//! Runtime configuration. Defaults come from `constants`; a TOML file may override them.
//!
//! ```toml
//! rpc_url = "https://ethereum-sepolia-rpc.publicnode.com"
//! chain_id = 11155111
//! vault_address = "0x..."
//! underlying_address = "0x6B175474E89094C44Da98b954EedeAC495271d0F"
//!
//! [[yield_vaults]]
//! name = "sDAI"
//! address = "0x83F20F44975D03b1b09e64809B757c47f942BEeA"
//! ```

use std::path::Path;

use alloy::primitives::Address;
use serde::Deserialize;

use crate::constants::{
    DAI_ADDRESS, DEFAULT_CHAIN_ID, DEFAULT_RPC_URL, RAMP_DEMO_API_URL, RAMP_DEMO_APP_URL,
    SDAI_ADDRESS, STRATEGY_ADDRESS, SUSDS_ADDRESS,
};
use crate::error::DashboardError;
use crate::utils::units::parse_address;

/// A yield-bearing sub-vault the strategy routes deposits into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YieldSource {
    pub name: String,
    pub address: Address,
}

impl YieldSource {
    pub fn new(name: &str, address: Address) -> Self {
        Self { name: name.to_string(), address }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub vault_address: Address,
    pub underlying_address: Address,
    pub yield_vaults: Vec<YieldSource>,
    pub offramp_app_url: String,
    pub offramp_api_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            vault_address: STRATEGY_ADDRESS,
            underlying_address: DAI_ADDRESS,
            yield_vaults: vec![
                YieldSource::new("sDAI", SDAI_ADDRESS),
                YieldSource::new("sUSDS", SUSDS_ADDRESS),
            ],
            offramp_app_url: RAMP_DEMO_APP_URL.to_string(),
            offramp_api_url: RAMP_DEMO_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rpc_url: Option<String>,
    chain_id: Option<u64>,
    vault_address: Option<String>,
    underlying_address: Option<String>,
    yield_vaults: Option<Vec<YieldVaultEntry>>,
    offramp_app_url: Option<String>,
    offramp_api_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YieldVaultEntry {
    name: String,
    address: String,
}

impl DashboardConfig {
    /// Reads `path` if given, otherwise returns the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        match path {
            None => Ok(Self::default()),
            Some(p) => {
                let text = std::fs::read_to_string(p)
                    .map_err(|e| DashboardError::Config(format!("{}: {e}", p.display())))?;
                Self::from_toml_str(&text)
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, DashboardError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| DashboardError::Config(e.message().to_string()))?;
        let mut cfg = Self::default();

        if let Some(url) = file.rpc_url {
            cfg.rpc_url = url;
        }
        if let Some(id) = file.chain_id {
            cfg.chain_id = id;
        }
        if let Some(a) = file.vault_address {
            cfg.vault_address = config_address("vault_address", &a)?;
        }
        if let Some(a) = file.underlying_address {
            cfg.underlying_address = config_address("underlying_address", &a)?;
        }
        if let Some(entries) = file.yield_vaults {
            cfg.yield_vaults = entries
                .into_iter()
                .map(|e| Ok(YieldSource { address: config_address(&e.name, &e.address)?, name: e.name }))
                .collect::<Result<_, DashboardError>>()?;
        }
        if let Some(url) = file.offramp_app_url {
            cfg.offramp_app_url = url;
        }
        if let Some(url) = file.offramp_api_url {
            cfg.offramp_api_url = url;
        }
        Ok(cfg)
    }

    /// True until a real strategy address is configured.
    pub fn vault_is_placeholder(&self) -> bool {
        self.vault_address == Address::ZERO
    }
}

fn config_address(key: &str, text: &str) -> Result<Address, DashboardError> {
    parse_address(text).map_err(|_| DashboardError::Config(format!("{key}: invalid address {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.yield_vaults.len(), 2);
        assert!(cfg.vault_is_placeholder());
    }

    #[test]
    fn overrides_apply() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            rpc_url = "http://localhost:8545"
            chain_id = 31337
            vault_address = "0x1111111111111111111111111111111111111111"

            [[yield_vaults]]
            name = "sDAI"
            address = "0x83F20F44975D03b1b09e64809B757c47f942BEeA"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rpc_url, "http://localhost:8545");
        assert_eq!(cfg.chain_id, 31337);
        assert_eq!(cfg.vault_address, Address::repeat_byte(0x11));
        assert_eq!(cfg.yield_vaults, vec![YieldSource::new("sDAI", SDAI_ADDRESS)]);
        assert_eq!(cfg.underlying_address, DAI_ADDRESS);
    }

    #[test]
    fn default_addresses_load_back_from_toml() {
        let defaults = DashboardConfig::default();
        let mut text = format!(
            "vault_address = \"{}\"\nunderlying_address = \"{}\"\n",
            defaults.vault_address.to_checksum(None),
            defaults.underlying_address.to_checksum(None),
        );
        for source in &defaults.yield_vaults {
            text.push_str(&format!(
                "[[yield_vaults]]\nname = \"{}\"\naddress = \"{}\"\n",
                source.name,
                source.address.to_checksum(None),
            ));
        }
        assert_eq!(DashboardConfig::from_toml_str(&text).unwrap(), defaults);
    }

    #[test]
    fn documented_example_loads() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            rpc_url = "https://ethereum-sepolia-rpc.publicnode.com"
            chain_id = 11155111
            underlying_address = "0x6B175474E89094C44Da98b954EedeAC495271d0F"

            [[yield_vaults]]
            name = "sDAI"
            address = "0x83F20F44975D03b1b09e64809B757c47f942BEeA"

            [[yield_vaults]]
            name = "sUSDS"
            address = "0xa3931d71877C0E7a3148CB7Eb4463524FEc27fbD"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.yield_vaults, DashboardConfig::default().yield_vaults);
    }

    #[test]
    fn bad_address_is_config_error() {
        let err = DashboardConfig::from_toml_str(r#"vault_address = "0x1234""#).unwrap_err();
        assert!(matches!(err, DashboardError::Config(m) if m.contains("vault_address")));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(DashboardConfig::from_toml_str("rpc = \"x\"").is_err());
    }
}
