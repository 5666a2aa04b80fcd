//! Configuration management and environment setup
//!
//! Loads console configuration from a TOML file with environment variable
//! overrides: the RPC endpoint, the three contract addresses, and the
//! acting account. The signing key is only ever sourced from the
//! environment so it never lands in a config file.

use crate::types::error::{Error, Result};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Known deployment of the deposit token contract.
pub const DEFAULT_DEPOSIT_TOKEN: &str = "0xa292e6ba7317E3A240d401C782C6906621E6F820";
/// Known deployment of the reward token contract.
pub const DEFAULT_REWARD_TOKEN: &str = "0x3711B3D206CfdAf9a03BBd82e04C36Aa3761c391";
/// Known deployment of the staking vault contract.
pub const DEFAULT_STAKING: &str = "0x5BBb1166F884eC26DdaB9CAC37112DED0B008cCf";

/// Environment variable holding the acting account address.
pub const ACCOUNT_ENV: &str = "STAKING_ACCOUNT";
/// Environment variable holding the signing key for write operations.
pub const PRIVATE_KEY_ENV: &str = "STAKING_PRIVATE_KEY";
/// Environment variable overriding the RPC endpoint.
pub const RPC_URL_ENV: &str = "STAKING_RPC_URL";

/// Network connection settings.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
	pub rpc_url: String,
	pub chain_id: u64,
}

/// The three fixed contract addresses the console operates against.
#[derive(Debug, Clone, Copy)]
pub struct ContractAddresses {
	pub deposit_token: Address,
	pub reward_token: Address,
	pub staking: Address,
}

/// Central configuration for the staking console.
#[derive(Debug, Clone)]
pub struct Config {
	pub path: PathBuf,
	pub network: NetworkConfig,
	pub contracts: ContractAddresses,
	/// Acting account. Absent until configured; reads and writes are
	/// disabled without it, mirroring a disconnected wallet.
	pub account: Option<Address>,
	/// Token decimals used for amount conversion and display.
	pub decimals: u8,
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
	#[serde(default)]
	network: RawNetwork,
	#[serde(default)]
	contracts: RawContracts,
	#[serde(default)]
	account: RawAccount,
	#[serde(default)]
	token: RawToken,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawNetwork {
	rpc_url: Option<String>,
	chain_id: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawContracts {
	deposit_token: Option<String>,
	reward_token: Option<String>,
	staking: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawAccount {
	address: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawToken {
	decimals: Option<u8>,
}

impl Config {
	/// Load configuration from file path with environment variable support
	///
	/// Loads environment variables from a .env file if present, then reads
	/// and parses the configuration file. Missing sections fall back to the
	/// known deployment defaults.
	///
	/// # Errors
	/// Returns Error if the file is missing, malformed, or an address
	/// cannot be parsed
	pub fn load(path: &Path) -> Result<Self> {
		// Load .env file if it exists (ignore errors if not found)
		let _ = dotenvy::dotenv();

		if !path.exists() {
			return Err(Error::ConfigNotFound(path.to_path_buf()));
		}

		let contents = std::fs::read_to_string(path)?;
		let raw: RawConfig = toml::from_str(&contents)?;

		Self::from_raw(path.to_path_buf(), raw)
	}

	fn from_raw(path: PathBuf, raw: RawConfig) -> Result<Self> {
		let rpc_url = env::var(RPC_URL_ENV)
			.ok()
			.or(raw.network.rpc_url)
			.unwrap_or_else(|| "http://127.0.0.1:8545".to_string());

		let network = NetworkConfig {
			rpc_url,
			chain_id: raw.network.chain_id.unwrap_or(1),
		};

		let contracts = ContractAddresses {
			deposit_token: parse_address(
				raw.contracts
					.deposit_token
					.as_deref()
					.unwrap_or(DEFAULT_DEPOSIT_TOKEN),
			)?,
			reward_token: parse_address(
				raw.contracts
					.reward_token
					.as_deref()
					.unwrap_or(DEFAULT_REWARD_TOKEN),
			)?,
			staking: parse_address(raw.contracts.staking.as_deref().unwrap_or(DEFAULT_STAKING))?,
		};

		// Env var takes precedence over the config file for the account
		let account = match env::var(ACCOUNT_ENV).ok().or(raw.account.address) {
			Some(addr) => Some(parse_address(&addr)?),
			None => None,
		};

		Ok(Self {
			path,
			network,
			contracts,
			account,
			decimals: raw.token.decimals.unwrap_or(18),
		})
	}

	/// Build a signer for write operations from the environment.
	///
	/// # Errors
	/// Returns Error::InvalidPrivateKey if the key is absent or malformed
	pub fn signer(&self) -> Result<PrivateKeySigner> {
		let key = env::var(PRIVATE_KEY_ENV).map_err(|_| Error::InvalidPrivateKey)?;
		PrivateKeySigner::from_str(key.trim()).map_err(|_| Error::InvalidPrivateKey)
	}
}

impl Default for Config {
	fn default() -> Self {
		Self::from_raw(PathBuf::from("staking.toml"), RawConfig::default())
			.expect("default addresses are valid")
	}
}

/// Parse a 0x-prefixed hexadecimal address string.
pub fn parse_address(s: &str) -> Result<Address> {
	Address::from_str(s.trim()).map_err(|_| Error::InvalidAddress(s.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_parse() {
		let config = Config::default();
		assert_eq!(
			config.contracts.deposit_token,
			parse_address(DEFAULT_DEPOSIT_TOKEN).unwrap()
		);
		assert_eq!(config.network.chain_id, 1);
		assert_eq!(config.decimals, 18);
		assert!(config.account.is_none());
	}

	#[test]
	fn test_parse_config_file() {
		let raw: RawConfig = toml::from_str(
			r#"
			[network]
			rpc_url = "http://localhost:9999"
			chain_id = 31337

			[contracts]
			staking = "0x00000000000000000000000000000000000000aa"

			[account]
			address = "0x00000000000000000000000000000000000000bb"
			"#,
		)
		.unwrap();

		let config = Config::from_raw(PathBuf::from("test.toml"), raw).unwrap();
		assert_eq!(config.network.chain_id, 31337);
		assert_eq!(
			config.contracts.staking,
			parse_address("0x00000000000000000000000000000000000000aa").unwrap()
		);
		// Unset sections keep the known deployment
		assert_eq!(
			config.contracts.reward_token,
			parse_address(DEFAULT_REWARD_TOKEN).unwrap()
		);
	}

	#[test]
	fn test_invalid_address_rejected() {
		let raw: RawConfig = toml::from_str(
			r#"
			[contracts]
			staking = "not-an-address"
			"#,
		)
		.unwrap();

		assert!(Config::from_raw(PathBuf::from("test.toml"), raw).is_err());
	}
}
