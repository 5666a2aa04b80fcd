//! Core application services
//!
//! Contains the building blocks of the console: the blockchain provider,
//! contract ABI registry, configuration, the event bus, and the shared
//! application context that ties them together.

pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod events;
pub mod logging;

pub use blockchain::{Provider, TxBuilder};
pub use config::Config;
pub use contracts::Contracts;
pub use events::{BalanceSource, EventBus, StakingEvent};

use crate::types::error::{Error, Result};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use std::path::Path;
use tokio::sync::OnceCell;

/// Shared application context
///
/// Holds configuration, the contract registry, and the event bus, and
/// lazily establishes the RPC connection on first use so commands that
/// never touch the chain do not require a reachable endpoint.
pub struct Context {
	pub config: Config,
	pub contracts: Contracts,
	pub events: EventBus,
	provider: OnceCell<Provider>,
}

impl Context {
	/// Create a context from an already-loaded configuration
	pub fn new(config: Config) -> Self {
		Self {
			config,
			contracts: Contracts::new(),
			events: EventBus::new(64),
			provider: OnceCell::new(),
		}
	}

	/// Load configuration from the given path and build a context
	///
	/// # Errors
	/// Returns Error if the configuration cannot be loaded
	pub fn load(path: &Path) -> Result<Self> {
		Ok(Self::new(Config::load(path)?))
	}

	/// Lazily connect and return the blockchain provider
	///
	/// # Errors
	/// Returns Error if the RPC connection cannot be established
	pub async fn provider(&self) -> Result<&Provider> {
		self.provider
			.get_or_try_init(|| {
				Provider::connect(&self.config.network.rpc_url, self.config.network.chain_id)
			})
			.await
	}

	/// The configured account, if any
	pub fn account(&self) -> Option<Address> {
		self.config.account
	}

	/// The configured account, or an error when none is set
	///
	/// Every dispatched action validates through here before any call
	/// data is built or submitted.
	pub fn connected_account(&self) -> Result<Address> {
		self.config.account.ok_or(Error::MissingAccount)
	}

	/// Build the signer for write operations
	pub fn signer(&self) -> Result<PrivateKeySigner> {
		self.config.signer()
	}
}
