//! Token minting operations
//!
//! Mints test deposit tokens to the configured account (or an explicit
//! recipient). A single write call against the deposit token contract,
//! gated on a configured account.

use crate::{
	core::{logging, Context},
	types::error::Result,
};
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tracing::instrument;

use super::{submit_plan, TxPlan};

/// Result of a mint operation
#[derive(Debug, Clone)]
pub struct MintResult {
	pub tx_hash: String,
	pub recipient: Address,
	pub amount: U256,
}

/// Mint operations handler
pub struct MintOps {
	ctx: Arc<Context>,
}

impl MintOps {
	/// Creates a new mint operations handler
	pub fn new(ctx: Arc<Context>) -> Self {
		Self { ctx }
	}

	/// Mints deposit tokens to the recipient
	///
	/// # Arguments
	/// * `recipient` - Recipient address, defaults to the configured account
	/// * `amount` - Amount to mint in the token's smallest unit
	///
	/// # Errors
	/// Returns error if no account is configured, signing material is
	/// missing, or the transaction fails
	#[instrument(skip(self))]
	pub async fn mint(&self, recipient: Option<Address>, amount: U256) -> Result<MintResult> {
		let account = self.ctx.connected_account()?;
		let recipient = recipient.unwrap_or(account);

		logging::operation_start("mint", &format!("recipient: {recipient}, amount: {amount}"));

		let data = self.ctx.contracts.token_mint(recipient, amount)?;
		let plan = vec![TxPlan {
			to: self.ctx.config.contracts.deposit_token,
			data,
			label: "mint",
		}];

		let receipts = submit_plan(&self.ctx, plan).await?;

		Ok(MintResult {
			tx_hash: format!("{:?}", receipts[0].transaction_hash),
			recipient,
			amount,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{core::Config, types::error::Error};

	#[tokio::test]
	async fn test_mint_requires_account() {
		let config = Config::default();
		assert!(config.account.is_none());

		let ops = MintOps::new(Arc::new(Context::new(config)));

		// Aborts before any call data is built or submitted
		let err = ops.mint(None, U256::from(1u64)).await.unwrap_err();
		assert!(matches!(err, Error::MissingAccount));
	}
}
