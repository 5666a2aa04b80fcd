//! Staking vault operations
//!
//! The three vault-side actions: approve+deposit, withdraw, and claim.
//! Deposit is a two-step sequence with a hard ordering dependency: the
//! allowance is granted on the deposit token first, and `depositVault`
//! is only submitted once the approve receipt has landed successfully.

use crate::{
	core::{logging, Context},
	types::error::Result,
};
use alloy_primitives::U256;
use std::sync::Arc;
use tracing::instrument;

use super::{submit_plan, TxPlan};

/// Result of an approve+deposit sequence
#[derive(Debug, Clone)]
pub struct DepositResult {
	pub approve_tx: String,
	pub deposit_tx: String,
	pub amount: U256,
}

/// Result of a withdraw operation
#[derive(Debug, Clone)]
pub struct WithdrawResult {
	pub tx_hash: String,
	pub amount: U256,
}

/// Result of a claim operation
#[derive(Debug, Clone)]
pub struct ClaimResult {
	pub tx_hash: String,
}

/// Vault operations handler
pub struct VaultOps {
	ctx: Arc<Context>,
}

impl VaultOps {
	/// Creates a new vault operations handler
	pub fn new(ctx: Arc<Context>) -> Self {
		Self { ctx }
	}

	/// Builds the ordered approve-then-deposit plan for an amount
	///
	/// Both steps carry the identical amount: the allowance granted to
	/// the vault equals exactly what `depositVault` will pull.
	pub fn deposit_plan(&self, amount: U256) -> Result<Vec<TxPlan>> {
		let contracts = &self.ctx.config.contracts;

		Ok(vec![
			TxPlan {
				to: contracts.deposit_token,
				data: self.ctx.contracts.token_approve(contracts.staking, amount)?,
				label: "approve",
			},
			TxPlan {
				to: contracts.staking,
				data: self.ctx.contracts.vault_deposit(amount)?,
				label: "deposit",
			},
		])
	}

	/// Approves the vault and deposits the amount into it
	///
	/// # Errors
	/// Returns error if no account is configured or either transaction
	/// fails; deposit is never attempted when approve fails
	#[instrument(skip(self))]
	pub async fn deposit(&self, amount: U256) -> Result<DepositResult> {
		self.ctx.connected_account()?;

		logging::operation_start("deposit", &format!("amount: {amount}"));

		let plan = self.deposit_plan(amount)?;
		let receipts = submit_plan(&self.ctx, plan).await?;

		Ok(DepositResult {
			approve_tx: format!("{:?}", receipts[0].transaction_hash),
			deposit_tx: format!("{:?}", receipts[1].transaction_hash),
			amount,
		})
	}

	/// Withdraws a deposited amount from the vault
	///
	/// # Errors
	/// Returns error if no account is configured or the transaction fails
	#[instrument(skip(self))]
	pub async fn withdraw(&self, amount: U256) -> Result<WithdrawResult> {
		self.ctx.connected_account()?;

		logging::operation_start("withdraw", &format!("amount: {amount}"));

		let plan = vec![TxPlan {
			to: self.ctx.config.contracts.staking,
			data: self.ctx.contracts.vault_withdraw(amount)?,
			label: "withdraw",
		}];

		let receipts = submit_plan(&self.ctx, plan).await?;

		Ok(WithdrawResult {
			tx_hash: format!("{:?}", receipts[0].transaction_hash),
			amount,
		})
	}

	/// Claims accrued rewards from the vault
	///
	/// # Errors
	/// Returns error if no account is configured or the transaction fails
	#[instrument(skip(self))]
	pub async fn claim(&self) -> Result<ClaimResult> {
		self.ctx.connected_account()?;

		logging::operation_start("claim", "");

		let plan = vec![TxPlan {
			to: self.ctx.config.contracts.staking,
			data: self.ctx.contracts.vault_claim()?,
			label: "claim",
		}];

		let receipts = submit_plan(&self.ctx, plan).await?;

		Ok(ClaimResult {
			tx_hash: format!("{:?}", receipts[0].transaction_hash),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		core::{config::parse_address, Config},
		types::error::Error,
	};
	use alloy_primitives::{Address, U256};

	fn ops_with_account() -> VaultOps {
		let mut config = Config::default();
		config.account = Some(Address::from([0x11; 20]));
		VaultOps::new(Arc::new(Context::new(config)))
	}

	fn amount_word(data: &[u8]) -> U256 {
		U256::from_be_slice(&data[data.len() - 32..])
	}

	#[test]
	fn test_deposit_plan_order_and_amounts() {
		let ops = ops_with_account();
		let amount = U256::from(100_000_000_000_000_000_000u128); // "100" in minor units

		let plan = ops.deposit_plan(amount).unwrap();
		assert_eq!(plan.len(), 2);

		// Approve targets the deposit token, for the vault as spender
		let approve = &plan[0];
		assert_eq!(
			approve.to,
			parse_address(crate::core::config::DEFAULT_DEPOSIT_TOKEN).unwrap()
		);
		assert_eq!(&approve.data[0..4], &[0x09, 0x5e, 0xa7, 0xb3]);
		assert_eq!(
			Address::from_slice(&approve.data[16..36]),
			parse_address(crate::core::config::DEFAULT_STAKING).unwrap()
		);

		// Deposit targets the vault, second in the plan
		let deposit = &plan[1];
		assert_eq!(
			deposit.to,
			parse_address(crate::core::config::DEFAULT_STAKING).unwrap()
		);

		// Identical amount values in both calls
		assert_eq!(amount_word(&approve.data), amount);
		assert_eq!(amount_word(&deposit.data), amount);
	}

	#[tokio::test]
	async fn test_actions_require_account() {
		let ops = VaultOps::new(Arc::new(Context::new(Config::default())));
		let amount = U256::from(1u64);

		// Each action aborts before building call data or submitting
		assert!(matches!(
			ops.deposit(amount).await.unwrap_err(),
			Error::MissingAccount
		));
		assert!(matches!(
			ops.withdraw(amount).await.unwrap_err(),
			Error::MissingAccount
		));
		assert!(matches!(ops.claim().await.unwrap_err(), Error::MissingAccount));
	}
}
