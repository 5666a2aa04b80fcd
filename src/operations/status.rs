//! Balance and staking status reader
//!
//! Issues the read-only queries behind the console's display: the
//! account's balance on the deposit token, the reward token, and the
//! staking contract, plus the staking record, and optionally the
//! dependent pending-rewards computation. Reads are independent and
//! side-effect free; a failed read simply leaves its field absent, which
//! is indistinguishable from "not yet loaded".

use crate::{
	core::{BalanceSource, Context, StakingEvent},
	types::{error::Result, UserInfo},
	utils::amount::format_amount_with_decimals,
};
use alloy_primitives::{Address, U256};
use std::sync::Arc;
use tracing::instrument;

/// Last known chain state for the configured account
///
/// Every field is optional; a refresh overwrites fields individually and
/// never invents a value for a read that did not return one.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
	pub account: Option<Address>,
	pub deposit_balance: Option<U256>,
	pub reward_balance: Option<U256>,
	pub staking_balance: Option<U256>,
	pub user: Option<UserInfo>,
	pub pending_rewards: Option<U256>,
}

impl StatusSnapshot {
	/// Fold a fresh snapshot into this one, keeping the last known value
	/// for any read that came back absent
	///
	/// Fields update independently; a refresh that only resolved the
	/// reward balance leaves the other balances untouched.
	pub fn merge_from(&mut self, other: &StatusSnapshot) {
		if other.account.is_some() {
			self.account = other.account;
		}
		if other.deposit_balance.is_some() {
			self.deposit_balance = other.deposit_balance;
		}
		if other.reward_balance.is_some() {
			self.reward_balance = other.reward_balance;
		}
		if other.staking_balance.is_some() {
			self.staking_balance = other.staking_balance;
		}
		if other.user.is_some() {
			self.user = other.user;
		}
		if other.pending_rewards.is_some() {
			self.pending_rewards = other.pending_rewards;
		}
	}
}

/// Status reader issuing the balance and staking-record queries
pub struct StatusOps {
	ctx: Arc<Context>,
}

impl StatusOps {
	/// Creates a new status reader
	pub fn new(ctx: Arc<Context>) -> Self {
		Self { ctx }
	}

	/// Read the current chain state for the configured account
	///
	/// Without an account every read stays disabled and an empty snapshot
	/// is returned; no query is issued. The pending-rewards computation
	/// runs only when `include_rewards` is set and the staking record
	/// resolved, since the record is its input.
	///
	/// Each resolved field is published on the event bus.
	///
	/// # Errors
	/// Returns error only if the RPC connection cannot be established;
	/// individual read failures leave their field as `None`
	#[instrument(skip(self))]
	pub async fn snapshot(&self, include_rewards: bool) -> Result<StatusSnapshot> {
		let account = match self.ctx.account() {
			Some(account) => account,
			None => return Ok(StatusSnapshot::default()),
		};

		let provider = self.ctx.provider().await?;
		let contracts = &self.ctx.contracts;
		let addresses = &self.ctx.config.contracts;

		let _ = self
			.ctx
			.events
			.publish(StakingEvent::AccountConnected { address: account });

		let deposit_balance = contracts
			.balance_of(provider, addresses.deposit_token, account)
			.await
			.ok();
		let reward_balance = contracts
			.balance_of(provider, addresses.reward_token, account)
			.await
			.ok();
		let staking_balance = contracts
			.balance_of(provider, addresses.staking, account)
			.await
			.ok();
		let user = contracts
			.vault_user_info(provider, addresses.staking, account)
			.await
			.ok();

		// Dependent read: only issued once the staking record resolved,
		// and only when the caller asked for it
		let pending_rewards = match (&user, include_rewards) {
			(Some(info), true) => contracts
				.vault_pending_rewards(provider, addresses.staking, info)
				.await
				.ok(),
			_ => None,
		};

		self.publish_balance(BalanceSource::DepositToken, deposit_balance);
		self.publish_balance(BalanceSource::RewardToken, reward_balance);
		self.publish_balance(BalanceSource::StakingContract, staking_balance);

		if let Some(info) = user {
			let _ = self.ctx.events.publish(StakingEvent::UserInfoUpdated { info });
		}
		if let Some(amount) = pending_rewards {
			let _ = self
				.ctx
				.events
				.publish(StakingEvent::PendingRewardsUpdated { amount });
		}

		Ok(StatusSnapshot {
			account: Some(account),
			deposit_balance,
			reward_balance,
			staking_balance,
			user,
			pending_rewards,
		})
	}

	fn publish_balance(&self, source: BalanceSource, balance: Option<U256>) {
		if let Some(balance) = balance {
			let _ = self.ctx.events.publish(StakingEvent::BalanceUpdated {
				source,
				balance,
				formatted: format_amount_with_decimals(balance, self.ctx.config.decimals),
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Config;

	#[test]
	fn test_merge_updates_fields_independently() {
		let mut snapshot = StatusSnapshot {
			deposit_balance: Some(U256::from(1u64)),
			reward_balance: Some(U256::from(2u64)),
			..Default::default()
		};

		// A refresh that only resolved the reward balance
		let refresh = StatusSnapshot {
			reward_balance: Some(U256::from(3u64)),
			..Default::default()
		};

		snapshot.merge_from(&refresh);

		// Deposit balance must not change when only the reward balance did
		assert_eq!(snapshot.deposit_balance, Some(U256::from(1u64)));
		assert_eq!(snapshot.reward_balance, Some(U256::from(3u64)));
		assert_eq!(snapshot.staking_balance, None);
		assert_eq!(snapshot.pending_rewards, None);
	}

	#[test]
	fn test_merge_keeps_last_known_values() {
		let mut snapshot = StatusSnapshot {
			deposit_balance: Some(U256::from(5u64)),
			..Default::default()
		};

		// An entirely failed refresh overwrites nothing
		snapshot.merge_from(&StatusSnapshot::default());
		assert_eq!(snapshot.deposit_balance, Some(U256::from(5u64)));
	}

	#[tokio::test]
	async fn test_no_account_issues_no_reads() {
		let mut config = Config::default();
		assert!(config.account.is_none());
		// An unreachable endpoint: if any read were attempted the
		// connection itself would fail, and snapshot would error
		config.network.rpc_url = "http://127.0.0.1:1".to_string();

		let ops = StatusOps::new(Arc::new(Context::new(config)));
		let snapshot = ops.snapshot(true).await.unwrap();

		assert!(snapshot.account.is_none());
		assert!(snapshot.deposit_balance.is_none());
		assert!(snapshot.user.is_none());
		assert!(snapshot.pending_rewards.is_none());
	}
}
