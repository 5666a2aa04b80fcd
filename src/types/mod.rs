//! Shared domain types
//!
//! Contains the staking record returned by the vault contract and the
//! error types used throughout the console.

pub mod error;

use alloy_primitives::U256;

/// Per-account staking record as returned by `userInfo(address)`
///
/// The vault tracks a user's proportional shares, the timestamp of the
/// last reward claim, and the rewards accrued but not yet paid out.
/// The record is only ever replaced wholesale by the next successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserInfo {
	pub shares: U256,
	pub last_claim_time: U256,
	pub pending_rewards: U256,
}
