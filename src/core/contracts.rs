//! Smart contract interaction and ABI management
//!
//! Holds the JSON ABIs for the two fungible token contracts and the
//! staking vault, and provides method encoding for write calls plus
//! call-and-decode helpers for the read-only surface:
//! `balanceOf`, `mint`, `approve`, `depositVault`, `withdrawVault`,
//! `claim`, `userInfo`, and `calculatePendingRewards`.

use crate::types::{
	error::{Error, Result},
	UserInfo,
};
use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::{Function, JsonAbi};
use alloy_primitives::{Address, Bytes, U256};
use std::collections::HashMap;
use std::sync::Arc;

use super::blockchain::Provider;

/// Contract ABI registry with method encoding and calling
///
/// Both token contracts share the token ABI; the vault has its own.
/// Addresses are supplied per call so the same registry serves all
/// three deployments.
#[derive(Debug, Clone)]
pub struct Contracts {
	abis: Arc<HashMap<String, JsonAbi>>,
}

impl Contracts {
	/// Create a registry with the token and staking ABIs loaded
	pub fn new() -> Self {
		let mut abis = HashMap::new();
		abis.insert("Token".to_string(), token_abi());
		abis.insert("Staking".to_string(), staking_abi());

		Self {
			abis: Arc::new(abis),
		}
	}

	fn function(&self, abi_name: &str, method: &str) -> Result<&Function> {
		let abi = self
			.abis
			.get(abi_name)
			.ok_or_else(|| Error::InvalidAbi(format!("{} ABI not loaded", abi_name)))?;

		abi.function(method)
			.and_then(|f| f.first())
			.ok_or_else(|| Error::InvalidAbi(format!("Function {} not found", method)))
	}

	fn encode(&self, abi_name: &str, method: &str, args: &[DynSolValue]) -> Result<Bytes> {
		let function = self.function(abi_name, method)?;

		let data = function.abi_encode_input(args).map_err(|e| {
			Error::ContractCallFailed(format!("Failed to encode {}: {}", method, e))
		})?;

		Ok(data.into())
	}

	async fn call(
		&self,
		provider: &Provider,
		to: Address,
		abi_name: &str,
		method: &str,
		args: &[DynSolValue],
	) -> Result<Vec<u8>> {
		let data = self.encode(abi_name, method, args)?;

		provider
			.call_contract(to, data)
			.await
			.map_err(|e| Error::ContractCallFailed(format!("Call to {} failed: {}", method, e)))
	}

	/// Retrieve a token or vault balance for the given owner
	///
	/// # Errors
	/// Returns Error if the contract call fails
	pub async fn balance_of(
		&self,
		provider: &Provider,
		contract: Address,
		owner: Address,
	) -> Result<U256> {
		let result = self
			.call(
				provider,
				contract,
				"Token",
				"balanceOf",
				&[DynSolValue::Address(owner)],
			)
			.await?;

		Ok(U256::from_be_slice(&result))
	}

	/// Encode a `mint(to, amount)` call on the deposit token
	pub fn token_mint(&self, recipient: Address, amount: U256) -> Result<Bytes> {
		self.encode(
			"Token",
			"mint",
			&[
				DynSolValue::Address(recipient),
				DynSolValue::Uint(amount, 256),
			],
		)
	}

	/// Encode an `approve(spender, amount)` call on the deposit token
	pub fn token_approve(&self, spender: Address, amount: U256) -> Result<Bytes> {
		self.encode(
			"Token",
			"approve",
			&[
				DynSolValue::Address(spender),
				DynSolValue::Uint(amount, 256),
			],
		)
	}

	/// Encode a `depositVault(amount)` call on the staking contract
	pub fn vault_deposit(&self, amount: U256) -> Result<Bytes> {
		self.encode("Staking", "depositVault", &[DynSolValue::Uint(amount, 256)])
	}

	/// Encode a `withdrawVault(amount)` call on the staking contract
	pub fn vault_withdraw(&self, amount: U256) -> Result<Bytes> {
		self.encode(
			"Staking",
			"withdrawVault",
			&[DynSolValue::Uint(amount, 256)],
		)
	}

	/// Encode a `claim()` call on the staking contract
	pub fn vault_claim(&self) -> Result<Bytes> {
		self.encode("Staking", "claim", &[])
	}

	/// Fetch and decode the staking record for an account
	///
	/// # Errors
	/// Returns Error if the call fails or the response is malformed
	pub async fn vault_user_info(
		&self,
		provider: &Provider,
		staking: Address,
		account: Address,
	) -> Result<UserInfo> {
		let result = self
			.call(
				provider,
				staking,
				"Staking",
				"userInfo",
				&[DynSolValue::Address(account)],
			)
			.await?;

		decode_user_info(&result)
	}

	/// Encode a `calculatePendingRewards(userInfo)` call
	///
	/// The staking record is passed back to the contract as a tuple of
	/// three uint256 words, exactly as `userInfo` returned it.
	pub fn pending_rewards_data(&self, info: &UserInfo) -> Result<Bytes> {
		self.encode(
			"Staking",
			"calculatePendingRewards",
			&[DynSolValue::Tuple(vec![
				DynSolValue::Uint(info.shares, 256),
				DynSolValue::Uint(info.last_claim_time, 256),
				DynSolValue::Uint(info.pending_rewards, 256),
			])],
		)
	}

	/// Compute pending rewards from a previously fetched staking record
	///
	/// # Errors
	/// Returns Error if the contract call fails
	pub async fn vault_pending_rewards(
		&self,
		provider: &Provider,
		staking: Address,
		info: &UserInfo,
	) -> Result<U256> {
		let data = self.pending_rewards_data(info)?;

		let result = provider.call_contract(staking, data).await.map_err(|e| {
			Error::ContractCallFailed(format!("Call to calculatePendingRewards failed: {}", e))
		})?;

		Ok(U256::from_be_slice(&result))
	}
}

impl Default for Contracts {
	fn default() -> Self {
		Self::new()
	}
}

/// Decode the `(uint256, uint256, uint256)` staking record tuple
fn decode_user_info(result: &[u8]) -> Result<UserInfo> {
	if result.len() < 96 {
		return Err(Error::ContractCallFailed(format!(
			"Invalid userInfo response length: {}",
			result.len()
		)));
	}

	Ok(UserInfo {
		shares: U256::from_be_slice(&result[0..32]),
		last_claim_time: U256::from_be_slice(&result[32..64]),
		pending_rewards: U256::from_be_slice(&result[64..96]),
	})
}

/// Minimal token ABI including the mint function for test tokens
fn token_abi() -> JsonAbi {
	serde_json::from_str(
		r#"[
		{
			"type": "function",
			"name": "balanceOf",
			"inputs": [{"name": "account", "type": "address"}],
			"outputs": [{"name": "", "type": "uint256"}],
			"stateMutability": "view"
		},
		{
			"type": "function",
			"name": "mint",
			"inputs": [
				{"name": "to", "type": "address"},
				{"name": "amount", "type": "uint256"}
			],
			"outputs": [],
			"stateMutability": "nonpayable"
		},
		{
			"type": "function",
			"name": "approve",
			"inputs": [
				{"name": "spender", "type": "address"},
				{"name": "amount", "type": "uint256"}
			],
			"outputs": [{"name": "", "type": "bool"}],
			"stateMutability": "nonpayable"
		}
	]"#,
	)
	.expect("Invalid token ABI")
}

/// Staking vault ABI with the functions the console needs
fn staking_abi() -> JsonAbi {
	serde_json::from_str(
		r#"[
		{
			"type": "function",
			"name": "balanceOf",
			"inputs": [{"name": "account", "type": "address"}],
			"outputs": [{"name": "", "type": "uint256"}],
			"stateMutability": "view"
		},
		{
			"type": "function",
			"name": "depositVault",
			"inputs": [{"name": "_amount", "type": "uint256"}],
			"outputs": [],
			"stateMutability": "nonpayable"
		},
		{
			"type": "function",
			"name": "withdrawVault",
			"inputs": [{"name": "_amount", "type": "uint256"}],
			"outputs": [],
			"stateMutability": "nonpayable"
		},
		{
			"type": "function",
			"name": "claim",
			"inputs": [],
			"outputs": [{"name": "success", "type": "bool"}],
			"stateMutability": "nonpayable"
		},
		{
			"type": "function",
			"name": "userInfo",
			"inputs": [{"name": "", "type": "address"}],
			"outputs": [
				{"name": "shares", "type": "uint256"},
				{"name": "lastClaimTime", "type": "uint256"},
				{"name": "pendingRewards", "type": "uint256"}
			],
			"stateMutability": "view"
		},
		{
			"type": "function",
			"name": "calculatePendingRewards",
			"inputs": [
				{
					"name": "_user",
					"type": "tuple",
					"components": [
						{"name": "shares", "type": "uint256"},
						{"name": "lastClaimTime", "type": "uint256"},
						{"name": "pendingRewards", "type": "uint256"}
					]
				}
			],
			"outputs": [{"name": "", "type": "uint256"}],
			"stateMutability": "view"
		}
	]"#,
	)
	.expect("Invalid staking ABI")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn amount_word(data: &[u8]) -> U256 {
		U256::from_be_slice(&data[data.len() - 32..])
	}

	#[test]
	fn test_mint_encoding() {
		let contracts = Contracts::new();
		let recipient = Address::from([0xab; 20]);
		let amount = U256::from(5_000_000_000_000_000_000u128);

		let data = contracts.token_mint(recipient, amount).unwrap();

		// selector for mint(address,uint256)
		assert_eq!(&data[0..4], &[0x40, 0xc1, 0x0f, 0x19]);
		assert_eq!(data.len(), 4 + 64);
		assert_eq!(Address::from_slice(&data[16..36]), recipient);
		assert_eq!(amount_word(&data), amount);
	}

	#[test]
	fn test_approve_encoding() {
		let contracts = Contracts::new();
		let spender = Address::from([0xcd; 20]);
		let amount = U256::from(100u64);

		let data = contracts.token_approve(spender, amount).unwrap();

		// selector for approve(address,uint256)
		assert_eq!(&data[0..4], &[0x09, 0x5e, 0xa7, 0xb3]);
		assert_eq!(Address::from_slice(&data[16..36]), spender);
		assert_eq!(amount_word(&data), amount);
	}

	#[test]
	fn test_vault_write_encodings() {
		let contracts = Contracts::new();
		let amount = U256::from(42u64);

		let deposit = contracts.vault_deposit(amount).unwrap();
		assert_eq!(deposit.len(), 4 + 32);
		assert_eq!(amount_word(&deposit), amount);

		let withdraw = contracts.vault_withdraw(amount).unwrap();
		assert_eq!(withdraw.len(), 4 + 32);
		assert_eq!(amount_word(&withdraw), amount);

		// Same amount, distinct functions
		assert_ne!(deposit[0..4], withdraw[0..4]);

		// claim takes no arguments
		let claim = contracts.vault_claim().unwrap();
		assert_eq!(claim.len(), 4);
	}

	#[test]
	fn test_pending_rewards_encoding() {
		let contracts = Contracts::new();
		let info = UserInfo {
			shares: U256::from(1u64),
			last_claim_time: U256::from(1_700_000_000u64),
			pending_rewards: U256::from(3u64),
		};

		let data = contracts.pending_rewards_data(&info).unwrap();

		// selector + three statically encoded tuple words
		assert_eq!(data.len(), 4 + 96);
		assert_eq!(U256::from_be_slice(&data[4..36]), info.shares);
		assert_eq!(U256::from_be_slice(&data[36..68]), info.last_claim_time);
		assert_eq!(U256::from_be_slice(&data[68..100]), info.pending_rewards);
	}

	#[test]
	fn test_decode_user_info() {
		let mut raw = [0u8; 96];
		raw[31] = 7; // shares
		raw[63] = 9; // lastClaimTime
		raw[95] = 11; // pendingRewards

		let info = decode_user_info(&raw).unwrap();
		assert_eq!(info.shares, U256::from(7u64));
		assert_eq!(info.last_claim_time, U256::from(9u64));
		assert_eq!(info.pending_rewards, U256::from(11u64));

		// Truncated responses are rejected
		assert!(decode_user_info(&raw[..64]).is_err());
	}
}
