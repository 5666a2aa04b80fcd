//! Blockchain provider and transaction management
//!
//! Provides connectivity to the JSON-RPC endpoint, read-only contract
//! calls, and write transaction execution with automatic gas estimation,
//! nonce management, and receipt polling.

use crate::types::error::{Error, Result};
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::{Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use std::sync::Arc;

/// Blockchain provider wrapper for the configured network
///
/// Wraps an alloy provider behind a high-level interface for balance
/// queries and contract calls, validating connectivity on construction.
#[derive(Clone)]
pub struct Provider {
	inner: Arc<dyn AlloyProvider + Send + Sync>,
	chain_id: u64,
}

impl std::fmt::Debug for Provider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Provider")
			.field("chain_id", &self.chain_id)
			.field("inner", &"<dyn AlloyProvider>")
			.finish()
	}
}

impl Provider {
	/// Create a new provider for the given RPC endpoint
	///
	/// Establishes the HTTP connection and validates connectivity by
	/// retrieving the chain ID from the endpoint.
	///
	/// # Errors
	/// Returns Error if the URL is invalid or the connection test fails
	pub async fn connect(rpc_url: &str, chain_id: u64) -> Result<Self> {
		let url = rpc_url
			.parse()
			.map_err(|e| Error::RpcError(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url);

		// Test connection
		provider
			.get_chain_id()
			.await
			.map_err(|e| Error::RpcError(format!("Failed to connect to {}: {}", rpc_url, e)))?;

		Ok(Self {
			inner: Arc::new(provider),
			chain_id,
		})
	}

	/// Configured chain identifier
	pub fn chain_id(&self) -> u64 {
		self.chain_id
	}

	/// Execute a read-only contract call and return the result data
	///
	/// # Errors
	/// Returns Error if the call reverts or the transport fails
	pub async fn call_contract(&self, to: Address, data: Bytes) -> Result<Vec<u8>> {
		let tx = TransactionRequest::default().to(to).input(data.into());

		let result = self
			.inner
			.call(tx)
			.await
			.map_err(|e| Error::RpcError(format!("Contract call failed: {}", e)))?;

		Ok(result.to_vec())
	}
}

/// Transaction builder with automatic parameter filling and execution
///
/// Fills chain ID, gas, nonce, and gas price before submission, and polls
/// for the receipt after. One builder is created per write operation.
#[derive(Debug, Clone)]
pub struct TxBuilder {
	provider: Provider,
	signer: Option<PrivateKeySigner>,
}

impl TxBuilder {
	/// Create a new transaction builder with the given provider
	pub fn new(provider: Provider) -> Self {
		Self {
			provider,
			signer: None,
		}
	}

	/// Configure the signer used for transaction submission
	pub fn with_signer(mut self, signer: PrivateKeySigner) -> Self {
		self.signer = Some(signer);
		self
	}

	/// Submit a transaction with automatic parameter filling
	///
	/// # Errors
	/// Returns Error if parameter estimation or submission fails
	pub async fn send(&self, mut tx: TransactionRequest) -> Result<B256> {
		if tx.chain_id.is_none() {
			tx.chain_id = Some(self.provider.chain_id());
		}

		if let Some(signer) = &self.signer {
			tx.from = Some(signer.address());

			if tx.gas.is_none() {
				let gas = self
					.provider
					.inner
					.estimate_gas(tx.clone())
					.await
					.map_err(|e| Error::RpcError(format!("Failed to estimate gas: {}", e)))?;
				tx.gas = Some(gas);
			}

			if tx.nonce.is_none() {
				let nonce = self
					.provider
					.inner
					.get_transaction_count(signer.address())
					.await
					.map_err(|e| Error::RpcError(format!("Failed to get nonce: {}", e)))?;
				tx.nonce = Some(nonce);
			}

			if tx.gas_price.is_none() && tx.max_fee_per_gas.is_none() {
				let gas_price = self
					.provider
					.inner
					.get_gas_price()
					.await
					.map_err(|e| Error::RpcError(format!("Failed to get gas price: {}", e)))?;
				tx.gas_price = Some(gas_price);
			}
		}

		let pending = self
			.provider
			.inner
			.send_transaction(tx)
			.await
			.map_err(|e| Error::RpcError(format!("Failed to send transaction: {}", e)))?;

		Ok(*pending.tx_hash())
	}

	/// Poll for a transaction receipt with a bounded wait
	///
	/// # Errors
	/// Returns Error::TxNotFound if the transaction is not mined in time
	pub async fn wait(&self, hash: B256) -> Result<TransactionReceipt> {
		let mut attempts = 0;
		const MAX_ATTEMPTS: u32 = 60; // 60 seconds max wait

		loop {
			if let Some(receipt) = self
				.provider
				.inner
				.get_transaction_receipt(hash)
				.await
				.map_err(|e| Error::RpcError(format!("Failed to get receipt: {}", e)))?
			{
				return Ok(receipt);
			}

			attempts += 1;
			if attempts >= MAX_ATTEMPTS {
				return Err(Error::TxNotFound(hash));
			}

			tokio::time::sleep(std::time::Duration::from_secs(1)).await;
		}
	}

	/// Submit a transaction and wait for its confirmation receipt
	pub async fn send_and_wait(&self, tx: TransactionRequest) -> Result<TransactionReceipt> {
		let hash = self.send(tx).await?;
		self.wait(hash).await
	}
}
