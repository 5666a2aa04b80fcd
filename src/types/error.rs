//! Error types and result handling for the staking console
//!
//! Defines the error variants used across the console, covering account
//! validation, amount parsing, RPC transport, contract interaction, and
//! configuration loading, along with conversions from external error types.

use alloy_primitives::B256;
use std::path::PathBuf;

/// Convenience Result type alias using the local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all staking console operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
	// Account errors
	#[error("No account configured. Set [account].address or STAKING_ACCOUNT")]
	MissingAccount,

	#[error("Invalid private key")]
	InvalidPrivateKey,

	// Validation errors
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),

	#[error("Invalid address: {0}")]
	InvalidAddress(String),

	// RPC errors
	#[error("RPC connection failed: {0}")]
	RpcError(String),

	#[error("Transaction not found: {0:?}")]
	TxNotFound(B256),

	// Contract errors
	#[error("Invalid ABI: {0}")]
	InvalidAbi(String),

	#[error("Contract call failed: {0}")]
	ContractCallFailed(String),

	// Config errors
	#[error("Configuration file not found: {0}")]
	ConfigNotFound(PathBuf),

	#[error("Invalid configuration format: {0}")]
	InvalidConfig(String),

	// IO errors
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	// TOML errors
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	// Generic error for unexpected cases
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl From<String> for Error {
	fn from(msg: String) -> Self {
		Error::Other(anyhow::anyhow!("{msg}"))
	}
}
