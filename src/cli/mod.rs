//! Command-line interface definitions and parsing
//!
//! Defines the CLI structure using clap: the main parser, the action and
//! status subcommands, and the output formatting utilities.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application structure for the staking console
#[derive(Parser, Debug)]
#[command(name = "staking-console")]
#[command(about = "Mint, stake, withdraw, and claim against the staking vault")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Config file path (can be set via STAKING_CONFIG env var)
	#[arg(global = true, long, env = "STAKING_CONFIG", default_value = "staking.toml")]
	pub config: PathBuf,
}

/// Available CLI subcommands
///
/// The four dispatched actions plus the status reader, its polling
/// variant, and configuration inspection. Amounts default to the usual
/// test quantities so every action works without arguments.
#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show balances and the staking record for the configured account
	Status {
		/// Also compute pending rewards from the staking record
		#[arg(long)]
		rewards: bool,
	},

	/// Poll status on an interval and re-render on each pass
	Watch {
		/// Refresh interval in seconds
		#[arg(long, default_value_t = 5)]
		interval: u64,

		/// Also compute pending rewards on each pass
		#[arg(long)]
		rewards: bool,
	},

	/// Mint deposit tokens to the configured account
	Mint {
		/// Amount in token units
		#[arg(long, default_value = "10000")]
		amount: String,

		/// Recipient address (defaults to the configured account)
		#[arg(long)]
		to: Option<String>,
	},

	/// Approve the vault and deposit tokens into it
	Deposit {
		/// Amount in token units, approved and deposited identically
		#[arg(long, default_value = "10000")]
		amount: String,
	},

	/// Withdraw deposited tokens from the vault
	Withdraw {
		/// Amount in token units
		#[arg(long, default_value = "5000")]
		amount: String,
	},

	/// Claim accrued rewards from the vault
	Claim,

	/// Show current configuration
	Config,
}
