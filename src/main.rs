//! Main binary entry point for the staking console
//!
//! Handles argument parsing, logging setup, and dispatches commands to
//! their operation handlers. Action failures are logged to the
//! diagnostic channel and abort the action; they are never retried.

use anyhow::Result;
use clap::Parser;
use staking_console::{
	cli::{output::Display, Cli, Commands},
	core::{config::PRIVATE_KEY_ENV, logging, Config},
	operations::{MintOps, StatusOps, StatusSnapshot, VaultOps},
	utils::amount::{format_amount_with_decimals, parse_amount_with_decimals},
	Context,
};
use std::sync::Arc;
use tracing::instrument;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	// Initialize logging
	init_logging();

	// Parse CLI arguments
	let cli = Cli::parse();

	// Load configuration, falling back to the known deployment defaults
	// so the console works out of the box
	let config = match Config::load(&cli.config) {
		Ok(config) => config,
		Err(staking_console::types::error::Error::ConfigNotFound(path)) => {
			tracing::debug!(path = %path.display(), "No config file, using defaults");
			Config::default()
		},
		Err(e) => {
			Display::error(&format!("Failed to load configuration: {}", e));
			return Ok(());
		},
	};

	let ctx = Arc::new(Context::new(config));

	// Handle commands
	match cli.command {
		Commands::Status { rewards } => handle_status(ctx, rewards).await,
		Commands::Watch { interval, rewards } => handle_watch(ctx, interval, rewards).await,
		Commands::Mint { amount, to } => handle_mint(ctx, amount, to).await,
		Commands::Deposit { amount } => handle_deposit(ctx, amount).await,
		Commands::Withdraw { amount } => handle_withdraw(ctx, amount).await,
		Commands::Claim => handle_claim(ctx).await,
		Commands::Config => handle_config(ctx),
	}

	Ok(())
}

/// Initialize structured logging with configurable verbosity
///
/// Logs are controlled via RUST_LOG with sensible defaults.
fn init_logging() {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let env_filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("staking_console=info,warn"));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

#[instrument(skip(ctx))]
async fn handle_status(ctx: Arc<Context>, rewards: bool) {
	Display::header("Staking Status");

	let ops = StatusOps::new(ctx.clone());
	match ops.snapshot(rewards).await {
		Ok(snapshot) => render_snapshot(&ctx, &snapshot, rewards),
		Err(e) => logging::operation_error("status", &e),
	}
}

#[instrument(skip(ctx))]
async fn handle_watch(ctx: Arc<Context>, interval: u64, rewards: bool) {
	Display::header("Staking Status (watching)");

	let ops = StatusOps::new(ctx.clone());
	let mut last_known = StatusSnapshot::default();

	loop {
		match ops.snapshot(rewards).await {
			Ok(snapshot) => last_known.merge_from(&snapshot),
			Err(e) => logging::operation_error("status", &e),
		}

		render_snapshot(&ctx, &last_known, rewards);
		Display::info("---");

		tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
	}
}

/// Render the last known values, with a loading placeholder for any
/// value that has not resolved
fn render_snapshot(ctx: &Context, snapshot: &StatusSnapshot, rewards: bool) {
	match snapshot.account {
		Some(account) => Display::kv("Account", &account.to_string()),
		None => {
			Display::warning("No account configured. Set [account].address or STAKING_ACCOUNT");
			return;
		},
	}

	let decimals = ctx.config.decimals;
	let fmt_balance = |balance: Option<alloy_primitives::U256>| match balance {
		Some(b) => format_amount_with_decimals(b, decimals),
		None => "loading...".to_string(),
	};

	Display::kv("Balance Deposit Token", &fmt_balance(snapshot.deposit_balance));
	Display::kv("Balance Reward Token", &fmt_balance(snapshot.reward_balance));
	Display::kv(
		"Balance Staking Contract",
		&fmt_balance(snapshot.staking_balance),
	);

	match &snapshot.user {
		Some(user) => {
			Display::kv("Shares", &user.shares.to_string());
			Display::kv("Pending Rewards", &user.pending_rewards.to_string());
		},
		None => Display::kv("Pending Rewards", "loading..."),
	}

	if rewards {
		Display::kv("Computed Rewards", &fmt_balance(snapshot.pending_rewards));
	}
}

#[instrument(skip(ctx))]
async fn handle_mint(ctx: Arc<Context>, amount: String, to: Option<String>) {
	Display::header("Minting Tokens");

	let amount = match parse_amount_with_decimals(&amount, ctx.config.decimals) {
		Ok(amount) => amount,
		Err(e) => return logging::operation_error("mint", &e),
	};

	let recipient = match to.as_deref().map(staking_console::core::config::parse_address) {
		Some(Ok(addr)) => Some(addr),
		Some(Err(e)) => return logging::operation_error("mint", &e),
		None => None,
	};

	match MintOps::new(ctx).mint(recipient, amount).await {
		Ok(result) => {
			logging::operation_success("mint", &format!("tx: {}", result.tx_hash));
			Display::kv("Recipient", &result.recipient.to_string());
			Display::kv("Tx", &result.tx_hash);
		},
		Err(e) => logging::operation_error("mint", &e),
	}
}

#[instrument(skip(ctx))]
async fn handle_deposit(ctx: Arc<Context>, amount: String) {
	Display::header("Approve and Deposit");

	let amount = match parse_amount_with_decimals(&amount, ctx.config.decimals) {
		Ok(amount) => amount,
		Err(e) => return logging::operation_error("deposit", &e),
	};

	match VaultOps::new(ctx).deposit(amount).await {
		Ok(result) => {
			logging::operation_success(
				"deposit",
				&format!("approve: {}, deposit: {}", result.approve_tx, result.deposit_tx),
			);
			Display::kv("Approve tx", &result.approve_tx);
			Display::kv("Deposit tx", &result.deposit_tx);
		},
		Err(e) => logging::operation_error("deposit", &e),
	}
}

#[instrument(skip(ctx))]
async fn handle_withdraw(ctx: Arc<Context>, amount: String) {
	Display::header("Withdrawing Tokens");

	let amount = match parse_amount_with_decimals(&amount, ctx.config.decimals) {
		Ok(amount) => amount,
		Err(e) => return logging::operation_error("withdraw", &e),
	};

	match VaultOps::new(ctx).withdraw(amount).await {
		Ok(result) => {
			logging::operation_success("withdraw", &format!("tx: {}", result.tx_hash));
			Display::kv("Tx", &result.tx_hash);
		},
		Err(e) => logging::operation_error("withdraw", &e),
	}
}

#[instrument(skip(ctx))]
async fn handle_claim(ctx: Arc<Context>) {
	Display::header("Claiming Rewards");

	match VaultOps::new(ctx).claim().await {
		Ok(result) => {
			logging::operation_success("claim", &format!("tx: {}", result.tx_hash));
			Display::kv("Tx", &result.tx_hash);
		},
		Err(e) => logging::operation_error("claim", &e),
	}
}

fn handle_config(ctx: Arc<Context>) {
	Display::header("Current Configuration");

	let config = &ctx.config;
	Display::kv("Config file", &config.path.display().to_string());
	Display::kv("RPC URL", &config.network.rpc_url);
	Display::kv("Chain ID", &config.network.chain_id.to_string());
	Display::kv("Deposit token", &config.contracts.deposit_token.to_string());
	Display::kv("Reward token", &config.contracts.reward_token.to_string());
	Display::kv("Staking contract", &config.contracts.staking.to_string());

	match config.account {
		Some(account) => Display::kv("Account", &account.to_string()),
		None => Display::warning("No account configured"),
	}

	if std::env::var(PRIVATE_KEY_ENV).is_err() {
		Display::info(&format!(
			"{} is not set; write operations will fail",
			PRIVATE_KEY_ENV
		));
	}
}
