//! Console operations
//!
//! The action dispatchers (mint, approve+deposit, withdraw, claim) and
//! the balance/status reader. Every write operation validates the
//! configured account before any call data is built, then submits its
//! transactions strictly in plan order, awaiting each receipt.

pub mod mint;
pub mod status;
pub mod vault;

pub use mint::MintOps;
pub use status::{StatusOps, StatusSnapshot};
pub use vault::VaultOps;

use crate::{
	core::{Context, TxBuilder},
	types::error::{Error, Result},
};
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};

/// One planned write call: target contract and encoded call data.
///
/// Dispatchers build their full plan up front; submission walks the plan
/// in order and stops at the first failure, so a dependent call is never
/// issued when its predecessor did not succeed.
#[derive(Debug, Clone)]
pub struct TxPlan {
	pub to: Address,
	pub data: Bytes,
	pub label: &'static str,
}

/// Submit a plan sequentially, waiting for each receipt before the next
///
/// # Errors
/// Returns Error if signing material is missing, a submission fails, or
/// a receipt reports failure; later plan steps are not attempted
pub(crate) async fn submit_plan(
	ctx: &Context,
	plan: Vec<TxPlan>,
) -> Result<Vec<TransactionReceipt>> {
	let signer = ctx.signer()?;
	let provider = ctx.provider().await?.clone();
	let tx_builder = TxBuilder::new(provider).with_signer(signer);

	let mut receipts = Vec::with_capacity(plan.len());

	for step in plan {
		let tx = TransactionRequest::default()
			.to(step.to)
			.input(step.data.into());

		let receipt = tx_builder.send_and_wait(tx).await?;

		if !receipt.status() {
			return Err(Error::ContractCallFailed(format!(
				"{} transaction failed",
				step.label
			)));
		}

		receipts.push(receipt);
	}

	Ok(receipts)
}
