//! Console for a token staking vault
//!
//! Wires terminal commands to read/write calls against three contracts:
//! a deposit token, a reward token, and the staking vault holding the
//! deposits. All token accounting, staking math, and reward accrual live
//! in those contracts; this crate only issues the calls and reflects
//! returned values into the display and the event bus.

pub mod cli;
pub mod core;
pub mod operations;
pub mod types;
pub mod utils;

pub use crate::core::{Config, Context, EventBus, StakingEvent};
pub use crate::operations::{MintOps, StatusOps, StatusSnapshot, VaultOps};
pub use crate::types::UserInfo;
