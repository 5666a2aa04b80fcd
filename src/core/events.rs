//! Event bus for publishing chain state to the hosting surface.
//!
//! The status reader and the action dispatchers communicate updates to
//! whoever hosts them (the CLI, or an embedding application) through a
//! broadcast channel rather than callbacks, keeping the reader decoupled
//! from any particular presentation layer.

use crate::types::UserInfo;
use alloy_primitives::{Address, U256};
use tokio::sync::broadcast;

/// Which contract a balance update was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSource {
	DepositToken,
	RewardToken,
	StakingContract,
}

/// State updates published by the status reader.
///
/// Each variant carries one independently-read value; subscribers must
/// not assume any ordering between variants from the same refresh.
#[derive(Debug, Clone)]
pub enum StakingEvent {
	/// The configured account was resolved and reads are enabled.
	AccountConnected { address: Address },
	/// A token balance read completed.
	BalanceUpdated {
		source: BalanceSource,
		balance: U256,
		formatted: String,
	},
	/// The staking record for the account was refreshed.
	UserInfoUpdated { info: UserInfo },
	/// The dependent pending-rewards computation completed.
	PendingRewardsUpdated { amount: U256 },
}

/// Event bus for broadcasting staking events to multiple subscribers.
///
/// Uses tokio's broadcast channel so several consumers can observe the
/// same stream of updates. Events published before a subscription are
/// not replayed.
pub struct EventBus {
	sender: broadcast::Sender<StakingEvent>,
}

impl EventBus {
	/// Creates a new EventBus with the specified channel capacity.
	///
	/// The capacity bounds how many events can be buffered before the
	/// oldest are dropped for lagging subscribers.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Creates a new subscriber to receive events from this bus.
	pub fn subscribe(&self) -> broadcast::Receiver<StakingEvent> {
		self.sender.subscribe()
	}

	/// Publishes an event to all current subscribers.
	///
	/// Returns an error if there are no active subscribers, which is not
	/// a critical condition for the publishing side.
	pub fn publish(
		&self,
		event: StakingEvent,
	) -> Result<(), broadcast::error::SendError<StakingEvent>> {
		self.sender.send(event)?;
		Ok(())
	}
}

impl Clone for EventBus {
	fn clone(&self) -> Self {
		Self {
			sender: self.sender.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn balance_event(balance: u64) -> StakingEvent {
		StakingEvent::BalanceUpdated {
			source: BalanceSource::DepositToken,
			balance: U256::from(balance),
			formatted: crate::utils::amount::format_amount(U256::from(balance)),
		}
	}

	#[test]
	fn test_new_event_bus() {
		let event_bus = EventBus::new(16);
		assert_eq!(event_bus.sender.receiver_count(), 0);
	}

	#[test]
	fn test_subscribe_creates_receiver() {
		let event_bus = EventBus::new(16);
		let _receiver = event_bus.subscribe();
		assert_eq!(event_bus.sender.receiver_count(), 1);
	}

	#[tokio::test]
	async fn test_publish_and_receive_event() {
		let event_bus = EventBus::new(16);
		let mut receiver = event_bus.subscribe();

		event_bus
			.publish(StakingEvent::AccountConnected {
				address: Address::from([0x11; 20]),
			})
			.unwrap();

		match receiver.recv().await.unwrap() {
			StakingEvent::AccountConnected { address } => {
				assert_eq!(address, Address::from([0x11; 20]));
			},
			other => panic!("unexpected event: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_multiple_subscribers_receive_same_event() {
		let event_bus = EventBus::new(16);
		let mut receiver1 = event_bus.subscribe();
		let mut receiver2 = event_bus.subscribe();

		event_bus.publish(balance_event(42)).unwrap();

		for receiver in [&mut receiver1, &mut receiver2] {
			match receiver.recv().await.unwrap() {
				StakingEvent::BalanceUpdated { balance, .. } => {
					assert_eq!(balance, U256::from(42u64));
				},
				other => panic!("unexpected event: {:?}", other),
			}
		}
	}

	#[test]
	fn test_publish_with_no_subscribers() {
		let event_bus = EventBus::new(16);

		// Publishing with no subscribers should return an error
		assert!(event_bus.publish(balance_event(1)).is_err());
	}

	#[tokio::test]
	async fn test_cloned_event_bus_publishes_to_all_subscribers() {
		let event_bus1 = EventBus::new(16);
		let event_bus2 = event_bus1.clone();

		let mut receiver = event_bus1.subscribe();

		event_bus2
			.publish(StakingEvent::PendingRewardsUpdated {
				amount: U256::from(7u64),
			})
			.unwrap();

		match receiver.recv().await.unwrap() {
			StakingEvent::PendingRewardsUpdated { amount } => {
				assert_eq!(amount, U256::from(7u64));
			},
			other => panic!("unexpected event: {:?}", other),
		}
	}
}
