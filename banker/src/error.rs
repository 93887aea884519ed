use thiserror::Error;

/// Every contract violation a caller of [`crate::Manager`] can observe.
///
/// All variants are synchronous and local: whenever one of these is returned,
/// the accounting table is exactly as it was before the call, and the gate's
/// internal lock has already been released.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BankerError {
	#[error("agent id {agent} is out of range (expected 0..{agent_count})")]
	AgentOutOfRange { agent: usize, agent_count: usize },

	#[error("resource class {class} is out of range (expected 0..{class_count})")]
	ClassOutOfRange { class: usize, class_count: usize },

	#[error("agent {0} has already called start")]
	AlreadyStarted(usize),

	#[error("agent {0} has not called start")]
	NotStarted(usize),

	#[error("agent {0} called declare_max after start")]
	MaxFixedAfterStart(usize),

	#[error("agent {agent} declared max {amount} for class {class}, exceeding total capacity {total}")]
	MaxExceedsCapacity { agent: usize, class: usize, amount: u64, total: u64 },

	#[error("agent {agent} requested {amount} of class {class}, which would exceed its declared max of {max} (currently holding {held})")]
	ExceedsDeclaredMax { agent: usize, class: usize, amount: u64, held: u64, max: u64 },

	#[error("agent {agent} tried to release {amount} of class {class} but holds only {held}")]
	ExceedsHeld { agent: usize, class: usize, amount: u64, held: u64 },

	#[error("manager topology is inconsistent: {totals} capacities vs {names} names")]
	InvalidTopology { totals: usize, names: usize },

	#[error("manager must have at least one agent slot and one resource class")]
	EmptyTopology,

	#[error("internal lock was poisoned by a panic in another thread")]
	Poisoned,
}
