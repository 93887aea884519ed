//! The resource-accounting table.
//!
//! Nothing in this module is `pub`: it is a passive data holder, reachable
//! only from [`crate::manager`], which is the sole component allowed to read
//! or mutate it. Consistency is a property of the gate's discipline, not of
//! this module.

/// Per-agent bookkeeping for one slot `0 <= i < N`.
#[derive(Debug, Clone)]
pub(crate) struct AgentSlot {
	pub(crate) started: bool,
	pub(crate) max: Vec<u64>,
	pub(crate) allocated: Vec<u64>,
}

impl AgentSlot {
	fn new(class_count: usize) -> Self {
		Self {
			started: false,
			max: vec![0; class_count],
			allocated: vec![0; class_count],
		}
	}
}

/// The full process-wide shared state: every agent slot plus the system's
/// `remaining` vector. Guarded exclusively by the mutex inside `Manager`.
#[derive(Debug)]
pub(crate) struct Table {
	pub(crate) agents: Vec<AgentSlot>,
	pub(crate) remaining: Vec<u64>,
}

impl Table {
	pub(crate) fn new(total: &[u64], agent_count: usize) -> Self {
		Self {
			agents: (0..agent_count).map(|_| AgentSlot::new(total.len())).collect(),
			remaining: total.to_vec(),
		}
	}
}
