//! The request gate and waiter coordination: the five public operations,
//! the single exclusive section that protects the table, and the condition
//! variable that parks and wakes blocked acquirers.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::BankerError;
use crate::oracle;
use crate::table::Table;

/// Owns the accounting table, the mutex that is the gate's single exclusive
/// section, and the condition variable used to park and wake acquirers.
///
/// `N` (agent count) and `R` (resource class count) are fixed once, at
/// construction, by [`crate::ManagerBuilder`] and never change afterward.
pub struct Manager {
	total: Vec<u64>,
	names: Vec<String>,
	agent_count: usize,
	state: Mutex<Table>,
	wake: Condvar,
}

impl Manager {
	pub(crate) fn new(total: Vec<u64>, names: Vec<String>, agent_count: usize) -> Self {
		let table = Table::new(&total, agent_count);
		Self {
			total,
			names,
			agent_count,
			state: Mutex::new(table),
			wake: Condvar::new(),
		}
	}

	/// Number of agent slots this manager was constructed with.
	#[must_use]
	pub fn agent_count(&self) -> usize {
		self.agent_count
	}

	/// Number of resource classes this manager was constructed with.
	#[must_use]
	pub fn class_count(&self) -> usize {
		self.total.len()
	}

	/// Total capacity of resource class `r`, for diagnostics or tests.
	#[must_use]
	pub fn total(&self, class: usize) -> Option<u64> {
		self.total.get(class).copied()
	}

	/// Human-readable name of resource class `r`, for diagnostics only.
	#[must_use]
	pub fn class_name(&self, class: usize) -> Option<&str> {
		self.names.get(class).map(String::as_str)
	}

	/// Units of class `r` that currently belong to no agent.
	pub fn remaining(&self, class: usize) -> Result<u64, BankerError> {
		self.check_class(class)?;
		let table = self.lock()?;
		Ok(table.remaining[class])
	}

	/// Units of class `r` currently held by agent `i`.
	pub fn allocated(&self, agent: usize, class: usize) -> Result<u64, BankerError> {
		self.check_ids(agent, class)?;
		let table = self.lock()?;
		Ok(table.agents[agent].allocated[class])
	}

	/// Declares agent `i`'s lifetime ceiling for resource class `r`.
	///
	/// Must be called before `start(i)`; overwrites any previous declaration
	/// for the same class.
	pub fn declare_max(&self, agent: usize, class: usize, amount: u64) -> Result<(), BankerError> {
		self.check_ids(agent, class)?;
		if amount > self.total[class] {
			warn!(agent, class, amount, total = self.total[class], "declare_max: exceeds total capacity");
			return Err(BankerError::MaxExceedsCapacity {
				agent,
				class,
				amount,
				total: self.total[class],
			});
		}

		let mut table = self.lock()?;
		if table.agents[agent].started {
			warn!(agent, "declare_max: called after start");
			return Err(BankerError::MaxFixedAfterStart(agent));
		}
		table.agents[agent].max[class] = amount;
		debug!(agent, class, amount, "declare_max: set");
		Ok(())
	}

	/// Marks agent `i` as active. Any resource class with no prior
	/// `declare_max` call keeps its implicit maximum of zero.
	pub fn start(&self, agent: usize) -> Result<(), BankerError> {
		self.check_agent(agent)?;
		let mut table = self.lock()?;
		if table.agents[agent].started {
			warn!(agent, "start: already started");
			return Err(BankerError::AlreadyStarted(agent));
		}
		table.agents[agent].started = true;
		debug!(agent, "start: agent is now active");
		Ok(())
	}

	/// Acquires `amount` of resource class `r` for agent `i`, blocking until
	/// the grant is safe. `amount == 0` returns immediately without
	/// inspecting or waking anyone.
	pub fn acquire(&self, agent: usize, class: usize, amount: u64) -> Result<(), BankerError> {
		self.check_ids(agent, class)?;
		if amount == 0 {
			let table = self.lock()?;
			if !table.agents[agent].started {
				return Err(BankerError::NotStarted(agent));
			}
			return Ok(());
		}

		let mut table = self.lock()?;
		self.validate_acquire(&table, agent, class, amount)?;

		loop {
			if amount > table.remaining[class] {
				debug!(agent, class, amount, remaining = table.remaining[class], "acquire: unavailable, parking");
				table = self.wake.wait(table).map_err(|_| BankerError::Poisoned)?;
				continue;
			}

			table.remaining[class] -= amount;
			table.agents[agent].allocated[class] += amount;
			debug!(agent, class, amount, "acquire: trying speculative grant");

			match oracle::check_safety(&table) {
				Some(witness) => {
					info!(agent, class, amount, ?witness, "acquire: safe, grant committed");
					return Ok(());
				}
				None => {
					table.remaining[class] += amount;
					table.agents[agent].allocated[class] -= amount;
					debug!(agent, class, amount, "acquire: unsafe, reverted and parking");
					table = self.wake.wait(table).map_err(|_| BankerError::Poisoned)?;
				}
			}
		}
	}

	/// Bounded variant of [`Manager::acquire`]. Returns `Ok(true)` if the
	/// grant was committed before `timeout` elapsed, `Ok(false)` if the
	/// deadline passed first. On a timeout, the visible state is exactly the
	/// pre-attempt state: no speculative mutation outlives the call.
	pub fn acquire_timeout(&self, agent: usize, class: usize, amount: u64, timeout: Duration) -> Result<bool, BankerError> {
		self.check_ids(agent, class)?;
		if amount == 0 {
			let table = self.lock()?;
			if !table.agents[agent].started {
				return Err(BankerError::NotStarted(agent));
			}
			return Ok(true);
		}

		let deadline = Instant::now() + timeout;
		let mut table = self.lock()?;
		self.validate_acquire(&table, agent, class, amount)?;

		loop {
			let now = Instant::now();
			if now >= deadline {
				debug!(agent, class, amount, "acquire_timeout: deadline elapsed, giving up");
				return Ok(false);
			}
			let remaining_wait = deadline - now;

			if amount > table.remaining[class] {
				debug!(agent, class, amount, remaining = table.remaining[class], "acquire_timeout: unavailable, parking");
				let (guard, _timed_out) = self.wake.wait_timeout(table, remaining_wait).map_err(|_| BankerError::Poisoned)?;
				table = guard;
				continue;
			}

			table.remaining[class] -= amount;
			table.agents[agent].allocated[class] += amount;

			match oracle::check_safety(&table) {
				Some(witness) => {
					info!(agent, class, amount, ?witness, "acquire_timeout: safe, grant committed");
					return Ok(true);
				}
				None => {
					table.remaining[class] += amount;
					table.agents[agent].allocated[class] -= amount;
					debug!(agent, class, amount, "acquire_timeout: unsafe, reverted and parking");
					let (guard, _timed_out) = self.wake.wait_timeout(table, remaining_wait).map_err(|_| BankerError::Poisoned)?;
					table = guard;
				}
			}
		}
	}

	/// Releases `amount` of resource class `r` held by agent `i`, waking
	/// every parked acquirer. `amount == 0` is a no-op.
	pub fn release(&self, agent: usize, class: usize, amount: u64) -> Result<(), BankerError> {
		self.check_ids(agent, class)?;
		let mut table = self.lock()?;
		if !table.agents[agent].started {
			return Err(BankerError::NotStarted(agent));
		}
		let held = table.agents[agent].allocated[class];
		if amount > held {
			warn!(agent, class, amount, held, "release: exceeds held amount");
			return Err(BankerError::ExceedsHeld { agent, class, amount, held });
		}
		if amount == 0 {
			return Ok(());
		}

		table.agents[agent].allocated[class] -= amount;
		table.remaining[class] += amount;
		info!(agent, class, amount, "release: units returned");
		drop(table);
		self.wake.notify_all();
		Ok(())
	}

	/// Returns every unit agent `i` still holds, clears its declared maxima,
	/// and marks the slot dormant so it may be reused by a later `start`.
	pub fn finish(&self, agent: usize) -> Result<(), BankerError> {
		self.check_agent(agent)?;
		let mut table = self.lock()?;
		if !table.agents[agent].started {
			return Err(BankerError::NotStarted(agent));
		}

		for class in 0..self.total.len() {
			let held = table.agents[agent].allocated[class];
			table.remaining[class] += held;
			table.agents[agent].allocated[class] = 0;
			table.agents[agent].max[class] = 0;
		}
		table.agents[agent].started = false;
		info!(agent, "finish: agent returned all holdings and is dormant");
		drop(table);
		self.wake.notify_all();
		Ok(())
	}

	fn validate_acquire(&self, table: &Table, agent: usize, class: usize, amount: u64) -> Result<(), BankerError> {
		self.check_ids(agent, class)?;
		if !table.agents[agent].started {
			return Err(BankerError::NotStarted(agent));
		}
		let held = table.agents[agent].allocated[class];
		let max = table.agents[agent].max[class];
		if held + amount > max {
			warn!(agent, class, amount, held, max, "acquire: exceeds declared max");
			return Err(BankerError::ExceedsDeclaredMax { agent, class, amount, held, max });
		}
		Ok(())
	}

	fn check_agent(&self, agent: usize) -> Result<(), BankerError> {
		if agent >= self.agent_count {
			return Err(BankerError::AgentOutOfRange { agent, agent_count: self.agent_count });
		}
		Ok(())
	}

	fn check_class(&self, class: usize) -> Result<(), BankerError> {
		if class >= self.total.len() {
			return Err(BankerError::ClassOutOfRange { class, class_count: self.total.len() });
		}
		Ok(())
	}

	fn check_ids(&self, agent: usize, class: usize) -> Result<(), BankerError> {
		self.check_agent(agent)?;
		self.check_class(class)
	}

	fn lock(&self) -> Result<MutexGuard<'_, Table>, BankerError> {
		self.state.lock().map_err(|_| BankerError::Poisoned)
	}
}
