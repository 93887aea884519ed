//! Construction-time configuration: assembling a validated [`Manager`] from
//! a capacity vector, a name vector, and an agent count.
//!
//! This is the crate's "configuration" layer in the same sense the rest of
//! this codebase has one: a small struct with a `new`/builder entry point
//! that validates once, up front, rather than letting a malformed topology
//! surface later as an out-of-range panic deep inside `acquire`.

use crate::error::BankerError;
use crate::manager::Manager;

/// Builds a [`Manager`] from its construction-time parameters: the capacity
/// of each resource class, the number of agent slots, and (optionally)
/// human-readable names for diagnostics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManagerBuilder {
	total: Vec<u64>,
	names: Option<Vec<String>>,
	agent_count: usize,
}

impl ManagerBuilder {
	/// Starts a builder for `agent_count` agents and the resource
	/// capacities in `total`. Names default to `"resource-0"`,
	/// `"resource-1"`, … unless overridden with [`ManagerBuilder::named`].
	#[must_use]
	pub fn new(agent_count: usize, total: Vec<u64>) -> Self {
		Self { total, names: None, agent_count }
	}

	/// Supplies human-readable names for each resource class, used only for
	/// diagnostics (`Manager::class_name`). Must have the same length as
	/// the capacity vector passed to [`ManagerBuilder::new`].
	#[must_use]
	pub fn named(mut self, names: Vec<String>) -> Self {
		self.names = Some(names);
		self
	}

	/// Validates the topology and constructs the [`Manager`].
	///
	/// # Errors
	///
	/// Returns [`BankerError::EmptyTopology`] if there are no agent slots or
	/// no resource classes, and [`BankerError::InvalidTopology`] if an
	/// explicit name vector's length does not match the capacity vector's.
	pub fn build(self) -> Result<Manager, BankerError> {
		if self.agent_count == 0 || self.total.is_empty() {
			return Err(BankerError::EmptyTopology);
		}

		let names = match self.names {
			Some(names) if names.len() == self.total.len() => names,
			Some(names) => {
				return Err(BankerError::InvalidTopology {
					totals: self.total.len(),
					names: names.len(),
				});
			}
			None => (0..self.total.len()).map(|r| format!("resource-{r}")).collect(),
		};

		Ok(Manager::new(self.total, names, self.agent_count))
	}
}
