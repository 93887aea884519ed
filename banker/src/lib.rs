//! # banker
//!
//! A deadlock-avoidance resource manager built on Dijkstra's Banker's
//! algorithm.
//!
//! A fixed number of concurrent agents compete for a fixed vector of
//! finite, fungible resource pools. Each agent declares its maximum
//! lifetime demand for every pool up front (`declare_max`), then moves to
//! an active phase (`start`) where it repeatedly `acquire`s and `release`s
//! units, and finally returns everything it holds (`finish`). `acquire`
//! only ever commits a grant that leaves the system in a *safe* state —
//! one from which every active agent can, in some order, still reach its
//! declared maximum and finish. A request whose grant would be unsafe
//! blocks until some other agent's `release` or `finish` changes the
//! picture.
//!
//! ## Design goals
//!
//! - Correctness of the safety decision takes priority over scheduling
//!   fairness: this crate makes no FIFO promise across waiters.
//! - The speculative-grant pattern (mutate, test, maybe revert) is atomic
//!   with respect to every other operation: the same mutex guard is held
//!   across the whole mutate/check/maybe-revert sequence.
//! - Diagnostics are structured `tracing` events, not `println!`; callers
//!   that need to depend on manager behavior should depend on return
//!   values and observable state, never on log wording.
//!
//! ## Known limitations
//!
//! - No fairness beyond "every honest agent eventually progresses": a
//!   single well-timed agent can in principle keep being the one that
//!   unblocks first. This matches the reference algorithm and is an
//!   accepted tradeoff, not a bug.
//! - One wake signal serves every waiter; a release that only helps one
//!   waiter still wakes all of them, who re-check and re-park if the
//!   release didn't help them. A per-class wake channel would reduce this
//!   thundering-herd effect without changing any externally visible
//!   behavior, but is not implemented here since `N` is expected to be
//!   small.
//!
//! ## Example
//!
//! ```
//! use banker::ManagerBuilder;
//!
//! let manager = ManagerBuilder::new(2, vec![10]).build().unwrap();
//! manager.declare_max(0, 0, 6).unwrap();
//! manager.start(0).unwrap();
//! manager.acquire(0, 0, 6).unwrap();
//! manager.release(0, 0, 6).unwrap();
//! manager.finish(0).unwrap();
//! ```

mod config;
mod error;
mod manager;
mod oracle;
mod table;

pub use config::ManagerBuilder;
pub use error::BankerError;
pub use manager::Manager;
