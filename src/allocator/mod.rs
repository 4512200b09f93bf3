//! Allocation engine.
//!
//! Assigns unlocked work items to capacity-bounded resources, balancing
//! monthly load against a fair-share target.
//!
//! # Pipeline
//!
//! `targets → seed loads → partition & order → (select → commit)*`
//!
//! Each call is a single pure pass. No I/O, no shared state, no
//! randomness: identical inputs in identical order give identical output.
//!
//! # Guarantees
//!
//! - Locked items keep their resource and receive no decision.
//! - All unlocked members of a group get the same resource.
//! - All demand is placed exactly once (conservation).
//! - If capacity allows, no placement exceeds it; otherwise the overage
//!   is reported, never hidden.

mod engine;
mod partition;
mod selection;
mod targets;

pub use engine::{Allocator, AllocatorConfig};
pub use partition::{order_units, partition, AllocationUnit, Partition};
pub use selection::{
    balance_cost, is_feasible, max_overage, select_best_resource, FallbackTieBreak, Selection,
};
pub use targets::{compute_targets, LoadState};
