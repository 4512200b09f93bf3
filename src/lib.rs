//! Capacity-constrained workload allocation for the U-Engine ecosystem.
//!
//! Assigns time-phased work items (client workloads, alone or in groups)
//! to a fixed pool of resources with monthly capacity, balancing load over
//! a twelve-month horizon. Locked items never move; grouped items always
//! share a resource.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Month`, `MonthlyHours`, `WorkItem`,
//!   `Resource`, `AllocationOutcome`
//! - **`allocator`**: The greedy balanced allocator (targets, partitioning,
//!   cost model, overage fallback)
//! - **`validation`**: Input integrity checks (duplicate IDs, bad hours,
//!   locked references)
//! - **`preferences`**: Pre-processing that locks items to proposed resources
//! - **`state`** / **`store`**: Persisted roster + work items, JSON file store
//! - **`report`**: Per-resource load, overage, and imbalance summaries
//!
//! # Algorithm
//!
//! The allocator is a multi-dimensional greedy bin-packing heuristic:
//! largest indivisible units first, each placed on the feasible resource
//! that keeps monthly loads closest to the fair share. It is not optimal.
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (LPT ordering)
//! - Coffman, Garey & Johnson (1978), "An Application of Bin-Packing to
//!   Multiprocessor Scheduling"

pub mod allocator;
pub mod error;
pub mod models;
pub mod preferences;
pub mod report;
pub mod state;
pub mod store;
pub mod validation;

pub use error::{AllocationError, StateError};
