//! Allocation domain models.
//!
//! Provides the data types for describing an allocation problem and its
//! solution.
//!
//! # Domain Mappings
//!
//! | u-allocate | Accounting practice | Consulting | Support desk |
//! |------------|---------------------|------------|--------------|
//! | WorkItem | Client engagement | Project | Account |
//! | Group | Client group | Programme | Customer org |
//! | Resource | Manager | Engagement lead | Agent |
//! | MonthlyHours | Budgeted hours | Booked days | Ticket hours |

mod outcome;
mod period;
mod resource;
mod work_item;

pub use outcome::{AllocationOutcome, AssignmentDecision, CapacityOverage, UnitKind};
pub use period::{Month, MonthlyHours, MONTHS_PER_YEAR};
pub use resource::Resource;
pub use work_item::WorkItem;
