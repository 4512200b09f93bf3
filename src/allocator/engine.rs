//! Greedy balanced allocator.
//!
//! # Algorithm
//!
//! 1. Compute per-month targets from all demand (locked + unlocked).
//! 2. Seed per-resource loads from locked items.
//! 3. Partition unlocked items into groups and individuals; order each
//!    pass by descending demand.
//! 4. For each unit, select a resource (feasibility → cost → tie-breaks,
//!    or the overage fallback) and commit its demand.
//!
//! # Complexity
//! O(u * r * 12) where u = allocation units, r = resources.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::{debug, info, instrument, warn};

use super::{compute_targets, order_units, partition, select_best_resource, FallbackTieBreak};
use super::{AllocationUnit, LoadState, Selection};
use crate::error::AllocationError;
use crate::models::{
    AllocationOutcome, AssignmentDecision, CapacityOverage, Month, Resource, WorkItem,
};
use crate::validation::validate_input;

/// Allocator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Tie resolution in the over-capacity fallback.
    pub fallback_tie_break: FallbackTieBreak,
    /// Run [`validate_input`] before allocating.
    pub validate_inputs: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            fallback_tie_break: FallbackTieBreak::FirstEncountered,
            validate_inputs: true,
        }
    }
}

/// Capacity-aware, balance-seeking greedy allocator.
///
/// Assigns every unlocked work item to a resource, keeping groups
/// together and never moving locked items. The run is deterministic for
/// a given item order, group contents, and resource set.
///
/// # Example
///
/// ```
/// use u_allocate::allocator::Allocator;
/// use u_allocate::models::{Month, MonthlyHours, Resource, WorkItem};
///
/// let resources = vec![
///     Resource::new("Alice").with_month_capacity(Month::January, 100.0),
///     Resource::new("Bob").with_month_capacity(Month::January, 100.0),
/// ];
/// let items = vec![
///     WorkItem::new("c1", MonthlyHours::single(Month::January, 50.0)),
///     WorkItem::new("c2", MonthlyHours::single(Month::January, 50.0)),
/// ];
///
/// let outcome = Allocator::new().allocate(&resources, &items).unwrap();
/// assert_eq!(outcome.resource_for("c1"), Some("Alice"));
/// assert_eq!(outcome.resource_for("c2"), Some("Bob"));
/// assert!(outcome.is_within_capacity());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Creates an allocator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator from a config.
    pub fn with_config(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Sets the fallback tie-break.
    pub fn with_fallback_tie_break(mut self, tie_break: FallbackTieBreak) -> Self {
        self.config.fallback_tie_break = tie_break;
        self
    }

    /// Skips input validation (the caller has already validated).
    pub fn without_validation(mut self) -> Self {
        self.config.validate_inputs = false;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Allocates unlocked work items to resources.
    ///
    /// Inputs are not modified. The outcome holds one decision per
    /// unlocked item; apply it with [`AllocationOutcome::apply_to`].
    ///
    /// # Errors
    /// Configuration problems (no resources, no items, invalid input,
    /// bad locked references) abort the run before any decision is made.
    /// Running out of capacity is not an error: the unit is placed by the
    /// overage fallback and reported in [`AllocationOutcome::overages`].
    #[instrument(skip_all, fields(resources = resources.len(), work_items = items.len()))]
    pub fn allocate(
        &self,
        resources: &[Resource],
        items: &[WorkItem],
    ) -> Result<AllocationOutcome, AllocationError> {
        let resource_count =
            NonZeroUsize::new(resources.len()).ok_or(AllocationError::NoResources)?;
        if items.is_empty() {
            return Err(AllocationError::NoWorkItems);
        }
        if self.config.validate_inputs {
            validate_input(resources, items).map_err(AllocationError::InvalidInput)?;
        }

        let targets = compute_targets(items, resource_count);
        let mut loads = LoadState::new(resources);
        loads.seed_from_locked(items)?;

        let units = order_units(&partition(items), items);
        debug!(units = units.len(), "allocation queue built");

        let mut outcome = AllocationOutcome::new();
        outcome.targets = targets;

        for unit in &units {
            let selection = select_best_resource(
                &unit.demand,
                resources,
                &loads,
                &targets,
                self.config.fallback_tie_break,
            )
            .ok_or(AllocationError::NoResources)?;

            self.commit(unit, &selection, items, &mut loads, &mut outcome);
        }

        outcome.final_loads = loads.into_inner();
        info!(
            decisions = outcome.decision_count(),
            overages = outcome.overages.len(),
            "allocation complete"
        );
        Ok(outcome)
    }

    /// Allocates and writes the decisions back into `items`.
    pub fn allocate_in_place(
        &self,
        resources: &[Resource],
        items: &mut [WorkItem],
    ) -> Result<AllocationOutcome, AllocationError> {
        let outcome = self.allocate(resources, items)?;
        outcome.apply_to(items);
        Ok(outcome)
    }

    fn commit(
        &self,
        unit: &AllocationUnit,
        selection: &Selection<'_>,
        items: &[WorkItem],
        loads: &mut LoadState,
        outcome: &mut AllocationOutcome,
    ) {
        let resource = selection.resource();
        let forced = selection.is_forced();

        if forced {
            let load = loads.load_of(&resource.name);
            for month in Month::ALL {
                let projected = load[month] + unit.demand[month];
                if projected > resource.capacity(month) {
                    outcome.overages.push(CapacityOverage {
                        resource: resource.name.clone(),
                        unit_label: unit.label.clone(),
                        month,
                        projected_load: projected,
                        capacity: resource.capacity(month),
                    });
                }
            }
            warn!(
                unit = %unit.label,
                resource = %resource.name,
                "no resource has capacity; placed with minimum overage"
            );
        }

        loads.add(&resource.name, &unit.demand);
        for &idx in &unit.members {
            outcome.decisions.push(AssignmentDecision {
                work_item_id: items[idx].id.clone(),
                resource: resource.name.clone(),
                unit: unit.kind.clone(),
                forced,
            });
        }

        debug!(
            unit = %unit.label,
            members = unit.members.len(),
            hours = unit.total_demand(),
            resource = %resource.name,
            "unit assigned"
        );
    }
}
