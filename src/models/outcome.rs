//! Allocation outcome model.
//!
//! The engine never mutates its inputs. It returns one decision per
//! unlocked work item, plus the diagnostics of the run: the monthly
//! targets, the final per-resource loads, and any capacity overage
//! forced by the fallback policy. Callers merge the decisions into their
//! own state with [`AllocationOutcome::apply_to`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{Month, MonthlyHours, WorkItem};

/// Result of one allocation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Decisions in commit order (groups first, then individuals).
    pub decisions: Vec<AssignmentDecision>,
    /// Months where a forced placement exceeded capacity.
    pub overages: Vec<CapacityOverage>,
    /// Fair per-resource share of each month's demand.
    pub targets: MonthlyHours,
    /// Committed load per resource at the end of the run, locked demand
    /// included. Ordered by resource name.
    pub final_loads: BTreeMap<String, MonthlyHours>,
}

/// Assignment of one work item to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    /// Assigned work item ID.
    pub work_item_id: String,
    /// Chosen resource name.
    pub resource: String,
    /// The unit the item was placed with.
    pub unit: UnitKind,
    /// Whether no resource could take the unit within capacity.
    pub forced: bool,
}

/// How a work item was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// Placed together with the rest of the named group.
    Group(String),
    /// Placed on its own.
    Individual,
}

/// A month in which a forced placement pushed a resource past capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityOverage {
    /// Resource that received the unit.
    pub resource: String,
    /// Group key or work item ID of the placed unit.
    pub unit_label: String,
    /// Affected month.
    pub month: Month,
    /// Load after the placement.
    pub projected_load: f64,
    /// Capacity for the month.
    pub capacity: f64,
}

impl CapacityOverage {
    /// Hours above capacity.
    #[inline]
    pub fn excess(&self) -> f64 {
        self.projected_load - self.capacity
    }
}

impl AllocationOutcome {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every placement stayed within capacity.
    pub fn is_within_capacity(&self) -> bool {
        self.overages.is_empty()
    }

    /// Finds the decision for a work item.
    pub fn decision_for(&self, work_item_id: &str) -> Option<&AssignmentDecision> {
        self.decisions
            .iter()
            .find(|d| d.work_item_id == work_item_id)
    }

    /// Resource chosen for a work item.
    pub fn resource_for(&self, work_item_id: &str) -> Option<&str> {
        self.decision_for(work_item_id).map(|d| d.resource.as_str())
    }

    /// Returns all decisions placing items on a resource.
    pub fn decisions_for_resource(&self, resource: &str) -> Vec<&AssignmentDecision> {
        self.decisions
            .iter()
            .filter(|d| d.resource == resource)
            .collect()
    }

    /// Final load of a resource, if it took part in the run.
    pub fn load_of(&self, resource: &str) -> Option<&MonthlyHours> {
        self.final_loads.get(resource)
    }

    /// Largest single-month excess across all overages (0 when none).
    pub fn max_excess(&self) -> f64 {
        self.overages
            .iter()
            .map(CapacityOverage::excess)
            .fold(0.0, f64::max)
    }

    /// Number of decisions.
    pub fn decision_count(&self) -> usize {
        self.decisions.len()
    }

    /// Writes the decisions into `items`.
    ///
    /// Only items with a decision are touched; locked items never have one.
    /// Returns the number of items updated.
    pub fn apply_to(&self, items: &mut [WorkItem]) -> usize {
        let by_id: HashMap<&str, &str> = self
            .decisions
            .iter()
            .map(|d| (d.work_item_id.as_str(), d.resource.as_str()))
            .collect();

        let mut updated = 0;
        for item in items.iter_mut() {
            if let Some(&resource) = by_id.get(item.id.as_str()) {
                item.assigned_resource = Some(resource.to_string());
                updated += 1;
            }
        }
        updated
    }
}
