//! Persisted allocation state and roster operations.
//!
//! `AllocationState` is the document a host application keeps between
//! runs: the resource roster with capacities, and the work items with
//! their current assignments. Every operation keeps the document
//! consistent: no item references a removed resource, and an allocation
//! run is merged only when it succeeds.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::allocator::Allocator;
use crate::error::StateError;
use crate::models::{AllocationOutcome, Month, MonthlyHours, Resource, WorkItem};
use crate::preferences::{apply_preferences, Preference, PreferenceReport};

/// Roster settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Hours per month given to a resource added without explicit capacity.
    pub default_capacity: f64,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            default_capacity: 100.0,
        }
    }
}

/// A capacity change for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CapacityUpdate {
    /// Same hours for every month.
    AllMonths(f64),
    /// Hours for a single month.
    Month(Month, f64),
}

/// Resources and work items between allocation runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationState {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
}

impl AllocationState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Finds a work item by ID.
    pub fn work_item(&self, id: &str) -> Option<&WorkItem> {
        self.work_items.iter().find(|i| i.id == id)
    }

    /// Adds a resource.
    ///
    /// Without an explicit capacity, every month gets
    /// `config.default_capacity` hours.
    pub fn add_resource(
        &mut self,
        name: &str,
        capacity: Option<MonthlyHours>,
        config: &StateConfig,
    ) -> Result<&Resource, StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::EmptyResourceName);
        }
        if self.resource(name).is_some() {
            return Err(StateError::DuplicateResource(name.to_string()));
        }
        let capacity = capacity.unwrap_or_else(|| MonthlyHours::filled(config.default_capacity));
        if let Some((month, hours)) = capacity.first_invalid() {
            return Err(StateError::InvalidCapacity {
                resource: name.to_string(),
                month,
                hours,
            });
        }

        self.resources
            .push(Resource::new(name).with_capacity(capacity));
        info!(resource = name, "resource added");
        Ok(&self.resources[self.resources.len() - 1])
    }

    /// Removes a resource and unassigns every item that referenced it.
    ///
    /// Items pinned to the removed resource lose their lock as well, since
    /// a lock without a live resource cannot be honored.
    /// Returns the number of items unassigned.
    pub fn remove_resource(&mut self, name: &str) -> Result<usize, StateError> {
        let pos = self
            .resources
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| StateError::ResourceNotFound(name.to_string()))?;
        self.resources.remove(pos);

        let mut unassigned = 0;
        for item in self.work_items.iter_mut().filter(|i| i.is_assigned_to(name)) {
            item.assigned_resource = None;
            item.locked = false;
            unassigned += 1;
        }
        info!(resource = name, unassigned, "resource removed");
        Ok(unassigned)
    }

    /// Changes a resource's capacity.
    pub fn update_capacity(&mut self, name: &str, update: CapacityUpdate) -> Result<(), StateError> {
        let valid = |h: f64| h.is_finite() && h >= 0.0;
        match update {
            CapacityUpdate::AllMonths(hours) if !valid(hours) => {
                return Err(StateError::InvalidUniformCapacity {
                    resource: name.to_string(),
                    hours,
                });
            }
            CapacityUpdate::Month(month, hours) if !valid(hours) => {
                return Err(StateError::InvalidCapacity {
                    resource: name.to_string(),
                    month,
                    hours,
                });
            }
            _ => {}
        }

        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| StateError::ResourceNotFound(name.to_string()))?;
        match update {
            CapacityUpdate::AllMonths(h) => resource.monthly_capacity = MonthlyHours::filled(h),
            CapacityUpdate::Month(m, h) => resource.monthly_capacity.set(m, h),
        }
        debug!(resource = name, ?update, "capacity updated");
        Ok(())
    }

    /// Moves a work item by hand (`None` unassigns it).
    ///
    /// The lock flag is left as it is.
    pub fn reassign(&mut self, item_id: &str, resource: Option<&str>) -> Result<(), StateError> {
        if let Some(name) = resource {
            if self.resource(name).is_none() {
                return Err(StateError::ResourceNotFound(name.to_string()));
            }
        }
        let item = self
            .work_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StateError::WorkItemNotFound(item_id.to_string()))?;
        item.assigned_resource = resource.map(str::to_string);
        Ok(())
    }

    /// Replaces the work item set (a fresh import).
    pub fn replace_work_items(&mut self, items: Vec<WorkItem>) {
        info!(count = items.len(), "work items replaced");
        self.work_items = items;
    }

    /// Locks items according to `preferences`.
    pub fn apply_preferences(&mut self, preferences: &[Preference]) -> PreferenceReport {
        apply_preferences(&mut self.work_items, preferences, &self.resources)
    }

    /// Runs the allocator and merges its decisions.
    ///
    /// On error the state is left untouched.
    pub fn run_allocation(&mut self, allocator: &Allocator) -> Result<AllocationOutcome, StateError> {
        let outcome = allocator.allocate(&self.resources, &self.work_items)?;
        outcome.apply_to(&mut self.work_items);
        Ok(outcome)
    }
}
