//! Fair-share targets and per-resource load bookkeeping.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::error::AllocationError;
use crate::models::{Month, MonthlyHours, Resource, WorkItem};

/// Per-resource fair share of each month's demand.
///
/// Sums the demand of every item, locked and unlocked, and divides by the
/// resource count. Locked demand is also seeded into the loads, so it sits
/// on both sides of the cost deviation.
pub fn compute_targets(items: &[WorkItem], resource_count: NonZeroUsize) -> MonthlyHours {
    let totals: MonthlyHours = items.iter().map(|i| &i.monthly_demand).sum();
    totals.divided_by(resource_count.get() as f64)
}

/// Hours committed to each resource during a run.
///
/// Keyed in name order so iteration and float sums are reproducible.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    loads: BTreeMap<String, MonthlyHours>,
}

impl LoadState {
    /// Zero load for every resource.
    pub fn new(resources: &[Resource]) -> Self {
        Self {
            loads: resources
                .iter()
                .map(|r| (r.name.clone(), MonthlyHours::zero()))
                .collect(),
        }
    }

    /// Adds every locked item's demand to its pinned resource.
    ///
    /// A locked item without a resource, or pinned to a resource that is
    /// not part of this run, is a configuration error. No substitute is
    /// guessed.
    pub fn seed_from_locked(&mut self, items: &[WorkItem]) -> Result<(), AllocationError> {
        for item in items.iter().filter(|i| i.locked) {
            let resource = item.assigned_resource.as_deref().ok_or_else(|| {
                AllocationError::LockedWithoutResource {
                    work_item_id: item.id.clone(),
                }
            })?;
            let load = self.loads.get_mut(resource).ok_or_else(|| {
                AllocationError::UnknownLockedResource {
                    work_item_id: item.id.clone(),
                    resource: resource.to_string(),
                }
            })?;
            *load += &item.monthly_demand;
        }
        Ok(())
    }

    /// Load of a resource (zero for resources outside the run).
    pub fn load_of(&self, resource: &str) -> MonthlyHours {
        self.loads.get(resource).copied().unwrap_or_default()
    }

    /// Commits demand to a resource. Returns `false` if the resource is unknown.
    pub fn add(&mut self, resource: &str, demand: &MonthlyHours) -> bool {
        match self.loads.get_mut(resource) {
            Some(load) => {
                *load += demand;
                true
            }
            None => false,
        }
    }

    /// Annual load of a resource.
    pub fn total_load(&self, resource: &str) -> f64 {
        self.load_of(resource).total()
    }

    /// Sum over all resources for one month.
    pub fn month_total(&self, month: Month) -> f64 {
        self.loads.values().map(|l| l.get(month)).sum()
    }

    /// Number of tracked resources.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether no resource is tracked.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Consumes the state, returning the per-resource loads.
    pub fn into_inner(self) -> BTreeMap<String, MonthlyHours> {
        self.loads
    }
}
