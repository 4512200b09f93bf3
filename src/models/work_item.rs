//! Work item model.
//!
//! A work item is a single unit of demand: one client's hours per month.
//! Items sharing a non-empty group key must end up on the same resource.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MonthlyHours;

/// A unit of monthly demand to be assigned to a resource.
///
/// `total_demand()` is always derived from `monthly_demand`, so the
/// total can never drift from the per-month values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier, stable across runs.
    pub id: String,
    /// Client display name.
    #[serde(default)]
    pub name: String,
    /// Group key. Empty = individual item.
    #[serde(default)]
    pub group: String,
    /// Responsible partner (reporting only).
    #[serde(default)]
    pub partner: String,
    /// Demand hours per month.
    pub monthly_demand: MonthlyHours,
    /// Whether `assigned_resource` is pinned.
    #[serde(default)]
    pub locked: bool,
    /// Assigned resource name.
    #[serde(default)]
    pub assigned_resource: Option<String>,
    /// Domain-specific metadata (year-end, engagement type, ...).
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl WorkItem {
    /// Creates an unassigned, unlocked individual item.
    pub fn new(id: impl Into<String>, monthly_demand: MonthlyHours) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            group: String::new(),
            partner: String::new(),
            monthly_demand,
            locked: false,
            assigned_resource: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the client name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the group key.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the partner.
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = partner.into();
        self
    }

    /// Pins the item to a resource.
    pub fn locked_to(mut self, resource: impl Into<String>) -> Self {
        self.assigned_resource = Some(resource.into());
        self.locked = true;
        self
    }

    /// Sets an (unlocked) assignment.
    pub fn with_assignment(mut self, resource: impl Into<String>) -> Self {
        self.assigned_resource = Some(resource.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Total demand across all months.
    pub fn total_demand(&self) -> f64 {
        self.monthly_demand.total()
    }

    /// Whether the item belongs to a group.
    pub fn is_grouped(&self) -> bool {
        !self.group.is_empty()
    }

    /// Whether the item is currently assigned to `resource`.
    pub fn is_assigned_to(&self, resource: &str) -> bool {
        self.assigned_resource.as_deref() == Some(resource)
    }
}
