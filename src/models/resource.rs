//! Resource model.
//!
//! Resources are the capacity-bounded entities that work items are
//! assigned to (managers). Each resource has a name, which doubles as
//! its identifier and alphabetical tie-break key, and a capacity per month.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Month, MonthlyHours};

/// An assignable resource with monthly capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource name.
    pub name: String,
    /// Upper bound of assignable demand per month.
    pub monthly_capacity: MonthlyHours,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Resource {
    /// Creates a resource with zero capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            monthly_capacity: MonthlyHours::zero(),
            attributes: HashMap::new(),
        }
    }

    /// Creates a resource with the same capacity every month.
    pub fn with_uniform_capacity(name: impl Into<String>, hours: f64) -> Self {
        Self::new(name).with_capacity(MonthlyHours::filled(hours))
    }

    /// Sets the full capacity vector.
    pub fn with_capacity(mut self, capacity: MonthlyHours) -> Self {
        self.monthly_capacity = capacity;
        self
    }

    /// Sets capacity for a single month.
    pub fn with_month_capacity(mut self, month: Month, hours: f64) -> Self {
        self.monthly_capacity.set(month, hours);
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Capacity for a month.
    #[inline]
    pub fn capacity(&self, month: Month) -> f64 {
        self.monthly_capacity.get(month)
    }

    /// Annual capacity.
    pub fn total_capacity(&self) -> f64 {
        self.monthly_capacity.total()
    }
}
