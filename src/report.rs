//! Load report for a set of assignments.
//!
//! Summarizes how work items are spread across resources, month by month.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Monthly load | Σ demand of items assigned to the resource |
//! | Utilization | load / capacity, per month with capacity > 0 |
//! | Overage | max(0, load - capacity), per month |
//! | Imbalance | Σ_r Σ_m (load[r][m] - target[m])², target = assigned demand / resources |
//! | Unassigned | demand of items without a live resource |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Month, MonthlyHours, Resource, WorkItem};

/// Per-resource line of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub resource: String,
    /// Hours assigned per month.
    pub load: MonthlyHours,
    /// Capacity per month.
    pub capacity: MonthlyHours,
    /// Number of assigned work items.
    pub item_count: usize,
}

impl ResourceLoad {
    /// Annual assigned hours.
    pub fn total(&self) -> f64 {
        self.load.total()
    }

    /// Hours above capacity per month.
    pub fn overage(&self) -> MonthlyHours {
        let mut out = MonthlyHours::zero();
        for month in Month::ALL {
            out.set(month, (self.load[month] - self.capacity[month]).max(0.0));
        }
        out
    }

    /// Months where load exceeds capacity.
    pub fn overloaded_months(&self) -> Vec<Month> {
        Month::ALL
            .into_iter()
            .filter(|&m| self.load[m] > self.capacity[m])
            .collect()
    }

    /// Load / capacity for a month; `None` when capacity is zero.
    pub fn utilization(&self, month: Month) -> Option<f64> {
        let capacity = self.capacity[month];
        (capacity > 0.0).then(|| self.load[month] / capacity)
    }
}

/// Load distribution across resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// One line per resource, in roster order.
    pub resources: Vec<ResourceLoad>,
    /// Σ demand over all items, assigned or not.
    pub grand_total: MonthlyHours,
    /// Demand of items with no live resource.
    pub unassigned: MonthlyHours,
    /// Sum of squared deviations from the fair share.
    pub imbalance: f64,
}

impl LoadReport {
    /// Builds the report from a roster and the current assignments.
    pub fn calculate(resources: &[Resource], items: &[WorkItem]) -> Self {
        let mut lines: Vec<ResourceLoad> = resources
            .iter()
            .map(|r| ResourceLoad {
                resource: r.name.clone(),
                load: MonthlyHours::zero(),
                capacity: r.monthly_capacity,
                item_count: 0,
            })
            .collect();

        let mut unassigned = MonthlyHours::zero();
        for item in items {
            let pos = item
                .assigned_resource
                .as_deref()
                .and_then(|name| lines.iter().position(|l| l.resource == name));
            match pos {
                Some(pos) => {
                    let line = &mut lines[pos];
                    line.load += &item.monthly_demand;
                    line.item_count += 1;
                }
                None => unassigned += &item.monthly_demand,
            }
        }

        let grand_total: MonthlyHours = items.iter().map(|i| &i.monthly_demand).sum();
        let imbalance = if lines.is_empty() {
            0.0
        } else {
            let assigned: MonthlyHours = lines.iter().map(|l| &l.load).sum();
            let target = assigned.divided_by(lines.len() as f64);
            lines
                .iter()
                .flat_map(|l| Month::ALL.into_iter().map(move |m| l.load[m] - target[m]))
                .map(|d| d * d)
                .sum()
        };

        Self {
            resources: lines,
            grand_total,
            unassigned,
            imbalance,
        }
    }

    /// Line for a resource.
    pub fn resource(&self, name: &str) -> Option<&ResourceLoad> {
        self.resources.iter().find(|l| l.resource == name)
    }

    /// Whether any resource exceeds capacity in any month.
    pub fn has_overage(&self) -> bool {
        self.resources
            .iter()
            .any(|l| !l.overloaded_months().is_empty())
    }

    /// Hours per partner for one resource's items.
    pub fn by_partner(resource: &str, items: &[WorkItem]) -> BTreeMap<String, MonthlyHours> {
        let mut out: BTreeMap<String, MonthlyHours> = BTreeMap::new();
        for item in items.iter().filter(|i| i.is_assigned_to(resource)) {
            *out.entry(item.partner.clone()).or_default() += &item.monthly_demand;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Resource> {
        vec![
            Resource::new("Alice").with_month_capacity(Month::January, 100.0),
            Resource::new("Bob").with_month_capacity(Month::January, 50.0),
        ]
    }

    #[test]
    fn test_report_loads() {
        let items = vec![
            WorkItem::new("c1", MonthlyHours::single(Month::January, 60.0)).with_assignment("Alice"),
            WorkItem::new("c2", MonthlyHours::single(Month::January, 60.0)).with_assignment("Bob"),
            WorkItem::new("c3", MonthlyHours::single(Month::February, 5.0)),
            WorkItem::new("c4", MonthlyHours::single(Month::February, 5.0)).with_assignment("Gone"),
        ];
        let report = LoadReport::calculate(&roster(), &items);

        let alice = report.resource("Alice").unwrap();
        assert!((alice.total() - 60.0).abs() < 1e-10);
        assert_eq!(alice.item_count, 1);
        assert!((alice.utilization(Month::January).unwrap() - 0.6).abs() < 1e-10);
        assert_eq!(alice.utilization(Month::March), None);

        let bob = report.resource("Bob").unwrap();
        assert_eq!(bob.overloaded_months(), vec![Month::January]);
        assert!((bob.overage()[Month::January] - 10.0).abs() < 1e-10);
        assert!(report.has_overage());

        assert!((report.unassigned[Month::February] - 10.0).abs() < 1e-10);
        assert!((report.grand_total.total() - 130.0).abs() < 1e-10);
    }

    #[test]
    fn test_imbalance() {
        let balanced = vec![
            WorkItem::new("c1", MonthlyHours::single(Month::January, 30.0)).with_assignment("Alice"),
            WorkItem::new("c2", MonthlyHours::single(Month::January, 30.0)).with_assignment("Bob"),
        ];
        assert!((LoadReport::calculate(&roster(), &balanced).imbalance - 0.0).abs() < 1e-10);

        let skewed = vec![
            WorkItem::new("c1", MonthlyHours::single(Month::January, 30.0)).with_assignment("Alice"),
            WorkItem::new("c2", MonthlyHours::single(Month::January, 30.0)).with_assignment("Alice"),
        ];
        // target 30: (60-30)² + (0-30)² = 1800
        assert!((LoadReport::calculate(&roster(), &skewed).imbalance - 1800.0).abs() < 1e-10);
    }

    #[test]
    fn test_by_partner() {
        let items = vec![
            WorkItem::new("c1", MonthlyHours::single(Month::May, 10.0))
                .with_partner("Jones")
                .with_assignment("Alice"),
            WorkItem::new("c2", MonthlyHours::single(Month::May, 5.0))
                .with_partner("Jones")
                .with_assignment("Alice"),
            WorkItem::new("c3", MonthlyHours::single(Month::May, 7.0))
                .with_partner("Smith")
                .with_assignment("Alice"),
            WorkItem::new("c4", MonthlyHours::single(Month::May, 9.0))
                .with_partner("Smith")
                .with_assignment("Bob"),
        ];
        let partners = LoadReport::by_partner("Alice", &items);
        assert_eq!(partners.len(), 2);
        assert!((partners["Jones"][Month::May] - 15.0).abs() < 1e-10);
        assert!((partners["Smith"].total() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_roster() {
        let items = vec![WorkItem::new("c1", MonthlyHours::filled(1.0))];
        let report = LoadReport::calculate(&[], &items);
        assert!(report.resources.is_empty());
        assert!((report.unassigned.total() - 12.0).abs() < 1e-10);
        assert!((report.imbalance - 0.0).abs() < 1e-10);
    }
}
