//! Partitioning of unlocked work into allocation units, and unit ordering.
//!
//! # Ordering
//! Groups go first, then individuals. Within each pass units are sorted
//! by descending total demand; the sort is stable, so equal totals keep
//! their input order. Large indivisible units claim capacity while the
//! most slack remains.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{MonthlyHours, UnitKind, WorkItem};

/// Unlocked work split by group membership.
///
/// Indices refer to the work item slice the partition was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Group key → member indices, in order of the key's first appearance.
    pub groups: Vec<(String, Vec<usize>)>,
    /// Unlocked items without a group.
    pub individuals: Vec<usize>,
}

/// One indivisible placement: a whole group or a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationUnit {
    /// Group or individual.
    pub kind: UnitKind,
    /// Group key, or the item ID for individuals.
    pub label: String,
    /// Member item indices.
    pub members: Vec<usize>,
    /// Aggregate demand of all members.
    pub demand: MonthlyHours,
}

impl AllocationUnit {
    fn new(kind: UnitKind, label: String, members: Vec<usize>, items: &[WorkItem]) -> Self {
        let demand: MonthlyHours = members.iter().map(|&i| &items[i].monthly_demand).sum();
        Self {
            kind,
            label,
            members,
            demand,
        }
    }

    /// Total demand across all months.
    pub fn total_demand(&self) -> f64 {
        self.demand.total()
    }
}

/// Splits unlocked items into groups and individuals.
///
/// Locked items are left out entirely.
pub fn partition(items: &[WorkItem]) -> Partition {
    let mut result = Partition::default();
    let mut group_pos: HashMap<&str, usize> = HashMap::new();

    for (idx, item) in items.iter().enumerate() {
        if item.locked {
            continue;
        }
        if !item.is_grouped() {
            result.individuals.push(idx);
            continue;
        }
        match group_pos.get(item.group.as_str()) {
            Some(&pos) => result.groups[pos].1.push(idx),
            None => {
                group_pos.insert(item.group.as_str(), result.groups.len());
                result.groups.push((item.group.clone(), vec![idx]));
            }
        }
    }

    result
}

/// Builds the allocation queue: groups by descending demand, then
/// individuals by descending demand.
pub fn order_units(partition: &Partition, items: &[WorkItem]) -> Vec<AllocationUnit> {
    let mut groups: Vec<AllocationUnit> = partition
        .groups
        .iter()
        .map(|(key, members)| {
            AllocationUnit::new(UnitKind::Group(key.clone()), key.clone(), members.clone(), items)
        })
        .collect();
    groups.sort_by(by_descending_demand);

    let mut individuals: Vec<AllocationUnit> = partition
        .individuals
        .iter()
        .map(|&i| AllocationUnit::new(UnitKind::Individual, items[i].id.clone(), vec![i], items))
        .collect();
    individuals.sort_by(by_descending_demand);

    groups.extend(individuals);
    groups
}

// Total order, so non-finite demand from unvalidated input cannot break the sort.
fn by_descending_demand(a: &AllocationUnit, b: &AllocationUnit) -> Ordering {
    b.total_demand().total_cmp(&a.total_demand())
}
