//! Resource selection: feasibility filter, balance cost, and overage fallback.
//!
//! # Cost Model
//!
//! A resource is *feasible* for a unit if, in every month,
//! `load + demand <= capacity`. Among feasible resources the one with the
//! lowest balance cost wins:
//!
//! ```text
//! cost(r) = Σ_m (load[r][m] + demand[m] - target[m])²
//! ```
//!
//! Ties are broken by lower current annual load, then by the
//! lexicographically smaller name.
//!
//! When no resource is feasible the unit still has to go somewhere: the
//! resource with the smallest worst-month overage is chosen. That branch
//! has no secondary ordering of its own; [`FallbackTieBreak`] selects how
//! equal overages are resolved.

use serde::{Deserialize, Serialize};

use super::LoadState;
use crate::models::{Month, MonthlyHours, Resource};

/// Tie resolution among equally bad candidates in the overage fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackTieBreak {
    /// The first resource in roster order wins.
    #[default]
    FirstEncountered,
    /// The lexicographically smaller name wins.
    ByName,
}

/// Outcome of selecting a resource for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// The unit fits within capacity on `resource`.
    Feasible {
        resource: &'a Resource,
        /// Balance cost after the placement.
        cost: f64,
    },
    /// No resource fits; `resource` minimizes the worst-month overage.
    Overflow {
        resource: &'a Resource,
        /// Largest single-month excess after the placement.
        max_overage: f64,
    },
}

impl<'a> Selection<'a> {
    /// The chosen resource.
    pub fn resource(&self) -> &'a Resource {
        match *self {
            Selection::Feasible { resource, .. } | Selection::Overflow { resource, .. } => {
                resource
            }
        }
    }

    /// Whether the placement exceeds capacity.
    pub fn is_forced(&self) -> bool {
        matches!(self, Selection::Overflow { .. })
    }
}

/// Whether `demand` fits on top of `load` in every month.
pub fn is_feasible(load: &MonthlyHours, demand: &MonthlyHours, capacity: &MonthlyHours) -> bool {
    Month::ALL
        .iter()
        .all(|&m| load[m] + demand[m] <= capacity[m])
}

/// Sum of squared deviations of the projected load from the targets.
pub fn balance_cost(load: &MonthlyHours, demand: &MonthlyHours, targets: &MonthlyHours) -> f64 {
    Month::ALL
        .iter()
        .map(|&m| {
            let deviation = load[m] + demand[m] - targets[m];
            deviation * deviation
        })
        .sum()
}

/// Largest single-month excess of the projected load over capacity (0 if none).
pub fn max_overage(load: &MonthlyHours, demand: &MonthlyHours, capacity: &MonthlyHours) -> f64 {
    Month::ALL
        .iter()
        .map(|&m| (load[m] + demand[m] - capacity[m]).max(0.0))
        .fold(0.0, f64::max)
}

struct Candidate<'a> {
    resource: &'a Resource,
    cost: f64,
    total_load: f64,
}

/// Picks the resource for a unit with the given demand.
///
/// Returns `None` only when `resources` is empty.
pub fn select_best_resource<'a>(
    demand: &MonthlyHours,
    resources: &'a [Resource],
    loads: &LoadState,
    targets: &MonthlyHours,
    fallback: FallbackTieBreak,
) -> Option<Selection<'a>> {
    let mut best: Option<Candidate<'a>> = None;

    for resource in resources {
        let load = loads.load_of(&resource.name);
        if !is_feasible(&load, demand, &resource.monthly_capacity) {
            continue;
        }

        let candidate = Candidate {
            resource,
            cost: balance_cost(&load, demand, targets),
            total_load: load.total(),
        };
        let better = match &best {
            None => true,
            Some(b) => {
                candidate.cost < b.cost
                    || (candidate.cost == b.cost && candidate.total_load < b.total_load)
                    || (candidate.cost == b.cost
                        && candidate.total_load == b.total_load
                        && resource.name < b.resource.name)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    if let Some(b) = best {
        return Some(Selection::Feasible {
            resource: b.resource,
            cost: b.cost,
        });
    }

    select_min_overage(demand, resources, loads, fallback)
}

fn select_min_overage<'a>(
    demand: &MonthlyHours,
    resources: &'a [Resource],
    loads: &LoadState,
    fallback: FallbackTieBreak,
) -> Option<Selection<'a>> {
    let mut best: Option<(&'a Resource, f64)> = None;

    for resource in resources {
        let load = loads.load_of(&resource.name);
        let overage = max_overage(&load, demand, &resource.monthly_capacity);
        let better = match best {
            None => true,
            Some((current, min)) => match fallback {
                FallbackTieBreak::FirstEncountered => overage < min,
                FallbackTieBreak::ByName => {
                    overage < min || (overage == min && resource.name < current.name)
                }
            },
        };
        if better {
            best = Some((resource, overage));
        }
    }

    best.map(|(resource, max_overage)| Selection::Overflow {
        resource,
        max_overage,
    })
}
