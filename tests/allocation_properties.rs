//! End-to-end properties of the allocator over fixed scenarios and
//! seeded random fixtures.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use u_allocate::allocator::{Allocator, FallbackTieBreak};
use u_allocate::models::{Month, MonthlyHours, Resource, WorkItem};
use u_allocate::report::LoadReport;

const EPS: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn random_fixture(seed: u64) -> (Vec<Resource>, Vec<WorkItem>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let names = ["Alice", "Bob", "Carol", "Dan", "Erin"];
    let resource_count = rng.random_range(1..=names.len());
    let resources: Vec<Resource> = names[..resource_count]
        .iter()
        .map(|n| Resource::with_uniform_capacity(*n, rng.random_range(40..160) as f64))
        .collect();

    let item_count = rng.random_range(5..40);
    let items = (0..item_count)
        .map(|i| {
            let mut demand = MonthlyHours::zero();
            for month in Month::ALL {
                if rng.random_bool(0.4) {
                    demand.set(month, rng.random_range(0..30) as f64);
                }
            }
            let mut item = WorkItem::new(format!("w{i}"), demand);
            if rng.random_bool(0.3) {
                item = item.with_group(format!("G{}", rng.random_range(0..4)));
            }
            if rng.random_bool(0.15) {
                let r = &resources[rng.random_range(0..resources.len())];
                item = item.locked_to(r.name.clone());
            }
            item
        })
        .collect();

    (resources, items)
}

fn month_demand(items: &[WorkItem], month: Month) -> f64 {
    items.iter().map(|i| i.monthly_demand[month]).sum()
}

#[test]
fn scenario_two_items_split_evenly() {
    init_tracing();
    let resources = vec![
        Resource::new("Alice").with_month_capacity(Month::January, 100.0),
        Resource::new("Bob").with_month_capacity(Month::January, 100.0),
    ];
    let items = vec![
        WorkItem::new("c1", MonthlyHours::single(Month::January, 50.0)),
        WorkItem::new("c2", MonthlyHours::single(Month::January, 50.0)),
    ];

    let outcome = Allocator::new().allocate(&resources, &items).unwrap();

    assert_ne!(outcome.resource_for("c1"), outcome.resource_for("c2"));
    assert!((outcome.targets[Month::January] - 50.0).abs() < EPS);
    for name in ["Alice", "Bob"] {
        assert!((outcome.load_of(name).unwrap()[Month::January] - 50.0).abs() < EPS);
    }
}

#[test]
fn scenario_group_lands_on_one_resource() {
    init_tracing();
    let resources = vec![
        Resource::new("Alice").with_month_capacity(Month::January, 100.0),
        Resource::new("Bob").with_month_capacity(Month::January, 100.0),
    ];
    let items: Vec<WorkItem> = [10.0, 20.0, 30.0]
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            WorkItem::new(format!("g{i}"), MonthlyHours::single(Month::January, h)).with_group("G")
        })
        .collect();

    let outcome = Allocator::new().allocate(&resources, &items).unwrap();

    // Equal cost and load on both; name decides
    for item in &items {
        assert_eq!(outcome.resource_for(&item.id), Some("Alice"));
    }
    assert!((outcome.load_of("Alice").unwrap()[Month::January] - 60.0).abs() < EPS);
}

#[test]
fn scenario_locked_item_makes_resource_infeasible() {
    init_tracing();
    let resources = vec![
        Resource::new("Alice").with_month_capacity(Month::March, 100.0),
        Resource::new("Bob").with_month_capacity(Month::March, 100.0),
    ];
    let items = vec![
        WorkItem::new("pinned", MonthlyHours::single(Month::March, 80.0)).locked_to("Alice"),
        WorkItem::new("free", MonthlyHours::single(Month::March, 80.0)),
    ];

    let outcome = Allocator::new().allocate(&resources, &items).unwrap();

    assert_eq!(outcome.resource_for("free"), Some("Bob"));
    assert!(outcome.is_within_capacity());
}

#[test]
fn conservation_of_demand() {
    init_tracing();
    for seed in 0..50 {
        let (resources, items) = random_fixture(seed);
        let outcome = Allocator::new().allocate(&resources, &items).unwrap();

        for month in Month::ALL {
            let placed: f64 = outcome.final_loads.values().map(|l| l[month]).sum();
            assert!(
                (placed - month_demand(&items, month)).abs() < EPS,
                "seed {seed}: {month} placed {placed}"
            );
        }

        let mut applied = items.clone();
        outcome.apply_to(&mut applied);
        let report = LoadReport::calculate(&resources, &applied);
        assert!(report.unassigned.total().abs() < EPS, "seed {seed}");
    }
}

#[test]
fn every_unlocked_item_gets_exactly_one_decision() {
    for seed in 0..50 {
        let (resources, items) = random_fixture(seed);
        let outcome = Allocator::new().allocate(&resources, &items).unwrap();

        let unlocked = items.iter().filter(|i| !i.locked).count();
        assert_eq!(outcome.decision_count(), unlocked, "seed {seed}");
        for item in items.iter().filter(|i| !i.locked) {
            let count = outcome
                .decisions
                .iter()
                .filter(|d| d.work_item_id == item.id)
                .count();
            assert_eq!(count, 1, "seed {seed}: {}", item.id);
        }
    }
}

#[test]
fn groups_are_atomic() {
    for seed in 0..50 {
        let (resources, items) = random_fixture(seed);
        let outcome = Allocator::new().allocate(&resources, &items).unwrap();

        let mut group_resource: HashMap<&str, &str> = HashMap::new();
        for item in items.iter().filter(|i| !i.locked && i.is_grouped()) {
            let resource = outcome.resource_for(&item.id).unwrap();
            let first = *group_resource.entry(item.group.as_str()).or_insert(resource);
            assert_eq!(first, resource, "seed {seed}: group {}", item.group);
        }
    }
}

#[test]
fn locked_items_never_move() {
    for seed in 0..50 {
        let (resources, items) = random_fixture(seed);
        let mut applied = items.clone();
        let outcome = Allocator::new()
            .allocate_in_place(&resources, &mut applied)
            .unwrap();

        for (before, after) in items.iter().zip(&applied) {
            if before.locked {
                assert_eq!(before.assigned_resource, after.assigned_resource);
                assert!(outcome.decision_for(&before.id).is_none());
            }
            assert_eq!(before.monthly_demand, after.monthly_demand);
        }
    }
}

#[test]
fn runs_are_deterministic() {
    for seed in 0..20 {
        let (resources, items) = random_fixture(seed);
        for tie_break in [FallbackTieBreak::FirstEncountered, FallbackTieBreak::ByName] {
            let allocator = Allocator::new().with_fallback_tie_break(tie_break);
            let a = allocator.allocate(&resources, &items).unwrap();
            let b = allocator.allocate(&resources, &items).unwrap();
            assert_eq!(a.decisions, b.decisions, "seed {seed}");
            assert_eq!(a.overages, b.overages, "seed {seed}");
        }
    }
}

#[test]
fn serialized_outcomes_are_identical_across_runs() {
    let resources: Vec<Resource> = ["Hana", "Ivo", "Jun", "Kai", "Lea", "Max", "Noa", "Oli"]
        .iter()
        .map(|n| Resource::with_uniform_capacity(*n, 100.0))
        .collect();
    let items: Vec<WorkItem> = (0..8)
        .map(|i| {
            WorkItem::new(
                format!("c{i}"),
                MonthlyHours::single(Month::ALL[i % 12], 10.0 + i as f64),
            )
        })
        .collect();

    let allocator = Allocator::new();
    let first = serde_json::to_string(&allocator.allocate(&resources, &items).unwrap()).unwrap();
    for _ in 0..10 {
        let again = allocator.allocate(&resources, &items).unwrap();
        assert_eq!(serde_json::to_string(&again).unwrap(), first);
    }
}

#[test]
fn ample_capacity_is_never_exceeded() {
    for seed in 0..30 {
        let (resources, items) = random_fixture(seed);
        // Every resource can hold the whole year's demand on its own
        let ceiling = Month::ALL
            .iter()
            .map(|&m| month_demand(&items, m))
            .fold(0.0, f64::max);
        let roomy: Vec<Resource> = resources
            .iter()
            .map(|r| Resource::with_uniform_capacity(r.name.clone(), ceiling))
            .collect();

        let outcome = Allocator::new().allocate(&roomy, &items).unwrap();
        assert!(outcome.is_within_capacity(), "seed {seed}");

        let mut applied = items.clone();
        outcome.apply_to(&mut applied);
        assert!(!LoadReport::calculate(&roomy, &applied).has_overage());
    }
}

#[test]
fn tight_capacity_still_places_everything() {
    init_tracing();
    let resources = vec![
        Resource::with_uniform_capacity("Alice", 10.0),
        Resource::with_uniform_capacity("Bob", 10.0),
    ];
    let items: Vec<WorkItem> = (0..6)
        .map(|i| WorkItem::new(format!("c{i}"), MonthlyHours::single(Month::July, 8.0)))
        .collect();

    let outcome = Allocator::new().allocate(&resources, &items).unwrap();

    assert_eq!(outcome.decision_count(), 6);
    assert!(!outcome.is_within_capacity());
    assert!(outcome.decisions.iter().filter(|d| d.forced).count() >= 4);
    assert!(outcome.overages.iter().all(|o| o.month == Month::July));
}
