//! Input validation for allocation problems.
//!
//! Checks structural integrity of resources and work items before
//! allocation. Detects:
//! - Duplicate IDs / names
//! - Empty resource names
//! - Negative or non-finite hours in demand and capacity vectors
//! - Locked items without a resource, or pinned to an unknown one

use crate::models::{Resource, WorkItem};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID or name.
    DuplicateId,
    /// A resource has an empty name.
    EmptyName,
    /// A locked work item references a resource that doesn't exist.
    InvalidResourceReference,
    /// A locked work item has no resource.
    MissingLockedAssignment,
    /// A demand or capacity value is negative or not finite.
    InvalidHours,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for an allocation run.
///
/// Checks:
/// 1. No duplicate or empty resource names
/// 2. No negative or non-finite capacity
/// 3. No duplicate work item IDs
/// 4. No negative or non-finite demand
/// 5. Every locked item names a resource, and that resource exists
///
/// Emptiness of either list is not checked here; the allocator reports
/// it as a dedicated error.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(resources: &[Resource], items: &[WorkItem]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_names = HashSet::new();
    for r in resources {
        if r.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Resource with empty name",
            ));
        }
        if !resource_names.insert(r.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource name: {}", r.name),
            ));
        }
        if let Some((month, hours)) = r.monthly_capacity.first_invalid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Resource '{}' has invalid capacity {hours} in {month}", r.name),
            ));
        }
    }

    let mut item_ids = HashSet::new();
    for item in items {
        if !item_ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate work item ID: {}", item.id),
            ));
        }
        if let Some((month, hours)) = item.monthly_demand.first_invalid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Work item '{}' has invalid demand {hours} in {month}", item.id),
            ));
        }
    }

    // Locked references
    for item in items.iter().filter(|i| i.locked) {
        match item.assigned_resource.as_deref() {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingLockedAssignment,
                format!("Locked work item '{}' has no resource", item.id),
            )),
            Some(name) if !resource_names.contains(name) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidResourceReference,
                    format!(
                        "Locked work item '{}' references unknown resource '{}'",
                        item.id, name
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
