//! Error types.

use thiserror::Error;

use crate::models::Month;
use crate::validation::ValidationError;

/// Configuration errors that stop an allocation run before any decision is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("no resources defined")]
    NoResources,

    #[error("no work items to allocate")]
    NoWorkItems,

    #[error("locked work item '{work_item_id}' references unknown resource '{resource}'")]
    UnknownLockedResource {
        work_item_id: String,
        resource: String,
    },

    #[error("locked work item '{work_item_id}' has no assigned resource")]
    LockedWithoutResource { work_item_id: String },

    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}

/// Errors from roster operations and state persistence.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("resource name is required")]
    EmptyResourceName,

    #[error("resource '{0}' already exists")]
    DuplicateResource(String),

    #[error("resource '{0}' not found")]
    ResourceNotFound(String),

    #[error("work item '{0}' not found")]
    WorkItemNotFound(String),

    #[error("invalid capacity for resource '{resource}' in {month}: {hours}")]
    InvalidCapacity {
        resource: String,
        month: Month,
        hours: f64,
    },

    #[error("invalid capacity for resource '{resource}' in every month: {hours}")]
    InvalidUniformCapacity { resource: String, hours: f64 },

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("state file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
