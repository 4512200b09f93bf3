//! Preference locking.
//!
//! Turns a list of proposed resource assignments into locked work items
//! ahead of an allocation run. A preference targets either a whole group
//! (exact key match) or a single client (name match ignoring case,
//! Unicode-aware).
//! Proposals naming a resource outside the roster are reported and skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Resource, WorkItem};

/// A proposed assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Group key to pin (takes precedence over `client`).
    #[serde(default)]
    pub group: String,
    /// Client name to pin.
    #[serde(default)]
    pub client: String,
    /// Partner label carried from the source sheet.
    #[serde(default)]
    pub partner: String,
    /// Resource the group or client should be locked to.
    pub proposed_resource: String,
}

impl Preference {
    /// Pins a whole group.
    pub fn for_group(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            proposed_resource: resource.into(),
            ..Default::default()
        }
    }

    /// Pins a single client by name.
    pub fn for_client(client: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            proposed_resource: resource.into(),
            ..Default::default()
        }
    }

    fn subject(&self) -> &str {
        if self.client.is_empty() {
            &self.group
        } else {
            &self.client
        }
    }
}

/// A work item locked by a preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedItem {
    pub work_item_id: String,
    pub client: String,
    pub group: String,
    pub resource: String,
}

/// A preference that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedPreference {
    /// Client name or group key of the preference.
    pub subject: String,
    pub resource: String,
}

/// Summary of a preference pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceReport {
    /// Number of work items locked.
    pub matched: usize,
    /// Items locked, in application order.
    pub locked: Vec<LockedItem>,
    /// Preferences whose group/client matched nothing.
    pub unmatched_items: Vec<UnmatchedPreference>,
    /// Preferences naming a resource outside the roster.
    pub unmatched_resources: Vec<UnmatchedPreference>,
}

/// Applies preferences to `items`, locking every matched item.
///
/// Later preferences override earlier ones for the same item.
pub fn apply_preferences(
    items: &mut [WorkItem],
    preferences: &[Preference],
    resources: &[Resource],
) -> PreferenceReport {
    let mut report = PreferenceReport::default();

    for pref in preferences {
        let resource = pref.proposed_resource.as_str();
        if !resources.iter().any(|r| r.name == resource) {
            report.unmatched_resources.push(UnmatchedPreference {
                subject: pref.subject().to_string(),
                resource: resource.to_string(),
            });
            continue;
        }

        let mut matched = false;

        if !pref.group.is_empty() {
            for item in items.iter_mut().filter(|i| i.group == pref.group) {
                lock(item, resource, &mut report);
                matched = true;
            }
        }

        if !matched && !pref.client.is_empty() {
            let client = pref.client.to_lowercase();
            if let Some(item) = items
                .iter_mut()
                .find(|i| i.name.to_lowercase() == client)
            {
                lock(item, resource, &mut report);
                matched = true;
            }
        }

        if !matched {
            report.unmatched_items.push(UnmatchedPreference {
                subject: pref.subject().to_string(),
                resource: resource.to_string(),
            });
        }
    }

    debug!(
        matched = report.matched,
        unmatched_items = report.unmatched_items.len(),
        unmatched_resources = report.unmatched_resources.len(),
        "preferences applied"
    );
    report
}

fn lock(item: &mut WorkItem, resource: &str, report: &mut PreferenceReport) {
    item.assigned_resource = Some(resource.to_string());
    item.locked = true;
    report.matched += 1;
    report.locked.push(LockedItem {
        work_item_id: item.id.clone(),
        client: item.name.clone(),
        group: item.group.clone(),
        resource: resource.to_string(),
    });
}
