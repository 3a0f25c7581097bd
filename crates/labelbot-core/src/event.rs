// SPDX-License-Identifier: Apache-2.0

//! Issue event data model.
//!
//! Mirrors the fields of the `issues` webhook payload that triage cares
//! about. The event is immutable input; nothing here is written back.

use serde::{Deserialize, Deserializer};

/// Webhook action on an issue.
///
/// Only `opened` and `edited` drive triage; every other action string
/// deserializes to [`IssueAction::Other`] and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    /// The issue was created.
    Opened,
    /// The issue title or body was edited.
    Edited,
    /// Any other action (closed, labeled, assigned, ...).
    #[serde(other)]
    Other,
}

/// The issue content under triage.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue title.
    pub title: String,
    /// Issue body. GitHub sends `null` for an empty body.
    #[serde(default, deserialize_with = "null_to_empty")]
    pub body: String,
}

/// Treats an absent or `null` body as the empty string.
fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One incoming issue event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    /// What happened to the issue.
    pub action: IssueAction,
    /// The issue's current title and body.
    pub issue: Issue,
}
