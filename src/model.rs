//! Core data model: feature requests, generated tasks, and persisted specs.

use serde::{Deserialize, Serialize};

/// Incoming feature request submitted by the client.
///
/// Immutable once submitted; stored verbatim inside the resulting [`Spec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequest {
    pub goal: String,
    #[serde(default)]
    pub users: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    "web".to_string()
}

/// A single generated task line.
///
/// `id` is assigned sequentially from 1 across the whole spec in emission
/// order: user stories first, then category tasks, then risks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub group: String,
}

/// Task type labels.
pub const TYPE_USER_STORY: &str = "User Story";
pub const TYPE_TASK: &str = "Task";
pub const TYPE_RISK: &str = "Risk";

/// Group labels for the non-category buckets.
pub const GROUP_USER_STORIES: &str = "User Stories";
pub const GROUP_RISKS: &str = "Risks & Unknowns";

/// A persisted record pairing a feature request with its generated breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// UUID v4, assigned at creation and never changed.
    pub id: String,
    /// Milliseconds since the Unix epoch, assigned at creation.
    pub timestamp: i64,
    pub form_data: FeatureRequest,
    pub tasks: Vec<Task>,
}
