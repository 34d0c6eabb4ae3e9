//! Extraction and decoding of the model's JSON reply.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;

/// Parsed model reply before flattening.
///
/// `tasks` keeps the category entries in the exact order the model emitted
/// them (serde_json is built with `preserve_order`).
#[derive(Debug, Default, Deserialize)]
pub struct TaskBreakdown {
    #[serde(default, rename = "userStories")]
    pub user_stories: Vec<String>,
    #[serde(default)]
    pub tasks: serde_json::Map<String, Value>,
    #[serde(default)]
    pub risks: Vec<String>,
}

/// Extract and decode the JSON object embedded in a raw completion.
///
/// Models frequently wrap the payload in explanatory prose, so this takes
/// the substring from the first `{` to the last `}` inclusive and decodes
/// that. Deliberately permissive: it is not a bracket-balancing parser and
/// will mis-slice text containing multiple top-level objects or unbalanced
/// braces inside string literals. Kept as-is for compatibility with the
/// prompt contract.
pub fn parse_breakdown(raw: &str) -> Result<TaskBreakdown, AppError> {
    let start = raw
        .find('{')
        .ok_or_else(|| AppError::Parse("no JSON object in model reply".to_string()))?;
    let end = raw
        .rfind('}')
        .ok_or_else(|| AppError::Parse("no JSON object in model reply".to_string()))?;

    if end < start {
        return Err(AppError::Parse("no JSON object in model reply".to_string()));
    }

    let json_str = &raw[start..=end];

    serde_json::from_str(json_str).map_err(|e| AppError::Parse(e.to_string()))
}

/// Decode one category's task list, which must be an array of strings.
pub fn category_items(category: &str, value: &Value) -> Result<Vec<String>, AppError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        AppError::Parse(format!("invalid task list for category '{category}': {e}"))
    })
}
