//! Prompt template for the task breakdown request.

use crate::model::FeatureRequest;

/// Render the fixed prompt template for a feature request.
///
/// Empty `users` and `constraints` fields are substituted with neutral
/// placeholders so the model never sees a blank line.
pub fn build_prompt(request: &FeatureRequest) -> String {
    let users = if request.users.is_empty() {
        "General users"
    } else {
        &request.users
    };
    let constraints = if request.constraints.is_empty() {
        "None specified"
    } else {
        &request.constraints
    };

    format!(
        r#"You are a product and engineering expert. Generate a comprehensive list of user stories and engineering tasks for the following feature:

Goal: {goal}
Target Users: {users}
Constraints: {constraints}
Template Type: {template}

Please generate:
1. 3-5 user stories (format: "As a [user], I want [goal] so that [benefit]")
2. 8-12 engineering tasks broken down by category (Frontend, Backend, Database, Testing, Deployment)

Also identify 2-3 key risks or unknowns.

Return your response in the following JSON format only, with no additional text:
{{
  "userStories": ["story1", "story2", ...],
  "tasks": {{
    "Frontend": ["task1", "task2", ...],
    "Backend": ["task1", "task2", ...],
    "Database": ["task1", "task2", ...],
    "Testing": ["task1", "task2", ...],
    "Deployment": ["task1", "task2", ...]
  }},
  "risks": ["risk1", "risk2", ...]
}}"#,
        goal = request.goal,
        users = users,
        constraints = constraints,
        template = request.template,
    )
}
