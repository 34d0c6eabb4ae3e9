//! Flattening of a parsed breakdown into the ordered task list.

use crate::errors::AppError;
use crate::model::{Task, GROUP_RISKS, GROUP_USER_STORIES, TYPE_RISK, TYPE_TASK, TYPE_USER_STORY};

use super::parse::{category_items, TaskBreakdown};

/// Flatten a breakdown into tasks with sequential ids starting at 1.
///
/// Emission order: user stories, then each category's tasks in the order the
/// model returned the categories, then risks. Duplicate text is kept; ids
/// never repeat or skip.
pub fn flatten_tasks(breakdown: &TaskBreakdown) -> Result<Vec<Task>, AppError> {
    let mut tasks = Vec::new();
    let mut next_id = 1u32;

    let mut push = |tasks: &mut Vec<Task>, text: &str, task_type: &str, group: &str| {
        tasks.push(Task {
            id: next_id,
            text: text.to_string(),
            task_type: task_type.to_string(),
            group: group.to_string(),
        });
        next_id += 1;
    };

    for story in &breakdown.user_stories {
        push(&mut tasks, story, TYPE_USER_STORY, GROUP_USER_STORIES);
    }

    for (category, items) in &breakdown.tasks {
        for item in category_items(category, items)? {
            push(&mut tasks, &item, TYPE_TASK, category);
        }
    }

    for risk in &breakdown.risks {
        push(&mut tasks, risk, TYPE_RISK, GROUP_RISKS);
    }

    Ok(tasks)
}
