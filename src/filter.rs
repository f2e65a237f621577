use crate::models::{StatusFilter, Task, TaskFilters};
use chrono::{DateTime, Utc};

pub fn matches_query(task: &Task, query: &str) -> bool {
    let query = query.to_lowercase();
    task.title.to_lowercase().contains(&query) || task.description.to_lowercase().contains(&query)
}

pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now)
}

pub fn filter_tasks(tasks: &[Task], filters: &TaskFilters, query: &str, now: DateTime<Utc>) -> Vec<Task> {
    let query = query.to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            if !query.is_empty() && !matches_query(task, &query) {
                return false;
            }

            if let Some(category_id) = filters.category_id {
                if task.category_id != category_id {
                    return false;
                }
            }

            if let Some(priority) = filters.priority {
                if task.priority != priority {
                    return false;
                }
            }

            match filters.status {
                Some(StatusFilter::Completed) => task.completed,
                Some(StatusFilter::Pending) => !task.completed,
                Some(StatusFilter::Overdue) => is_overdue(task, now),
                None => true,
            }
        })
        .cloned()
        .collect()
}
