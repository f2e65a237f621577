use crate::models::{Category, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    pub progress: f64,
}

impl ProgressStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let progress = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            progress,
        }
    }

    pub fn rounded_percent(&self) -> u32 {
        self.progress.round() as u32
    }
}

impl fmt::Display for ProgressStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tasks completed", self.completed, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleSummary {
    pub shown: usize,
    pub total: usize,
}

impl fmt::Display for VisibleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} tasks", self.shown, self.total)
    }
}

pub fn category_task_counts(categories: &[Category], tasks: &[Task]) -> BTreeMap<u64, u64> {
    let mut counts: BTreeMap<u64, u64> = categories.iter().map(|category| (category.id, 0)).collect();
    for task in tasks {
        if let Some(count) = counts.get_mut(&task.category_id) {
            *count += 1;
        }
    }
    counts
}
