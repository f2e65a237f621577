use crate::category_service::CategoryService;
use crate::clock::{Clock, LatencyProfile, SystemClock};
use crate::config::BoardConfig;
use crate::errors::AppResult;
use crate::filter::filter_tasks;
use crate::fixtures::Fixtures;
use crate::models::{Category, Task, TaskFilters};
use crate::stats::{ProgressStats, VisibleSummary};
use crate::task_service::TaskService;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct VisibleTasks {
    pub tasks: Vec<Task>,
    pub summary: VisibleSummary,
}

#[derive(Clone)]
pub struct TaskBoard {
    tasks: TaskService,
    categories: CategoryService,
    clock: Arc<dyn Clock>,
}

impl TaskBoard {
    pub fn new(
        fixtures: Fixtures,
        clock: Arc<dyn Clock>,
        task_latency: LatencyProfile,
        category_latency: LatencyProfile,
    ) -> Self {
        Self {
            tasks: TaskService::new(fixtures.tasks, clock.clone(), task_latency),
            categories: CategoryService::new(fixtures.categories, category_latency),
            clock,
        }
    }

    pub fn from_config(config: &BoardConfig) -> AppResult<Self> {
        let fixtures = Fixtures::load(config.tasks_fixture.as_deref(), config.categories_fixture.as_deref())?;
        Ok(Self::new(
            fixtures,
            Arc::new(SystemClock),
            config.task_latency(),
            config.category_latency(),
        ))
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn categories(&self) -> &CategoryService {
        &self.categories
    }

    pub async fn load(&self) -> BoardSnapshot {
        let (tasks, categories) = tokio::join!(self.tasks.get_all(), self.categories.get_all());
        BoardSnapshot { tasks, categories }
    }

    pub async fn visible_tasks(&self, filters: &TaskFilters, query: &str) -> VisibleTasks {
        let all = self.tasks.get_all().await;
        let tasks = filter_tasks(&all, filters, query, self.clock.now());
        let summary = VisibleSummary {
            shown: tasks.len(),
            total: all.len(),
        };
        VisibleTasks { tasks, summary }
    }

    pub async fn toggle_complete(&self, id: u64) -> AppResult<Task> {
        let current = self.tasks.get_by_id(id).await?;
        if current.completed {
            self.tasks.mark_incomplete(id).await
        } else {
            self.tasks.mark_complete(id).await
        }
    }

    pub async fn progress(&self) -> ProgressStats {
        ProgressStats::from_tasks(&self.tasks.get_all().await)
    }

    pub async fn refresh_category_counts(&self) -> Vec<Category> {
        let tasks = self.tasks.get_all().await;
        self.categories.sync_task_counts(&tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::StatusFilter;
    use chrono::{TimeZone, Utc};

    fn board() -> TaskBoard {
        let fixtures = Fixtures::builtin().expect("builtin fixtures");
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).single().expect("valid date"));
        TaskBoard::new(fixtures, Arc::new(clock), LatencyProfile::none(), LatencyProfile::none())
    }

    #[tokio::test]
    async fn load_returns_both_collections() {
        let snapshot = board().load().await;
        assert_eq!(snapshot.tasks.len(), 8);
        assert_eq!(snapshot.categories.len(), 5);
    }

    #[tokio::test]
    async fn overdue_view_uses_board_clock() {
        let filters = TaskFilters {
            status: Some(StatusFilter::Overdue),
            ..TaskFilters::default()
        };
        let visible = board().visible_tasks(&filters, "").await;
        let ids: Vec<u64> = visible.tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(visible.summary.to_string(), "Showing 1 of 8 tasks");
    }

    #[tokio::test]
    async fn toggle_flips_stored_state() {
        let board = board();
        let done = board.toggle_complete(1).await.expect("toggle on");
        assert!(done.completed);
        let reopened = board.toggle_complete(1).await.expect("toggle off");
        assert!(!reopened.completed);
        assert!(board.toggle_complete(404).await.expect_err("missing").is_not_found());
    }

    #[tokio::test]
    async fn counts_and_progress_follow_tasks() {
        let board = board();
        let categories = board.refresh_category_counts().await;
        let work = categories.iter().find(|category| category.id == 1).expect("work category");
        assert_eq!(work.task_count, 2);

        let progress = board.progress().await;
        assert_eq!(progress.total, 8);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.rounded_percent(), 25);
    }
}
