pub mod board;
pub mod category_service;
pub mod clock;
pub mod config;
pub mod errors;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod stats;
pub mod task_service;

pub use crate::board::{BoardSnapshot, TaskBoard, VisibleTasks};
pub use crate::category_service::CategoryService;
pub use crate::clock::{Clock, LatencyProfile, ManualClock, SystemClock};
pub use crate::config::BoardConfig;
pub use crate::errors::{AppError, AppResult};
pub use crate::models::{
    Category, CategoryPatch, NewCategory, NewTask, Priority, StatusFilter, Task, TaskFilters, TaskPatch,
};
pub use crate::task_service::TaskService;

use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

pub fn run() -> AppResult<()> {
    let config = BoardConfig::from_env()?;
    init_tracing(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let board = TaskBoard::from_config(&config)?;
        let snapshot = board.load().await;
        let categories = board.refresh_category_counts().await;
        let progress = board.progress().await;
        let completed_today = board.tasks().get_completed_today().await;

        tracing::info!(
            tasks = snapshot.tasks.len(),
            categories = categories.len(),
            completed_today = completed_today.len(),
            progress = progress.rounded_percent(),
            "{}",
            progress
        );
        for category in &categories {
            tracing::info!(category_id = category.id, name = %category.name, tasks = category.task_count, "category");
        }
        Ok::<(), AppError>(())
    })
}

pub fn init_tracing(config: &BoardConfig) -> AppResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter));

    match config.log_dir.as_ref() {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::daily(log_dir, "taskflow.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = LOG_GUARD.set(guard);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(non_blocking)
                .try_init()
                .map_err(|error| AppError::Internal(error.to_string()))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| AppError::Internal(error.to_string())),
    }
}
