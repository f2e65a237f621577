use crate::clock::{local_day, Clock, LatencyProfile, Operation, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::filter::matches_query;
use crate::models::{NewTask, Task, TaskPatch};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct TaskStore {
    records: Vec<Task>,
    // Highest id ever handed out, so deleting the newest task never frees
    // its id for reuse.
    last_issued: u64,
}

impl TaskStore {
    fn new(records: Vec<Task>) -> Self {
        let last_issued = records.iter().map(|task| task.id).max().unwrap_or(0);
        Self { records, last_issued }
    }

    fn next_id(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    fn position(&self, id: u64) -> AppResult<usize> {
        self.records
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::task_not_found(id))
    }
}

#[derive(Clone)]
pub struct TaskService {
    store: Arc<Mutex<TaskStore>>,
    clock: Arc<dyn Clock>,
    latency: LatencyProfile,
}

impl TaskService {
    pub fn new(initial: Vec<Task>, clock: Arc<dyn Clock>, latency: LatencyProfile) -> Self {
        Self {
            store: Arc::new(Mutex::new(TaskStore::new(initial))),
            clock,
            latency,
        }
    }

    pub fn in_memory(initial: Vec<Task>) -> Self {
        Self::new(initial, Arc::new(SystemClock), LatencyProfile::none())
    }

    pub async fn get_all(&self) -> Vec<Task> {
        self.latency.pause(Operation::GetAll).await;
        let store = self.store.lock().await;
        tracing::debug!(count = store.records.len(), "tasks listed");
        store.records.clone()
    }

    pub async fn get_by_id(&self, id: u64) -> AppResult<Task> {
        self.latency.pause(Operation::GetById).await;
        let store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(task_id = id, "task lookup failed");
        })?;
        Ok(store.records[index].clone())
    }

    pub async fn create(&self, fields: NewTask) -> Task {
        self.latency.pause(Operation::Create).await;
        let mut store = self.store.lock().await;
        let task = Task {
            id: store.next_id(),
            title: fields.title,
            description: fields.description,
            category_id: fields.category_id,
            priority: fields.priority,
            due_date: fields.due_date,
            completed: false,
            created_at: self.clock.now(),
            completed_at: None,
        };
        store.records.push(task.clone());
        tracing::info!(task_id = task.id, category_id = task.category_id, "task created");
        task
    }

    /// Merges `patch` onto the task. `completedAt` is recomputed on every
    /// update from the resulting `completed` value, so a completed task
    /// gets a fresh timestamp whenever it is updated.
    pub async fn update(&self, id: u64, patch: TaskPatch) -> AppResult<Task> {
        self.latency.pause(Operation::Update).await;
        let mut store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(task_id = id, "task update failed");
        })?;
        let now = self.clock.now();
        let task = &mut store.records[index];
        apply_patch(task, patch, now);
        tracing::info!(task_id = id, completed = task.completed, "task updated");
        Ok(task.clone())
    }

    pub async fn delete(&self, id: u64) -> AppResult<Task> {
        self.latency.pause(Operation::Delete).await;
        let mut store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(task_id = id, "task delete failed");
        })?;
        let removed = store.records.remove(index);
        tracing::info!(task_id = id, "task deleted");
        Ok(removed)
    }

    pub async fn get_by_category(&self, category_id: u64) -> Vec<Task> {
        self.latency.pause(Operation::GetByCategory).await;
        let store = self.store.lock().await;
        store
            .records
            .iter()
            .filter(|task| task.category_id == category_id)
            .cloned()
            .collect()
    }

    pub async fn mark_complete(&self, id: u64) -> AppResult<Task> {
        self.update(id, TaskPatch::completed(true)).await
    }

    pub async fn mark_incomplete(&self, id: u64) -> AppResult<Task> {
        self.update(id, TaskPatch::completed(false)).await
    }

    pub async fn get_completed_today(&self) -> Vec<Task> {
        self.latency.pause(Operation::CompletedToday).await;
        let today = self.clock.today();
        let store = self.store.lock().await;
        store
            .records
            .iter()
            .filter(|task| {
                task.completed
                    && task
                        .completed_at
                        .is_some_and(|completed_at| local_day(completed_at) == today)
            })
            .cloned()
            .collect()
    }

    pub async fn search(&self, query: &str) -> Vec<Task> {
        self.latency.pause(Operation::Search).await;
        let store = self.store.lock().await;
        let matches: Vec<Task> = store
            .records
            .iter()
            .filter(|task| matches_query(task, query))
            .cloned()
            .collect();
        tracing::debug!(query, hits = matches.len(), "tasks searched");
        matches
    }
}

fn apply_patch(task: &mut Task, patch: TaskPatch, now: DateTime<Utc>) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(category_id) = patch.category_id {
        task.category_id = category_id;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    task.completed_at = task.completed.then_some(now);
}
