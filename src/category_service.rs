use crate::clock::{LatencyProfile, Operation};
use crate::errors::{AppError, AppResult};
use crate::models::{Category, CategoryPatch, NewCategory, Task};
use crate::stats::category_task_counts;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct CategoryStore {
    records: Vec<Category>,
    last_issued: u64,
}

impl CategoryStore {
    fn new(records: Vec<Category>) -> Self {
        let last_issued = records.iter().map(|category| category.id).max().unwrap_or(0);
        Self { records, last_issued }
    }

    fn next_id(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    fn position(&self, id: u64) -> AppResult<usize> {
        self.records
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| AppError::category_not_found(id))
    }
}

/// `taskCount` is stored, not derived: task mutations never touch it. Use
/// [`CategoryService::sync_task_counts`] to recompute it.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<Mutex<CategoryStore>>,
    latency: LatencyProfile,
}

impl CategoryService {
    pub fn new(initial: Vec<Category>, latency: LatencyProfile) -> Self {
        Self {
            store: Arc::new(Mutex::new(CategoryStore::new(initial))),
            latency,
        }
    }

    pub fn in_memory(initial: Vec<Category>) -> Self {
        Self::new(initial, LatencyProfile::none())
    }

    pub async fn get_all(&self) -> Vec<Category> {
        self.latency.pause(Operation::GetAll).await;
        let store = self.store.lock().await;
        store.records.clone()
    }

    pub async fn get_by_id(&self, id: u64) -> AppResult<Category> {
        self.latency.pause(Operation::GetById).await;
        let store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(category_id = id, "category lookup failed");
        })?;
        Ok(store.records[index].clone())
    }

    pub async fn create(&self, fields: NewCategory) -> Category {
        self.latency.pause(Operation::Create).await;
        let mut store = self.store.lock().await;
        let category = Category {
            id: store.next_id(),
            name: fields.name,
            color: fields.color,
            icon: fields.icon,
            task_count: 0,
        };
        store.records.push(category.clone());
        tracing::info!(category_id = category.id, name = %category.name, "category created");
        category
    }

    pub async fn update(&self, id: u64, patch: CategoryPatch) -> AppResult<Category> {
        self.latency.pause(Operation::Update).await;
        let mut store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(category_id = id, "category update failed");
        })?;
        let category = &mut store.records[index];
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(task_count) = patch.task_count {
            category.task_count = task_count;
        }
        tracing::info!(category_id = id, "category updated");
        Ok(category.clone())
    }

    pub async fn delete(&self, id: u64) -> AppResult<Category> {
        self.latency.pause(Operation::Delete).await;
        let mut store = self.store.lock().await;
        let index = store.position(id).inspect_err(|_| {
            tracing::warn!(category_id = id, "category delete failed");
        })?;
        let removed = store.records.remove(index);
        tracing::info!(category_id = id, "category deleted");
        Ok(removed)
    }

    pub async fn update_task_count(&self, category_id: u64, count: u64) -> AppResult<Category> {
        self.update(
            category_id,
            CategoryPatch {
                task_count: Some(count),
                ..CategoryPatch::default()
            },
        )
        .await
    }

    pub async fn sync_task_counts(&self, tasks: &[Task]) -> Vec<Category> {
        self.latency.pause(Operation::Update).await;
        let mut store = self.store.lock().await;
        let counts = category_task_counts(&store.records, tasks);
        for category in store.records.iter_mut() {
            category.task_count = counts.get(&category.id).copied().unwrap_or(0);
        }
        tracing::info!(categories = store.records.len(), tasks = tasks.len(), "category task counts synced");
        store.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::Utc;

    fn category(id: u64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            color: "#000000".to_string(),
            icon: "Folder".to_string(),
            task_count: 7,
        }
    }

    fn task(id: u64, category_id: u64) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: String::new(),
            category_id,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_task_count_to_zero() {
        let service = CategoryService::in_memory(vec![category(2, "Work")]);
        let created = service
            .create(NewCategory {
                name: "Errands".to_string(),
                color: "#F59E0B".to_string(),
                icon: "Cart".to_string(),
            })
            .await;
        assert_eq!(created.id, 3);
        assert_eq!(created.task_count, 0);
        assert_eq!(service.get_by_id(3).await.expect("category"), created);
    }

    #[tokio::test]
    async fn update_merges_only_given_fields() {
        let service = CategoryService::in_memory(vec![category(1, "Work")]);
        let updated = service
            .update(
                1,
                CategoryPatch {
                    color: Some("#FFFFFF".to_string()),
                    ..CategoryPatch::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Work");
        assert_eq!(updated.color, "#FFFFFF");
        assert_eq!(updated.task_count, 7);
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let service = CategoryService::in_memory(Vec::new());
        assert!(service.get_by_id(1).await.expect_err("missing").is_not_found());
        assert!(service
            .update_task_count(1, 3)
            .await
            .expect_err("missing")
            .is_not_found());
        assert!(service.delete(1).await.expect_err("missing").is_not_found());
    }

    #[tokio::test]
    async fn delete_then_create_does_not_reuse_id() {
        let service = CategoryService::in_memory(vec![category(1, "Work"), category(2, "Home")]);
        let removed = service.delete(2).await.expect("delete");
        assert_eq!(removed.name, "Home");
        assert_eq!(service.get_all().await.len(), 1);

        let created = service.create(NewCategory::default()).await;
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn task_count_is_manual() {
        let service = CategoryService::in_memory(vec![category(1, "Work")]);
        let updated = service.update_task_count(1, 2).await.expect("count");
        assert_eq!(updated.task_count, 2);

        let synced = service.sync_task_counts(&[task(1, 1), task(2, 5)]).await;
        assert_eq!(synced[0].task_count, 1);
        assert_eq!(service.get_by_id(1).await.expect("category").task_count, 1);
    }
}
