use crate::errors::{AppError, AppResult};
use crate::models::{Category, Task};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const DEFAULT_TASKS_JSON: &str = include_str!("fixtures/tasks.json");
const DEFAULT_CATEGORIES_JSON: &str = include_str!("fixtures/categories.json");

#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
}

impl Fixtures {
    pub fn builtin() -> AppResult<Self> {
        Ok(Self {
            tasks: parse_records(DEFAULT_TASKS_JSON, "builtin tasks")?,
            categories: parse_records(DEFAULT_CATEGORIES_JSON, "builtin categories")?,
        })
    }

    pub fn load(tasks_path: Option<&Path>, categories_path: Option<&Path>) -> AppResult<Self> {
        let tasks = match tasks_path {
            Some(path) => read_records(path)?,
            None => parse_records(DEFAULT_TASKS_JSON, "builtin tasks")?,
        };
        let categories = match categories_path {
            Some(path) => read_records(path)?,
            None => parse_records(DEFAULT_CATEGORIES_JSON, "builtin categories")?,
        };

        tracing::debug!(
            tasks = tasks.len(),
            categories = categories.len(),
            "fixtures loaded"
        );
        Ok(Self { tasks, categories })
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let raw = fs::read_to_string(path)
        .map_err(|error| AppError::Io(format!("{}: {}", path.display(), error)))?;
    parse_records(&raw, &path.display().to_string())
}

fn parse_records<T: DeserializeOwned>(raw: &str, source: &str) -> AppResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|error| AppError::Config(format!("{}: {}", source, error)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_fixtures_parse_with_unique_ids() {
        let fixtures = Fixtures::builtin().expect("builtin fixtures");
        assert!(!fixtures.tasks.is_empty());
        assert!(!fixtures.categories.is_empty());

        let task_ids: HashSet<u64> = fixtures.tasks.iter().map(|task| task.id).collect();
        assert_eq!(task_ids.len(), fixtures.tasks.len());

        let category_ids: HashSet<u64> = fixtures.categories.iter().map(|category| category.id).collect();
        assert!(fixtures
            .tasks
            .iter()
            .all(|task| category_ids.contains(&task.category_id)));
    }

    #[test]
    fn fixture_file_overrides_builtin_tasks() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"Id": 10, "title": "Only task", "description": "", "categoryId": 1,
                "priority": "high", "createdAt": "2026-01-01T00:00:00Z"}]"#,
        )
        .expect("write fixture");

        let fixtures = Fixtures::load(Some(&path), None).expect("fixtures");
        assert_eq!(fixtures.tasks.len(), 1);
        assert_eq!(fixtures.tasks[0].id, 10);
        assert!(!fixtures.tasks[0].completed);
        assert!(!fixtures.categories.is_empty());
    }

    #[test]
    fn malformed_fixture_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("categories.json");
        fs::write(&path, "{not json").expect("write fixture");

        let error = Fixtures::load(None, Some(&path)).expect_err("must reject malformed file");
        assert!(matches!(error, AppError::Config(_)));
    }

    #[test]
    fn missing_fixture_is_an_io_error() {
        let error = Fixtures::load(Some(Path::new("/definitely/missing/tasks.json")), None)
            .expect_err("missing file");
        assert!(matches!(error, AppError::Io(_)));
    }
}
