use crate::clock::LatencyProfile;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "TASKFLOW_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub simulate_latency: bool,
    pub tasks_fixture: Option<PathBuf>,
    pub categories_fixture: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            tasks_fixture: None,
            categories_fixture: None,
            log_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|error| AppError::Io(format!("{}: {}", path.display(), error)))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Self = serde_yaml::from_str(&raw)?;
        config.resolve_relative_to(path.parent());
        Ok(config)
    }

    pub fn from_env() -> AppResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn task_latency(&self) -> LatencyProfile {
        if self.simulate_latency {
            LatencyProfile::tasks()
        } else {
            LatencyProfile::none()
        }
    }

    pub fn category_latency(&self) -> LatencyProfile {
        if self.simulate_latency {
            LatencyProfile::categories()
        } else {
            LatencyProfile::none()
        }
    }

    // Paths in the file are relative to the file itself.
    fn resolve_relative_to(&mut self, base: Option<&Path>) {
        let Some(base) = base else {
            return;
        };
        for path in [&mut self.tasks_fixture, &mut self.categories_fixture, &mut self.log_dir] {
            if let Some(value) = path.as_mut() {
                if value.is_relative() {
                    *value = base.join(&*value);
                }
            }
        }
    }
}
