use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),
    #[error("CONFIG_INVALID: {0}")]
    Config(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl AppError {
    pub fn task_not_found(id: u64) -> Self {
        Self::NotFound(format!("Task not found: {}", id))
    }

    pub fn category_not_found(id: u64) -> Self {
        Self::NotFound(format!("Category not found: {}", id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Config(value.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn not_found_renders_code_prefix() {
        let error = AppError::task_not_found(7);
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "NOT_FOUND: Task not found: 7");
    }

    #[test]
    fn json_errors_map_to_config() {
        let error: AppError = serde_json::from_str::<u64>("nope").expect_err("invalid json").into();
        assert!(matches!(error, AppError::Config(_)));
        assert!(!error.is_not_found());
    }
}
