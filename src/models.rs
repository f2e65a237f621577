use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Completed,
    Pending,
    Overdue,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "Id", alias = "id")]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "category_ref")]
    pub category_id: u64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "Id", alias = "id")]
    pub id: u64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub task_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "category_ref")]
    pub category_id: u64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "optional_category_ref")]
    pub category_id: Option<u64>,
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub task_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskFilters {
    #[serde(deserialize_with = "blank_category_ref")]
    pub category_id: Option<u64>,
    #[serde(deserialize_with = "blank_priority")]
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "blank_status")]
    pub status: Option<StatusFilter>,
}

impl TaskFilters {
    pub fn is_active(&self) -> bool {
        self.category_id.is_some() || self.priority.is_some() || self.status.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // The select widgets report "" for their "All ..." option.

    pub fn set_category(&mut self, value: &str) -> AppResult<()> {
        self.category_id = match value.trim() {
            "" => None,
            raw => Some(
                raw.parse()
                    .map_err(|_| AppError::InvalidInput(format!("invalid category filter: {}", raw)))?,
            ),
        };
        Ok(())
    }

    pub fn set_priority(&mut self, value: &str) -> AppResult<()> {
        self.priority = match value.trim() {
            "" => None,
            raw => Some(
                Priority::parse(raw).ok_or_else(|| AppError::InvalidInput(format!("invalid priority filter: {}", raw)))?,
            ),
        };
        Ok(())
    }

    pub fn set_status(&mut self, value: &str) -> AppResult<()> {
        self.status = match value.trim() {
            "" => None,
            raw => Some(
                StatusFilter::parse(raw).ok_or_else(|| AppError::InvalidInput(format!("invalid status filter: {}", raw)))?,
            ),
        };
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategoryRef {
    Number(u64),
    Text(String),
}

impl RawCategoryRef {
    fn into_id<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(value) => value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid category id: {}", value))),
        }
    }
}

// Category references arrive as numbers or as the numeric strings the
// select widgets produce.
fn category_ref<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    RawCategoryRef::deserialize(deserializer)?.into_id()
}

fn optional_category_ref<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCategoryRef>::deserialize(deserializer)? {
        Some(raw) => raw.into_id().map(Some),
        None => Ok(None),
    }
}

// Filter-bar state uses "" for "all", same as the setters above.
fn blank_category_ref<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCategoryRef>::deserialize(deserializer)? {
        Some(RawCategoryRef::Text(value)) if value.trim().is_empty() => Ok(None),
        Some(raw) => raw.into_id().map(Some),
        None => Ok(None),
    }
}

fn blank_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_or_parse(deserializer, Priority::parse, "priority")
}

fn blank_status<'de, D>(deserializer: D) -> Result<Option<StatusFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_or_parse(deserializer, StatusFilter::parse, "status")
}

fn blank_or_parse<'de, D, T>(deserializer: D, parse: fn(&str) -> Option<T>, kind: &str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid {} filter: {}", kind, value))),
        None => Ok(None),
    }
}

// Present-but-null becomes `Some(None)`; an absent key stays `None` through
// `#[serde(default)]`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
