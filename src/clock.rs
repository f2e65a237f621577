use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, Utc};
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        local_day(self.now())
    }
}

pub fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(RwLock::new(start)),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut writer = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *writer = at;
    }

    pub fn advance(&self, by: ChronoDuration) {
        let mut writer = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *writer += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
    GetByCategory,
    CompletedToday,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub get_all: Duration,
    pub get_by_id: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub get_by_category: Duration,
    pub completed_today: Duration,
    pub search: Duration,
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self {
            get_all: Duration::ZERO,
            get_by_id: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            get_by_category: Duration::ZERO,
            completed_today: Duration::ZERO,
            search: Duration::ZERO,
        }
    }

    pub fn tasks() -> Self {
        Self {
            get_all: Duration::from_millis(300),
            get_by_id: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(250),
            get_by_category: Duration::from_millis(200),
            completed_today: Duration::from_millis(200),
            search: Duration::from_millis(300),
        }
    }

    pub fn categories() -> Self {
        Self {
            get_all: Duration::from_millis(200),
            get_by_id: Duration::from_millis(150),
            create: Duration::from_millis(300),
            update: Duration::from_millis(250),
            delete: Duration::from_millis(200),
            ..Self::none()
        }
    }

    pub fn delay_for(&self, operation: Operation) -> Duration {
        match operation {
            Operation::GetAll => self.get_all,
            Operation::GetById => self.get_by_id,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
            Operation::GetByCategory => self.get_by_category,
            Operation::CompletedToday => self.completed_today,
            Operation::Search => self.search,
        }
    }

    pub async fn pause(&self, operation: Operation) {
        let delay = self.delay_for(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::none()
    }
}
