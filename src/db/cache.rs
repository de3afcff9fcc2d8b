use std::sync::Arc;

use tracing::{debug, warn};

use crate::db::KeyValueStore;
use crate::models::Course;

pub const DEFAULT_STORAGE_KEY: &str = "courses";

/// JSON view of the course list kept in a single key-value slot.
///
/// Failures never propagate: a broken read looks like an empty slot and a
/// broken write is skipped, both with a warning.
#[derive(Clone)]
pub struct CourseCache {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl CourseCache {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn read(&self) -> Vec<Course> {
        let raw = match self.kv.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read course cache '{}': {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Course>>(&raw) {
            Ok(courses) => {
                debug!("Read {} courses from cache '{}'", courses.len(), self.key);
                courses
            }
            Err(e) => {
                warn!("Discarding unreadable course cache '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    pub async fn write(&self, courses: &[Course]) {
        let raw = match serde_json::to_string(courses) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize courses for cache '{}': {}", self.key, e);
                return;
            }
        };

        if let Err(e) = self.kv.put(&self.key, &raw).await {
            warn!("Failed to write course cache '{}': {}", self.key, e);
        }
    }
}
