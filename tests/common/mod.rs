#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use course_catalog::db::{CourseCache, KeyValueStore, MemoryKeyValue};
use course_catalog::error::AppError;
use course_catalog::models::{Course, CourseDraft};
use course_catalog::remote::CourseRemote;
use course_catalog::store::CourseStore;

pub const KEY: &str = "courses";

pub fn draft(name: &str, category: &str, description: &str, workload: u32) -> CourseDraft {
    CourseDraft {
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        workload,
    }
}

pub fn memory_cache() -> (Arc<MemoryKeyValue>, CourseCache) {
    let kv = Arc::new(MemoryKeyValue::new());
    let cache = CourseCache::new(kv.clone(), KEY);
    (kv, cache)
}

/// Store seeded with the built-in sample set (no remote, empty cache).
pub async fn sample_store() -> (Arc<MemoryKeyValue>, CourseStore) {
    let (kv, cache) = memory_cache();
    let store = CourseStore::open(cache, None).await;
    (kv, store)
}

pub fn ids(courses: &[Course]) -> Vec<u64> {
    courses.iter().map(|c| c.id).collect()
}

pub async fn cached_courses(kv: &MemoryKeyValue) -> Vec<Course> {
    let raw = kv
        .get(KEY)
        .await
        .expect("memory store never fails")
        .expect("cache slot should be populated");
    serde_json::from_str(&raw).expect("cache should hold a course list")
}

/// In-process remote that records every call.
#[derive(Default)]
pub struct FakeRemote {
    pub courses: Vec<Course>,
    pub offline: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeRemote {
    pub fn online(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            Err(AppError::RemoteUnavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CourseRemote for FakeRemote {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        self.record("fetch".to_string())?;
        Ok(self.courses.clone())
    }

    async fn create_course(&self, course: &Course) -> Result<Course, AppError> {
        self.record(format!("create {}", course.id))?;
        Ok(course.clone())
    }

    async fn update_course(&self, course: &Course) -> Result<Course, AppError> {
        self.record(format!("update {}", course.id))?;
        Ok(course.clone())
    }

    async fn delete_course(&self, id: u64) -> Result<(), AppError> {
        self.record(format!("delete {}", id))
    }
}

/// Key-value store whose every operation fails.
pub struct BrokenKeyValue;

#[async_trait]
impl KeyValueStore for BrokenKeyValue {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::Storage("quota exceeded".to_string()))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Storage("quota exceeded".to_string()))
    }
}
