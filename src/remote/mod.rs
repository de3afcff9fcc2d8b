pub mod http;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::Course;

pub use http::HttpCourseRemote;

#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

/// The optional remote course resource. Every failure is reported as
/// [`AppError::RemoteUnavailable`].
#[async_trait]
pub trait CourseRemote: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn create_course(&self, course: &Course) -> Result<Course, AppError>;
    async fn update_course(&self, course: &Course) -> Result<Course, AppError>;
    async fn delete_course(&self, id: u64) -> Result<(), AppError>;
}
