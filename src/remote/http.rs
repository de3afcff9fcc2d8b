use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::Course;
use crate::remote::{CourseRemote, RemoteConfig};

pub struct HttpCourseRemote {
    client: Client,
    config: RemoteConfig,
}

impl HttpCourseRemote {
    pub fn new(config: RemoteConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.config.base_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteUnavailable(format!(
                "remote returned {}: {}",
                status, body
            )));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("undecodable response: {}", e)))
    }
}

#[async_trait]
impl CourseRemote for HttpCourseRemote {
    async fn fetch_courses(&self) -> Result<Vec<Course>, AppError> {
        let response = self.send(self.client.get(&self.config.base_url)).await?;
        let courses: Vec<Course> = Self::decode(response).await?;
        tracing::debug!("Fetched {} courses from {}", courses.len(), self.config.base_url);
        Ok(courses)
    }

    async fn create_course(&self, course: &Course) -> Result<Course, AppError> {
        let response = self
            .send(self.client.post(&self.config.base_url).json(course))
            .await?;
        Self::decode(response).await
    }

    async fn update_course(&self, course: &Course) -> Result<Course, AppError> {
        let response = self
            .send(self.client.put(self.item_url(course.id)).json(course))
            .await?;
        Self::decode(response).await
    }

    async fn delete_course(&self, id: u64) -> Result<(), AppError> {
        self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}
