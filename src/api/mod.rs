use axum::Json;
use axum::extract::{Path, Query};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::filter::{CourseFilter, CourseSummary};
use crate::models::*;
use crate::state::AppState;
use crate::store::categories_of;

const RELATED_LIMIT: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub difficulty: Difficulty,
    pub difficulty_description: &'static str,
    pub estimated_weeks: u32,
    pub related: Vec<Course>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub in_use: Vec<String>,
    pub suggested: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/summary", get(summarize_courses))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/courses/{id}/duplicate", post(duplicate_course))
        .route("/categories", get(list_categories))
        .route("/export", get(export_courses))
        .route("/import", post(import_courses))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Json<Vec<Course>> {
    Json(filter.apply(&state.courses.snapshot()))
}

async fn summarize_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Json<CourseSummary> {
    Json(CourseSummary::of(&filter.apply(&state.courses.snapshot())))
}

async fn create_course(
    State(state): State<AppState>,
    Json(draft): Json<CourseDraft>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    draft.validate()?;
    let course = state.courses.create(draft).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = state.courses.find(id).ok_or(AppError::NotFound)?;
    let difficulty = course.difficulty();
    Ok(Json(CourseDetail {
        difficulty,
        difficulty_description: difficulty.description(),
        estimated_weeks: course.estimated_weeks(),
        related: state.courses.related(id, RELATED_LIMIT),
        course,
    }))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(draft): Json<CourseDraft>,
) -> Result<Json<Course>, AppError> {
    draft.validate()?;
    let course = state.courses.update(id, draft).await?;
    Ok(Json(course))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn duplicate_course(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.courses.duplicate(id).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let in_use = categories_of(&state.courses.snapshot()).into_iter().collect();
    Json(CategoriesResponse {
        in_use,
        suggested: SUGGESTED_CATEGORIES.to_vec(),
    })
}

async fn export_courses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.courses.export()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn import_courses(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let imported = state.courses.import(&body).await?;
    Ok(Json(ImportResponse { imported }))
}
