use axum::{extract::Path, Json};
use contracts::domain::a001_project::aggregate::{Project, ProjectId, ProjectSummary};
use contracts::shared::work_queue::progress::CategoryProgress;

use super::error_status;
use crate::domain::a001_project;

/// GET /api/project
pub async fn list_all() -> Result<Json<Vec<ProjectSummary>>, axum::http::StatusCode> {
    match a001_project::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// GET /api/project/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Project>, axum::http::StatusCode> {
    match a001_project::service::get_by_id(ProjectId::new(id)).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(error_status(&e)),
    }
}

/// GET /api/project/:id/progress
pub async fn get_progress(
    Path(id): Path<String>,
) -> Result<Json<Vec<CategoryProgress>>, axum::http::StatusCode> {
    match a001_project::service::progress(ProjectId::new(id)).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(error_status(&e)),
    }
}
