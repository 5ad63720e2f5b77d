use axum::{extract::Path, Json};
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a002_translation_item::aggregate::{
    SaveTranslationRequest, TranslationItemDto, TranslationItemId,
};
use contracts::domain::common::AggregateId;

use super::error_status;
use crate::domain::a002_translation_item;

/// GET /api/project/:id/items
pub async fn list_by_project(
    Path(project_id): Path<String>,
) -> Result<Json<Vec<TranslationItemDto>>, axum::http::StatusCode> {
    match a002_translation_item::service::list_by_project(ProjectId::new(project_id)).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/translation_item/:id/translation
pub async fn save_translation(
    Path(id): Path<String>,
    Json(request): Json<SaveTranslationRequest>,
) -> Result<Json<TranslationItemDto>, axum::http::StatusCode> {
    let id = match TranslationItemId::from_string(&id) {
        Ok(id) => id,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_translation_item::service::save_translation(id, request).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}
