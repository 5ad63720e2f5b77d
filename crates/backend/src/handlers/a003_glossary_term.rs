use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a003_glossary_term::aggregate::GlossaryTerm;
use serde::Deserialize;

use super::error_status;
use crate::domain::a003_glossary_term;

#[derive(Debug, Deserialize)]
pub struct GlossaryQuery {
    pub q: Option<String>,
}

/// GET /api/project/:id/glossary?q=
pub async fn list_by_project(
    Path(project_id): Path<String>,
    Query(query): Query<GlossaryQuery>,
) -> Result<Json<Vec<GlossaryTerm>>, axum::http::StatusCode> {
    match a003_glossary_term::service::list_by_project(ProjectId::new(project_id), query.q.as_deref())
        .await
    {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => Err(error_status(&e)),
    }
}
