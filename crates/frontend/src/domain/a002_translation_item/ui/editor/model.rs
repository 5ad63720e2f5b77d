use crate::shared::api_utils::{api_url, get_json, project_path};
use contracts::domain::a001_project::aggregate::{Project, ProjectId};
use contracts::domain::a002_translation_item::aggregate::{
    SaveTranslationRequest, TranslationItemDto, TranslationItemId,
};
use contracts::domain::a003_glossary_term::aggregate::GlossaryTerm;
use contracts::shared::errors::PersistenceError;
use contracts::shared::work_queue::store::WorkItemStore;
use gloo_net::http::Request;

pub async fn fetch_project(id: &ProjectId) -> Result<Project, PersistenceError> {
    let url = api_url(&project_path(id.value(), None));
    get_json(&url).await
}

pub async fn fetch_items(id: &ProjectId) -> Result<Vec<TranslationItemDto>, PersistenceError> {
    let url = api_url(&project_path(id.value(), Some("items")));
    get_json(&url).await
}

pub async fn fetch_glossary(id: &ProjectId) -> Result<Vec<GlossaryTerm>, PersistenceError> {
    let url = api_url(&project_path(id.value(), Some("glossary")));
    get_json(&url).await
}

/// Загрузить проект и построить хранилище элементов
pub async fn load_store(id: &ProjectId) -> Result<(Project, WorkItemStore), String> {
    let project = fetch_project(id)
        .await
        .map_err(|e| format!("Ошибка загрузки проекта: {}", e))?;
    let dtos = fetch_items(id)
        .await
        .map_err(|e| format!("Ошибка загрузки строк: {}", e))?;
    let (store, report) = WorkItemStore::from_dtos(project.taxonomy.clone(), dtos)
        .map_err(|e| format!("Некорректные данные проекта: {}", e))?;
    if !report.skipped.is_empty() {
        log::warn!(
            "{} translation items skipped because of unknown status",
            report.skipped.len()
        );
    }
    Ok((project, store))
}

pub async fn save_translation(id: TranslationItemId, target_text: String) -> Result<(), PersistenceError> {
    let url = api_url(&format!("/api/translation_item/{}/translation", id));
    let body = serde_json::to_string(&SaveTranslationRequest { target_text })
        .map_err(|e| PersistenceError::Decode(e.to_string()))?;

    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| PersistenceError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| PersistenceError::Transport(e.to_string()))?;

    match response.status() {
        200 => Ok(()),
        400 | 409 => Err(PersistenceError::Rejected(
            response.text().await.unwrap_or_default(),
        )),
        status => Err(PersistenceError::Http { status }),
    }
}
