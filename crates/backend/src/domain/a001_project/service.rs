use crate::shared::data::store::get_store;
use contracts::domain::a001_project::aggregate::{Project, ProjectId, ProjectSummary};
use contracts::shared::work_queue::progress::{progress_by_category, CategoryProgress};

/// Список проектов
pub async fn list_all() -> anyhow::Result<Vec<ProjectSummary>> {
    Ok(get_store().list_projects().await?)
}

/// Проект с таксономией
pub async fn get_by_id(id: ProjectId) -> anyhow::Result<Option<Project>> {
    Ok(get_store().get_project(id).await?)
}

/// Прогресс перевода по основным категориям проекта.
/// Элементы с нераспознанным статусом в подсчёт не попадают.
pub async fn progress(id: ProjectId) -> anyhow::Result<Option<Vec<CategoryProgress>>> {
    let store = get_store();
    let Some(project) = store.get_project(id.clone()).await? else {
        return Ok(None);
    };
    let dtos = store.list_items(id).await?.unwrap_or_default();
    let items: Vec<_> = dtos
        .iter()
        .filter_map(|dto| {
            let item = dto.to_item();
            if item.is_none() {
                tracing::warn!(
                    "translation item {}: unknown status '{}' skipped in progress",
                    dto.id,
                    dto.status
                );
            }
            item
        })
        .collect();
    Ok(Some(progress_by_category(&project.taxonomy, &items)))
}
