use crate::shared::data::store::get_store;
use contracts::domain::a001_project::aggregate::ProjectId;
use contracts::domain::a002_translation_item::aggregate::{
    SaveTranslationRequest, TranslationItemDto, TranslationItemId,
};

/// Полный набор элементов проекта в формате хранилища
pub async fn list_by_project(project_id: ProjectId) -> anyhow::Result<Option<Vec<TranslationItemDto>>> {
    Ok(get_store().list_items(project_id).await?)
}

/// Сохранить перевод; элемент переходит на проверку
pub async fn save_translation(
    id: TranslationItemId,
    request: SaveTranslationRequest,
) -> anyhow::Result<TranslationItemDto> {
    Ok(get_store().save_translation(id, request.target_text).await?)
}
