use crate::domain::a001_project::aggregate::Taxonomy;
use crate::domain::a002_translation_item::aggregate::{
    TranslationItem, TranslationItemDto, TranslationItemId,
};
use crate::enums::TranslationStatus;
use crate::shared::errors::ValidationError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Хранилище элементов перевода проекта.
///
/// Единственный владелец элементов и их изменяемых полей: фильтр и навигатор
/// получают только ссылки и выдают производные последовательности id.
#[derive(Debug, Clone)]
pub struct WorkItemStore {
    taxonomy: Taxonomy,
    items: Vec<TranslationItem>,
    index: HashMap<TranslationItemId, usize>,
    revisions: HashMap<TranslationItemId, u64>,
}

/// Итог загрузки из DTO хранилища
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Элементы с нераспознанным статусом: (id, код статуса)
    pub skipped: Vec<(TranslationItemId, String)>,
}

/// Оптимистичное сохранение, ожидающее ответа хранилища
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    item_id: TranslationItemId,
    revision: u64,
    target_text: String,
    previous: TranslationItem,
}

impl PendingSave {
    pub fn item_id(&self) -> TranslationItemId {
        self.item_id
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }
}

fn build_index(
    taxonomy: &Taxonomy,
    items: &[TranslationItem],
) -> Result<HashMap<TranslationItemId, usize>, ValidationError> {
    let mut index = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        item.validate(taxonomy)?;
        if index.insert(item.id, pos).is_some() {
            return Err(ValidationError::DuplicateItem(item.id.value()));
        }
    }
    Ok(index)
}

impl WorkItemStore {
    /// Создать хранилище; каждый элемент обязан разрешаться в таксономии
    pub fn new(taxonomy: Taxonomy, items: Vec<TranslationItem>) -> Result<Self, ValidationError> {
        let index = build_index(&taxonomy, &items)?;
        Ok(Self {
            taxonomy,
            items,
            index,
            revisions: HashMap::new(),
        })
    }

    /// Загрузка из формата хранилища.
    ///
    /// Элементы с неизвестным статусом исключаются и попадают в отчёт;
    /// нарушение таксономии остаётся ошибкой всей загрузки.
    pub fn from_dtos(
        taxonomy: Taxonomy,
        dtos: Vec<TranslationItemDto>,
    ) -> Result<(Self, LoadReport), ValidationError> {
        let mut report = LoadReport::default();
        let mut items = Vec::with_capacity(dtos.len());
        for dto in dtos {
            match dto.to_item() {
                Some(item) => items.push(item),
                None => {
                    log::warn!(
                        "translation item {}: unknown backend status '{}', item excluded",
                        dto.id,
                        dto.status
                    );
                    report.skipped.push((dto.id, dto.status));
                }
            }
        }
        report.loaded = items.len();
        let store = Self::new(taxonomy, items)?;
        Ok((store, report))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Элементы в порядке загрузки
    pub fn items(&self) -> &[TranslationItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TranslationItemId) -> Option<&TranslationItem> {
        self.index.get(&id).map(|pos| &self.items[*pos])
    }

    pub fn status_of(&self, id: TranslationItemId) -> Option<TranslationStatus> {
        self.get(id).map(|item| item.status)
    }

    /// Применить сохранение локально (до ответа хранилища)
    pub fn apply_save(
        &mut self,
        id: TranslationItemId,
        target_text: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingSave, ValidationError> {
        let pos = *self
            .index
            .get(&id)
            .ok_or(ValidationError::UnknownItem(id.value()))?;
        let previous = self.items[pos].clone();
        self.items[pos].apply_translation(target_text, now)?;

        let revision = self.revisions.entry(id).or_insert(0);
        *revision += 1;
        Ok(PendingSave {
            item_id: id,
            revision: *revision,
            target_text: target_text.to_string(),
            previous,
        })
    }

    /// Хранилище подтвердило сохранение
    pub fn commit(&mut self, pending: &PendingSave) {
        log::debug!(
            "translation item {} saved (revision {})",
            pending.item_id,
            pending.revision
        );
    }

    /// Откат неудачного сохранения.
    ///
    /// Если после него элемент уже сохранялся локально ещё раз, откат не
    /// выполняется: состоянием владеет более позднее сохранение.
    pub fn rollback(&mut self, pending: PendingSave) -> bool {
        let current = self.revisions.get(&pending.item_id).copied().unwrap_or(0);
        if current != pending.revision {
            log::debug!(
                "translation item {}: rollback of revision {} skipped, superseded by {}",
                pending.item_id,
                pending.revision,
                current
            );
            return false;
        }
        let Some(pos) = self.index.get(&pending.item_id).copied() else {
            return false;
        };
        self.items[pos] = pending.previous;
        self.revisions.insert(pending.item_id, pending.revision - 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_project::aggregate::{MainCategory, ProjectId};

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(
            ProjectId::new("spt"),
            vec![MainCategory::new("base", "SPT", vec!["UI".into(), "Items".into()])],
        )
        .unwrap()
    }

    fn item(id: i64, sub: &str) -> TranslationItem {
        TranslationItem {
            id: TranslationItemId(id),
            project_id: ProjectId::new("spt"),
            main_category_id: "base".into(),
            sub_category_id: sub.into(),
            status: TranslationStatus::Untranslated,
            source_text: format!("source {id}"),
            target_text: String::new(),
            context: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            translator_ref: None,
        }
    }

    #[test]
    fn test_unresolved_category_fails_whole_load() {
        let result = WorkItemStore::new(taxonomy(), vec![item(1, "UI"), item(2, "Dialogs")]);
        assert!(matches!(
            result,
            Err(ValidationError::UnresolvedItemCategory { item_id: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = WorkItemStore::new(taxonomy(), vec![item(1, "UI"), item(1, "Items")]);
        assert_eq!(result.unwrap_err(), ValidationError::DuplicateItem(1));
    }

    #[test]
    fn test_failed_save_rolls_back_fully() {
        let mut store = WorkItemStore::new(taxonomy(), vec![item(1, "UI")]).unwrap();
        let before = store.get(TranslationItemId(1)).cloned().unwrap();

        let pending = store
            .apply_save(TranslationItemId(1), "번역", Utc::now())
            .unwrap();
        assert_eq!(
            store.status_of(TranslationItemId(1)),
            Some(TranslationStatus::NeedsReview)
        );

        assert!(store.rollback(pending));
        assert_eq!(store.get(TranslationItemId(1)), Some(&before));
    }

    #[test]
    fn test_superseded_save_is_not_rolled_back() {
        let mut store = WorkItemStore::new(taxonomy(), vec![item(1, "UI")]).unwrap();
        let first = store.apply_save(TranslationItemId(1), "first", Utc::now()).unwrap();
        let second = store.apply_save(TranslationItemId(1), "second", Utc::now()).unwrap();

        assert!(!store.rollback(first));
        assert_eq!(store.get(TranslationItemId(1)).unwrap().target_text, "second");

        store.commit(&second);
        assert_eq!(store.get(TranslationItemId(1)).unwrap().target_text, "second");
    }

    #[test]
    fn test_empty_save_leaves_item_untouched() {
        let mut store = WorkItemStore::new(taxonomy(), vec![item(1, "UI")]).unwrap();
        assert_eq!(
            store.apply_save(TranslationItemId(1), "", Utc::now()),
            Err(ValidationError::EmptyTranslation)
        );
        assert_eq!(
            store.status_of(TranslationItemId(1)),
            Some(TranslationStatus::Untranslated)
        );
    }

    #[test]
    fn test_from_dtos_skips_unknown_status() {
        let mut unknown = item(2, "Items").to_dto();
        unknown.status = "archived".into();
        let dtos = vec![item(1, "UI").to_dto(), unknown];

        let (store, report) = WorkItemStore::from_dtos(taxonomy(), dtos).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, vec![(TranslationItemId(2), "archived".to_string())]);
    }
}
