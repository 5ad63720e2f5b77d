//! Сессия редактора: связывает хранилище, спецификацию фильтра, курсор и
//! параметры URL. Все операции синхронные; асинхронным остаётся только
//! запрос к хранилищу между `begin_save` и `complete_save`.

use super::filter_engine::{self, FilteredView};
use super::filter_spec::FilterSpec;
use super::navigator::QueueNavigator;
use super::pagination::{page_of, paginate, Page};
use super::progress::{progress_by_category, CategoryProgress, TranslationProgress};
use super::query_params::{self, QueryHint, QueryParams};
use super::route::{EditorRoute, EntryPoint, ListRoute};
use super::store::{PendingSave, WorkItemStore};
use crate::domain::a002_translation_item::aggregate::{TranslationItem, TranslationItemId};
use crate::enums::TranslationStatus;
use crate::shared::errors::{PersistenceError, ValidationError};
use chrono::{DateTime, Utc};

/// Неудачное сохранение: ошибка хранилища и текст, который не удалось
/// сохранить. Текст возвращается пользователю для повторной попытки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSave {
    pub item_id: TranslationItemId,
    pub target_text: String,
    pub error: PersistenceError,
}

impl FailedSave {
    pub fn is_retryable(&self) -> bool {
        self.error.is_retryable()
    }
}

impl std::fmt::Display for FailedSave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    store: WorkItemStore,
    spec: FilterSpec,
    hint: QueryHint,
    available_sub_categories: Vec<String>,
    navigator: QueueNavigator,
}

impl EditorSession {
    /// Открыть редактор по параметрам URL и точке входа.
    ///
    /// Вход по id элемента сужает фильтр категорий до категории элемента.
    /// Неизвестный id ведёт себя как `new`.
    pub fn open(
        store: WorkItemStore,
        params: &QueryParams,
        entry: EntryPoint,
    ) -> Result<Self, ValidationError> {
        let state = query_params::from_params(params, store.taxonomy());
        let mut session = Self {
            store,
            spec: state.spec,
            hint: state.hint,
            available_sub_categories: state.available_sub_categories,
            navigator: QueueNavigator::new(),
        };

        let target = match entry {
            EntryPoint::Item(id) => session.store.get(id).map(|item| {
                (
                    id,
                    item.main_category_id.clone(),
                    item.sub_category_id.clone(),
                )
            }),
            EntryPoint::New => None,
        };
        if let EntryPoint::Item(id) = entry {
            if target.is_none() {
                log::warn!("editor: item {} not found, opening next item to work on", id);
            }
        }

        match target {
            Some((id, main, sub)) => {
                let spec = FilterSpec::new()
                    .with_main_category(Some(&main))
                    .with_sub_category(Some(&sub), session.store.taxonomy())?;
                session.narrow_to_main(&main);
                let view = session.compute(&spec)?;
                session.spec = spec;
                session.navigator.resync(view);
                session.navigator.select(id);
            }
            None => {
                let view = session.compute(&session.spec)?;
                let store = &session.store;
                session.navigator.enter(view, |id| store.status_of(id));
            }
        }
        Ok(session)
    }

    pub fn store(&self) -> &WorkItemStore {
        &self.store
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn hint(&self) -> &QueryHint {
        &self.hint
    }

    pub fn view(&self) -> &FilteredView {
        self.navigator.view()
    }

    pub fn available_sub_categories(&self) -> &[String] {
        &self.available_sub_categories
    }

    pub fn current(&self) -> Option<TranslationItemId> {
        self.navigator.current()
    }

    pub fn current_item(&self) -> Option<&TranslationItem> {
        self.current().and_then(|id| self.store.get(id))
    }

    /// Позиция текущего элемента: (номер с единицы, всего)
    pub fn position(&self) -> Option<(usize, usize)> {
        self.navigator.position()
    }

    /// Элементы отфильтрованной последовательности в её порядке
    pub fn view_items(&self) -> impl Iterator<Item = &TranslationItem> + '_ {
        self.view().iter().filter_map(|id| self.store.get(id))
    }

    /// Черновик отличается от сохранённого перевода текущего элемента
    pub fn is_dirty(&self, draft: &str) -> bool {
        self.current_item()
            .map(|item| item.target_text != draft)
            .unwrap_or(false)
    }

    fn compute(&self, spec: &FilterSpec) -> Result<FilteredView, ValidationError> {
        filter_engine::apply(self.store.items(), self.store.taxonomy(), spec)
    }

    /// Пересчитать последовательность; состояние меняется только при успехе
    fn refresh(&mut self, spec: FilterSpec) -> Result<(), ValidationError> {
        let view = self.compute(&spec)?;
        self.spec = spec;
        self.navigator.resync(view);
        Ok(())
    }

    fn narrow_to_main(&mut self, main_category_id: &str) {
        let category = self.store.taxonomy().find_main(main_category_id);
        self.hint = QueryHint {
            main_category_name: category.map(|c| c.name.clone()),
            sub_categories: None,
        };
        self.available_sub_categories = category
            .map(|c| c.sub_categories.clone())
            .unwrap_or_else(|| self.store.taxonomy().all_sub_categories());
    }

    fn widen_to_all(&mut self) {
        self.hint = QueryHint::default();
        self.available_sub_categories = self.store.taxonomy().all_sub_categories();
    }

    /// Заменить спецификацию целиком (например, после разбора нового URL)
    pub fn set_spec(&mut self, spec: FilterSpec) -> Result<(), ValidationError> {
        let main = spec.main_category_id().map(str::to_string);
        self.refresh(spec)?;
        match main {
            Some(main) => self.narrow_to_main(&main),
            None => self.widen_to_all(),
        }
        Ok(())
    }

    /// Выбрать основную категорию; подкатегория сбрасывается при смене
    pub fn set_main_category(&mut self, main_category_id: Option<&str>) -> Result<(), ValidationError> {
        let spec = self.spec.with_main_category(main_category_id);
        self.set_spec(spec)
    }

    pub fn set_sub_category(&mut self, sub_category_id: Option<&str>) -> Result<(), ValidationError> {
        let spec = self
            .spec
            .with_sub_category(sub_category_id, self.store.taxonomy())?;
        self.refresh(spec)
    }

    pub fn set_status(&mut self, status: Option<TranslationStatus>) -> Result<(), ValidationError> {
        let spec = self.spec.with_status(status);
        self.refresh(spec)
    }

    pub fn set_search(&mut self, search_text: Option<&str>) -> Result<(), ValidationError> {
        let spec = self.spec.with_search(search_text);
        self.refresh(spec)
    }

    /// Снять основную категорию и подкатегорию вместе с подсказками
    pub fn clear_category_filters(&mut self) -> Result<(), ValidationError> {
        let spec = self.spec.without_category_filters();
        self.refresh(spec)?;
        self.widen_to_all();
        Ok(())
    }

    /// Оставить основную категорию, сбросить подкатегорию, статус и явный список
    pub fn reset_sub_filters(&mut self) -> Result<(), ValidationError> {
        let main = self.spec.main_category_id().map(str::to_string);
        let spec = FilterSpec::new()
            .with_main_category(main.as_deref())
            .with_search(self.spec.search_text());
        self.refresh(spec)?;
        match main {
            Some(main) => self.narrow_to_main(&main),
            None => self.widen_to_all(),
        }
        Ok(())
    }

    pub fn select(&mut self, id: TranslationItemId) -> bool {
        self.navigator.select(id)
    }

    pub fn next(&mut self) -> Option<TranslationItemId> {
        self.navigator.next()
    }

    pub fn previous(&mut self) -> Option<TranslationItemId> {
        self.navigator.previous()
    }

    /// Оптимистично применить перевод и вернуть токен ожидающего сохранения.
    ///
    /// Если элемент после смены статуса выпал из фильтра, курсор встаёт на
    /// следующий за ним элемент (с переходом на первый).
    pub fn begin_save(
        &mut self,
        id: TranslationItemId,
        target_text: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingSave, ValidationError> {
        let pending = self.store.apply_save(id, target_text, now)?;
        let view = match self.compute(&self.spec) {
            Ok(view) => view,
            Err(e) => {
                self.store.rollback(pending);
                return Err(e);
            }
        };
        let successor = view
            .iter()
            .find(|other| other.value() > id.value())
            .or_else(|| view.first());
        let was_current = self.navigator.current() == Some(id);
        self.navigator.resync(view);
        if was_current && !self.navigator.view().contains(id) {
            if let Some(successor) = successor {
                self.navigator.select(successor);
            }
        }
        Ok(pending)
    }

    /// Шаг после сохранения текущего элемента `saved`.
    ///
    /// Если элемент выпал из фильтра, курсор уже стоит на его преемнике,
    /// и шаг вперёд не нужен.
    pub fn step_after_save(&mut self, saved: TranslationItemId, forward: bool) -> Option<TranslationItemId> {
        match (forward, self.current() == Some(saved)) {
            (true, false) => self.current(),
            (true, true) => self.next(),
            (false, _) => self.previous(),
        }
    }

    /// Ответ хранилища на сохранение.
    ///
    /// Ошибка откатывает изменение в хранилище (если его не перекрыло более
    /// позднее сохранение). Несохранённый текст возвращается в `FailedSave`,
    /// чтобы черновик остался у пользователя.
    pub fn complete_save(
        &mut self,
        pending: PendingSave,
        result: Result<(), PersistenceError>,
    ) -> Result<(), FailedSave> {
        match result {
            Ok(()) => {
                self.store.commit(&pending);
                Ok(())
            }
            Err(error) => {
                log::warn!("translation item {}: save failed: {}", pending.item_id(), error);
                let failed = FailedSave {
                    item_id: pending.item_id(),
                    target_text: pending.target_text().to_string(),
                    error,
                };
                self.store.rollback(pending);
                if let Err(ve) = self.refresh(self.spec.clone()) {
                    log::error!("editor: view refresh after rollback failed: {}", ve);
                }
                Err(failed)
            }
        }
    }

    /// Полная перезагрузка набора; фильтр пересанитизируется по новой таксономии
    pub fn reload(&mut self, store: WorkItemStore) -> Result<(), ValidationError> {
        let params = self.to_params();
        let state = query_params::from_params(&params, store.taxonomy());
        self.store = store;
        self.hint = state.hint;
        self.available_sub_categories = state.available_sub_categories;
        self.refresh(state.spec)
    }

    pub fn to_params(&self) -> QueryParams {
        query_params::to_params(&self.spec, &self.hint)
    }

    /// Маршрут редактора с текущим элементом в пути
    pub fn route(&self) -> EditorRoute {
        let entry = self
            .current()
            .map(EntryPoint::Item)
            .unwrap_or(EntryPoint::New);
        EditorRoute::new(self.store.taxonomy().project_id().clone(), entry)
    }

    pub fn href(&self) -> String {
        self.route().href(&self.to_params())
    }

    /// Ссылка на элемент в редакторе с текущим фильтром
    pub fn item_href(&self, id: TranslationItemId) -> String {
        EditorRoute::new(self.store.taxonomy().project_id().clone(), EntryPoint::Item(id))
            .href(&self.to_params())
    }

    /// Список переводов с текущим фильтром на странице `page`
    pub fn list_href(&self, page: usize) -> String {
        ListRoute::new(self.store.taxonomy().project_id().clone())
            .href(&query_params::with_page(self.to_params(), page))
    }

    /// Список на той странице, где находится текущий элемент
    pub fn list_href_at_current(&self, page_size: usize) -> String {
        let page = self
            .current()
            .and_then(|id| page_of(self.view(), id, page_size))
            .unwrap_or(1);
        self.list_href(page)
    }

    pub fn progress(&self) -> TranslationProgress {
        TranslationProgress::for_view(&self.store, self.view())
    }

    pub fn category_progress(&self) -> Vec<CategoryProgress> {
        progress_by_category(self.store.taxonomy(), self.store.items())
    }

    pub fn page(&self, page: usize, page_size: usize) -> Page<TranslationItemId> {
        paginate(self.view(), page, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_project::aggregate::{MainCategory, ProjectId, Taxonomy};
    use TranslationStatus::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(
            ProjectId::new("spt"),
            vec![
                MainCategory::new("base", "SPT", vec!["UI".into(), "Items".into()]),
                MainCategory::new("plugins", "Plugins", vec!["Waypoints".into()]),
            ],
        )
        .unwrap()
    }

    fn item(id: i64, main: &str, sub: &str, status: TranslationStatus) -> TranslationItem {
        TranslationItem {
            id: TranslationItemId(id),
            project_id: ProjectId::new("spt"),
            main_category_id: main.into(),
            sub_category_id: sub.into(),
            status,
            source_text: format!("source {id}"),
            target_text: if status == Untranslated {
                String::new()
            } else {
                format!("target {id}")
            },
            context: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            translator_ref: None,
        }
    }

    fn scenario_store() -> WorkItemStore {
        WorkItemStore::new(
            taxonomy(),
            vec![item(1, "base", "UI", Untranslated), item(2, "base", "Items", Translated)],
        )
        .unwrap()
    }

    fn wide_store() -> WorkItemStore {
        WorkItemStore::new(
            taxonomy(),
            vec![
                item(1, "base", "UI", Translated),
                item(2, "base", "UI", Untranslated),
                item(3, "base", "Items", Untranslated),
                item(4, "plugins", "Waypoints", NeedsReview),
            ],
        )
        .unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ids(session: &EditorSession) -> Vec<i64> {
        session.view().iter().map(|id| id.value()).collect()
    }

    #[test]
    fn test_save_scenario_base_ui() {
        let mut session = EditorSession::open(
            scenario_store(),
            &params(&[("mainCategory", "base"), ("subCategory", "UI")]),
            EntryPoint::New,
        )
        .unwrap();
        assert_eq!(ids(&session), vec![1]);
        assert_eq!(session.current(), Some(TranslationItemId(1)));

        let pending = session
            .begin_save(TranslationItemId(1), "번역", Utc::now())
            .unwrap();
        session.complete_save(pending, Ok(())).unwrap();
        assert_eq!(
            session.current_item().map(|i| i.status),
            Some(NeedsReview)
        );
        assert_eq!(ids(&session), vec![1]);

        session.set_status(Some(NeedsReview)).unwrap();
        assert_eq!(ids(&session), vec![1]);
    }

    #[test]
    fn test_filter_change_to_empty_view_clears_cursor() {
        let mut session = EditorSession::open(
            scenario_store(),
            &params(&[("mainCategory", "base"), ("subCategory", "UI")]),
            EntryPoint::New,
        )
        .unwrap();
        assert_eq!(session.current(), Some(TranslationItemId(1)));

        session.set_status(Some(Translated)).unwrap();
        assert!(session.view().is_empty());
        assert_eq!(session.current(), None);
        assert!(session.current_item().is_none());
    }

    #[test]
    fn test_failed_save_rolls_back_and_reports() {
        let mut session = EditorSession::open(scenario_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        let before = session.current_item().cloned().unwrap();
        let pending = session
            .begin_save(before.id, "번역", Utc::now())
            .unwrap();
        let failed = session
            .complete_save(pending, Err(PersistenceError::Http { status: 500 }))
            .unwrap_err();
        assert_eq!(failed.error, PersistenceError::Http { status: 500 });
        assert_eq!(session.current_item(), Some(&before));
    }

    #[test]
    fn test_failed_save_keeps_typed_text_for_retry() {
        let mut session = EditorSession::open(scenario_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        let id = session.current().unwrap();
        let pending = session.begin_save(id, "번역", Utc::now()).unwrap();
        let failed = session
            .complete_save(pending, Err(PersistenceError::Transport("offline".into())))
            .unwrap_err();

        assert_eq!(failed.item_id, id);
        assert_eq!(failed.target_text, "번역");
        assert!(failed.is_retryable());
        // откат вернул старый текст, поэтому несохранённый черновик остаётся изменённым
        assert!(session.is_dirty(&failed.target_text));

        let retry = session.begin_save(failed.item_id, &failed.target_text, Utc::now()).unwrap();
        session.complete_save(retry, Ok(())).unwrap();
        assert_eq!(session.current_item().map(|i| i.target_text.as_str()), Some("번역"));
        assert!(!session.is_dirty("번역"));
    }

    #[test]
    fn test_entry_point_prefers_first_untranslated() {
        let session = EditorSession::open(wide_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        assert_eq!(session.current(), Some(TranslationItemId(2)));
        assert_eq!(session.position(), Some((2, 4)));
    }

    #[test]
    fn test_entry_by_item_narrows_categories() {
        let session = EditorSession::open(
            wide_store(),
            &params(&[("status", "untranslated")]),
            EntryPoint::Item(TranslationItemId(4)),
        )
        .unwrap();
        assert_eq!(session.current(), Some(TranslationItemId(4)));
        assert_eq!(session.spec().main_category_id(), Some("plugins"));
        assert_eq!(session.spec().sub_category_id(), Some("Waypoints"));
        assert_eq!(session.spec().status(), None);
        assert_eq!(session.available_sub_categories(), ["Waypoints".to_string()]);
        assert_eq!(session.hint().main_category_name.as_deref(), Some("Plugins"));
    }

    #[test]
    fn test_entry_by_unknown_item_behaves_like_new() {
        let session = EditorSession::open(
            wide_store(),
            &QueryParams::new(),
            EntryPoint::Item(TranslationItemId(99)),
        )
        .unwrap();
        assert_eq!(session.current(), Some(TranslationItemId(2)));
    }

    #[test]
    fn test_main_category_change_clears_sub_category() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("mainCategory", "base"), ("subCategory", "UI")]),
            EntryPoint::New,
        )
        .unwrap();
        session.set_main_category(Some("plugins")).unwrap();
        assert_eq!(session.spec().sub_category_id(), None);
        assert_eq!(ids(&session), vec![4]);
        assert_eq!(session.available_sub_categories(), ["Waypoints".to_string()]);
        assert_eq!(session.current(), Some(TranslationItemId(4)));
    }

    #[test]
    fn test_sub_category_outside_main_is_rejected_without_state_change() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("mainCategory", "base")]),
            EntryPoint::New,
        )
        .unwrap();
        let before = ids(&session);
        assert!(session.set_sub_category(Some("Waypoints")).is_err());
        assert_eq!(ids(&session), before);
        assert_eq!(session.spec().sub_category_id(), None);
    }

    #[test]
    fn test_reset_actions() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[
                ("mainCategory", "base"),
                ("subCategory", "UI"),
                ("status", "translated"),
                ("search", "source"),
            ]),
            EntryPoint::New,
        )
        .unwrap();
        session.reset_sub_filters().unwrap();
        assert_eq!(session.spec().main_category_id(), Some("base"));
        assert_eq!(session.spec().sub_category_id(), None);
        assert_eq!(session.spec().status(), None);
        assert_eq!(session.spec().search_text(), Some("source"));

        session.clear_category_filters().unwrap();
        assert!(!session.spec().has_category_filters());
        assert_eq!(session.available_sub_categories().len(), 3);
        assert_eq!(ids(&session), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_save_removing_item_from_view_moves_to_successor() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("status", "untranslated")]),
            EntryPoint::New,
        )
        .unwrap();
        assert_eq!(ids(&session), vec![2, 3]);
        assert_eq!(session.current(), Some(TranslationItemId(2)));

        let saved = TranslationItemId(2);
        session.begin_save(saved, "번역", Utc::now()).unwrap();
        assert_eq!(ids(&session), vec![3]);
        assert_eq!(session.step_after_save(saved, true), Some(TranslationItemId(3)));
    }

    #[test]
    fn test_save_and_next_steps_when_item_stays() {
        let mut session = EditorSession::open(wide_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        let saved = TranslationItemId(2);
        session.begin_save(saved, "번역", Utc::now()).unwrap();
        assert_eq!(session.step_after_save(saved, true), Some(TranslationItemId(3)));
        assert_eq!(session.step_after_save(TranslationItemId(3), false), Some(TranslationItemId(2)));
    }

    #[test]
    fn test_href_reflects_cursor_and_filters() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("mainCategory", "base")]),
            EntryPoint::New,
        )
        .unwrap();
        assert!(session.select(TranslationItemId(3)));
        let href = session.href();
        assert!(href.starts_with("/translation-editor/spt/3?"));
        assert!(href.contains("mainCategory=base"));
    }

    #[test]
    fn test_dirty_tracking_and_progress() {
        let session = EditorSession::open(wide_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        assert!(!session.is_dirty(""));
        assert!(session.is_dirty("draft"));
        let progress = session.progress();
        assert_eq!(progress.total, 4);
        assert_eq!(progress.untranslated, 2);
        assert_eq!(session.category_progress()[0].progress.total, 3);
        assert_eq!(session.page(1, 3).items.len(), 3);
    }

    #[test]
    fn test_reload_keeps_filter_and_cursor() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("mainCategory", "base")]),
            EntryPoint::New,
        )
        .unwrap();
        session.select(TranslationItemId(3));
        session.reload(wide_store()).unwrap();
        assert_eq!(session.spec().main_category_id(), Some("base"));
        assert_eq!(session.current(), Some(TranslationItemId(3)));
    }

    #[test]
    fn test_reload_replaces_item_set() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("status", "untranslated")]),
            EntryPoint::New,
        )
        .unwrap();
        assert_eq!(ids(&session), vec![2, 3]);
        session.select(TranslationItemId(3));

        // на сервере элемент 3 уже переведён, а элемента 2 больше нет
        let fresh = WorkItemStore::new(
            taxonomy(),
            vec![
                item(1, "base", "UI", Untranslated),
                item(3, "base", "Items", Translated),
                item(5, "plugins", "Waypoints", Untranslated),
            ],
        )
        .unwrap();
        session.reload(fresh).unwrap();

        assert_eq!(ids(&session), vec![1, 5]);
        assert_eq!(session.current(), Some(TranslationItemId(1)));
        assert!(session.store().get(TranslationItemId(2)).is_none());
    }

    #[test]
    fn test_list_links_carry_filter_and_page() {
        let mut session = EditorSession::open(
            wide_store(),
            &params(&[("mainCategory", "base")]),
            EntryPoint::New,
        )
        .unwrap();
        assert_eq!(ids(&session), vec![1, 2, 3]);
        session.select(TranslationItemId(3));

        assert_eq!(session.list_href(1), "/translations/spt?mainCategory=base");
        assert_eq!(session.list_href_at_current(2), "/translations/spt?mainCategory=base&page=2");
        assert_eq!(session.list_href_at_current(10), "/translations/spt?mainCategory=base");
        assert_eq!(
            session.item_href(TranslationItemId(2)),
            "/translation-editor/spt/2?mainCategory=base"
        );
    }

    #[test]
    fn test_page_and_category_progress() {
        let session = EditorSession::open(wide_store(), &QueryParams::new(), EntryPoint::New).unwrap();
        let page = session.page(2, 3);
        assert_eq!(page.items, vec![TranslationItemId(4)]);
        assert_eq!(page.total_pages, 2);

        let progress = session.category_progress();
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].main_category_id, "base");
        assert_eq!(progress[0].progress.total, 3);
        assert_eq!(progress[0].progress.untranslated, 2);
        assert_eq!(progress[1].progress.needs_review, 1);
    }
}
