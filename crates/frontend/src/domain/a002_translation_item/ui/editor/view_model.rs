use super::model;
use crate::shared::url_state;
use chrono::Utc;
use contracts::domain::a001_project::aggregate::MainCategory;
use contracts::domain::a002_translation_item::aggregate::{TranslationItem, TranslationItemId};
use contracts::domain::a003_glossary_term::aggregate::{relevant_terms, search_terms, GlossaryTerm};
use contracts::enums::TranslationStatus;
use contracts::shared::errors::ValidationError;
use contracts::shared::work_queue::{
    EditorCommand, EditorRoute, EditorSession, FailedSave, QueryParams, TranslationProgress,
    DEFAULT_PAGE_SIZE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// ViewModel страницы редактора переводов.
///
/// Всё состояние очереди живёт в `EditorSession`; сигналы здесь только
/// делают его реактивным и хранят черновик перевода.
#[derive(Clone, Copy)]
pub struct TranslationEditorViewModel {
    pub session: RwSignal<Option<EditorSession>>,
    pub project_name: RwSignal<String>,
    pub draft: RwSignal<String>,
    pub glossary: RwSignal<Vec<GlossaryTerm>>,
    pub glossary_query: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    /// Последнее неудачное сохранение, доступное для повтора
    pub failed_save: RwSignal<Option<FailedSave>>,
    pub saving: RwSignal<usize>,
    pub loading: RwSignal<bool>,
    entry: RwSignal<Option<(EditorRoute, QueryParams)>>,
}

impl TranslationEditorViewModel {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            project_name: RwSignal::new(String::new()),
            draft: RwSignal::new(String::new()),
            glossary: RwSignal::new(Vec::new()),
            glossary_query: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            failed_save: RwSignal::new(None),
            saving: RwSignal::new(0),
            loading: RwSignal::new(false),
            entry: RwSignal::new(None),
        }
    }

    /// Загрузить проект и открыть очередь по маршруту и параметрам URL
    pub fn load(&self, route: EditorRoute, params: QueryParams) {
        self.entry.set(Some((route, params)));
        self.reload();
    }

    /// Полная перезагрузка набора элементов.
    ///
    /// Открытая сессия сохраняет фильтр и курсор; если первая загрузка не
    /// удалась, очередь открывается заново по исходному маршруту.
    pub fn reload(&self) {
        let Some((route, params)) = self.entry.get_untracked() else {
            return;
        };
        if self.loading.get_untracked() {
            return;
        }
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            let loaded = model::load_store(&route.project_id).await;
            vm.loading.set(false);
            let (project, store) = match loaded {
                Ok(loaded) => loaded,
                Err(e) => {
                    vm.error.set(Some(format!("Очередь не загружена: {}", e)));
                    return;
                }
            };
            vm.project_name.set(project.name);

            let has_session = vm.session.with_untracked(Option::is_some);
            let opened = if has_session {
                vm.with_session(|s| s.reload(store)).unwrap_or(Ok(()))
            } else {
                EditorSession::open(store, &params, route.entry).map(|session| vm.session.set(Some(session)))
            };
            match opened {
                Ok(()) => {
                    vm.error.set(None);
                    vm.failed_save.set(None);
                    vm.after_navigation();
                }
                Err(e) => vm.error.set(Some(format!("Ошибка фильтра: {}", e))),
            }

            if !has_session {
                // глоссарий не обязателен для работы редактора
                match model::fetch_glossary(&route.project_id).await {
                    Ok(terms) => vm.glossary.set(terms),
                    Err(e) => log::warn!("glossary not loaded: {}", e),
                }
            }
        });
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> Option<R> {
        self.session.try_update(|s| s.as_mut().map(f)).flatten()
    }

    fn current_item_untracked(&self) -> Option<TranslationItem> {
        self.session
            .with_untracked(|s| s.as_ref().and_then(|s| s.current_item().cloned()))
    }

    /// Черновик и URL следуют за курсором
    fn after_navigation(&self) {
        let target = self
            .current_item_untracked()
            .map(|item| item.target_text)
            .unwrap_or_default();
        self.draft.set(target);
        if let Some(href) = self.session.with_untracked(|s| s.as_ref().map(|s| s.href())) {
            url_state::replace_url(&href);
        }
    }

    fn apply_filter(&self, f: impl FnOnce(&mut EditorSession) -> Result<(), ValidationError>) {
        match self.with_session(f) {
            Some(Err(e)) => self.error.set(Some(format!("Ошибка фильтра: {}", e))),
            Some(Ok(())) => {
                self.error.set(None);
                self.after_navigation();
            }
            None => {}
        }
    }

    pub fn set_main_category(&self, value: String) {
        let value = (!value.is_empty()).then_some(value);
        self.apply_filter(|s| s.set_main_category(value.as_deref()));
    }

    pub fn set_sub_category(&self, value: String) {
        let value = (!value.is_empty()).then_some(value);
        self.apply_filter(|s| s.set_sub_category(value.as_deref()));
    }

    pub fn set_status(&self, code: String) {
        let status = TranslationStatus::from_code(&code);
        self.apply_filter(|s| s.set_status(status));
    }

    pub fn set_search(&self, text: String) {
        self.apply_filter(|s| s.set_search(Some(&text)));
    }

    pub fn clear_category_filters(&self) {
        self.apply_filter(|s| s.clear_category_filters());
    }

    pub fn reset_sub_filters(&self) {
        self.apply_filter(|s| s.reset_sub_filters());
    }

    pub fn select(&self, id: TranslationItemId) {
        if self.with_session(|s| s.select(id)).unwrap_or(false) {
            self.after_navigation();
        }
    }

    pub fn next(&self) {
        self.with_session(|s| s.next());
        self.after_navigation();
    }

    pub fn previous(&self) {
        self.with_session(|s| s.previous());
        self.after_navigation();
    }

    pub fn is_dirty(&self) -> bool {
        let draft = self.draft.get_untracked();
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.is_dirty(&draft)))
            .unwrap_or(false)
    }

    /// Сохранить черновик текущего элемента; `step` задаёт шаг после сохранения
    /// (`Some(true)` вперёд, `Some(false)` назад)
    pub fn save_command(&self, step: Option<bool>) {
        let Some(item) = self.current_item_untracked() else {
            return;
        };
        let text = self.draft.get_untracked();

        let pending = match self.with_session(|s| s.begin_save(item.id, &text, Utc::now())) {
            Some(Ok(pending)) => pending,
            Some(Err(e)) => {
                self.error.set(Some(e.to_string()));
                return;
            }
            None => return,
        };
        self.error.set(None);
        self.failed_save.set(None);
        if let Some(forward) = step {
            self.with_session(|s| s.step_after_save(item.id, forward));
        }
        self.after_navigation();

        let vm = *self;
        vm.saving.update(|n| *n += 1);
        spawn_local(async move {
            let result = model::save_translation(pending.item_id(), pending.target_text().to_string()).await;
            let outcome = vm.with_session(|s| s.complete_save(pending, result));
            vm.saving.update(|n| *n = n.saturating_sub(1));
            if let Some(Err(failed)) = outcome {
                vm.report_failed_save(failed);
            }
        });
    }

    /// Хранилище откатилось, а несохранённый текст остаётся в черновике,
    /// если пользователь всё ещё на этой строке
    fn report_failed_save(&self, failed: FailedSave) {
        let hint = if failed.is_retryable() {
            " Нажмите «Повторить» или Ctrl+Enter."
        } else {
            ""
        };
        self.error.set(Some(format!("Перевод не сохранён: {}.{}", failed, hint)));

        let on_failed_item = self
            .session
            .with_untracked(|s| s.as_ref().and_then(|s| s.current()))
            == Some(failed.item_id);
        if on_failed_item {
            self.draft.set(failed.target_text.clone());
        }
        self.failed_save.set(Some(failed));
    }

    /// Повторить последнее неудачное сохранение с тем же текстом
    pub fn retry_save(&self) {
        let Some(failed) = self.failed_save.get_untracked() else {
            return;
        };
        let on_item = self.with_session(|s| s.current() == Some(failed.item_id) || s.select(failed.item_id));
        if on_item != Some(true) {
            self.error.set(Some("Строка больше не входит в текущий фильтр".to_string()));
            return;
        }
        self.draft.set(failed.target_text);
        self.save_command(None);
    }

    pub fn run_command(&self, command: EditorCommand) {
        match command {
            EditorCommand::SaveAndStay => self.save_command(None),
            EditorCommand::SaveAndNext => self.save_command(Some(true)),
            EditorCommand::SaveAndPrevious => self.save_command(Some(false)),
            EditorCommand::Next => self.next(),
            EditorCommand::Previous => self.previous(),
        }
    }

    pub fn on_keydown(&self, ev: &web_sys::KeyboardEvent) {
        let ctrl_or_meta = ev.ctrl_key() || ev.meta_key();
        if let Some(command) = EditorCommand::from_shortcut(ctrl_or_meta, &ev.key(), self.is_dirty()) {
            ev.prevent_default();
            self.run_command(command);
        }
    }

    // ------------------------------------------------------------------
    // Производные значения для представления
    // ------------------------------------------------------------------

    pub fn categories(&self) -> Vec<MainCategory> {
        self.session.with(|s| {
            s.as_ref()
                .map(|s| s.store().taxonomy().categories().to_vec())
                .unwrap_or_default()
        })
    }

    pub fn available_sub_categories(&self) -> Vec<String> {
        self.session.with(|s| {
            s.as_ref()
                .map(|s| s.available_sub_categories().to_vec())
                .unwrap_or_default()
        })
    }

    pub fn main_category(&self) -> String {
        self.session.with(|s| {
            s.as_ref()
                .and_then(|s| s.spec().main_category_id().map(str::to_string))
                .unwrap_or_default()
        })
    }

    pub fn sub_category(&self) -> String {
        self.session.with(|s| {
            s.as_ref()
                .and_then(|s| s.spec().sub_category_id().map(str::to_string))
                .unwrap_or_default()
        })
    }

    pub fn status_code(&self) -> String {
        self.session.with(|s| {
            s.as_ref()
                .and_then(|s| s.spec().status())
                .map(|st| st.code().to_string())
                .unwrap_or_else(|| "all".to_string())
        })
    }

    pub fn search_text(&self) -> String {
        self.session.with(|s| {
            s.as_ref()
                .and_then(|s| s.spec().search_text().map(str::to_string))
                .unwrap_or_default()
        })
    }

    pub fn items(&self) -> Vec<TranslationItem> {
        self.session.with(|s| {
            s.as_ref()
                .map(|s| s.view_items().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn current_item(&self) -> Option<TranslationItem> {
        self.session
            .with(|s| s.as_ref().and_then(|s| s.current_item().cloned()))
    }

    pub fn position(&self) -> Option<(usize, usize)> {
        self.session.with(|s| s.as_ref().and_then(|s| s.position()))
    }

    pub fn progress(&self) -> TranslationProgress {
        self.session
            .with(|s| s.as_ref().map(|s| s.progress()))
            .unwrap_or_default()
    }

    /// Список строк на странице текущего элемента, с тем же фильтром
    pub fn list_href(&self) -> String {
        self.session
            .with(|s| s.as_ref().map(|s| s.list_href_at_current(DEFAULT_PAGE_SIZE)))
            .unwrap_or_default()
    }

    pub fn relevant_terms(&self) -> Vec<GlossaryTerm> {
        let source = self.current_item().map(|i| i.source_text).unwrap_or_default();
        self.glossary
            .with(|g| relevant_terms(g, &source).into_iter().cloned().collect())
    }

    pub fn found_terms(&self) -> Vec<GlossaryTerm> {
        let query = self.glossary_query.get();
        self.glossary
            .with(|g| search_terms(g, &query).into_iter().cloned().collect())
    }
}

impl Default for TranslationEditorViewModel {
    fn default() -> Self {
        Self::new()
    }
}
