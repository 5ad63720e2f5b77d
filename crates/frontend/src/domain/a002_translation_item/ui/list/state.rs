use contracts::shared::work_queue::{EditorSession, DEFAULT_PAGE_SIZE};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct TranslationListState {
    pub session: Option<EditorSession>,
    pub project_name: String,
    pub page: usize,
    pub page_size: usize,
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl Default for TranslationListState {
    fn default() -> Self {
        Self {
            session: None,
            project_name: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            is_loaded: false,
            error: None,
        }
    }
}

pub fn create_state(page: usize) -> RwSignal<TranslationListState> {
    RwSignal::new(TranslationListState {
        page,
        ..Default::default()
    })
}
