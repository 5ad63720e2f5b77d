use crate::domain::a001_project::ui::list::ProjectList;
use crate::domain::a002_translation_item::ui::editor::TranslationEditor;
use crate::domain::a002_translation_item::ui::list::TranslationList;
use crate::shared::url_state;
use contracts::shared::work_queue::{EditorRoute, ListRoute};
use leptos::prelude::*;

/// Корневой компонент: редактор `/translation-editor/...`, список строк
/// `/translations/...`, иначе список проектов
#[component]
pub fn App() -> impl IntoView {
    let path = url_state::current_path();
    if let Some(route) = EditorRoute::parse_path(&path) {
        let params = url_state::current_query();
        return view! { <TranslationEditor route=route params=params /> }.into_any();
    }
    if let Some(route) = ListRoute::parse_path(&path) {
        let params = url_state::current_query();
        return view! { <TranslationList route=route params=params /> }.into_any();
    }
    view! { <ProjectList /> }.into_any()
}
