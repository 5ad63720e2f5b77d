use crate::shared::api_utils::{api_url, get_json, project_path};
use contracts::domain::a001_project::aggregate::{ProjectId, ProjectSummary};
use contracts::shared::work_queue::query_params::{MAIN_CATEGORY, MAIN_CATEGORY_NAME};
use contracts::shared::work_queue::{CategoryProgress, EditorRoute, EntryPoint, ListRoute, QueryParams};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Список проектов со ссылками на список строк и редактор
#[component]
pub fn ProjectList() -> impl IntoView {
    let projects = RwSignal::new(Vec::<ProjectSummary>::new());
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match get_json::<Vec<ProjectSummary>>(&api_url("/api/project")).await {
            Ok(list) => projects.set(list),
            Err(e) => {
                log::warn!("project list: {}", e);
                error.set(Some(format!("Не удалось загрузить проекты: {}", e)));
            }
        }
    });

    view! {
        <div class="project-list">
            <h3>"Проекты перевода"</h3>
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || {
                projects
                    .get()
                    .into_iter()
                    .map(|p| {
                        let list_href = ListRoute::new(p.id.clone()).href(&QueryParams::new());
                        let editor_href = EditorRoute::new(p.id.clone(), EntryPoint::New)
                            .href(&QueryParams::new());
                        view! {
                            <div class="project-list__row">
                                <a href=list_href>{p.name}</a>
                                <span class="project-list__meta">
                                    {format!("{} категорий", p.category_count)}
                                </span>
                                <a class="project-list__start" href=editor_href>"Начать перевод"</a>
                                <div>{p.description}</div>
                                <ProjectProgress project_id=p.id />
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Прогресс проекта по основным категориям; каждая категория открывает
/// редактор, уже отфильтрованный по ней
#[component]
fn ProjectProgress(project_id: ProjectId) -> impl IntoView {
    let progress = RwSignal::new(Vec::<CategoryProgress>::new());

    let url = api_url(&project_path(project_id.value(), Some("progress")));
    spawn_local(async move {
        match get_json::<Vec<CategoryProgress>>(&url).await {
            Ok(list) => progress.set(list),
            Err(e) => log::warn!("project progress not loaded: {}", e),
        }
    });

    view! {
        <div class="project-progress">
            {move || {
                progress
                    .get()
                    .into_iter()
                    .map(|c| {
                        let params: QueryParams = [
                            (MAIN_CATEGORY.to_string(), c.main_category_id.clone()),
                            (MAIN_CATEGORY_NAME.to_string(), c.name.clone()),
                        ]
                        .into_iter()
                        .collect();
                        let href = EditorRoute::new(project_id.clone(), EntryPoint::New).href(&params);
                        let p = c.progress;
                        view! {
                            <div class="project-progress__row">
                                <a href=href>{c.name}</a>
                                <span>
                                    {format!(
                                        "переведено {}% | на проверке {}% | не переведено {}%",
                                        p.translated_percent(),
                                        p.needs_review_percent(),
                                        p.untranslated_percent(),
                                    )}
                                </span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
