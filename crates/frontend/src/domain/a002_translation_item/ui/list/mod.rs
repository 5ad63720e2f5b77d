//! Список переводов проекта: фильтр, постраничный вывод и переход в редактор.
//! Фильтр и номер страницы живут в URL (`/translations/{project}?...&page=N`).

mod state;

use self::state::{create_state, TranslationListState};
use super::editor::model;
use crate::shared::url_state;
use contracts::domain::a001_project::aggregate::MainCategory;
use contracts::domain::a002_translation_item::aggregate::{TranslationItem, TranslationItemId};
use contracts::enums::TranslationStatus;
use contracts::shared::errors::ValidationError;
use contracts::shared::work_queue::query_params::page_number;
use contracts::shared::work_queue::{
    CategoryProgress, EditorRoute, EditorSession, EntryPoint, ListRoute, Page, QueryParams,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn sync_url(state: RwSignal<TranslationListState>) {
    let href = state.with_untracked(|s| s.session.as_ref().map(|session| session.list_href(s.page)));
    if let Some(href) = href {
        url_state::replace_url(&href);
    }
}

/// Изменение фильтра всегда возвращает на первую страницу
fn apply_filter(
    state: RwSignal<TranslationListState>,
    f: impl FnOnce(&mut EditorSession) -> Result<(), ValidationError>,
) {
    state.update(|s| {
        let Some(session) = s.session.as_mut() else {
            return;
        };
        s.error = f(session).err().map(|e| format!("Ошибка фильтра: {}", e));
        s.page = 1;
    });
    sync_url(state);
}

fn load(state: RwSignal<TranslationListState>, route: ListRoute, params: QueryParams) {
    spawn_local(async move {
        let opened = model::load_store(&route.project_id).await.and_then(|(project, store)| {
            EditorSession::open(store, &params, EntryPoint::New)
                .map(|session| (project.name, session))
                .map_err(|e| format!("Ошибка фильтра: {}", e))
        });
        match opened {
            Ok((name, session)) => {
                state.update(|s| {
                    s.project_name = name;
                    s.session = Some(session);
                    s.error = None;
                    s.is_loaded = true;
                });
                sync_url(state);
            }
            Err(e) => {
                log::warn!("translation list: {}", e);
                state.update(|s| {
                    s.error = Some(e);
                    s.is_loaded = true;
                });
            }
        }
    });
}

#[component]
pub fn TranslationList(route: ListRoute, params: QueryParams) -> impl IntoView {
    let state = create_state(page_number(&params));
    load(state, route, params);

    let available_sub_categories = move || -> Vec<String> {
        state.with(|s| {
            s.session
                .as_ref()
                .map(|session| session.available_sub_categories().to_vec())
                .unwrap_or_default()
        })
    };
    let categories = move || -> Vec<MainCategory> {
        state.with(|s| {
            s.session
                .as_ref()
                .map(|session| session.store().taxonomy().categories().to_vec())
                .unwrap_or_default()
        })
    };
    let main_category = move || {
        state.with(|s| {
            s.session
                .as_ref()
                .and_then(|session| session.spec().main_category_id().map(str::to_string))
                .unwrap_or_default()
        })
    };
    let sub_category = move || {
        state.with(|s| {
            s.session
                .as_ref()
                .and_then(|session| session.spec().sub_category_id().map(str::to_string))
                .unwrap_or_default()
        })
    };
    let status_code = move || {
        state.with(|s| {
            s.session
                .as_ref()
                .and_then(|session| session.spec().status())
                .map(|st| st.code().to_string())
                .unwrap_or_else(|| "all".to_string())
        })
    };
    let search_text = move || {
        state.with(|s| {
            s.session
                .as_ref()
                .and_then(|session| session.spec().search_text().map(str::to_string))
                .unwrap_or_default()
        })
    };

    let page_info = move || -> Option<Page<TranslationItemId>> {
        state.with(|s| s.session.as_ref().map(|session| session.page(s.page, s.page_size)))
    };
    let rows = move || -> Vec<(String, TranslationItem)> {
        state.with(|s| {
            let Some(session) = s.session.as_ref() else {
                return Vec::new();
            };
            session
                .page(s.page, s.page_size)
                .items
                .into_iter()
                .filter_map(|id| session.store().get(id).cloned())
                .map(|item| (session.item_href(item.id), item))
                .collect()
        })
    };
    let category_progress = move || -> Vec<CategoryProgress> {
        state.with(|s| {
            s.session
                .as_ref()
                .map(|session| session.category_progress())
                .unwrap_or_default()
        })
    };
    let start_href = move || {
        state.with(|s| {
            s.session
                .as_ref()
                .map(|session| {
                    EditorRoute::new(session.store().taxonomy().project_id().clone(), EntryPoint::New)
                        .href(&session.to_params())
                })
                .unwrap_or_default()
        })
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page.max(1));
        sync_url(state);
    };
    let current_page = move || page_info().map(|p| p.page).unwrap_or(1);
    let total_pages = move || page_info().map(|p| p.total_pages).unwrap_or(0);

    view! {
        <div class="translation-list">
            <div class="page__header">
                <h3>{move || state.with(|s| s.project_name.clone())}</h3>
                <a class="translation-list__start" href=start_href>"Начать перевод"</a>
            </div>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="error">{e}</div> })}
            {move || {
                state
                    .with(|s| !s.is_loaded)
                    .then(|| view! { <div class="loading">"Загрузка..."</div> })
            }}

            <div class="translation-list__progress">
                {move || {
                    category_progress()
                        .into_iter()
                        .map(|c| {
                            view! {
                                <div class="category-progress">
                                    <span>{c.name}</span>
                                    <span>
                                        {format!(
                                            "{}% переведено, {} из {}",
                                            c.progress.translated_percent(),
                                            c.progress.translated,
                                            c.progress.total,
                                        )}
                                    </span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class="filter-bar">
                <select
                    prop:value=main_category
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let value = (!value.is_empty()).then_some(value);
                        apply_filter(state, |s| s.set_main_category(value.as_deref()));
                    }
                >
                    <option value="">"Все категории"</option>
                    {move || {
                        categories()
                            .into_iter()
                            .map(|c| view! { <option value=c.id.clone()>{c.name}</option> })
                            .collect_view()
                    }}
                </select>

                <select
                    prop:value=sub_category
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let value = (!value.is_empty()).then_some(value);
                        apply_filter(state, |s| s.set_sub_category(value.as_deref()));
                    }
                >
                    <option value="">"Все подкатегории"</option>
                    {move || {
                        available_sub_categories()
                            .into_iter()
                            .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                            .collect_view()
                    }}
                </select>

                <select
                    prop:value=status_code
                    on:change=move |ev| {
                        let status = TranslationStatus::from_code(&event_target_value(&ev));
                        apply_filter(state, |s| s.set_status(status));
                    }
                >
                    <option value="all">"Все статусы"</option>
                    {TranslationStatus::all()
                        .iter()
                        .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                        .collect_view()}
                </select>

                <input
                    type="text"
                    placeholder="Поиск по исходному тексту и переводу"
                    prop:value=search_text
                    on:change=move |ev| {
                        let text = event_target_value(&ev);
                        apply_filter(state, |s| s.set_search(Some(&text)));
                    }
                />

                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| apply_filter(state, |s| s.clear_category_filters())
                >
                    "Сбросить фильтры"
                </Button>
            </div>

            <table class="translation-list__table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Подкатегория"</th>
                        <th>"Исходный текст"</th>
                        <th>"Перевод"</th>
                        <th>"Статус"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows()
                            .into_iter()
                            .map(|(href, item)| {
                                view! {
                                    <tr>
                                        <td><a href=href>{item.id.to_string()}</a></td>
                                        <td>{item.sub_category_id.clone()}</td>
                                        <td>{item.source_text.clone()}</td>
                                        <td>{item.target_text.clone()}</td>
                                        <td>{item.status.display_name()}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <div class="pagination">
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || current_page() <= 1)
                    on_click=move |_| go_to_page(current_page().saturating_sub(1))
                >
                    "Назад"
                </Button>
                <span>
                    {move || {
                        page_info()
                            .map(|p| format!("Страница {} из {} (строк: {})", p.page, p.total_pages.max(1), p.total))
                            .unwrap_or_default()
                    }}
                </span>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || current_page() >= total_pages())
                    on_click=move |_| go_to_page(current_page() + 1)
                >
                    "Вперёд"
                </Button>
            </div>
        </div>
    }
}
