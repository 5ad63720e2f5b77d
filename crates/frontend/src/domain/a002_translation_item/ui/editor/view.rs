use super::view_model::TranslationEditorViewModel;
use contracts::enums::TranslationStatus;
use contracts::shared::work_queue::{EditorRoute, QueryParams};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TranslationEditor(route: EditorRoute, params: QueryParams) -> impl IntoView {
    let vm = TranslationEditorViewModel::new();
    vm.load(route, params);

    view! {
        <div class="translation-editor">
            <div class="details-header">
                <h3>{move || vm.project_name.get()}</h3>
                <a class="details-header__back" href=move || vm.list_href()>"К списку"</a>
                <ProgressLine vm=vm />
            </div>

            <ErrorBar vm=vm />

            <FilterBar vm=vm />

            <div class="translation-editor__body">
                <ItemList vm=vm />
                <EditorPane vm=vm />
                <GlossaryPanel vm=vm />
            </div>
        </div>
    }
}

/// Ошибки загрузки и сохранения с действиями восстановления
#[component]
fn ErrorBar(vm: TranslationEditorViewModel) -> impl IntoView {
    let can_retry = move || {
        vm.failed_save
            .with(|f| f.as_ref().map(|f| f.is_retryable()).unwrap_or(false))
    };
    move || {
        vm.error.get().map(|e| {
            view! {
                <div class="error">
                    <span>{e}</span>
                    <Show when=can_retry>
                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Primary on_click=move |_| vm.retry_save()>
                            "Повторить"
                        </Button>
                    </Show>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || vm.loading.get())
                        on_click=move |_| vm.reload()
                    >
                        "Перезагрузить"
                    </Button>
                </div>
            }
        })
    }
}

#[component]
fn ProgressLine(vm: TranslationEditorViewModel) -> impl IntoView {
    view! {
        <div class="progress-line">
            {move || {
                let p = vm.progress();
                format!(
                    "Всего: {} | переведено {}% | на проверке {}% | не переведено {}%",
                    p.total,
                    p.translated_percent(),
                    p.needs_review_percent(),
                    p.untranslated_percent(),
                )
            }}
        </div>
    }
}

#[component]
fn FilterBar(vm: TranslationEditorViewModel) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <select
                prop:value=move || vm.main_category()
                on:change=move |ev| vm.set_main_category(event_target_value(&ev))
            >
                <option value="">"Все категории"</option>
                {move || {
                    vm.categories()
                        .into_iter()
                        .map(|c| view! { <option value=c.id.clone()>{c.name}</option> })
                        .collect_view()
                }}
            </select>

            <select
                prop:value=move || vm.sub_category()
                on:change=move |ev| vm.set_sub_category(event_target_value(&ev))
            >
                <option value="">"Все подкатегории"</option>
                {move || {
                    vm.available_sub_categories()
                        .into_iter()
                        .map(|s| view! { <option value=s.clone()>{s.clone()}</option> })
                        .collect_view()
                }}
            </select>

            <select
                prop:value=move || vm.status_code()
                on:change=move |ev| vm.set_status(event_target_value(&ev))
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
                prop:value=move || vm.search_text()
                on:change=move |ev| vm.set_search(event_target_value(&ev))
            />

            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                on_click=move |_| vm.reset_sub_filters()
            >
                "Сбросить подфильтры"
            </Button>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Subtle
                on_click=move |_| vm.clear_category_filters()
            >
                "Все категории"
            </Button>
        </div>
    }
}

#[component]
fn ItemList(vm: TranslationEditorViewModel) -> impl IntoView {
    let current_id = move || vm.current_item().map(|i| i.id);

    view! {
        <div class="item-list">
            {move || {
                let items = vm.items();
                if items.is_empty() {
                    return view! { <div class="empty">"Нет строк, подходящих под фильтр"</div> }
                        .into_any();
                }
                items
                    .into_iter()
                    .map(|item| {
                        let id = item.id;
                        let class = move || {
                            if current_id() == Some(id) { "item-row item-row--active" } else { "item-row" }
                        };
                        view! {
                            <div class=class on:click=move |_| vm.select(id)>
                                <span class="item-row__status">{item.status.display_name()}</span>
                                <span class="item-row__source">{item.source_text.clone()}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn EditorPane(vm: TranslationEditorViewModel) -> impl IntoView {
    view! {
        <div class="editor-pane">
            {move || match vm.current_item() {
                None => view! { <div class="empty">"Выберите строку для перевода"</div> }.into_any(),
                Some(item) => view! {
                    <div>
                        <div class="editor-pane__meta">
                            {move || {
                                vm.position()
                                    .map(|(n, total)| format!("{} / {}", n, total))
                                    .unwrap_or_default()
                            }}
                            " | "
                            {format!("{} / {}", item.main_category_id, item.sub_category_id)}
                            " | "
                            {item.status.display_name()}
                        </div>
                        <div class="editor-pane__source">{item.source_text.clone()}</div>
                        <div class="editor-pane__context">{item.context.clone()}</div>
                    </div>
                }
                .into_any(),
            }}

            <textarea
                class="editor-pane__target"
                rows=6
                placeholder="Введите перевод (Ctrl+Enter — сохранить, Ctrl+↑/↓ — соседняя строка)"
                prop:value=move || vm.draft.get()
                on:input=move |ev| vm.draft.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| vm.on_keydown(&ev)
            ></textarea>

            <div class="editor-pane__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.previous()>
                    "Назад"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.save_command(None)>
                    "Сохранить"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.save_command(Some(true))>
                    "Сохранить и далее"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.next()>
                    "Далее"
                </Button>
                {move || (vm.saving.get() > 0).then(|| view! { <span class="saving">"Сохранение..."</span> })}
            </div>
        </div>
    }
}

#[component]
fn GlossaryPanel(vm: TranslationEditorViewModel) -> impl IntoView {
    let term_row = |t: contracts::domain::a003_glossary_term::aggregate::GlossaryTerm| {
        view! {
            <div class="glossary-term" title=t.description.clone()>
                <b>{t.term}</b>
                " → "
                {t.translation}
            </div>
        }
    };

    view! {
        <div class="glossary-panel">
            <h4>"Глоссарий"</h4>
            <div class="glossary-panel__relevant">
                {move || vm.relevant_terms().into_iter().map(term_row).collect_view()}
            </div>
            <input
                type="text"
                placeholder="Поиск термина..."
                prop:value=move || vm.glossary_query.get()
                on:input=move |ev| vm.glossary_query.set(event_target_value(&ev))
            />
            <div class="glossary-panel__all">
                {move || vm.found_terms().into_iter().map(term_row).collect_view()}
            </div>
        </div>
    }
}
