use contracts::domain::a002_category::aggregate::{
    category_pipeline, Category, CategoryDto, CategoryFlag, CategoryStatus, FACET_STATUS,
};
use contracts::shared::config::app_config;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::CategoryForm;
use crate::domain::a002_category::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_state::{confirm, create_state, FormMode};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

fn status_badge_class(status: CategoryStatus) -> &'static str {
    match status {
        CategoryStatus::Active => "badge badge--success",
        CategoryStatus::Inactive => "badge badge--neutral",
    }
}

#[component]
pub fn CategoryList() -> impl IntoView {
    let pipeline = StoredValue::new(category_pipeline());
    let state = pipeline.with_value(create_state);
    let all_categories: RwSignal<Vec<Category>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form_mode: RwSignal<Option<FormMode<Category>>> = RwSignal::new(None);

    let refresh_view = move || {
        all_categories.with_untracked(|items| {
            pipeline.with_value(|p| state.update(|s| s.refresh(p, items)));
        });
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(data) => {
                    all_categories.set(data);
                    state.update(|s| {
                        s.query.set_page(1);
                        s.is_loaded = true;
                    });
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Не удалось загрузить категории: {}", e))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let on_search = move |ev: leptos::ev::Event| {
        let term = event_target_value(&ev);
        state.update(|s| s.query.set_search(term));
        refresh_view();
    };

    let on_status = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        state.update(|s| {
            if value.is_empty() {
                s.query.set_facet(FACET_STATUS, Vec::<String>::new());
            } else {
                s.query.set_facet(FACET_STATUS, [value]);
            }
        });
        refresh_view();
    };

    let on_sort = move |ev: leptos::ev::Event| {
        let key = event_target_value(&ev);
        state.update(|s| s.query.set_sort(key));
        refresh_view();
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.query.set_page(page));
        refresh_view();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| s.query.set_page_size(size));
        refresh_view();
    };

    let toggle_status = move |id: String| {
        let result = pipeline.with_value(|p| {
            all_categories.try_update(|items| p.toggle(items, &id, CategoryFlag::Status))
        });
        if let Some(Err(e)) = result {
            set_error.set(Some(e.to_string()));
        }
        refresh_view();
    };

    let delete_category = move |category: Category| {
        if !confirm(&format!(
            "Удалить категорию \"{}\"? Действие нельзя отменить.",
            category.name
        )) {
            return;
        }
        pipeline.with_value(|p| {
            all_categories.update(|items| {
                p.delete(items, &category.id);
            })
        });
        refresh_view();
    };

    let submit_form = move |dto: CategoryDto| -> Result<(), String> {
        let mode = form_mode.get_untracked();
        let result = pipeline.with_value(|p| {
            all_categories.try_update(|items| match &mode {
                Some(FormMode::Edit(category)) => p.update(items, &category.id, dto),
                _ => p.create(items, dto),
            })
        });
        match result {
            Some(Ok(_)) => {
                form_mode.set(None);
                refresh_view();
                Ok(())
            }
            Some(Err(e)) => Err(e.to_string()),
            None => Err("Список категорий недоступен".to_string()),
        }
    };

    let sort_options = pipeline.with_value(|p| p.config().sort_options());
    let page_size_options = app_config().list.page_size_options.clone();

    view! {
        <PageFrame page_id="a002_category--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Категории"</h1>
                    <Badge>
                        {move || state.get().page.total_count.to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form_mode.set(Some(FormMode::Create))
                    >
                        {icon("plus")}
                        " Новая"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            {icon("search")}
                            <span class="filter-panel__title">"Поиск"</span>
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.get().page.page)
                                total_pages=Signal::derive(move || state.get().page.total_pages)
                                total_count=Signal::derive(move || state.get().page.total_count)
                                page_size=Signal::derive(move || state.get().query.page_size)
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                                page_size_options=page_size_options
                            />
                        </div>
                        <div class="filter-panel-header__right"></div>
                    </div>

                    <div class="filter-panel-content">
                        <div class="filter-row">
                            <input
                                class="form-input"
                                type="search"
                                placeholder="Название или описание..."
                                prop:value=move || state.with(|s| s.query.search_term.clone())
                                on:input=on_search
                            />
                            <select class="form-select" on:change=on_status>
                                <option value="">"Все статусы"</option>
                                {CategoryStatus::ALL.into_iter().map(|status| view! {
                                    <option value=status.as_str()>{status.label()}</option>
                                }).collect_view()}
                            </select>
                            <select
                                class="form-select"
                                prop:value=move || state.with(|s| s.query.sort_key.clone())
                                on:change=on_sort
                            >
                                {sort_options.into_iter().map(|(key, label)| view! {
                                    <option value=key>{label}</option>
                                }).collect_view()}
                            </select>
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <table class="table" id="a002-category-table">
                        <thead>
                            <tr>
                                <th>"Название"</th>
                                <th>"Описание"</th>
                                <th>"Статус"</th>
                                <th class="text-right">"Товаров"</th>
                                <th>"Создана"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let items = state.with(|s| s.page.items.clone());
                                if items.is_empty() && !loading.get() {
                                    return view! {
                                        <tr><td colspan="6" class="table__empty">"Категории не найдены"</td></tr>
                                    }.into_any();
                                }
                                items.into_iter().map(|category| {
                                    let id_for_toggle = category.id.clone();
                                    let for_edit = category.clone();
                                    let for_delete = category.clone();
                                    view! {
                                        <tr>
                                            <td><span style="font-weight: 500;">{category.name.clone()}</span></td>
                                            <td>{category.description.clone()}</td>
                                            <td>
                                                <span
                                                    class=status_badge_class(category.status)
                                                    style="cursor: pointer;"
                                                    title="Нажмите, чтобы сменить статус"
                                                    on:click=move |_| toggle_status(id_for_toggle.clone())
                                                >
                                                    {category.status.label()}
                                                </span>
                                            </td>
                                            <td class="text-right">{category.product_count.to_string()}</td>
                                            <td>{format_date(&category.created_at)}</td>
                                            <td class="table__actions">
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| form_mode.set(Some(FormMode::Edit(for_edit.clone())))
                                                    attr:title="Редактировать"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_category(for_delete.clone())
                                                    attr:title="Удалить"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view().into_any()
                            }}
                        </tbody>
                    </table>
                </div>

                {move || form_mode.get().map(|mode| view! {
                    <CategoryForm
                        mode=mode
                        on_close=Callback::new(move |_| form_mode.set(None))
                        on_submit=Callback::new(submit_form)
                    />
                })}
            </div>
        </PageFrame>
    }
}
