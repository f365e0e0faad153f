use contracts::domain::a003_brand::aggregate::{
    brand_pipeline, Brand, BrandDto, BrandStatus, BRAND_CATEGORIES, FACET_CATEGORY, FACET_STATUS,
};
use contracts::shared::config::app_config;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::BrandForm;
use crate::domain::a003_brand::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_state::{confirm, create_state, FormMode};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

fn status_badge_class(status: BrandStatus) -> &'static str {
    match status {
        BrandStatus::Active => "badge badge--success",
        BrandStatus::Pending => "badge badge--warning",
        BrandStatus::Inactive => "badge badge--neutral",
    }
}

#[component]
pub fn BrandList() -> impl IntoView {
    let pipeline = StoredValue::new(brand_pipeline());
    let state = pipeline.with_value(create_state);
    let all_brands: RwSignal<Vec<Brand>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form_mode: RwSignal<Option<FormMode<Brand>>> = RwSignal::new(None);

    let refresh_view = move || {
        all_brands.with_untracked(|items| {
            pipeline.with_value(|p| state.update(|s| s.refresh(p, items)));
        });
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_brands().await {
                Ok(data) => {
                    all_brands.set(data);
                    state.update(|s| {
                        s.query.set_page(1);
                        s.is_loaded = true;
                    });
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Не удалось загрузить бренды: {}", e))),
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

    let on_facet_select = move |facet: &'static str| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            state.update(|s| {
                if value.is_empty() {
                    s.query.set_facet(facet, Vec::<String>::new());
                } else {
                    s.query.set_facet(facet, [value]);
                }
            });
            refresh_view();
        }
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

    let clear_filters = move || {
        let natural = pipeline.with_value(|p| p.config().natural_sort);
        state.update(|s| s.query.clear_filters(None, natural));
        refresh_view();
    };

    let delete_brand = move |brand: Brand| {
        if !confirm(&format!(
            "Удалить бренд \"{}\"? Действие нельзя отменить.",
            brand.name
        )) {
            return;
        }
        pipeline.with_value(|p| {
            all_brands.update(|items| {
                p.delete(items, &brand.id);
            })
        });
        refresh_view();
    };

    let submit_form = move |dto: BrandDto| -> Result<(), String> {
        let mode = form_mode.get_untracked();
        let result = pipeline.with_value(|p| {
            all_brands.try_update(|items| match &mode {
                Some(FormMode::Edit(brand)) => p.update(items, &brand.id, dto),
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
            None => Err("Список брендов недоступен".to_string()),
        }
    };

    // Количество брендов по категориям для подписей фильтра
    let category_counts = Signal::derive(move || {
        all_brands.with(|items| pipeline.with_value(|p| p.facet_counts(items, FACET_CATEGORY)))
    });
    let count_for = move |category: &str| {
        category_counts.with(|counts| {
            counts
                .iter()
                .find(|c| c.value == category)
                .map_or(0, |c| c.count)
        })
    };

    let selected_facet = move |facet: &'static str| {
        state.with(|s| {
            s.query
                .selected(facet)
                .and_then(|values| values.iter().next().cloned())
                .unwrap_or_default()
        })
    };

    let sort_options = pipeline.with_value(|p| p.config().sort_options());
    let page_size_options = app_config().list.page_size_options.clone();

    view! {
        <PageFrame page_id="a003_brand--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Бренды"</h1>
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
                        " Новый"
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
                            {icon("filter")}
                            <span class="filter-panel__title">"Фильтры"</span>
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
                            <select
                                class="form-select"
                                prop:value=move || selected_facet(FACET_CATEGORY)
                                on:change=on_facet_select(FACET_CATEGORY)
                            >
                                <option value="">"Все категории"</option>
                                {BRAND_CATEGORIES.into_iter().map(|category| view! {
                                    <option value=category>
                                        {move || format!("{} ({})", category, count_for(category))}
                                    </option>
                                }).collect_view()}
                            </select>
                            <select
                                class="form-select"
                                prop:value=move || selected_facet(FACET_STATUS)
                                on:change=on_facet_select(FACET_STATUS)
                            >
                                <option value="">"Все статусы"</option>
                                {BrandStatus::ALL.into_iter().map(|status| view! {
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
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| clear_filters()
                            >
                                "Сбросить"
                            </Button>
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <table class="table" id="a003-brand-table">
                        <thead>
                            <tr>
                                <th style="width: 56px;"></th>
                                <th>"Название"</th>
                                <th>"Категория"</th>
                                <th>"Статус"</th>
                                <th class="text-right">"Товаров"</th>
                                <th>"Создан"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let items = state.with(|s| s.page.items.clone());
                                if items.is_empty() && !loading.get() {
                                    return view! {
                                        <tr><td colspan="7" class="table__empty">"Бренды не найдены"</td></tr>
                                    }.into_any();
                                }
                                items.into_iter().map(|brand| {
                                    let for_edit = brand.clone();
                                    let for_delete = brand.clone();
                                    let logo = match brand.image.clone() {
                                        Some(src) => view! { <img class="brand-logo" src=src alt="" /> }.into_any(),
                                        None => view! { <div class="brand-logo brand-logo--empty">{icon("image")}</div> }.into_any(),
                                    };
                                    view! {
                                        <tr>
                                            <td>{logo}</td>
                                            <td>
                                                <div style="font-weight: 500;">{brand.name.clone()}</div>
                                                <div class="text-muted">{brand.description.clone()}</div>
                                            </td>
                                            <td>{brand.category.clone()}</td>
                                            <td><span class=status_badge_class(brand.status)>{brand.status.label()}</span></td>
                                            <td class="text-right">{brand.product_count.to_string()}</td>
                                            <td>{format_date(&brand.created_at)}</td>
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
                                                    on_click=move |_| delete_brand(for_delete.clone())
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
                    <BrandForm
                        mode=mode
                        on_close=Callback::new(move |_| form_mode.set(None))
                        on_submit=Callback::new(submit_form)
                    />
                })}
            </div>
        </PageFrame>
    }
}
