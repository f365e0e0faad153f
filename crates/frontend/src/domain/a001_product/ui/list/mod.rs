use contracts::domain::a001_product::aggregate::{
    product_pipeline, Product, ProductDto, FACET_BRAND, FACET_CATEGORY, MAX_RATING,
};
use contracts::shared::config::app_config;
use contracts::shared::list_pipeline::{NumericRange, QueryState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::ProductForm;
use crate::domain::a001_product::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_state::{confirm, create_state, FormMode};
use crate::shared::number_format::format_vnd;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

/// Диапазон цен следует за границами данных, пока пользователь его не сужал
fn follow_bounds(query: &mut QueryState, old: Option<NumericRange>, new: Option<NumericRange>) {
    if query.range.is_none() || query.range == old {
        query.range = new;
    }
}

fn stars_view(product: &Product) -> impl IntoView {
    let filled = product.filled_stars();
    (0..MAX_RATING)
        .map(|i| {
            if i < filled {
                view! { <span class="star star--filled">{icon("star")}</span> }.into_any()
            } else {
                view! { <span class="star">{icon("star-empty")}</span> }.into_any()
            }
        })
        .collect_view()
}

#[component]
pub fn ProductList() -> impl IntoView {
    let pipeline = StoredValue::new(product_pipeline());
    let state = pipeline.with_value(create_state);
    let all_products: RwSignal<Vec<Product>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form_mode: RwSignal<Option<FormMode<Product>>> = RwSignal::new(None);

    let refresh_view = move || {
        all_products.with_untracked(|items| {
            pipeline.with_value(|p| state.update(|s| s.refresh(p, items)));
        });
    };

    let current_bounds = move || {
        all_products.with_untracked(|items| pipeline.with_value(|p| p.range_bounds(items)))
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_products().await {
                Ok(data) => {
                    all_products.set(data);
                    let bounds = current_bounds();
                    state.update(|s| {
                        s.query.range = bounds;
                        s.query.set_page(1);
                        s.is_loaded = true;
                    });
                    refresh_view();
                }
                Err(e) => set_error.set(Some(format!("Не удалось загрузить товары: {}", e))),
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

    let select_category = move |category: Option<String>| {
        state.update(|s| match category {
            Some(value) => s.query.toggle_exclusive_facet(FACET_CATEGORY, &value),
            None => s.query.set_facet(FACET_CATEGORY, Vec::<String>::new()),
        });
        refresh_view();
    };

    let toggle_brand = move |brand: String| {
        state.update(|s| s.query.toggle_facet_value(FACET_BRAND, &brand));
        refresh_view();
    };

    let on_price_min = move |ev: leptos::ev::Event| {
        let (Ok(value), Some(bounds)) = (event_target_value(&ev).parse::<f64>(), current_bounds())
        else {
            return;
        };
        state.update(|s| s.query.set_range_min(value, bounds));
        refresh_view();
    };

    let on_price_max = move |ev: leptos::ev::Event| {
        let (Ok(value), Some(bounds)) = (event_target_value(&ev).parse::<f64>(), current_bounds())
        else {
            return;
        };
        state.update(|s| s.query.set_range_max(value, bounds));
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

    let clear_filters = move || {
        let bounds = current_bounds();
        let natural = pipeline.with_value(|p| p.config().natural_sort);
        state.update(|s| s.query.clear_filters(bounds, natural));
        refresh_view();
    };

    let delete_product = move |product: Product| {
        if !confirm(&format!(
            "Удалить товар \"{}\"? Действие нельзя отменить.",
            product.name
        )) {
            return;
        }
        let old = current_bounds();
        pipeline.with_value(|p| {
            all_products.update(|items| {
                p.delete(items, &product.id);
            })
        });
        let new = current_bounds();
        state.update(|s| follow_bounds(&mut s.query, old, new));
        refresh_view();
    };

    let submit_form = move |dto: ProductDto| -> Result<(), String> {
        let mode = form_mode.get_untracked();
        let old = current_bounds();
        let result = pipeline.with_value(|p| {
            all_products.try_update(|items| match &mode {
                Some(FormMode::Edit(product)) => p.update(items, &product.id, dto),
                _ => p.create(items, dto),
            })
        });
        match result {
            Some(Ok(_)) => {
                let new = current_bounds();
                state.update(|s| follow_bounds(&mut s.query, old, new));
                form_mode.set(None);
                refresh_view();
                Ok(())
            }
            Some(Err(e)) => Err(e.to_string()),
            None => Err("Каталог товаров недоступен".to_string()),
        }
    };

    let category_counts = Signal::derive(move || {
        all_products.with(|items| pipeline.with_value(|p| p.facet_counts(items, FACET_CATEGORY)))
    });
    let brand_counts = Signal::derive(move || {
        all_products.with(|items| pipeline.with_value(|p| p.facet_counts(items, FACET_BRAND)))
    });
    let range_value = move |pick: fn(&NumericRange) -> f64| {
        state.with(|s| s.query.range.map(|r| (pick(&r) as i64).to_string()).unwrap_or_default())
    };

    let sort_options = pipeline.with_value(|p| p.config().sort_options());
    let page_size_options = app_config().list.page_size_options.clone();

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Товары"</h1>
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
                        " Новый товар"
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

            <div class="page__content catalog">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <aside class="catalog__filters">
                    <div class="filter-section">
                        <div class="filter-section__title">"Категория"</div>
                        <button
                            class="chip"
                            class:chip--active=move || state.with(|s| s.query.selected(FACET_CATEGORY).is_none())
                            on:click=move |_| select_category(None)
                        >
                            "Все"
                        </button>
                        {move || category_counts.get().into_iter().map(|facet| {
                            let value = facet.value.clone();
                            let value_for_click = facet.value.clone();
                            view! {
                                <button
                                    class="chip"
                                    class:chip--active=move || state.with(|s| s.query.is_selected(FACET_CATEGORY, &value))
                                    on:click=move |_| select_category(Some(value_for_click.clone()))
                                >
                                    {format!("{} ({})", facet.value, facet.count)}
                                </button>
                            }
                        }).collect_view()}
                    </div>

                    <div class="filter-section">
                        <div class="filter-section__title">"Бренд"</div>
                        {move || brand_counts.get().into_iter().map(|facet| {
                            let value = facet.value.clone();
                            let value_for_change = facet.value.clone();
                            view! {
                                <label class="filter-checkbox">
                                    <input
                                        type="checkbox"
                                        prop:checked=move || state.with(|s| s.query.is_selected(FACET_BRAND, &value))
                                        on:change=move |_| toggle_brand(value_for_change.clone())
                                    />
                                    <span>{facet.value.clone()}</span>
                                    <span class="text-muted">{facet.count.to_string()}</span>
                                </label>
                            }
                        }).collect_view()}
                    </div>

                    <div class="filter-section">
                        <div class="filter-section__title">"Цена, ₫"</div>
                        <div class="filter-range">
                            <input
                                class="form-input"
                                type="number"
                                min="0"
                                prop:value=move || range_value(|r| r.min)
                                on:change=on_price_min
                            />
                            <span>"-"</span>
                            <input
                                class="form-input"
                                type="number"
                                min="0"
                                prop:value=move || range_value(|r| r.max)
                                on:change=on_price_max
                            />
                        </div>
                    </div>

                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| clear_filters()
                    >
                        "Сбросить фильтры"
                    </Button>
                </aside>

                <section class="catalog__main">
                    <div class="filter-panel">
                        <div class="filter-panel-header">
                            <div class="filter-panel-header__left">
                                <input
                                    class="form-input"
                                    type="search"
                                    placeholder="Название, бренд или категория..."
                                    prop:value=move || state.with(|s| s.query.search_term.clone())
                                    on:input=on_search
                                />
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
                        </div>
                    </div>

                    <div class="product-grid">
                        {move || {
                            let items = state.with(|s| s.page.items.clone());
                            if items.is_empty() && !loading.get() {
                                return view! {
                                    <div class="table__empty">"Товары не найдены"</div>
                                }.into_any();
                            }
                            items.into_iter().map(|product| {
                                let for_edit = product.clone();
                                let for_delete = product.clone();
                                view! {
                                    <div class="product-card">
                                        <img class="product-card__image" src=product.image_url.clone() alt=product.name.clone() />
                                        <div class="product-card__body">
                                            <div class="product-card__meta">
                                                {format!("{} · {}", product.brand, product.category)}
                                            </div>
                                            <div class="product-card__title">{product.name.clone()}</div>
                                            <div class="product-card__rating">
                                                {stars_view(&product)}
                                                <span class="text-muted">
                                                    {format!("{:.1} ({})", product.rating, product.review_count)}
                                                </span>
                                            </div>
                                            <div class="product-card__price">{format_vnd(product.price)}</div>
                                            <div class="product-card__description">{product.description.clone()}</div>
                                        </div>
                                        <div class="product-card__actions">
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| form_mode.set(Some(FormMode::Edit(for_edit.clone())))
                                                attr:title="Редактировать"
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| delete_product(for_delete.clone())
                                                attr:title="Удалить"
                                            >
                                                {icon("trash")}
                                            </Button>
                                        </div>
                                    </div>
                                }
                            }).collect_view().into_any()
                        }}
                    </div>
                </section>

                {move || form_mode.get().map(|mode| view! {
                    <ProductForm
                        mode=mode
                        on_close=Callback::new(move |_| form_mode.set(None))
                        on_submit=Callback::new(submit_form)
                    />
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_bounds_untouched_range() {
        let old = Some(NumericRange::new(100.0, 500.0));
        let new = Some(NumericRange::new(50.0, 500.0));
        let mut query = QueryState::default();
        query.range = old;
        follow_bounds(&mut query, old, new);
        assert_eq!(query.range, new);
    }

    #[test]
    fn test_follow_bounds_keeps_user_range() {
        let bounds = NumericRange::new(100.0, 500.0);
        let mut query = QueryState::default();
        query.set_range_max(300.0, bounds);
        follow_bounds(&mut query, Some(bounds), Some(NumericRange::new(50.0, 900.0)));
        assert_eq!(query.range, Some(NumericRange::new(100.0, 300.0)));
    }
}
