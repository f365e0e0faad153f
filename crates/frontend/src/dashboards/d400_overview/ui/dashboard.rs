use contracts::dashboards::d400_overview::dto::{revenue_series, DashboardData};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::revenue_chart::RevenueChart;
use crate::dashboards::d400_overview::api;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::date_utils::format_iso_date;
use crate::shared::number_format::{format_count, format_vnd};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};

/// Главный дашборд: сводка, последние заказы, лидеры продаж и график выручки
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let (data, set_data) = signal::<Option<DashboardData>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_dashboard().await {
                Ok(d) => set_data.set(Some(d)),
                Err(e) => {
                    log::error!("Dashboard load failed: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    });

    let stat = move |f: fn(&DashboardData) -> String| {
        Signal::derive(move || data.with(|d| d.as_ref().map(f)))
    };

    let series = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|d| revenue_series(&d.revenue)).unwrap_or_default())
    });

    let recent_orders = move || {
        data.with(|d| d.as_ref().map(|d| d.recent_orders.clone()).unwrap_or_default())
            .into_iter()
            .map(|order| {
                view! {
                    <tr>
                        <td>{order.id}</td>
                        <td>{order.customer}</td>
                        <td>{order.product}</td>
                        <td class="table__cell--right">{format_vnd(order.amount)}</td>
                        <td>
                            <span class=order.status.badge_class()>{order.status.label()}</span>
                        </td>
                        <td>{format_iso_date(&order.date)}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let top_products = move || {
        data.with(|d| d.as_ref().map(|d| d.top_products.clone()).unwrap_or_default())
            .into_iter()
            .map(|product| {
                view! {
                    <li class="top-products__item">
                        {product.image.map(|src| view! {
                            <img class="top-products__image" src=src alt=product.name.clone() />
                        })}
                        <div class="top-products__info">
                            <div class="top-products__name">{product.name.clone()}</div>
                            <div class="top-products__sales">
                                {format!("Продано: {}", format_count(product.sales as u64))}
                            </div>
                        </div>
                        <div class="top-products__revenue">{format_vnd(product.revenue)}</div>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <h1 class="page__title">"Обзор"</h1>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="stat-grid">
                <StatCard
                    label="Пользователи"
                    icon_name="users"
                    value=stat(|d| format_count(d.stats.total_users))
                />
                <StatCard
                    label="Товары"
                    icon_name="products"
                    value=stat(|d| format_count(d.stats.total_products))
                />
                <StatCard
                    label="Заказы"
                    icon_name="orders"
                    value=stat(|d| format_count(d.stats.total_orders))
                    subtitle=stat(|d| format!("Сегодня: {}", format_count(d.stats.today_orders)))
                />
                <StatCard
                    label="Выручка"
                    icon_name="cash"
                    tone=StatTone::Success
                    value=stat(|d| format_vnd(d.stats.total_revenue))
                />
            </div>

            <div class="stat-grid">
                <StatCard
                    label="Заказы за сегодня"
                    icon_name="orders"
                    value=stat(|d| format_count(d.stats.today_orders))
                />
                <StatCard
                    label="Заказы за неделю"
                    icon_name="orders"
                    value=stat(|d| format_count(d.stats.week_orders))
                />
                <StatCard
                    label="Заказы за месяц"
                    icon_name="orders"
                    tone=StatTone::Warning
                    value=stat(|d| format_count(d.stats.month_orders))
                />
            </div>

            <Show
                when=move || data.with(Option::is_some)
                fallback=move || view! { <div class="loading">"Загрузка данных..."</div> }
            >
                <div class="dashboard__row">
                    <section class="card card--wide">
                        <h2 class="card__title">"Выручка по месяцам"</h2>
                        <RevenueChart series=series />
                    </section>
                    <section class="card">
                        <h2 class="card__title">"Лидеры продаж"</h2>
                        <ul class="top-products">{top_products}</ul>
                    </section>
                </div>

                <section class="card">
                    <h2 class="card__title">"Последние заказы"</h2>
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Заказ"</th>
                                <th>"Покупатель"</th>
                                <th>"Товар"</th>
                                <th class="table__cell--right">"Сумма"</th>
                                <th>"Статус"</th>
                                <th>"Дата"</th>
                            </tr>
                        </thead>
                        <tbody>{recent_orders}</tbody>
                    </table>
                </section>
            </Show>
        </PageFrame>
    }
}
