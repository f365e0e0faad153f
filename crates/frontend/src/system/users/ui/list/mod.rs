use contracts::shared::config::app_config;
use contracts::system::users::{
    user_pipeline, user_stats, User, UserDto, UserFlag, UserRole, UserStatus, FACET_ROLE,
    FACET_STATUS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::UserForm;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::date_utils::{format_date, format_date_opt};
use crate::shared::icons::icon;
use crate::shared::list_state::{confirm, create_state, FormMode};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::users::api;

fn status_badge_class(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "badge badge--success",
        UserStatus::Disabled => "badge badge--error",
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let pipeline = StoredValue::new(user_pipeline());
    let state = pipeline.with_value(create_state);
    let all_users: RwSignal<Vec<User>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form_mode: RwSignal<Option<FormMode<User>>> = RwSignal::new(None);

    let refresh_view = move || {
        all_users.with_untracked(|users| {
            pipeline.with_value(|p| state.update(|s| s.refresh(p, users)));
        });
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => {
                    all_users.set(data);
                    state.update(|s| {
                        s.query.set_page(1);
                        s.is_loaded = true;
                    });
                    refresh_view();
                    set_loading.set(false);
                }
                Err(e) => {
                    set_error.set(Some(format!("Не удалось загрузить пользователей: {}", e)));
                    set_loading.set(false);
                }
            }
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

    let toggle_status = move |id: String| {
        let result =
            pipeline.with_value(|p| all_users.try_update(|users| p.toggle(users, &id, UserFlag::Status)));
        match result {
            Some(Ok(user)) => log::info!("Статус пользователя {} -> {}", user.id, user.status.as_str()),
            Some(Err(e)) => set_error.set(Some(e.to_string())),
            None => {}
        }
        refresh_view();
    };

    let delete_user = move |user: User| {
        if !confirm(&format!(
            "Удалить пользователя \"{}\"? Действие нельзя отменить.",
            user.name
        )) {
            return;
        }
        pipeline.with_value(|p| {
            all_users.update(|users| {
                p.delete(users, &user.id);
            })
        });
        refresh_view();
    };

    let submit_form = move |dto: UserDto| -> Result<(), String> {
        let mode = form_mode.get_untracked();
        let result = pipeline.with_value(|p| {
            all_users.try_update(|users| match &mode {
                Some(FormMode::Edit(user)) => p.update(users, &user.id, dto),
                _ => p.create(users, dto),
            })
        });
        match result {
            Some(Ok(_)) => {
                form_mode.set(None);
                refresh_view();
                Ok(())
            }
            Some(Err(e)) => Err(e.to_string()),
            None => Err("Список пользователей недоступен".to_string()),
        }
    };

    let stats = Signal::derive(move || all_users.with(|users| user_stats(users)));
    let sort_options = pipeline.with_value(|p| p.config().sort_options());
    let page_size_options = app_config().list.page_size_options.clone();

    let selected_facet = move |facet: &'static str| {
        state.with(|s| {
            s.query
                .selected(facet)
                .and_then(|values| values.iter().next().cloned())
                .unwrap_or_default()
        })
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Пользователи"</h1>
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

                <div class="stat-cards">
                    <StatCard
                        label="Всего"
                        icon_name="users"
                        value=Signal::derive(move || Some(stats.get().total.to_string()))
                    />
                    <StatCard
                        label="Активные"
                        icon_name="user"
                        tone=StatTone::Success
                        value=Signal::derive(move || Some(stats.get().active.to_string()))
                    />
                    <StatCard
                        label="Отключенные"
                        icon_name="user"
                        tone=StatTone::Error
                        value=Signal::derive(move || Some(stats.get().disabled.to_string()))
                    />
                </div>

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
                                placeholder="Имя, email или телефон..."
                                prop:value=move || state.with(|s| s.query.search_term.clone())
                                on:input=on_search
                            />
                            <select
                                class="form-select"
                                prop:value=move || selected_facet(FACET_STATUS)
                                on:change=on_facet_select(FACET_STATUS)
                            >
                                <option value="">"Все статусы"</option>
                                {UserStatus::ALL.into_iter().map(|status| view! {
                                    <option value=status.as_str()>{status.label()}</option>
                                }).collect_view()}
                            </select>
                            <select
                                class="form-select"
                                prop:value=move || selected_facet(FACET_ROLE)
                                on:change=on_facet_select(FACET_ROLE)
                            >
                                <option value="">"Все роли"</option>
                                {UserRole::ALL.into_iter().map(|role| view! {
                                    <option value=role.as_str()>{role.label()}</option>
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
                    <table class="table" id="sys-users-table">
                        <thead>
                            <tr>
                                <th>"Имя"</th>
                                <th>"Email"</th>
                                <th>"Телефон"</th>
                                <th>"Роль"</th>
                                <th>"Статус"</th>
                                <th class="text-right">"Заказы"</th>
                                <th>"Создан"</th>
                                <th>"Последний вход"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let items = state.with(|s| s.page.items.clone());
                                if items.is_empty() && !loading.get() {
                                    return view! {
                                        <tr><td colspan="9" class="table__empty">"Пользователи не найдены"</td></tr>
                                    }.into_any();
                                }
                                items.into_iter().map(|user| {
                                    let id_for_toggle = user.id.clone();
                                    let user_for_edit = user.clone();
                                    let user_for_delete = user.clone();
                                    view! {
                                        <tr>
                                            <td><span style="font-weight: 500;">{user.name.clone()}</span></td>
                                            <td>{user.email.clone()}</td>
                                            <td>{user.phone.clone()}</td>
                                            <td><span class=user.role.badge_class()>{user.role.label()}</span></td>
                                            <td><span class=status_badge_class(user.status)>{user.status.label()}</span></td>
                                            <td class="text-right">{user.total_orders.to_string()}</td>
                                            <td>{format_date(&user.created_at)}</td>
                                            <td>{format_date_opt(&user.last_login)}</td>
                                            <td class="table__actions">
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| toggle_status(id_for_toggle.clone())
                                                    attr:title="Сменить статус"
                                                >
                                                    {icon("toggle")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| form_mode.set(Some(FormMode::Edit(user_for_edit.clone())))
                                                    attr:title="Редактировать"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_user(user_for_delete.clone())
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
                    <UserForm
                        mode=mode
                        on_close=Callback::new(move |_| form_mode.set(None))
                        on_submit=Callback::new(submit_form)
                    />
                })}
            </div>
        </PageFrame>
    }
}
