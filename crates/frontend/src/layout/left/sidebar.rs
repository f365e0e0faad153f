//! Боковое меню админ-панели: страницы и выход из системы

use crate::layout::global_context::{AdminPage, AppGlobalContext};
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

const LOGOUT_CONFIRM: &str = "Вы уверены, что хотите выйти?";

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (_, set_auth_state) = use_auth();
    let is_open = move || ctx.left_open.get();

    let on_logout = move |_| {
        if confirm(LOGOUT_CONFIRM) {
            do_logout(set_auth_state);
        }
    };

    view! {
        <div class="app-sidebar__content">
            {AdminPage::ALL.into_iter().map(|page| {
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.active.get() == page
                        title=page.label()
                        on:click=move |_| ctx.open(page)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(page.icon())}
                            <Show when=is_open>
                                <span>{page.label()}</span>
                            </Show>
                        </div>
                    </div>
                }
            }).collect_view()}

            <div class="app-sidebar__divider"></div>

            <div class="app-sidebar__item app-sidebar__item--logout" title="Выход" on:click=on_logout>
                <div class="app-sidebar__item-content">
                    {icon("log-out")}
                    <Show when=is_open>
                        <span>"Выход"</span>
                    </Show>
                </div>
            </div>
        </div>
    }
}
