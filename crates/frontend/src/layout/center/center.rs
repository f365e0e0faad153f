use crate::dashboards::OverviewDashboard;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_category::ui::list::CategoryList;
use crate::domain::a003_brand::ui::list::BrandList;
use crate::layout::global_context::{AdminPage, AppGlobalContext};
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;

fn render_page(page: AdminPage) -> AnyView {
    match page {
        AdminPage::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        AdminPage::Users => view! { <UsersListPage /> }.into_any(),
        AdminPage::Categories => view! { <CategoryList /> }.into_any(),
        AdminPage::Brands => view! { <BrandList /> }.into_any(),
        AdminPage::Products => view! { <ProductList /> }.into_any(),
    }
}

/// Центральная зона: активная страница админ-панели
#[component]
pub fn Center() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {move || render_page(ctx.active.get())}
        </div>
    }
}
