//! PageFrame: корневая обертка страницы в центральной области.
//!
//! На корневом элементе всегда есть:
//!   - `id` в формате `"{entity}--{category}"`, например `"a001_product--list"`
//!   - `data-page-category` с одной из констант PAGE_CAT_*

use leptos::prelude::*;

/// Список записей с фильтрами и пагинацией
pub const PAGE_CAT_LIST: &str = "list";

/// Аналитическая страница с графиком
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Системная страница (пользователи)
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Проверка формата id: `{entity}--{category}`
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

fn base_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    }
}

#[component]
pub fn PageFrame(
    /// HTML id в формате `{entity}--{category}`
    page_id: &'static str,
    /// Одна из констант PAGE_CAT_*
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id: {page_id}");

    view! {
        <div
            id=page_id
            class=base_class(category)
            data-page-category=category
        >
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_page_id() {
        assert!(is_valid_page_id("a001_product--list"));
        assert!(is_valid_page_id("d400_overview--dashboard"));
        assert!(!is_valid_page_id("a001_product"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("sys_users--"));
    }

    #[test]
    fn test_base_class() {
        assert_eq!(base_class(PAGE_CAT_DASHBOARD), "page page--dashboard");
        assert_eq!(base_class(PAGE_CAT_LIST), "page");
    }
}
