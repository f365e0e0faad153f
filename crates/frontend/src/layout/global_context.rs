use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Страницы админ-панели, доступные из бокового меню
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminPage {
    #[default]
    Dashboard,
    Users,
    Categories,
    Brands,
    Products,
}

impl AdminPage {
    pub const ALL: [AdminPage; 5] = [
        Self::Dashboard,
        Self::Users,
        Self::Categories,
        Self::Brands,
        Self::Products,
    ];

    /// Ключ страницы в адресной строке (`?active=...`)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Brands => "brands",
            Self::Products => "products",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Дашборд",
            Self::Users => "Пользователи",
            Self::Categories => "Категории",
            Self::Brands => "Бренды",
            Self::Products => "Товары",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Categories => "tag",
            Self::Brands => "award",
            Self::Products => "products",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AdminPage>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(AdminPage::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Восстановить активную страницу из `?active=` и синхронизировать адрес при переходах
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|key| AdminPage::from_key(key)) {
            self.open(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let key = this.active.get().key();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, page: AdminPage) {
        log::debug!("open page: {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in AdminPage::ALL {
            assert_eq!(AdminPage::from_key(page.key()), Some(page));
        }
        assert_eq!(AdminPage::from_key("orders"), None);
        assert_eq!(AdminPage::default(), AdminPage::Dashboard);
    }
}
