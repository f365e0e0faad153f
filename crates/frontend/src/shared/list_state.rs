//! Состояние страницы-списка поверх `ListPipeline`
//!
//! Коллекция живет в отдельном сигнале страницы; здесь только запрос и
//! последняя вычисленная страница. Пересчет всегда явный: `refresh`.

use contracts::shared::config::app_config;
use contracts::shared::list_pipeline::{ListEntity, ListPage, ListPipeline, QueryState};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ListViewState<T> {
    pub query: QueryState,
    pub page: ListPage<T>,
    pub is_loaded: bool,
}

impl<T: ListEntity> ListViewState<T> {
    pub fn new(pipeline: &ListPipeline<T>) -> Self {
        Self {
            query: pipeline.default_query(app_config().list.default_page_size),
            page: ListPage::default(),
            is_loaded: false,
        }
    }

    /// Пересчитать видимую страницу (страница запроса при этом clamp-ится)
    pub fn refresh(&mut self, pipeline: &ListPipeline<T>, items: &[T]) {
        self.page = pipeline.visible_items(items, &mut self.query);
    }
}

pub fn create_state<T>(pipeline: &ListPipeline<T>) -> RwSignal<ListViewState<T>>
where
    T: ListEntity + Send + Sync + 'static,
{
    RwSignal::new(ListViewState::new(pipeline))
}

/// Режим модальной формы записи
#[derive(Clone, Debug, PartialEq)]
pub enum FormMode<T> {
    Create,
    Edit(T),
}

impl<T> FormMode<T> {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

/// Браузерный confirm; вне браузера считаем, что пользователь отказался
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::{user_pipeline, User, UserRole, UserStatus};
    use chrono::NaiveDate;

    fn user(i: usize) -> User {
        User {
            id: i.to_string(),
            name: format!("User {:02}", i),
            email: format!("user{}@example.com", i),
            phone: String::new(),
            role: UserRole::User,
            created_at: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            status: UserStatus::Active,
            total_orders: 0,
            last_login: None,
        }
    }

    #[test]
    fn test_refresh_fills_page() {
        let pipeline = user_pipeline();
        let users: Vec<User> = (0..25).map(user).collect();
        let mut state = ListViewState::new(&pipeline);
        assert!(!state.is_loaded);

        state.query.set_page(3);
        state.refresh(&pipeline, &users);
        assert_eq!(state.page.items.len(), 5);
        assert_eq!(state.page.total_count, 25);
        assert_eq!(state.page.total_pages, 3);
    }

    #[test]
    fn test_refresh_clamps_page_after_filter() {
        let pipeline = user_pipeline();
        let users: Vec<User> = (0..25).map(user).collect();
        let mut state = ListViewState::new(&pipeline);
        state.query.set_page(3);
        state.query.set_search("User 0");
        state.query.set_page(3);
        state.refresh(&pipeline, &users);
        assert_eq!(state.query.page, 1);
        assert_eq!(state.page.items.len(), 10);
    }
}
