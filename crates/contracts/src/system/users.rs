use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::shared::list_pipeline::{compare_text, new_token_id, EntityConfig, ListEntity, ListPipeline};

pub const SORT_NATURAL: &str = "natural";
pub const SORT_NAME_ASC: &str = "name-asc";
pub const SORT_NEWEST: &str = "newest";
pub const SORT_ORDERS_DESC: &str = "orders-desc";

pub const FACET_STATUS: &str = "status";
pub const FACET_ROLE: &str = "role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [Self::Admin, Self::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Администратор",
            Self::User => "Пользователь",
        }
    }

    /// CSS-класс бейджа роли
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Admin => "badge badge--danger",
            Self::User => "badge badge--info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Disabled,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [Self::Active, Self::Disabled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Активен",
            Self::Disabled => "Отключен",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Disabled,
            Self::Disabled => Self::Active,
        }
    }
}

/// Переключаемые поля пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFlag {
    Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDate,
    pub status: UserStatus,
    #[serde(rename = "totalOrders")]
    pub total_orders: u32,
    #[serde(rename = "lastLogin")]
    pub last_login: Option<NaiveDate>,
}

impl ListEntity for User {
    type Id = String;
    type Draft = UserDto;
    type Flag = UserFlag;

    fn id(&self) -> &String {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        new_token_id(existing, |u| u.id.as_str())
    }

    fn from_draft(id: String, dto: UserDto, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            phone: dto.phone.trim().to_string(),
            role: dto.role,
            created_at: created_at.date_naive(),
            status: dto.status,
            total_orders: 0,
            last_login: None,
        }
    }

    fn apply_draft(&mut self, dto: UserDto) {
        self.name = dto.name.trim().to_string();
        self.email = dto.email.trim().to_string();
        self.phone = dto.phone.trim().to_string();
        self.role = dto.role;
        self.status = dto.status;
    }

    fn toggle_flag(&mut self, flag: UserFlag) {
        match flag {
            UserFlag::Status => self.status = self.status.toggled(),
        }
    }

    fn element_name() -> &'static str {
        "Пользователь"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl From<&User> for UserDto {
    fn from(u: &User) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            phone: u.phone.clone(),
            role: u.role,
            status: u.status,
        }
    }
}

/// Сводка по пользователям для карточек над таблицей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub disabled: usize,
}

pub fn user_stats(users: &[User]) -> UserStats {
    let active = users.iter().filter(|u| u.status == UserStatus::Active).count();
    UserStats {
        total: users.len(),
        active,
        disabled: users.len() - active,
    }
}

pub fn user_config() -> EntityConfig<User> {
    EntityConfig::new(SORT_NATURAL)
        .with_search("name", |u: &User| u.name.as_str())
        .with_search("email", |u: &User| u.email.as_str())
        .with_search("phone", |u: &User| u.phone.as_str())
        .with_facet(FACET_STATUS, "Статус", |u: &User| u.status.as_str())
        .with_facet(FACET_ROLE, "Роль", |u: &User| u.role.as_str())
        .with_sort(SORT_NATURAL, "По умолчанию", |_: &User, _: &User| Ordering::Equal)
        .with_sort(SORT_NAME_ASC, "По имени", |a: &User, b: &User| {
            compare_text(&a.name, &b.name)
        })
        .with_sort(SORT_NEWEST, "Сначала новые", |a: &User, b: &User| {
            b.created_at.cmp(&a.created_at)
        })
        .with_sort(SORT_ORDERS_DESC, "По числу заказов", |a: &User, b: &User| {
            b.total_orders.cmp(&a.total_orders)
        })
        .with_required("name", "Имя пользователя не может быть пустым", |u: &User| {
            u.name.as_str()
        })
        .with_required("email", "Email не может быть пустым", |u: &User| u.email.as_str())
}

pub fn user_pipeline() -> ListPipeline<User> {
    ListPipeline::new(user_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pipeline::{paginate, QueryState};

    fn user(n: usize) -> User {
        User {
            id: n.to_string(),
            name: format!("Nguyen Van {}", n),
            email: format!("user{}@example.com", n),
            phone: "1234567890".to_string(),
            role: if n % 3 == 0 { UserRole::Admin } else { UserRole::User },
            created_at: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            status: if n % 4 == 0 { UserStatus::Disabled } else { UserStatus::Active },
            total_orders: n as u32,
            last_login: None,
        }
    }

    fn users(count: usize) -> Vec<User> {
        (0..count).map(user).collect()
    }

    #[test]
    fn test_third_page_of_25() {
        let p = user_pipeline();
        let items = users(25);
        let filtered = p.filter(&items, &QueryState::default());
        assert_eq!(filtered.len(), 25);

        let page = paginate(&filtered, 3, 10);
        let ids: Vec<&str> = page.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["20", "21", "22", "23", "24"]);
        assert!(paginate(&filtered, 4, 10).is_empty());
    }

    #[test]
    fn test_visible_items_pages() {
        let p = user_pipeline();
        let items = users(25);
        let mut query = p.default_query(10);
        query.set_page(3);

        let page = p.visible_items(&items, &mut query);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items[0].id, "20");
    }

    #[test]
    fn test_status_and_role_facets() {
        let p = user_pipeline();
        let items = users(12);
        let mut query = QueryState::default();
        query.set_facet(FACET_STATUS, ["disabled"]);
        let ids: Vec<&str> = p.filter(&items, &query).iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "4", "8"]);

        query.set_facet(FACET_ROLE, ["admin"]);
        let ids: Vec<&str> = p.filter(&items, &query).iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["0"]);
    }

    #[test]
    fn test_search_by_phone_and_email() {
        let p = user_pipeline();
        let items = users(12);
        let mut query = QueryState::default();
        query.set_search("USER11@");
        assert_eq!(p.filter(&items, &query).len(), 1);

        query.set_search("12345");
        assert_eq!(p.filter(&items, &query).len(), 12);
    }

    #[test]
    fn test_toggle_and_stats() {
        let p = user_pipeline();
        let mut items = users(4);
        assert_eq!(user_stats(&items), UserStats { total: 4, active: 3, disabled: 1 });

        p.toggle(&mut items, &"1".to_string(), UserFlag::Status).unwrap();
        assert_eq!(items[1].status, UserStatus::Disabled);
        assert_eq!(user_stats(&items), UserStats { total: 4, active: 2, disabled: 2 });
    }

    #[test]
    fn test_delete_shrinks_and_clamps_page() {
        let p = user_pipeline();
        let mut items = users(11);
        let mut query = p.default_query(10);
        query.set_page(2);
        assert_eq!(p.visible_items(&items, &mut query).items.len(), 1);

        assert!(p.delete(&mut items, &"10".to_string()));
        let page = p.visible_items(&items, &mut query);
        assert_eq!(query.page, 1);
        assert_eq!(page.items.len(), 10);
    }
}
