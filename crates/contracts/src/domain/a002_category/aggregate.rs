use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::shared::list_pipeline::{compare_text, new_token_id, EntityConfig, ListEntity, ListPipeline};

pub const SORT_NATURAL: &str = "natural";
pub const SORT_NAME_ASC: &str = "name-asc";
pub const SORT_NEWEST: &str = "newest";

pub const FACET_STATUS: &str = "status";

/// Статус категории
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    pub const ALL: [CategoryStatus; 2] = [Self::Active, Self::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Активна",
            Self::Inactive => "Неактивна",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Переключаемые поля категории
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFlag {
    Status,
}

/// Категория товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: CategoryStatus,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDate,
    #[serde(rename = "productCount")]
    pub product_count: u32,
}

impl ListEntity for Category {
    type Id = String;
    type Draft = CategoryDto;
    type Flag = CategoryFlag;

    fn id(&self) -> &String {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        new_token_id(existing, |c| c.id.as_str())
    }

    fn from_draft(id: String, dto: CategoryDto, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            status: dto.status,
            created_at: created_at.date_naive(),
            product_count: 0,
        }
    }

    fn apply_draft(&mut self, dto: CategoryDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.status = dto.status;
    }

    fn toggle_flag(&mut self, flag: CategoryFlag) {
        match flag {
            CategoryFlag::Status => self.status = self.status.toggled(),
        }
    }

    fn element_name() -> &'static str {
        "Категория"
    }
}

/// DTO для создания/обновления категории
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub name: String,
    pub description: String,
    pub status: CategoryStatus,
}

impl From<&Category> for CategoryDto {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            description: c.description.clone(),
            status: c.status,
        }
    }
}

pub fn category_config() -> EntityConfig<Category> {
    EntityConfig::new(SORT_NATURAL)
        .with_search("name", |c: &Category| c.name.as_str())
        .with_search("description", |c: &Category| c.description.as_str())
        .with_facet(FACET_STATUS, "Статус", |c: &Category| c.status.as_str())
        .with_sort(SORT_NATURAL, "По умолчанию", |_: &Category, _: &Category| Ordering::Equal)
        .with_sort(SORT_NAME_ASC, "По названию", |a: &Category, b: &Category| {
            compare_text(&a.name, &b.name)
        })
        .with_sort(SORT_NEWEST, "Сначала новые", |a: &Category, b: &Category| {
            b.created_at.cmp(&a.created_at)
        })
        .with_required("name", "Название категории не может быть пустым", |c: &Category| {
            c.name.as_str()
        })
}

pub fn category_pipeline() -> ListPipeline<Category> {
    ListPipeline::new(category_config())
}
