use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;

use crate::shared::list_pipeline::{compare_text, new_token_id, EntityConfig, ListEntity, ListPipeline};

pub const SORT_NATURAL: &str = "natural";
pub const SORT_NAME_ASC: &str = "name-asc";
pub const SORT_NEWEST: &str = "newest";
pub const SORT_PRODUCTS_DESC: &str = "products-desc";

pub const FACET_CATEGORY: &str = "category";
pub const FACET_STATUS: &str = "status";

/// Категории брендов, доступные в форме
pub const BRAND_CATEGORIES: [&str; 5] = [
    "Technology",
    "Sports & Fashion",
    "E-commerce",
    "Music & Entertainment",
    "Social Media",
];

/// Статус бренда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    #[default]
    Active,
    Pending,
    Inactive,
}

impl BrandStatus {
    pub const ALL: [BrandStatus; 3] = [Self::Active, Self::Pending, Self::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Активен",
            Self::Pending => "На проверке",
            Self::Inactive => "Неактивен",
        }
    }
}

/// Бренд
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: BrandStatus,
    #[serde(rename = "productCount")]
    pub product_count: u32,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDate,
    /// Логотип (data URL или ссылка)
    pub image: Option<String>,
}

impl ListEntity for Brand {
    type Id = String;
    type Draft = BrandDto;
    type Flag = Infallible;

    fn id(&self) -> &String {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        new_token_id(existing, |b| b.id.as_str())
    }

    fn from_draft(id: String, dto: BrandDto, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            category: dto.category.trim().to_string(),
            status: dto.status,
            product_count: 0,
            created_at: created_at.date_naive(),
            image: normalize_image(dto.image),
        }
    }

    fn apply_draft(&mut self, dto: BrandDto) {
        self.name = dto.name.trim().to_string();
        self.description = dto.description.trim().to_string();
        self.category = dto.category.trim().to_string();
        self.status = dto.status;
        self.image = normalize_image(dto.image);
    }

    fn toggle_flag(&mut self, flag: Infallible) {
        match flag {}
    }

    fn element_name() -> &'static str {
        "Бренд"
    }
}

/// Пустая строка изображения означает "без изображения"
fn normalize_image(image: Option<String>) -> Option<String> {
    image.filter(|s| !s.trim().is_empty())
}

/// DTO для создания/обновления бренда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrandDto {
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: BrandStatus,
    pub image: Option<String>,
}

impl From<&Brand> for BrandDto {
    fn from(b: &Brand) -> Self {
        Self {
            name: b.name.clone(),
            description: b.description.clone(),
            category: b.category.clone(),
            status: b.status,
            image: b.image.clone(),
        }
    }
}

pub fn brand_config() -> EntityConfig<Brand> {
    EntityConfig::new(SORT_NATURAL)
        .with_search("name", |b: &Brand| b.name.as_str())
        .with_search("description", |b: &Brand| b.description.as_str())
        .with_facet(FACET_CATEGORY, "Категория", |b: &Brand| b.category.as_str())
        .with_facet(FACET_STATUS, "Статус", |b: &Brand| b.status.as_str())
        .with_sort(SORT_NATURAL, "По умолчанию", |_: &Brand, _: &Brand| Ordering::Equal)
        .with_sort(SORT_NAME_ASC, "По названию", |a: &Brand, b: &Brand| {
            compare_text(&a.name, &b.name)
        })
        .with_sort(SORT_NEWEST, "Сначала новые", |a: &Brand, b: &Brand| {
            b.created_at.cmp(&a.created_at)
        })
        .with_sort(SORT_PRODUCTS_DESC, "По числу товаров", |a: &Brand, b: &Brand| {
            b.product_count.cmp(&a.product_count)
        })
        .with_required("name", "Название бренда не может быть пустым", |b: &Brand| {
            b.name.as_str()
        })
        .with_required("category", "Категория не может быть пустой", |b: &Brand| {
            b.category.as_str()
        })
}

pub fn brand_pipeline() -> ListPipeline<Brand> {
    ListPipeline::new(brand_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pipeline::{ListError, QueryState};

    fn brand(id: &str, name: &str, category: &str, status: BrandStatus, products: u32) -> Brand {
        Brand {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            status,
            product_count: products,
            created_at: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            image: None,
        }
    }

    fn sample() -> Vec<Brand> {
        vec![
            brand("1", "Apple Inc.", "Technology", BrandStatus::Active, 156),
            brand("2", "Nike", "Sports & Fashion", BrandStatus::Active, 89),
            brand("3", "Amazon", "E-commerce", BrandStatus::Pending, 2341),
            brand("4", "Spotify", "Music & Entertainment", BrandStatus::Active, 82),
            brand("5", "Meta", "Social Media", BrandStatus::Inactive, 107),
            brand("6", "Google", "Technology", BrandStatus::Active, 205),
        ]
    }

    #[test]
    fn test_create_with_empty_name_fails() {
        let p = brand_pipeline();
        let mut items = sample();
        let dto = BrandDto {
            name: String::new(),
            category: "X".into(),
            ..Default::default()
        };

        let err = p.create(&mut items, dto).unwrap_err();
        assert!(matches!(err, ListError::Validation { field: "name", .. }));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_delete_missing_id_keeps_collection() {
        let p = brand_pipeline();
        let mut items = sample();
        assert!(!p.delete(&mut items, &"404".to_string()));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_category_facet_and_counts() {
        let p = brand_pipeline();
        let items = sample();
        let mut query = QueryState::default();
        query.set_facet(FACET_CATEGORY, ["Technology"]);

        let names: Vec<&str> = p.filter(&items, &query).iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Inc.", "Google"]);

        let counts = p.facet_counts(&items, FACET_STATUS);
        assert_eq!(counts[0].value, "active");
        assert_eq!(counts[0].count, 4);
    }

    #[test]
    fn test_sort_by_product_count() {
        let p = brand_pipeline();
        let items = sample();
        let filtered = p.filter(&items, &QueryState::default());
        let ids: Vec<&str> = p
            .sort(&filtered, SORT_PRODUCTS_DESC)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "6", "1", "5", "2", "4"]);
    }

    #[test]
    fn test_empty_image_is_removed() {
        let p = brand_pipeline();
        let mut items = sample();
        let mut dto = BrandDto::from(&items[0]);
        dto.image = Some("data:image/png;base64,AAAA".into());
        let updated = p.update(&mut items, &"1".to_string(), dto.clone()).unwrap();
        assert!(updated.image.is_some());

        dto.image = Some(String::new());
        let updated = p.update(&mut items, &"1".to_string(), dto).unwrap();
        assert_eq!(updated.image, None);
    }
}
