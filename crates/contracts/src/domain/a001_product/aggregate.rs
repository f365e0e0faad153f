use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::shared::list_pipeline::{
    compare_text, next_numeric_id, EntityConfig, ListEntity, ListPipeline,
};

// ============================================================================
// Sort keys / facets
// ============================================================================

pub const SORT_NEWEST: &str = "newest";
pub const SORT_PRICE_ASC: &str = "price-asc";
pub const SORT_PRICE_DESC: &str = "price-desc";
pub const SORT_RATING_DESC: &str = "rating-desc";
pub const SORT_NAME_ASC: &str = "name-asc";

/// Фильтр по категории (одиночный выбор)
pub const FACET_CATEGORY: &str = "category";
/// Фильтр по бренду (мультивыбор)
pub const FACET_BRAND: &str = "brand";

/// Максимальная оценка товара
pub const MAX_RATING: usize = 5;

// ============================================================================
// Aggregate
// ============================================================================

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Цена в VND (целое число)
    pub price: i64,
    /// URL или data URL изображения; конвейером не интерпретируется
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Оценка 0..5
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub description: String,
    pub category: String,
    pub brand: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Количество закрашенных звезд для оценки
    pub fn filled_stars(&self) -> usize {
        filled_stars(self.rating)
    }
}

pub fn filled_stars(rating: f64) -> usize {
    if !rating.is_finite() || rating <= 0.0 {
        return 0;
    }
    (rating.floor() as usize).min(MAX_RATING)
}

impl ListEntity for Product {
    type Id = i64;
    type Draft = ProductDto;
    type Flag = Infallible;

    fn id(&self) -> &i64 {
        &self.id
    }

    fn next_id(existing: &[Self]) -> i64 {
        next_numeric_id(existing, |p| p.id)
    }

    /// Новый товар всегда без оценок
    fn from_draft(id: i64, dto: ProductDto, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            price: dto.price,
            image_url: dto.image_url,
            rating: 0.0,
            review_count: 0,
            description: dto.description.trim().to_string(),
            category: dto.category.trim().to_string(),
            brand: dto.brand.trim().to_string(),
            created_at,
        }
    }

    fn apply_draft(&mut self, dto: ProductDto) {
        self.name = dto.name.trim().to_string();
        self.price = dto.price;
        self.image_url = dto.image_url;
        self.description = dto.description.trim().to_string();
        self.category = dto.category.trim().to_string();
        self.brand = dto.brand.trim().to_string();
    }

    fn toggle_flag(&mut self, flag: Infallible) {
        match flag {}
    }

    fn element_name() -> &'static str {
        "Товар"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub name: String,
    pub price: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub brand: String,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            price: p.price,
            image_url: p.image_url.clone(),
            description: p.description.clone(),
            category: p.category.clone(),
            brand: p.brand.clone(),
        }
    }
}

// ============================================================================
// List configuration
// ============================================================================

pub fn product_config() -> EntityConfig<Product> {
    EntityConfig::new(SORT_NEWEST)
        .with_search("name", |p: &Product| p.name.as_str())
        .with_search("brand", |p: &Product| p.brand.as_str())
        .with_search("category", |p: &Product| p.category.as_str())
        .with_facet(FACET_CATEGORY, "Категория", |p: &Product| p.category.as_str())
        .with_facet(FACET_BRAND, "Бренд", |p: &Product| p.brand.as_str())
        .with_range("price", |p: &Product| p.price as f64)
        .with_sort(SORT_NEWEST, "Сначала новые", |a: &Product, b: &Product| {
            b.created_at.cmp(&a.created_at)
        })
        .with_sort(SORT_PRICE_ASC, "Цена: по возрастанию", |a: &Product, b: &Product| {
            a.price.cmp(&b.price)
        })
        .with_sort(SORT_PRICE_DESC, "Цена: по убыванию", |a: &Product, b: &Product| {
            b.price.cmp(&a.price)
        })
        .with_sort(SORT_RATING_DESC, "По рейтингу", |a: &Product, b: &Product| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| b.review_count.cmp(&a.review_count))
        })
        .with_sort(SORT_NAME_ASC, "По названию", |a: &Product, b: &Product| {
            compare_text(&a.name, &b.name)
        })
        .with_required("name", "Название товара не может быть пустым", |p: &Product| {
            p.name.as_str()
        })
        .with_required("category", "Категория не может быть пустой", |p: &Product| {
            p.category.as_str()
        })
        .with_required("brand", "Бренд не может быть пустым", |p: &Product| {
            p.brand.as_str()
        })
}

pub fn product_pipeline() -> ListPipeline<Product> {
    ListPipeline::new(product_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pipeline::{ListError, NumericRange, QueryState};
    use chrono::{Duration, TimeZone};

    fn product(id: i64, name: &str, price: i64, rating: f64, reviews: u32, days_ago: i64) -> Product {
        let base = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        Product {
            id,
            name: name.to_string(),
            price,
            image_url: String::new(),
            rating,
            review_count: reviews,
            description: String::new(),
            category: (if id % 2 == 0 { "Smartphones" } else { "Tablets" }).to_string(),
            brand: (if id < 3 { "Apple" } else { "Samsung" }).to_string(),
            created_at: base - Duration::days(days_ago),
        }
    }

    fn prices(items: &[&Product]) -> Vec<i64> {
        items.iter().map(|p| p.price).collect()
    }

    #[test]
    fn test_sort_price_asc() {
        let items = vec![
            product(1, "iPhone 15", 21_990_000, 4.7, 412, 1),
            product(2, "Galaxy S24", 18_990_000, 4.5, 356, 2),
            product(3, "iPad Air", 14_990_000, 4.6, 210, 4),
        ];
        let p = product_pipeline();
        let filtered = p.filter(&items, &QueryState::default());

        let sorted = p.sort(&filtered, SORT_PRICE_ASC);
        assert_eq!(prices(&sorted), vec![14_990_000, 18_990_000, 21_990_000]);

        let sorted = p.sort(&filtered, SORT_PRICE_DESC);
        assert_eq!(prices(&sorted), vec![21_990_000, 18_990_000, 14_990_000]);
    }

    #[test]
    fn test_sort_newest_and_name() {
        let items = vec![
            product(1, "b", 1, 0.0, 0, 3),
            product(2, "C", 1, 0.0, 0, 1),
            product(3, "a", 1, 0.0, 0, 2),
        ];
        let p = product_pipeline();
        let filtered = p.filter(&items, &QueryState::default());

        let newest: Vec<i64> = p.sort(&filtered, SORT_NEWEST).iter().map(|p| p.id).collect();
        assert_eq!(newest, vec![2, 3, 1]);

        let by_name: Vec<i64> = p.sort(&filtered, SORT_NAME_ASC).iter().map(|p| p.id).collect();
        assert_eq!(by_name, vec![3, 1, 2]);
    }

    #[test]
    fn test_rating_ties_broken_by_review_count() {
        let items = vec![
            product(1, "a", 1, 4.5, 10, 1),
            product(2, "b", 1, 4.8, 5, 1),
            product(3, "c", 1, 4.5, 90, 1),
        ];
        let p = product_pipeline();
        let filtered = p.filter(&items, &QueryState::default());
        let ids: Vec<i64> = p.sort(&filtered, SORT_RATING_DESC).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_search_brand_category_and_price_range() {
        let items = vec![
            product(1, "iPhone 15", 21_990_000, 4.7, 412, 1),
            product(2, "Galaxy S24", 18_990_000, 4.5, 356, 2),
            product(3, "iPad Air", 14_990_000, 4.6, 210, 4),
            product(4, "Galaxy Tab", 9_990_000, 4.1, 50, 5),
        ];
        let p = product_pipeline();

        let mut query = p.default_query(10);
        query.set_search("samsung");
        let ids: Vec<i64> = p.filter(&items, &query).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4]);

        let bounds = p.range_bounds(&items).unwrap();
        assert_eq!(bounds, NumericRange::new(9_990_000.0, 21_990_000.0));

        query.clear_filters(Some(bounds), SORT_NEWEST);
        query.set_range_max(19_000_000.0, bounds);
        query.toggle_exclusive_facet(FACET_CATEGORY, "Smartphones");
        let ids: Vec<i64> = p.filter(&items, &query).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_create_resets_rating_and_round_trips() {
        let p = product_pipeline();
        let mut items = vec![product(1, "iPhone 15", 21_990_000, 4.7, 412, 1)];
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let dto = ProductDto {
            name: "Pixel 9".into(),
            price: 17_990_000,
            image_url: "data:image/png;base64,AAAA".into(),
            description: "Google".into(),
            category: "Smartphones".into(),
            brand: "Google".into(),
        };

        let created = p.create_at(&mut items, dto.clone(), now).unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(created.rating, 0.0);
        assert_eq!(created.review_count, 0);
        assert_eq!(created.created_at, now);

        let stored = p.find(&items, &2).unwrap();
        assert_eq!(ProductDto::from(stored), dto);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn test_create_requires_brand() {
        let p = product_pipeline();
        let mut items = Vec::new();
        let dto = ProductDto {
            name: "Pixel 9".into(),
            category: "Smartphones".into(),
            ..Default::default()
        };
        let err = p.create(&mut items, dto).unwrap_err();
        assert!(matches!(err, ListError::Validation { field: "brand", .. }));
        assert!(items.is_empty());
    }

    #[test]
    fn test_create_with_empty_name_keeps_catalog() {
        let p = product_pipeline();
        let mut items = vec![
            product(1, "iPhone 15", 21_990_000, 4.7, 412, 1),
            product(2, "Galaxy S24", 18_990_000, 4.5, 356, 2),
        ];
        let dto = ProductDto {
            name: String::new(),
            category: "X".into(),
            ..Default::default()
        };

        let err = p.create(&mut items, dto).unwrap_err();
        assert!(matches!(err, ListError::Validation { field: "name", .. }));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_update_keeps_rating() {
        let p = product_pipeline();
        let mut items = vec![product(1, "iPhone 15", 21_990_000, 4.7, 412, 1)];
        let mut dto = ProductDto::from(&items[0]);
        dto.price = 19_990_000;

        let updated = p.update(&mut items, &1, dto).unwrap();
        assert_eq!(updated.price, 19_990_000);
        assert_eq!(updated.rating, 4.7);
        assert_eq!(updated.review_count, 412);
    }

    #[test]
    fn test_filled_stars() {
        assert_eq!(filled_stars(4.7), 4);
        assert_eq!(filled_stars(5.0), 5);
        assert_eq!(filled_stars(7.0), 5);
        assert_eq!(filled_stars(-1.0), 0);
        assert_eq!(filled_stars(f64::NAN), 0);
    }
}
