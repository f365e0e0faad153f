use chrono::{Duration, Utc};
use contracts::domain::a001_product::aggregate::Product;
use contracts::shared::config::app_config;
use gloo_timers::future::TimeoutFuture;

const IMAGE_BASE: &str = "https://images.unsplash.com";

/// Загрузка каталога товаров (демо-данные с имитацией задержки)
pub async fn fetch_products() -> Result<Vec<Product>, String> {
    TimeoutFuture::new(app_config().simulation.products_delay_ms).await;
    let products = seed_products();
    log::debug!("Загружено товаров: {}", products.len());
    Ok(products)
}

fn image(photo: &str) -> String {
    format!("{}/{}?w=900&q=80&auto=format&fit=crop", IMAGE_BASE, photo)
}

fn seed_products() -> Vec<Product> {
    let now = Utc::now();
    let rows = [
        (1, "iPhone 15", 21_990_000, "photo-1592750475338-74b7b21085c9", 4.7, 412, "Smartphone cao cấp, chip A17.", "Smartphones", "Apple", 1),
        (2, "Galaxy S24", 18_990_000, "photo-1511707171634-5f897ff02aa9", 4.5, 356, "Màn hình Dynamic AMOLED, camera AI.", "Smartphones", "Samsung", 2),
        (3, "iPad Air", 14_990_000, "photo-1585790050230-5dd28404ccb9", 4.6, 210, "Máy tính bảng mỏng nhẹ.", "Tablets", "Apple", 4),
        (4, "Surface Pro 9", 32_990_000, "photo-1517336714731-489689fd1ca8", 4.3, 98, "2-trong-1, hiệu năng mạnh.", "Tablets", "Microsoft", 6),
        (5, "AirPods Pro", 5_990_000, "photo-1518441982124-5f3872edc213", 4.8, 870, "Chống ồn chủ động.", "Headphones", "Apple", 3),
        (6, "Sony WH-1000XM5", 7_990_000, "photo-1512058564366-18510be2db19", 4.9, 540, "Huyền thoại chống ồn.", "Headphones", "Sony", 5),
    ];

    rows.into_iter()
        .map(
            |(id, name, price, photo, rating, review_count, description, category, brand, days_ago)| Product {
                id,
                name: name.to_string(),
                price,
                image_url: image(photo),
                rating,
                review_count,
                description: description.to_string(),
                category: category.to_string(),
                brand: brand.to_string(),
                created_at: now - Duration::days(days_ago),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::{product_pipeline, SORT_NEWEST, SORT_PRICE_ASC};

    #[test]
    fn test_seed_products() {
        let products = seed_products();
        assert_eq!(products.len(), 6);
        assert!(products.iter().all(|p| p.image_url.starts_with(IMAGE_BASE)));
    }

    #[test]
    fn test_seed_sorting() {
        let products = seed_products();
        let pipeline = product_pipeline();
        let all: Vec<&Product> = products.iter().collect();

        let newest: Vec<i64> = pipeline.sort(&all, SORT_NEWEST).iter().map(|p| p.id).collect();
        assert_eq!(newest, vec![1, 2, 5, 3, 6, 4]);

        let cheapest: Vec<i64> = pipeline.sort(&all, SORT_PRICE_ASC).iter().map(|p| p.id).collect();
        assert_eq!(cheapest, vec![5, 6, 3, 2, 1, 4]);
    }
}
