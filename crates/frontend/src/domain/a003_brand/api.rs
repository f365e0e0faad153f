use chrono::NaiveDate;
use contracts::domain::a003_brand::aggregate::{Brand, BrandStatus};
use contracts::shared::config::app_config;
use gloo_timers::future::TimeoutFuture;

/// Загрузка брендов (демо-данные с имитацией задержки)
pub async fn fetch_brands() -> Result<Vec<Brand>, String> {
    TimeoutFuture::new(app_config().simulation.brands_delay_ms).await;
    let brands = seed_brands()?;
    log::debug!("Загружено брендов: {}", brands.len());
    Ok(brands)
}

fn seed_brands() -> Result<Vec<Brand>, String> {
    let rows = [
        ("Apple Inc.", "Premium technology products and innovative solutions", "Technology", BrandStatus::Active, 156, (2022, 1, 1)),
        ("Nike", "Athletic footwear, apparel, and sports equipment", "Sports & Fashion", BrandStatus::Active, 89, (2022, 4, 10)),
        ("Amazon", "Online marketplace and cloud computing services", "E-commerce", BrandStatus::Pending, 2341, (2022, 8, 7)),
        ("Spotify", "Digital music streaming platform and services", "Music & Entertainment", BrandStatus::Active, 82, (2022, 3, 17)),
        ("Meta", "Social networking and virtual reality technologies", "Social Media", BrandStatus::Inactive, 107, (2021, 11, 22)),
        ("Google", "Search engine and cloud computing services", "Technology", BrandStatus::Active, 205, (2021, 12, 19)),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (name, description, category, status, product_count, (y, m, d)))| {
            let created_at = NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| format!("Некорректная дата бренда {}", name))?;
            Ok(Brand {
                id: (i + 1).to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                status,
                product_count,
                created_at,
                image: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_brand::aggregate::brand_pipeline;

    #[test]
    fn test_seed_brands() {
        let brands = seed_brands().unwrap();
        assert_eq!(brands.len(), 6);
        assert_eq!(brands[2].product_count, 2341);
        assert!(brands.iter().all(|b| b.image.is_none()));
    }

    #[test]
    fn test_delete_missing_keeps_six() {
        let mut brands = seed_brands().unwrap();
        let pipeline = brand_pipeline();
        assert!(!pipeline.delete(&mut brands, &"missing".to_string()));
        assert_eq!(brands.len(), 6);
    }
}
