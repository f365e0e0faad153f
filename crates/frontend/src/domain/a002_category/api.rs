use chrono::NaiveDate;
use contracts::domain::a002_category::aggregate::{Category, CategoryStatus};
use contracts::shared::config::app_config;
use gloo_timers::future::TimeoutFuture;

/// Загрузка категорий (демо-данные с имитацией задержки)
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    TimeoutFuture::new(app_config().simulation.categories_delay_ms).await;
    let categories = seed_categories()?;
    log::debug!("Загружено категорий: {}", categories.len());
    Ok(categories)
}

fn seed_categories() -> Result<Vec<Category>, String> {
    let created_at =
        NaiveDate::from_ymd_opt(2021, 1, 20).ok_or("Некорректная дата в демо-данных")?;
    let rows = [
        ("Điện thoại", "Các loại smartphone"),
        ("Laptop", "Máy tính xách tay"),
        ("Tablet", "Máy tính bảng"),
        ("Smartwatch", "Máy đeo tay"),
        ("Smart TV", "Tivi thông minh"),
        ("Smart Home", "Thiết bị nhà thông minh"),
        ("Smart Car", "Phương tiện thông minh"),
        ("Smart Watch", "Máy đeo tay thông minh"),
    ];

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(i, (name, description))| Category {
            id: (i + 1).to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: CategoryStatus::Active,
            created_at,
            product_count: 10,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_category::aggregate::category_pipeline;
    use contracts::shared::list_pipeline::QueryState;

    #[test]
    fn test_seed_search_lap() {
        let categories = seed_categories().unwrap();
        assert_eq!(categories.len(), 8);

        let pipeline = category_pipeline();
        let mut query = pipeline.default_query(10);
        query.set_search("lap");
        let names: Vec<&str> = pipeline
            .filter(&categories, &query)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Laptop"]);

        let all = pipeline.filter(&categories, &QueryState::default());
        assert_eq!(all.len(), 8);
    }
}
