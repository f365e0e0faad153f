use contracts::dashboards::d400_overview::dto::{
    DashboardData, DashboardStats, OrderStatus, RecentOrder, RevenuePoint, TopProduct,
};
use contracts::shared::config::app_config;
use gloo_timers::future::TimeoutFuture;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// Данные главного дашборда (демо-данные с имитацией задержки)
pub async fn get_dashboard() -> Result<DashboardData, String> {
    TimeoutFuture::new(app_config().simulation.dashboard_delay_ms).await;
    Ok(demo_dashboard())
}

fn demo_dashboard() -> DashboardData {
    use OrderStatus::*;

    let orders = [
        ("A", "Iphone 15 Pro Max", 15_000_000, Completed),
        ("B", "Samsung Galaxy S23 Ultra", 12_000_000, Processing),
        ("C", "Xiaomi 13 Pro", 10_000_000, Pending),
        ("D", "Oppo Find X6 Pro", 13_000_000, Cancelled),
        ("E", "Realme 11 Pro+", 11_000_000, Completed),
        ("F", "Vivo X90 Pro+", 14_000_000, Processing),
        ("G", "OnePlus 12", 16_000_000, Pending),
        ("H", "Google Pixel 8 Pro", 17_000_000, Cancelled),
        ("I", "Nokia 1100", 18_000_000, Completed),
        ("J", "Lenovo ThinkPad X1 Carbon", 19_000_000, Processing),
    ];
    let recent_orders = orders
        .into_iter()
        .enumerate()
        .map(|(i, (letter, product, amount, status))| RecentOrder {
            id: format!("#ORD-{:03}", i + 1),
            customer: format!("Nguyen Van {}", letter),
            product: product.to_string(),
            amount,
            status,
            date: format!("2025-01-{:02}", i + 1),
        })
        .collect();

    let top = [
        ("Iphone 15 Pro Max", 120, 15_000_000),
        ("Samsung Galaxy S24 Ultra", 100, 12_000_000),
        ("Xiaomi 13 Pro", 80, 10_000_000),
        ("Oppo Find X6 Pro", 70, 13_000_000),
        ("Realme 11 Pro+", 60, 11_000_000),
    ];
    let top_products = top
        .into_iter()
        .enumerate()
        .map(|(i, (name, sales, revenue))| TopProduct {
            id: (i + 1).to_string(),
            name: name.to_string(),
            sales,
            revenue,
            image: Some(PLACEHOLDER_IMAGE.to_string()),
        })
        .collect();

    let months = [
        ("Jan", 45_000_000, 120),
        ("Feb", 52_000_000, 100),
        ("Mar", 48_000_000, 80),
        ("Apr", 61_000_000, 70),
        ("May", 58_000_000, 60),
        ("Jun", 67_000_000, 50),
        ("Jul", 72_000_000, 65),
        ("Aug", 68_000_000, 55),
        ("Sep", 75_000_000, 70),
        ("Oct", 81_000_000, 75),
        ("Nov", 79_000_000, 72),
        ("Dec", 88_000_000, 80),
    ];
    let revenue = months
        .into_iter()
        .map(|(date, revenue, orders)| RevenuePoint {
            date: date.to_string(),
            revenue,
            orders,
        })
        .collect();

    DashboardData {
        stats: DashboardStats {
            total_users: 1248,
            total_products: 345,
            total_orders: 1567,
            total_revenue: 1_234_567_890,
            today_orders: 123,
            week_orders: 678,
            month_orders: 345,
        },
        recent_orders,
        top_products,
        revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dashboard() {
        let data = demo_dashboard();
        assert_eq!(data.recent_orders.len(), 10);
        assert_eq!(data.recent_orders[0].id, "#ORD-001");
        assert_eq!(data.recent_orders[9].date, "2025-01-10");
        assert_eq!(data.top_products.len(), 5);
        assert_eq!(data.revenue.len(), 12);
        assert_eq!(data.revenue[11].revenue, 88_000_000);
    }
}
