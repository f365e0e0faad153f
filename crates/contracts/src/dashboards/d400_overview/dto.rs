use serde::{Deserialize, Serialize};

/// Сводные показатели на главном дашборде
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_products: u64,
    pub total_orders: u64,
    /// Выручка в VND
    pub total_revenue: i64,
    pub today_orders: u64,
    pub week_orders: u64,
    pub month_orders: u64,
}

/// Статус заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Ожидает обработки",
            Self::Processing => "В обработке",
            Self::Completed => "Выполнен",
            Self::Cancelled => "Отменен",
        }
    }

    /// CSS-класс бейджа статуса
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "badge badge--warning",
            Self::Processing => "badge badge--info",
            Self::Completed => "badge badge--success",
            Self::Cancelled => "badge badge--danger",
        }
    }
}

/// Последний заказ (таблица на дашборде)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    /// Номер заказа, например "#ORD-001"
    pub id: String,
    pub customer: String,
    pub product: String,
    pub amount: i64,
    pub status: OrderStatus,
    /// Дата в формате "YYYY-MM-DD"
    pub date: String,
}

/// Товар-лидер продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub id: String,
    pub name: String,
    pub sales: u32,
    pub revenue: i64,
    pub image: Option<String>,
}

/// Выручка и число заказов за период (месяц)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Подпись периода (например, "Jan")
    pub date: String,
    pub revenue: i64,
    pub orders: u32,
}

/// Точка ряда для графика: подпись и значение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Полный ответ для дашборда
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_orders: Vec<RecentOrder>,
    pub top_products: Vec<TopProduct>,
    pub revenue: Vec<RevenuePoint>,
}

/// Ряд выручки для графика в исходном порядке периодов
pub fn revenue_series(points: &[RevenuePoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint {
            label: p.date.clone(),
            value: p.revenue as f64,
        })
        .collect()
}

/// Максимальное значение ряда (0 для пустого ряда) - для масштаба оси Y
pub fn series_max(series: &[ChartPoint]) -> f64 {
    series.iter().map(|p| p.value).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_series_keeps_order() {
        let points = vec![
            RevenuePoint { date: "Jan".into(), revenue: 45_000_000, orders: 120 },
            RevenuePoint { date: "Feb".into(), revenue: 52_000_000, orders: 100 },
            RevenuePoint { date: "Mar".into(), revenue: 48_000_000, orders: 80 },
        ];
        let series = revenue_series(&points);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
        assert_eq!(series_max(&series), 52_000_000.0);
        assert_eq!(series_max(&[]), 0.0);
    }

    #[test]
    fn test_order_status_serde() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        assert_eq!(OrderStatus::Cancelled.label(), "Отменен");
    }
}
