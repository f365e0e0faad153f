pub mod dashboard;
pub mod revenue_chart;
