//! Линейный график выручки на чистом SVG.
//!
//! Получает готовый ряд `ChartPoint` и сам считает только геометрию.

use contracts::dashboards::d400_overview::dto::{series_max, ChartPoint};
use leptos::prelude::*;

use crate::shared::number_format::format_millions;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 320.0;
const Y_TICKS: usize = 4;

/// Отступы области построения внутри viewBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            left: 56.0,
            right: 16.0,
            top: 16.0,
            bottom: 32.0,
        }
    }
}

impl ChartLayout {
    fn plot_width(&self) -> f64 {
        self.width - self.left - self.right
    }

    fn plot_height(&self) -> f64 {
        self.height - self.top - self.bottom
    }

    /// Y-координата нулевой линии
    pub fn baseline(&self) -> f64 {
        self.height - self.bottom
    }
}

/// Координаты точек ряда; при нулевом максимуме все точки на нулевой линии
pub fn plot_points(series: &[ChartPoint], layout: &ChartLayout) -> Vec<(f64, f64)> {
    let max = series_max(series);
    let n = series.len();
    series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if n > 1 {
                layout.left + layout.plot_width() * i as f64 / (n - 1) as f64
            } else {
                layout.left + layout.plot_width() / 2.0
            };
            let ratio = if max > 0.0 { point.value / max } else { 0.0 };
            let y = layout.top + layout.plot_height() * (1.0 - ratio);
            (x, y)
        })
        .collect()
}

pub fn line_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| format!("{}{:.1},{:.1}", if i == 0 { "M" } else { " L" }, x, y))
        .collect()
}

/// Замкнутая область под линией до нулевой линии
pub fn area_path(points: &[(f64, f64)], baseline: f64) -> String {
    match (points.first(), points.last()) {
        (Some((first_x, _)), Some((last_x, _))) => format!(
            "{} L{:.1},{:.1} L{:.1},{:.1} Z",
            line_path(points),
            last_x,
            baseline,
            first_x,
            baseline
        ),
        _ => String::new(),
    }
}

#[component]
pub fn RevenueChart(#[prop(into)] series: Signal<Vec<ChartPoint>>) -> impl IntoView {
    let layout = ChartLayout::default();
    let points = Memo::new(move |_| series.with(|s| plot_points(s, &layout)));

    let y_ticks = move || {
        let max = series.with(|s| series_max(s));
        (0..=Y_TICKS)
            .map(|k| {
                let value = max * k as f64 / Y_TICKS as f64;
                let y = layout.top + layout.plot_height() * (1.0 - k as f64 / Y_TICKS as f64);
                view! {
                    <g>
                        <line
                            x1=layout.left
                            x2=layout.width - layout.right
                            y1=y
                            y2=y
                            class="chart__grid"
                        />
                        <text x=layout.left - 8.0 y=y + 4.0 text-anchor="end" class="chart__tick">
                            {format_millions(value)}
                        </text>
                    </g>
                }
            })
            .collect_view()
    };

    let x_labels = move || {
        let labels: Vec<String> = series.with(|s| s.iter().map(|p| p.label.clone()).collect());
        points
            .get()
            .into_iter()
            .zip(labels)
            .map(|((x, _), label)| {
                view! {
                    <text x=x y=layout.height - 8.0 text-anchor="middle" class="chart__tick">
                        {label}
                    </text>
                }
            })
            .collect_view()
    };

    view! {
        <svg
            class="chart"
            viewBox=format!("0 0 {} {}", layout.width, layout.height)
            preserveAspectRatio="none"
            role="img"
            aria-label="Выручка по месяцам"
        >
            <defs>
                <linearGradient id="revenue-fill" x1="0" y1="0" x2="0" y2="1">
                    <stop offset="0%" stop-color="#3b82f6" stop-opacity="0.4" />
                    <stop offset="100%" stop-color="#3b82f6" stop-opacity="0.05" />
                </linearGradient>
            </defs>
            {y_ticks}
            <path d=move || area_path(&points.get(), layout.baseline()) fill="url(#revenue-fill)" />
            <path
                d=move || line_path(&points.get())
                fill="none"
                stroke="#3b82f6"
                stroke-width="3"
                stroke-linejoin="round"
            />
            {move || points.get().into_iter().map(|(x, y)| view! {
                <circle cx=x cy=y r="4" class="chart__dot" />
            }).collect_view()}
            {x_labels}
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ChartLayout {
        ChartLayout {
            width: 120.0,
            height: 110.0,
            left: 10.0,
            right: 10.0,
            top: 10.0,
            bottom: 0.0,
        }
    }

    fn point(label: &str, value: f64) -> ChartPoint {
        ChartPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn test_plot_points_scale() {
        let series = vec![point("Jan", 50.0), point("Feb", 100.0), point("Mar", 0.0)];
        let points = plot_points(&series, &layout());
        assert_eq!(points, vec![(10.0, 60.0), (60.0, 10.0), (110.0, 110.0)]);
    }

    #[test]
    fn test_plot_points_single_and_zero() {
        let points = plot_points(&[point("Jan", 0.0)], &layout());
        assert_eq!(points, vec![(60.0, 110.0)]);
        assert!(plot_points(&[], &layout()).is_empty());
    }

    #[test]
    fn test_paths() {
        let points = vec![(10.0, 60.0), (110.0, 10.0)];
        assert_eq!(line_path(&points), "M10.0,60.0 L110.0,10.0");
        assert_eq!(
            area_path(&points, 110.0),
            "M10.0,60.0 L110.0,10.0 L110.0,110.0 L10.0,110.0 Z"
        );
        assert_eq!(area_path(&[], 110.0), "");
    }
}
