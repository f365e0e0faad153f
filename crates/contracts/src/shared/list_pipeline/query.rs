use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Размер страницы, если иной не задан конфигурацией
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Замкнутый числовой диапазон, всегда `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Границы упорядочиваются автоматически
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Состояние запроса одного списка: поиск, фильтры, сортировка, страница
///
/// Пустое множество значений фильтра означает "без ограничения".
/// Страницы нумеруются с 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_term: String,
    pub facets: BTreeMap<String, BTreeSet<String>>,
    pub range: Option<NumericRange>,
    pub sort_key: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new("", DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    pub fn new(sort_key: &str, page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            facets: BTreeMap::new(),
            range: None,
            sort_key: sort_key.to_string(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Поисковая строка в нижнем регистре; `None` если поиск не задан
    pub fn search_needle(&self) -> Option<String> {
        let term = self.search_term.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn selected(&self, facet: &str) -> Option<&BTreeSet<String>> {
        self.facets.get(facet).filter(|values| !values.is_empty())
    }

    pub fn is_selected(&self, facet: &str, value: &str) -> bool {
        self.facets
            .get(facet)
            .map(|values| values.contains(value))
            .unwrap_or(false)
    }

    /// Мультивыбор: добавить значение или убрать, если уже выбрано
    pub fn toggle_facet_value(&mut self, facet: &str, value: &str) {
        let values = self.facets.entry(facet.to_string()).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            self.facets.remove(facet);
        }
        self.page = 1;
    }

    /// Одиночный выбор: повторный выбор того же значения снимает фильтр
    pub fn toggle_exclusive_facet(&mut self, facet: &str, value: &str) {
        let already_only = self
            .selected(facet)
            .map(|values| values.len() == 1 && values.contains(value))
            .unwrap_or(false);
        if already_only {
            self.facets.remove(facet);
        } else {
            self.facets
                .insert(facet.to_string(), BTreeSet::from([value.to_string()]));
        }
        self.page = 1;
    }

    /// Заменить выбор целиком (пустой итератор снимает фильтр)
    pub fn set_facet<I, S>(&mut self, facet: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.facets.remove(facet);
        } else {
            self.facets.insert(facet.to_string(), values);
        }
        self.page = 1;
    }

    /// Нижняя граница: не ниже границы данных и не выше текущего максимума
    pub fn set_range_min(&mut self, value: f64, bounds: NumericRange) {
        let current = self.range.unwrap_or(bounds);
        let min = value.max(bounds.min).min(current.max);
        self.range = Some(NumericRange {
            min,
            max: current.max,
        });
        self.page = 1;
    }

    /// Верхняя граница: не выше границы данных и не ниже текущего минимума
    pub fn set_range_max(&mut self, value: f64, bounds: NumericRange) {
        let current = self.range.unwrap_or(bounds);
        let max = value.min(bounds.max).max(current.min);
        self.range = Some(NumericRange {
            min: current.min,
            max,
        });
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: impl Into<String>) {
        self.sort_key = key.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    /// Количество страниц для `count` записей (минимум 1)
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Удержать страницу в `[1, total_pages]` после изменения выборки
    pub fn clamp_page(&mut self, count: usize) {
        let total = self.total_pages(count);
        self.page = self.page.clamp(1, total);
    }

    /// Сброс фильтров к значениям по умолчанию; размер страницы сохраняется
    pub fn clear_filters(&mut self, bounds: Option<NumericRange>, natural_sort: &str) {
        self.search_term.clear();
        self.facets.clear();
        self.range = bounds;
        self.sort_key = natural_sort.to_string();
        self.page = 1;
    }

    pub fn has_active_filters(&self) -> bool {
        self.search_needle().is_some() || self.facets.values().any(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_new_orders_bounds() {
        let range = NumericRange::new(10.0, 2.0);
        assert_eq!(range.min, 2.0);
        assert_eq!(range.max, 10.0);
        assert!(range.contains(2.0));
        assert!(range.contains(10.0));
        assert!(!range.contains(10.5));
    }

    #[test]
    fn test_range_edits_are_clamped() {
        let bounds = NumericRange::new(100.0, 1000.0);
        let mut query = QueryState::new("newest", 10);

        query.set_range_max(400.0, bounds);
        query.set_range_min(900.0, bounds);
        let range = query.range.unwrap();
        assert_eq!(range.min, 400.0);
        assert_eq!(range.max, 400.0);

        query.set_range_min(0.0, bounds);
        query.set_range_max(5000.0, bounds);
        let range = query.range.unwrap();
        assert_eq!(range.min, 100.0);
        assert_eq!(range.max, 1000.0);
    }

    #[test]
    fn test_clamp_page() {
        let mut query = QueryState::new("", 10);
        query.set_page(4);
        query.clamp_page(25);
        assert_eq!(query.page, 3);

        query.clamp_page(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.total_pages(0), 1);
        assert_eq!(query.total_pages(20), 2);
        assert_eq!(query.total_pages(21), 3);
    }

    #[test]
    fn test_toggle_facet_value() {
        let mut query = QueryState::default();
        query.toggle_facet_value("brand", "Apple");
        query.toggle_facet_value("brand", "Sony");
        assert!(query.is_selected("brand", "Apple"));
        assert_eq!(query.selected("brand").map(|s| s.len()), Some(2));

        query.toggle_facet_value("brand", "Apple");
        query.toggle_facet_value("brand", "Sony");
        assert!(query.selected("brand").is_none());
        assert!(!query.facets.contains_key("brand"));
    }

    #[test]
    fn test_toggle_exclusive_facet() {
        let mut query = QueryState::default();
        query.toggle_exclusive_facet("category", "Tablets");
        query.toggle_exclusive_facet("category", "Headphones");
        assert!(query.is_selected("category", "Headphones"));
        assert!(!query.is_selected("category", "Tablets"));

        query.toggle_exclusive_facet("category", "Headphones");
        assert!(query.selected("category").is_none());
    }

    #[test]
    fn test_filter_edits_reset_page() {
        let mut query = QueryState::default();
        query.set_page(3);
        query.set_search("lap");
        assert_eq!(query.page, 1);

        query.set_page(2);
        query.set_page_size(0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_clear_filters() {
        let bounds = NumericRange::new(1.0, 5.0);
        let mut query = QueryState::new("newest", 20);
        query.set_search("air");
        query.set_facet("brand", ["Apple"]);
        query.set_range_min(3.0, bounds);
        query.set_sort("price-asc");
        assert!(query.has_active_filters());

        query.clear_filters(Some(bounds), "newest");
        assert!(!query.has_active_filters());
        assert_eq!(query.range, Some(bounds));
        assert_eq!(query.sort_key, "newest");
        assert_eq!(query.page_size, 20);
    }
}
