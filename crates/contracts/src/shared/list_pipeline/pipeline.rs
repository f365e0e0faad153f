use serde::{Deserialize, Serialize};

use super::entity::ListEntity;
use super::entity_config::EntityConfig;
use super::query::{NumericRange, QueryState};

/// Видимая страница списка вместе со счетчиками для пагинации
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Количество записей после фильтрации
    pub total_count: usize,
    pub total_pages: usize,
    /// Текущая страница (1-based) после clamp
    pub page: usize,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
            page: 1,
        }
    }
}

/// Значение фильтра и количество записей с ним
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Универсальный конвейер списка: поиск -> фильтры -> сортировка -> страница,
/// плюс операции изменения коллекции (см. `mutation.rs`).
///
/// Коллекцию не хранит: все операции получают её от вызывающей стороны
/// и пересчитываются по требованию.
pub struct ListPipeline<T> {
    pub(super) config: EntityConfig<T>,
}

impl<T: ListEntity> ListPipeline<T> {
    pub fn new(config: EntityConfig<T>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EntityConfig<T> {
        &self.config
    }

    /// Состояние запроса по умолчанию для этой сущности
    pub fn default_query(&self, page_size: usize) -> QueryState {
        QueryState::new(self.config.natural_sort, page_size)
    }

    /// Проверяет запись против всех активных условий запроса
    pub fn matches(&self, item: &T, query: &QueryState) -> bool {
        self.matches_with(item, query, query.search_needle().as_deref())
    }

    fn matches_with(&self, item: &T, query: &QueryState, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let found = self
                .config
                .search
                .iter()
                .any(|field| (field.value)(item).to_lowercase().contains(needle));
            if !found {
                return false;
            }
        }

        for facet in &self.config.facets {
            if let Some(selected) = query.selected(facet.name) {
                if !selected.contains((facet.value)(item)) {
                    return false;
                }
            }
        }

        if let (Some(field), Some(range)) = (&self.config.range, query.range) {
            if !range.contains((field.value)(item)) {
                return false;
            }
        }

        true
    }

    /// Фильтрация без изменения порядка коллекции
    pub fn filter<'a>(&self, items: &'a [T], query: &QueryState) -> Vec<&'a T> {
        let needle = query.search_needle();
        items
            .iter()
            .filter(|item| self.matches_with(item, query, needle.as_deref()))
            .collect()
    }

    /// Стабильная сортировка копии выборки. Неизвестный ключ сохраняет порядок.
    pub fn sort<'a>(&self, filtered: &[&'a T], sort_key: &str) -> Vec<&'a T> {
        let mut sorted = filtered.to_vec();
        if let Some(spec) = self.config.find_sort(sort_key) {
            sorted.sort_by(|a, b| (spec.compare)(a, b));
        }
        sorted
    }

    /// filter -> sort -> clamp страницы -> paginate
    pub fn visible_items(&self, items: &[T], query: &mut QueryState) -> ListPage<T> {
        let filtered = self.filter(items, query);
        let sorted = self.sort(&filtered, &query.sort_key);
        query.clamp_page(sorted.len());

        let page_items = paginate(&sorted, query.page, query.page_size);
        ListPage {
            items: page_items.into_iter().cloned().collect(),
            total_count: sorted.len(),
            total_pages: query.total_pages(sorted.len()),
            page: query.page,
        }
    }

    /// Минимум и максимум числового поля по всей коллекции
    pub fn range_bounds(&self, items: &[T]) -> Option<NumericRange> {
        let field = self.config.range.as_ref()?;
        items
            .iter()
            .map(|item| (field.value)(item))
            .fold(None, |acc: Option<NumericRange>, v| match acc {
                None => Some(NumericRange { min: v, max: v }),
                Some(r) => Some(NumericRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Значения фильтра с количеством записей, в порядке первого появления
    pub fn facet_counts(&self, items: &[T], facet: &str) -> Vec<FacetCount> {
        let Some(facet) = self.config.find_facet(facet) else {
            return Vec::new();
        };

        let mut counts: Vec<FacetCount> = Vec::new();
        for item in items {
            let value = (facet.value)(item);
            match counts.iter_mut().find(|c| c.value == value) {
                Some(entry) => entry.count += 1,
                None => counts.push(FacetCount {
                    value: value.to_string(),
                    count: 1,
                }),
            }
        }
        counts
    }

    pub fn find<'a>(&self, items: &'a [T], id: &T::Id) -> Option<&'a T> {
        items.iter().find(|item| item.id() == id)
    }
}

/// Срез `[(page-1)*page_size, page*page_size)` в пределах выборки.
/// Страница за пределами (или 0) дает пустой результат, а не ошибку.
pub fn paginate<U: Clone>(sorted: &[U], page: usize, page_size: usize) -> Vec<U> {
    if page == 0 || page_size == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= sorted.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(sorted.len());
    sorted[start..end].to_vec()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::list_pipeline::entity::next_numeric_id;
    use crate::shared::list_pipeline::entity_config::compare_text;
    use chrono::{DateTime, Utc};
    use std::convert::Infallible;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Item {
        pub id: i64,
        pub name: String,
        pub group: String,
        pub value: f64,
    }

    pub(crate) struct ItemDraft {
        pub name: String,
        pub group: String,
        pub value: f64,
    }

    impl ListEntity for Item {
        type Id = i64;
        type Draft = ItemDraft;
        type Flag = Infallible;

        fn id(&self) -> &i64 {
            &self.id
        }

        fn next_id(existing: &[Self]) -> i64 {
            next_numeric_id(existing, |i| i.id)
        }

        fn from_draft(id: i64, draft: ItemDraft, _created_at: DateTime<Utc>) -> Self {
            Self {
                id,
                name: draft.name.trim().to_string(),
                group: draft.group.trim().to_string(),
                value: draft.value,
            }
        }

        fn apply_draft(&mut self, draft: ItemDraft) {
            self.name = draft.name.trim().to_string();
            self.group = draft.group.trim().to_string();
            self.value = draft.value;
        }

        fn toggle_flag(&mut self, flag: Infallible) {
            match flag {}
        }

        fn element_name() -> &'static str {
            "Элемент"
        }
    }

    pub(crate) fn item(id: i64, name: &str, group: &str, value: f64) -> Item {
        Item {
            id,
            name: name.to_string(),
            group: group.to_string(),
            value,
        }
    }

    pub(crate) fn pipeline() -> ListPipeline<Item> {
        ListPipeline::new(
            EntityConfig::new("natural")
                .with_search("name", |i: &Item| i.name.as_str())
                .with_search("group", |i: &Item| i.group.as_str())
                .with_facet("group", "Группа", |i: &Item| i.group.as_str())
                .with_range("value", |i: &Item| i.value)
                .with_sort("name-asc", "По имени", |a: &Item, b: &Item| {
                    compare_text(&a.name, &b.name)
                })
                .with_sort("value-asc", "По значению", |a: &Item, b: &Item| {
                    a.value.total_cmp(&b.value)
                })
                .with_required("name", "Имя не может быть пустым", |i: &Item| {
                    i.name.as_str()
                })
                .with_required("group", "Группа не может быть пустой", |i: &Item| {
                    i.group.as_str()
                }),
        )
    }

    pub(crate) fn sample() -> Vec<Item> {
        vec![
            item(1, "Alpha", "red", 10.0),
            item(2, "beta", "blue", 20.0),
            item(3, "Gamma", "red", 30.0),
            item(4, "delta", "green", 20.0),
            item(5, "Epsilon", "blue", 50.0),
            item(6, "zeta red", "green", 60.0),
        ]
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_query_passes_everything_in_order() {
        let items = sample();
        let query = QueryState::default();
        assert_eq!(ids(&pipeline().filter(&items, &query)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let items = sample();
        let mut query = QueryState::default();
        query.set_search("  RED ");
        // "red" in group for 1 and 3, in name for 6
        assert_eq!(ids(&pipeline().filter(&items, &query)), vec![1, 3, 6]);
    }

    #[test]
    fn test_facet_and_range_combine() {
        let items = sample();
        let mut query = QueryState::default();
        query.set_facet("group", ["blue", "green"]);
        query.range = Some(NumericRange::new(20.0, 50.0));
        assert_eq!(ids(&pipeline().filter(&items, &query)), vec![2, 4, 5]);
    }

    #[test]
    fn test_filter_correctness_over_query_grid() {
        let p = pipeline();
        let items = sample();
        let terms = ["", "a", "ta", "RED", "zzz"];
        let groups: [&[&str]; 3] = [&[], &["red"], &["blue", "green"]];
        let ranges = [None, Some(NumericRange::new(15.0, 55.0))];

        for term in terms {
            for group in groups {
                for range in ranges {
                    let mut query = QueryState::default();
                    query.set_search(term);
                    query.set_facet("group", group.iter().copied());
                    query.range = range;

                    let result = p.filter(&items, &query);
                    for item in &items {
                        let needle = term.trim().to_lowercase();
                        let text_ok = needle.is_empty()
                            || item.name.to_lowercase().contains(&needle)
                            || item.group.to_lowercase().contains(&needle);
                        let group_ok = group.is_empty() || group.contains(&item.group.as_str());
                        let range_ok = range.map(|r| r.contains(item.value)).unwrap_or(true);
                        let expected = text_ok && group_ok && range_ok;
                        assert_eq!(
                            result.iter().any(|i| i.id == item.id),
                            expected,
                            "item {} term {:?} group {:?} range {:?}",
                            item.id,
                            term,
                            group,
                            range
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_stable_and_does_not_mutate_input() {
        let items = sample();
        let p = pipeline();
        let filtered = p.filter(&items, &QueryState::default());

        let sorted = p.sort(&filtered, "value-asc");
        // 2 and 4 share value 20.0 and keep their relative order
        assert_eq!(ids(&sorted), vec![1, 2, 4, 3, 5, 6]);
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5, 6]);

        let by_name = p.sort(&filtered, "name-asc");
        assert_eq!(ids(&by_name), vec![1, 2, 4, 5, 3, 6]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let items = sample();
        let p = pipeline();
        let filtered = p.filter(&items, &QueryState::default());
        assert_eq!(ids(&p.sort(&filtered, "natural")), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_paginate_bounds() {
        let data: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&data, 1, 10), (0..10).collect::<Vec<_>>());
        assert_eq!(paginate(&data, 3, 10), (20..25).collect::<Vec<_>>());
        assert!(paginate(&data, 4, 10).is_empty());
        assert!(paginate(&data, 0, 10).is_empty());
        assert!(paginate(&data, usize::MAX, 10).is_empty());

        for page in 1..6 {
            for size in 1..12 {
                assert!(paginate(&data, page, size).len() <= size);
            }
        }
    }

    #[test]
    fn test_visible_items_clamps_page() {
        let items = sample();
        let p = pipeline();
        let mut query = QueryState::new("name-asc", 4);
        query.set_page(2);

        let page = p.visible_items(&items, &mut query);
        assert_eq!(page.total_count, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 6]);

        // filter shrinks the result to a single page
        query.set_facet("group", ["red"]);
        query.set_page(2);
        let page = p.visible_items(&items, &mut query);
        assert_eq!(query.page, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_range_bounds_and_facet_counts() {
        let items = sample();
        let p = pipeline();
        assert_eq!(p.range_bounds(&items), Some(NumericRange::new(10.0, 60.0)));
        assert_eq!(p.range_bounds(&[]), None);

        let counts = p.facet_counts(&items, "group");
        assert_eq!(
            counts,
            vec![
                FacetCount { value: "red".into(), count: 2 },
                FacetCount { value: "blue".into(), count: 2 },
                FacetCount { value: "green".into(), count: 2 },
            ]
        );
        assert!(p.facet_counts(&items, "missing").is_empty());
    }
}
