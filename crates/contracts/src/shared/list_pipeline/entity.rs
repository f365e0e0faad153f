use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use uuid::Uuid;

/// Трейт для записей, которыми управляет [`ListPipeline`](super::ListPipeline)
///
/// Отвечает за идентичность записи, построение из черновика формы и
/// переключение двухзначных флагов. Поиск, фильтры и сортировка
/// описываются отдельно через [`EntityConfig`](super::EntityConfig).
pub trait ListEntity: Clone {
    /// Тип идентификатора (уникален в пределах коллекции)
    type Id: Clone + PartialEq + Display + Debug;

    /// Черновик формы создания/редактирования
    type Draft;

    /// Переключаемые поля; `Infallible` если у сущности их нет
    type Flag: Copy + Debug;

    fn id(&self) -> &Self::Id;

    /// Новый идентификатор, не совпадающий ни с одним из `existing`
    fn next_id(existing: &[Self]) -> Self::Id;

    /// Построить запись из черновика (строки обрезаются)
    fn from_draft(id: Self::Id, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;

    /// Применить черновик к существующей записи.
    /// Идентификатор, дата создания и счетчики сохраняются.
    fn apply_draft(&mut self, draft: Self::Draft);

    fn toggle_flag(&mut self, flag: Self::Flag);

    /// Имя элемента для UI и логов (например, "Товар")
    fn element_name() -> &'static str;
}

/// Следующий числовой id: максимум существующих + 1 (для пустой коллекции 1)
pub fn next_numeric_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().map_or(1, |max| max + 1)
}

/// Случайный строковый id (UUID v4), перегенерируется при совпадении
pub fn new_token_id<T>(items: &[T], id_of: impl Fn(&T) -> &str) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !items.iter().any(|item| id_of(item) == candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_numeric_id() {
        let ids = vec![3_i64, 7, 5];
        assert_eq!(next_numeric_id(&ids, |id| *id), 8);

        let empty: Vec<i64> = Vec::new();
        assert_eq!(next_numeric_id(&empty, |id| *id), 1);
    }

    #[test]
    fn test_new_token_id_is_unique() {
        let existing = vec!["1".to_string(), "2".to_string()];
        let id = new_token_id(&existing, |s| s.as_str());
        assert!(!existing.contains(&id));
        assert_eq!(id.len(), 36);
    }
}
