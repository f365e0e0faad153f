use chrono::{DateTime, Utc};

use super::entity::ListEntity;
use super::error::ListError;
use super::pipeline::ListPipeline;

impl<T: ListEntity> ListPipeline<T> {
    /// Проверка обязательных полей; возвращает первое нарушение
    pub fn validate(&self, item: &T) -> Result<(), ListError> {
        for field in &self.config.required {
            if (field.value)(item).trim().is_empty() {
                return Err(ListError::validation(field.name, field.message));
            }
        }
        Ok(())
    }

    /// Создать запись из черновика и вставить её в начало коллекции
    pub fn create(&self, items: &mut Vec<T>, draft: T::Draft) -> Result<T, ListError> {
        self.create_at(items, draft, Utc::now())
    }

    /// То же, что [`create`](Self::create), с явным временем создания
    pub fn create_at(
        &self,
        items: &mut Vec<T>,
        draft: T::Draft,
        now: DateTime<Utc>,
    ) -> Result<T, ListError> {
        let id = T::next_id(items);
        let record = T::from_draft(id, draft, now);
        self.validate(&record)?;

        items.insert(0, record.clone());
        log::info!("{}: создана запись id={}", T::element_name(), record.id());
        Ok(record)
    }

    /// Обновить запись на месте. При ошибке коллекция не меняется.
    pub fn update(&self, items: &mut [T], id: &T::Id, draft: T::Draft) -> Result<T, ListError> {
        let position = items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| ListError::not_found(id))?;

        let mut merged = items[position].clone();
        merged.apply_draft(draft);
        self.validate(&merged)?;

        items[position] = merged.clone();
        log::info!("{}: обновлена запись id={}", T::element_name(), id);
        Ok(merged)
    }

    /// Удалить запись по id. Отсутствующий id - не ошибка, возвращается `false`.
    pub fn delete(&self, items: &mut Vec<T>, id: &T::Id) -> bool {
        let before = items.len();
        items.retain(|item| item.id() != id);
        let removed = items.len() < before;
        if removed {
            log::info!("{}: удалена запись id={}", T::element_name(), id);
        } else {
            log::debug!("{}: запись id={} для удаления не найдена", T::element_name(), id);
        }
        removed
    }

    /// Переключить двухзначный флаг записи (например, статус)
    pub fn toggle(&self, items: &mut [T], id: &T::Id, flag: T::Flag) -> Result<T, ListError> {
        let item = items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| ListError::not_found(id))?;

        item.toggle_flag(flag);
        log::debug!("{}: переключен флаг {:?} id={}", T::element_name(), flag, id);
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pipeline::pipeline::tests::{pipeline, sample, ItemDraft};

    fn draft(name: &str, group: &str, value: f64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            group: group.to_string(),
            value,
        }
    }

    #[test]
    fn test_create_prepends_with_next_id() {
        let p = pipeline();
        let mut items = sample();

        let created = p.create(&mut items, draft("  Omega ", "red", 5.0)).unwrap();
        assert_eq!(created.id, 7);
        assert_eq!(created.name, "Omega");
        assert_eq!(items.len(), 7);
        assert_eq!(items[0], created);
        assert_eq!(p.find(&items, &7), Some(&created));
    }

    #[test]
    fn test_create_reports_first_violation_without_mutation() {
        let p = pipeline();
        let mut items = sample();

        let err = p.create(&mut items, draft("   ", "", 1.0)).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(err.to_string(), "Имя не может быть пустым");

        let err = p.create(&mut items, draft("Omega", " ", 1.0)).unwrap_err();
        assert_eq!(err.field(), Some("group"));
        assert_eq!(items, sample());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let p = pipeline();
        let mut items = sample();

        let updated = p.update(&mut items, &3, draft("Gamma 2", "blue", 31.0)).unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(items[2], updated);
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn test_update_failures_leave_collection_unchanged() {
        let p = pipeline();
        let mut items = sample();

        let err = p.update(&mut items, &42, draft("X", "red", 1.0)).unwrap_err();
        assert_eq!(err, ListError::not_found(42));

        let err = p.update(&mut items, &1, draft("", "red", 1.0)).unwrap_err();
        assert!(matches!(err, ListError::Validation { field: "name", .. }));
        assert_eq!(items, sample());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let p = pipeline();
        let mut items = sample();

        assert!(p.delete(&mut items, &2));
        assert_eq!(items.len(), 5);
        assert!(!p.delete(&mut items, &2));
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| i.id != 2));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let p = pipeline();
        let mut items = sample();
        assert!(!p.delete(&mut items, &99));
        assert_eq!(items.len(), 6);
    }
}
