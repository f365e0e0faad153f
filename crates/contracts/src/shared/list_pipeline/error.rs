use thiserror::Error;

/// Ошибки операций над списком
///
/// Удаление отсутствующей записи ошибкой не считается (no-op),
/// а обновление и переключение флага сообщают `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// Обязательное поле пустое после trim
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Запись с указанным идентификатором отсутствует в коллекции
    #[error("Запись с id '{id}' не найдена")]
    NotFound { id: String },
}

impl ListError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Имя поля для ошибок валидации (для подсветки в форме)
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::NotFound { .. } => None,
        }
    }
}
