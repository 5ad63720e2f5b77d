use thiserror::Error;

/// Ошибки валидации входных данных ядра очереди переводов.
///
/// Появление такой ошибки после санитизации параметров означает ошибку
/// вызывающего кода: операция прерывается, ошибка не проглатывается.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Неизвестная основная категория: {0}")]
    UnknownMainCategory(String),

    #[error("Подкатегория '{sub_category}' не входит в категорию '{main_category}'")]
    SubCategoryOutsideMain {
        main_category: String,
        sub_category: String,
    },

    #[error("Неизвестная подкатегория: {0}")]
    UnknownSubCategory(String),

    #[error("Основная категория '{0}' объявлена повторно")]
    DuplicateMainCategory(String),

    #[error("Подкатегория '{sub_category}' повторяется в категории '{main_category}'")]
    DuplicateSubCategory {
        main_category: String,
        sub_category: String,
    },

    #[error("Элемент {item_id}: категория '{main_category}/{sub_category}' не найдена в таксономии")]
    UnresolvedItemCategory {
        item_id: i64,
        main_category: String,
        sub_category: String,
    },

    #[error("Элемент {item_id} принадлежит проекту '{actual}', ожидался '{expected}'")]
    ProjectMismatch {
        item_id: i64,
        expected: String,
        actual: String,
    },

    #[error("Элемент {0} повторяется в наборе")]
    DuplicateItem(i64),

    #[error("Пустой перевод нельзя сохранить")]
    EmptyTranslation,

    #[error("Элемент {0}: пустой перевод допустим только в статусе 'untranslated'")]
    EmptyTargetOutsideUntranslated(i64),

    #[error("Элемент {0} не найден")]
    UnknownItem(i64),
}

/// Ошибки порта хранения (загрузка/сохранение во внешнем хранилище).
///
/// Восстанавливаются локально: оптимистичное изменение откатывается,
/// пользователю показывается сообщение с возможностью повтора.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Ошибка сети: {0}")]
    Transport(String),

    #[error("Некорректный ответ сервера: {0}")]
    Decode(String),

    #[error("Сервер отклонил изменение: {0}")]
    Rejected(String),
}

impl PersistenceError {
    /// Можно ли повторить запрос без изменения данных
    pub fn is_retryable(&self) -> bool {
        match self {
            PersistenceError::Http { status } => *status >= 500,
            PersistenceError::Transport(_) => true,
            PersistenceError::Decode(_) | PersistenceError::Rejected(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(PersistenceError::Http { status: 503 }.is_retryable());
        assert!(!PersistenceError::Http { status: 400 }.is_retryable());
        assert!(PersistenceError::Transport("offline".into()).is_retryable());
        assert!(!PersistenceError::Rejected("empty".into()).is_retryable());
    }
}
