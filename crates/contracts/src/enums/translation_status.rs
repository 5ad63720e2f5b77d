use serde::{Deserialize, Serialize};

/// Статус элемента перевода в модели редактора (три состояния)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationStatus {
    Untranslated,
    NeedsReview,
    Translated,
}

impl TranslationStatus {
    /// Получить код статуса (используется в URL и API)
    pub fn code(&self) -> &'static str {
        match self {
            TranslationStatus::Untranslated => "untranslated",
            TranslationStatus::NeedsReview => "needsReview",
            TranslationStatus::Translated => "translated",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            TranslationStatus::Untranslated => "Не переведено",
            TranslationStatus::NeedsReview => "Требует проверки",
            TranslationStatus::Translated => "Переведено",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<TranslationStatus> {
        vec![
            TranslationStatus::Untranslated,
            TranslationStatus::NeedsReview,
            TranslationStatus::Translated,
        ]
    }

    /// Парсинг из строки.
    /// Принимает также старое написание "needs-review".
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "untranslated" => Some(TranslationStatus::Untranslated),
            "needsReview" | "needs-review" => Some(TranslationStatus::NeedsReview),
            "translated" => Some(TranslationStatus::Translated),
            _ => None,
        }
    }

    /// Статус, в котором элемент сохраняется на стороне хранилища
    pub fn to_backend(&self) -> BackendStatus {
        match self {
            TranslationStatus::Untranslated => BackendStatus::Pending,
            TranslationStatus::NeedsReview => BackendStatus::ReviewRequired,
            TranslationStatus::Translated => BackendStatus::Completed,
        }
    }

    /// Отображение пятиуровневого статуса хранилища на модель редактора
    pub fn from_backend(status: BackendStatus) -> Self {
        match status {
            BackendStatus::Pending => TranslationStatus::Untranslated,
            BackendStatus::InProgress | BackendStatus::ReviewRequired => {
                TranslationStatus::NeedsReview
            }
            BackendStatus::Completed | BackendStatus::Approved => TranslationStatus::Translated,
        }
    }

    /// Разбор кода статуса хранилища.
    ///
    /// Неизвестный код не угадывается: возвращается `None`, а вызывающий код
    /// обязан сообщить о нарушении целостности данных.
    pub fn from_backend_code(code: &str) -> Option<Self> {
        BackendStatus::from_code(code).map(Self::from_backend)
    }
}

impl std::fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Статус элемента в хранилище (пять состояний)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackendStatus {
    Pending,
    InProgress,
    ReviewRequired,
    Completed,
    Approved,
}

impl BackendStatus {
    pub fn code(&self) -> &'static str {
        match self {
            BackendStatus::Pending => "pending",
            BackendStatus::InProgress => "inProgress",
            BackendStatus::ReviewRequired => "reviewRequired",
            BackendStatus::Completed => "completed",
            BackendStatus::Approved => "approved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(BackendStatus::Pending),
            "inProgress" => Some(BackendStatus::InProgress),
            "reviewRequired" => Some(BackendStatus::ReviewRequired),
            "completed" => Some(BackendStatus::Completed),
            "approved" => Some(BackendStatus::Approved),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_mapping_table() {
        let cases = [
            ("pending", TranslationStatus::Untranslated),
            ("inProgress", TranslationStatus::NeedsReview),
            ("reviewRequired", TranslationStatus::NeedsReview),
            ("completed", TranslationStatus::Translated),
            ("approved", TranslationStatus::Translated),
        ];
        for (code, expected) in cases {
            assert_eq!(TranslationStatus::from_backend_code(code), Some(expected), "{code}");
        }
        assert_eq!(TranslationStatus::from_backend_code("archived"), None);
    }

    #[test]
    fn test_editor_status_survives_backend_round_trip() {
        for status in TranslationStatus::all() {
            assert_eq!(TranslationStatus::from_backend(status.to_backend()), status);
        }
    }

    #[test]
    fn test_from_code_accepts_legacy_spelling() {
        assert_eq!(
            TranslationStatus::from_code("needs-review"),
            Some(TranslationStatus::NeedsReview)
        );
        assert_eq!(TranslationStatus::from_code("all"), None);
    }
}
