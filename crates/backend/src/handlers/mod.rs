pub mod a001_project;
pub mod a002_translation_item;
pub mod a003_glossary_term;

use crate::shared::data::store::StoreError;
use axum::http::StatusCode;

/// Код ответа для ошибки сервиса
pub(crate) fn error_status(e: &anyhow::Error) -> StatusCode {
    match e.downcast_ref::<StoreError>() {
        Some(StoreError::ItemNotFound(_)) => StatusCode::NOT_FOUND,
        Some(StoreError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(StoreError::UnknownStatus { .. }) => StatusCode::CONFLICT,
        Some(StoreError::Closed) | None => {
            tracing::error!("request failed: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_translation_item::aggregate::TranslationItemId;
    use contracts::shared::errors::ValidationError;

    #[test]
    fn test_error_status_mapping() {
        let not_found = anyhow::Error::from(StoreError::ItemNotFound(TranslationItemId(9)));
        assert_eq!(error_status(&not_found), StatusCode::NOT_FOUND);

        let invalid = anyhow::Error::from(StoreError::Validation(ValidationError::EmptyTranslation));
        assert_eq!(error_status(&invalid), StatusCode::BAD_REQUEST);

        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(error_status(&other), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
