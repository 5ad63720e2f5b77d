use crate::domain::a001_project::aggregate::{ProjectId, Taxonomy};
use crate::domain::common::AggregateId;
use crate::enums::{BackendStatus, TranslationStatus};
use crate::shared::errors::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationItemId(pub i64);

impl TranslationItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for TranslationItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(TranslationItemId)
            .map_err(|e| format!("Invalid item id: {}", e))
    }
}

impl std::fmt::Display for TranslationItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Слабая ссылка на переводчика (учётная запись может уже не существовать)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslatorRef(pub Uuid);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Элемент перевода: одна переводимая строка с позицией в таксономии
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    pub id: TranslationItemId,
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    #[serde(rename = "mainCategoryId")]
    pub main_category_id: String,
    #[serde(rename = "subCategoryId")]
    pub sub_category_id: String,
    pub status: TranslationStatus,
    #[serde(rename = "sourceText")]
    pub source_text: String,
    #[serde(rename = "targetText", default)]
    pub target_text: String,
    #[serde(default)]
    pub context: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "translatorRef", default)]
    pub translator_ref: Option<TranslatorRef>,
}

impl TranslationItem {
    /// Проверка целостности элемента относительно таксономии проекта
    pub fn validate(&self, taxonomy: &Taxonomy) -> Result<(), ValidationError> {
        if &self.project_id != taxonomy.project_id() {
            return Err(ValidationError::ProjectMismatch {
                item_id: self.id.value(),
                expected: taxonomy.project_id().as_string(),
                actual: self.project_id.as_string(),
            });
        }
        if taxonomy
            .resolve(&self.main_category_id, &self.sub_category_id)
            .is_err()
        {
            return Err(ValidationError::UnresolvedItemCategory {
                item_id: self.id.value(),
                main_category: self.main_category_id.clone(),
                sub_category: self.sub_category_id.clone(),
            });
        }
        if self.target_text.is_empty() && self.status != TranslationStatus::Untranslated {
            return Err(ValidationError::EmptyTargetOutsideUntranslated(self.id.value()));
        }
        Ok(())
    }

    /// Сохранение перевода.
    ///
    /// Непустой текст всегда переводит элемент в `NeedsReview`, независимо от
    /// прежнего статуса (любая правка сбрасывает проверку). Пустой текст
    /// отклоняется, элемент не изменяется.
    pub fn apply_translation(
        &mut self,
        target_text: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if target_text.trim().is_empty() {
            return Err(ValidationError::EmptyTranslation);
        }
        self.target_text = target_text.to_string();
        self.status = TranslationStatus::NeedsReview;
        self.updated_at = now;
        Ok(())
    }

    /// Регистронезависимый поиск подстроки в исходном или переведённом тексте.
    /// `needle_lower` должен быть уже приведён к нижнему регистру.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.source_text.to_lowercase().contains(needle_lower)
            || self.target_text.to_lowercase().contains(needle_lower)
    }

    pub fn to_dto(&self) -> TranslationItemDto {
        TranslationItemDto {
            id: self.id,
            project_id: self.project_id.clone(),
            main_category_id: self.main_category_id.clone(),
            sub_category_id: self.sub_category_id.clone(),
            status: self.status.to_backend().code().to_string(),
            source_text: self.source_text.clone(),
            target_text: self.target_text.clone(),
            context: self.context.clone(),
            updated_at: self.updated_at,
            translator_ref: self.translator_ref,
        }
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Элемент перевода в формате хранилища (статус в пятиуровневой модели)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItemDto {
    pub id: TranslationItemId,
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    #[serde(rename = "mainCategoryId")]
    pub main_category_id: String,
    #[serde(rename = "subCategoryId")]
    pub sub_category_id: String,
    pub status: String,
    #[serde(rename = "sourceText")]
    pub source_text: String,
    #[serde(rename = "targetText", default)]
    pub target_text: String,
    #[serde(default)]
    pub context: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "translatorRef", default)]
    pub translator_ref: Option<TranslatorRef>,
}

impl TranslationItemDto {
    pub fn backend_status(&self) -> Option<BackendStatus> {
        BackendStatus::from_code(&self.status)
    }

    /// Преобразование в модель редактора.
    /// `None`, если статус хранилища не распознан (нарушение целостности данных).
    pub fn to_item(&self) -> Option<TranslationItem> {
        let status = TranslationStatus::from_backend_code(&self.status)?;
        Some(TranslationItem {
            id: self.id,
            project_id: self.project_id.clone(),
            main_category_id: self.main_category_id.clone(),
            sub_category_id: self.sub_category_id.clone(),
            status,
            source_text: self.source_text.clone(),
            target_text: self.target_text.clone(),
            context: self.context.clone(),
            updated_at: self.updated_at,
            translator_ref: self.translator_ref,
        })
    }
}

/// Запрос на сохранение перевода
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTranslationRequest {
    #[serde(rename = "targetText")]
    pub target_text: String,
}
