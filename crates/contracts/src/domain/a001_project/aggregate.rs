use crate::domain::common::AggregateId;
use crate::shared::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for ProjectId {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty project id".to_string());
        }
        Ok(ProjectId(trimmed.to_string()))
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

/// Основная категория проекта со списком подкатегорий
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "subCategories")]
    pub sub_categories: Vec<String>,
}

impl MainCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sub_categories: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sub_categories,
        }
    }

    pub fn contains_sub(&self, sub_category: &str) -> bool {
        self.sub_categories.iter().any(|s| s == sub_category)
    }
}

/// Дерево категорий проекта: проект → основные категории → подкатегории.
///
/// Инварианты (проверяются в `Taxonomy::new`):
/// - `id` основной категории уникален в пределах проекта;
/// - имя подкатегории уникально в пределах своей основной категории.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    #[serde(rename = "projectId")]
    project_id: ProjectId,
    categories: Vec<MainCategory>,
}

impl Taxonomy {
    pub fn new(project_id: ProjectId, categories: Vec<MainCategory>) -> Result<Self, ValidationError> {
        let mut seen_main = HashSet::new();
        for category in &categories {
            if !seen_main.insert(category.id.as_str()) {
                return Err(ValidationError::DuplicateMainCategory(category.id.clone()));
            }
            let mut seen_sub = HashSet::new();
            for sub in &category.sub_categories {
                if !seen_sub.insert(sub.as_str()) {
                    return Err(ValidationError::DuplicateSubCategory {
                        main_category: category.id.clone(),
                        sub_category: sub.clone(),
                    });
                }
            }
        }
        Ok(Self {
            project_id,
            categories,
        })
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn categories(&self) -> &[MainCategory] {
        &self.categories
    }

    pub fn find_main(&self, main_category_id: &str) -> Option<&MainCategory> {
        self.categories.iter().find(|c| c.id == main_category_id)
    }

    pub fn contains_main(&self, main_category_id: &str) -> bool {
        self.find_main(main_category_id).is_some()
    }

    /// Подкатегория существует хотя бы в одной основной категории
    pub fn contains_sub_anywhere(&self, sub_category: &str) -> bool {
        self.categories.iter().any(|c| c.contains_sub(sub_category))
    }

    /// Объединение имён подкатегорий всех основных категорий
    /// (порядок первого появления, без повторов)
    pub fn all_sub_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.sub_categories.iter())
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect()
    }

    /// Проверка пары (основная категория, подкатегория)
    pub fn resolve(&self, main_category_id: &str, sub_category: &str) -> Result<&MainCategory, ValidationError> {
        let main = self
            .find_main(main_category_id)
            .ok_or_else(|| ValidationError::UnknownMainCategory(main_category_id.to_string()))?;
        if !main.contains_sub(sub_category) {
            return Err(ValidationError::SubCategoryOutsideMain {
                main_category: main_category_id.to_string(),
                sub_category: sub_category.to_string(),
            });
        }
        Ok(main)
    }
}

#[derive(Deserialize)]
struct TaxonomyRaw {
    #[serde(rename = "projectId")]
    project_id: ProjectId,
    categories: Vec<MainCategory>,
}

// Десериализация проходит через те же проверки, что и конструктор
impl<'de> Deserialize<'de> for Taxonomy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = TaxonomyRaw::deserialize(deserializer)?;
        Taxonomy::new(raw.project_id, raw.categories).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Проект перевода
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub taxonomy: Taxonomy,
}

/// Краткая информация о проекте для списка
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    #[serde(rename = "categoryCount")]
    pub category_count: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            category_count: p.taxonomy.categories().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Taxonomy {
        Taxonomy::new(
            ProjectId::new("spt"),
            vec![
                MainCategory::new("base", "SPT", subs(&["UI", "Items"])),
                MainCategory::new("plugins", "Plugins", subs(&["Waypoints", "UI"])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_duplicate_main_category() {
        let result = Taxonomy::new(
            ProjectId::new("p"),
            vec![
                MainCategory::new("base", "A", vec![]),
                MainCategory::new("base", "B", vec![]),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DuplicateMainCategory("base".into())
        );
    }

    #[test]
    fn test_rejects_duplicate_sub_category_within_main() {
        let result = Taxonomy::new(
            ProjectId::new("p"),
            vec![MainCategory::new("base", "A", subs(&["UI", "UI"]))],
        );
        assert!(matches!(
            result,
            Err(ValidationError::DuplicateSubCategory { .. })
        ));
    }

    #[test]
    fn test_same_sub_category_name_allowed_across_mains() {
        let taxonomy = sample();
        assert_eq!(taxonomy.all_sub_categories(), subs(&["UI", "Items", "Waypoints"]));
    }

    #[test]
    fn test_resolve() {
        let taxonomy = sample();
        assert!(taxonomy.resolve("base", "Items").is_ok());
        assert!(matches!(
            taxonomy.resolve("plugins", "Items"),
            Err(ValidationError::SubCategoryOutsideMain { .. })
        ));
        assert!(matches!(
            taxonomy.resolve("quests", "UI"),
            Err(ValidationError::UnknownMainCategory(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"projectId":"p","categories":[
            {"id":"a","name":"A","subCategories":[]},
            {"id":"a","name":"B","subCategories":[]}]}"#;
        assert!(serde_json::from_str::<Taxonomy>(json).is_err());
    }
}
