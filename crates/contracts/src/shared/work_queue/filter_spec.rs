use crate::domain::a001_project::aggregate::Taxonomy;
use crate::enums::TranslationStatus;
use crate::shared::errors::ValidationError;

/// Спецификация фильтра очереди переводов.
///
/// Неизменяемое значение: поля меняются только через `with_*`, которые
/// поддерживают каскадную инвалидацию. Смена основной категории (на другую
/// или на пустую) всегда сбрасывает подкатегорию, так что фильтр подкатегории
/// не может молча применяться к чужой категории.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    main_category_id: Option<String>,
    sub_category_id: Option<String>,
    status: Option<TranslationStatus>,
    search_text: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FilterSpec {
    /// Пустой фильтр (без ограничений)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_category_id(&self) -> Option<&str> {
        self.main_category_id.as_deref()
    }

    pub fn sub_category_id(&self) -> Option<&str> {
        self.sub_category_id.as_deref()
    }

    pub fn status(&self) -> Option<TranslationStatus> {
        self.status
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_category_filters(&self) -> bool {
        self.main_category_id.is_some() || self.sub_category_id.is_some()
    }

    /// Установить основную категорию; при смене значения подкатегория сбрасывается
    pub fn with_main_category(&self, main_category_id: Option<&str>) -> Self {
        let main_category_id = normalize(main_category_id);
        let sub_category_id = if main_category_id == self.main_category_id {
            self.sub_category_id.clone()
        } else {
            None
        };
        Self {
            main_category_id,
            sub_category_id,
            ..self.clone()
        }
    }

    /// Установить подкатегорию.
    ///
    /// При выбранной основной категории подкатегория обязана входить в её
    /// список; без основной категории должна существовать хотя бы в одной.
    pub fn with_sub_category(
        &self,
        sub_category_id: Option<&str>,
        taxonomy: &Taxonomy,
    ) -> Result<Self, ValidationError> {
        let sub_category_id = normalize(sub_category_id);
        if let Some(sub) = sub_category_id.as_deref() {
            match self.main_category_id.as_deref() {
                Some(main) => {
                    taxonomy.resolve(main, sub)?;
                }
                None => {
                    if !taxonomy.contains_sub_anywhere(sub) {
                        return Err(ValidationError::UnknownSubCategory(sub.to_string()));
                    }
                }
            }
        }
        Ok(Self {
            sub_category_id,
            ..self.clone()
        })
    }

    pub fn with_status(&self, status: Option<TranslationStatus>) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Установить строку поиска (обрезается; пустая строка снимает ограничение)
    pub fn with_search(&self, search_text: Option<&str>) -> Self {
        Self {
            search_text: normalize(search_text),
            ..self.clone()
        }
    }

    /// Снять фильтры категорий, сохранив статус и поиск
    pub fn without_category_filters(&self) -> Self {
        self.with_main_category(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_project::aggregate::{MainCategory, ProjectId};

    fn taxonomy() -> Taxonomy {
        Taxonomy::new(
            ProjectId::new("spt"),
            vec![
                MainCategory::new("base", "SPT", vec!["UI".into(), "Items".into()]),
                MainCategory::new("plugins", "Plugins", vec!["Waypoints".into()]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_changing_main_category_clears_sub_category() {
        let tax = taxonomy();
        let spec = FilterSpec::new()
            .with_main_category(Some("base"))
            .with_sub_category(Some("UI"), &tax)
            .unwrap();

        let same = spec.with_main_category(Some("base"));
        assert_eq!(same.sub_category_id(), Some("UI"));

        let other = spec.with_main_category(Some("plugins"));
        assert_eq!(other.main_category_id(), Some("plugins"));
        assert_eq!(other.sub_category_id(), None);

        let cleared = spec.with_main_category(Some("  "));
        assert_eq!(cleared.main_category_id(), None);
        assert_eq!(cleared.sub_category_id(), None);
    }

    #[test]
    fn test_sub_category_must_belong_to_main() {
        let tax = taxonomy();
        let spec = FilterSpec::new().with_main_category(Some("plugins"));
        assert!(matches!(
            spec.with_sub_category(Some("UI"), &tax),
            Err(ValidationError::SubCategoryOutsideMain { .. })
        ));
    }

    #[test]
    fn test_sub_category_without_main_must_exist() {
        let tax = taxonomy();
        assert!(FilterSpec::new().with_sub_category(Some("Waypoints"), &tax).is_ok());
        assert_eq!(
            FilterSpec::new().with_sub_category(Some("Quests"), &tax),
            Err(ValidationError::UnknownSubCategory("Quests".into()))
        );
    }

    #[test]
    fn test_search_is_trimmed_and_empty_means_unconstrained() {
        let spec = FilterSpec::new().with_search(Some("  settings "));
        assert_eq!(spec.search_text(), Some("settings"));
        assert!(spec.with_search(Some("   ")).is_unconstrained());
    }
}
