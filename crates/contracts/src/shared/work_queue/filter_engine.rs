use super::filter_spec::FilterSpec;
use crate::domain::a001_project::aggregate::Taxonomy;
use crate::domain::a002_translation_item::aggregate::{TranslationItem, TranslationItemId};
use crate::shared::errors::ValidationError;

/// Упорядоченная последовательность id элементов, прошедших фильтр
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    ids: Vec<TranslationItemId>,
}

impl FilteredView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[TranslationItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: TranslationItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: TranslationItemId) -> Option<usize> {
        self.ids.iter().position(|x| *x == id)
    }

    pub fn first(&self) -> Option<TranslationItemId> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<TranslationItemId> {
        self.ids.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<TranslationItemId> {
        self.ids.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TranslationItemId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<TranslationItemId> for FilteredView {
    fn from_iter<T: IntoIterator<Item = TranslationItemId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Проверить, что категории фильтра существуют в таксономии
fn validate_spec(taxonomy: &Taxonomy, spec: &FilterSpec) -> Result<(), ValidationError> {
    match (spec.main_category_id(), spec.sub_category_id()) {
        (Some(main), Some(sub)) => {
            taxonomy.resolve(main, sub)?;
        }
        (Some(main), None) => {
            if !taxonomy.contains_main(main) {
                return Err(ValidationError::UnknownMainCategory(main.to_string()));
            }
        }
        (None, Some(sub)) => {
            if !taxonomy.contains_sub_anywhere(sub) {
                return Err(ValidationError::UnknownSubCategory(sub.to_string()));
            }
        }
        (None, None) => {}
    }
    Ok(())
}

fn matches(item: &TranslationItem, spec: &FilterSpec, needle_lower: Option<&str>) -> bool {
    if let Some(main) = spec.main_category_id() {
        if item.main_category_id != main {
            return false;
        }
    }
    if let Some(sub) = spec.sub_category_id() {
        if item.sub_category_id != sub {
            return false;
        }
    }
    if let Some(status) = spec.status() {
        if item.status != status {
            return false;
        }
    }
    match needle_lower {
        Some(needle) => item.matches_search(needle),
        None => true,
    }
}

/// Применить фильтр к набору элементов.
///
/// Условия объединяются по И. Результат отсортирован по id, равные id
/// сохраняют исходный порядок, поэтому повторный вызов с теми же входными
/// данными всегда даёт ту же последовательность.
pub fn apply<'a, I>(
    items: I,
    taxonomy: &Taxonomy,
    spec: &FilterSpec,
) -> Result<FilteredView, ValidationError>
where
    I: IntoIterator<Item = &'a TranslationItem>,
{
    validate_spec(taxonomy, spec)?;

    let needle = spec.search_text().map(str::to_lowercase);
    let mut ids: Vec<TranslationItemId> = items
        .into_iter()
        .filter(|item| matches(item, spec, needle.as_deref()))
        .map(|item| item.id)
        .collect();
    // sort_by_key стабилен: при равных id сохраняется порядок вставки
    ids.sort_by_key(|id| id.value());

    Ok(FilteredView { ids })
}
