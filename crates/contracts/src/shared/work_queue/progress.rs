use super::filter_engine::FilteredView;
use super::store::WorkItemStore;
use crate::domain::a001_project::aggregate::Taxonomy;
use crate::domain::a002_translation_item::aggregate::TranslationItem;
use crate::enums::TranslationStatus;
use serde::{Deserialize, Serialize};

/// Сводка прогресса перевода по реальным статусам элементов
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationProgress {
    pub total: usize,
    pub translated: usize,
    #[serde(rename = "needsReview")]
    pub needs_review: usize,
    pub untranslated: usize,
}

/// Проценты частей методом наибольшего остатка: сумма ровно 100
/// (0 для пустого набора). При равных остатках пункт получает часть,
/// идущая раньше.
fn shares<const N: usize>(parts: [usize; N], total: usize) -> [u32; N] {
    let mut result = [0u32; N];
    if total == 0 {
        return result;
    }
    let mut remainders = [(0usize, 0usize); N];
    let mut assigned = 0usize;
    for (i, part) in parts.iter().enumerate() {
        let scaled = part * 100;
        result[i] = (scaled / total) as u32;
        remainders[i] = (scaled % total, i);
        assigned += scaled / total;
    }
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for (_, i) in remainders.iter().take(100usize.saturating_sub(assigned)) {
        result[*i] += 1;
    }
    result
}

impl TranslationProgress {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TranslationStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut acc, status| {
                acc.total += 1;
                match status {
                    TranslationStatus::Translated => acc.translated += 1,
                    TranslationStatus::NeedsReview => acc.needs_review += 1,
                    TranslationStatus::Untranslated => acc.untranslated += 1,
                }
                acc
            })
    }

    /// Прогресс по элементам отфильтрованной последовательности
    pub fn for_view(store: &WorkItemStore, view: &FilteredView) -> Self {
        Self::from_statuses(view.iter().filter_map(|id| store.status_of(id)))
    }

    /// Доли (переведено, на проверке, не переведено) в процентах
    pub fn percentages(&self) -> [u32; 3] {
        shares([self.translated, self.needs_review, self.untranslated], self.total)
    }

    pub fn translated_percent(&self) -> u32 {
        self.percentages()[0]
    }

    pub fn needs_review_percent(&self) -> u32 {
        self.percentages()[1]
    }

    pub fn untranslated_percent(&self) -> u32 {
        self.percentages()[2]
    }
}

/// Прогресс по основной категории
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    #[serde(rename = "mainCategoryId")]
    pub main_category_id: String,
    pub name: String,
    pub progress: TranslationProgress,
}

/// Прогресс по всем основным категориям в порядке таксономии
pub fn progress_by_category(taxonomy: &Taxonomy, items: &[TranslationItem]) -> Vec<CategoryProgress> {
    taxonomy
        .categories()
        .iter()
        .map(|category| CategoryProgress {
            main_category_id: category.id.clone(),
            name: category.name.clone(),
            progress: TranslationProgress::from_statuses(
                items
                    .iter()
                    .filter(|item| item.main_category_id == category.id)
                    .map(|item| item.status),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TranslationStatus::*;

    #[test]
    fn test_counts_and_percentages() {
        let progress = TranslationProgress::from_statuses(vec![
            Translated,
            Translated,
            NeedsReview,
            Untranslated,
            Untranslated,
            Untranslated,
        ]);
        assert_eq!(progress.total, 6);
        assert_eq!(progress.translated, 2);
        assert_eq!(progress.needs_review, 1);
        assert_eq!(progress.untranslated, 3);
        assert_eq!(progress.translated_percent(), 33);
        assert_eq!(progress.needs_review_percent(), 17);
        assert_eq!(progress.untranslated_percent(), 50);
    }

    #[test]
    fn test_percentages_never_exceed_hundred() {
        let mut statuses = vec![Translated; 5];
        statuses.extend([NeedsReview; 3]);
        let progress = TranslationProgress::from_statuses(statuses);
        assert_eq!(progress.percentages(), [63, 37, 0]);

        let thirds = TranslationProgress::from_statuses(vec![Translated, NeedsReview, Untranslated]);
        assert_eq!(thirds.percentages(), [34, 33, 33]);

        for total in 1..=40usize {
            for translated in 0..=total {
                for needs_review in 0..=(total - translated) {
                    let p = TranslationProgress {
                        total,
                        translated,
                        needs_review,
                        untranslated: total - translated - needs_review,
                    };
                    assert_eq!(p.percentages().iter().sum::<u32>(), 100, "{p:?}");
                }
            }
        }
    }

    #[test]
    fn test_empty_progress_is_zero() {
        let progress = TranslationProgress::from_statuses(Vec::new());
        assert_eq!(progress.translated_percent(), 0);
        assert_eq!(progress.untranslated_percent(), 0);
    }
}
