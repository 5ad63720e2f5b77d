use super::filter_engine::FilteredView;
use crate::domain::a002_translation_item::aggregate::TranslationItemId;
use serde::{Deserialize, Serialize};

/// Размер страницы списка переводов
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Страница отфильтрованной последовательности (нумерация с единицы)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Нарезать последовательность на страницы.
/// Номер страницы вне диапазона прижимается к границе, размер страницы не меньше 1.
pub fn paginate(view: &FilteredView, page: usize, page_size: usize) -> Page<TranslationItemId> {
    let page_size = page_size.max(1);
    let total = view.len();
    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let items = view
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// Страница, на которой находится элемент
pub fn page_of(view: &FilteredView, id: TranslationItemId, page_size: usize) -> Option<usize> {
    view.position(id).map(|pos| pos / page_size.max(1) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: i64) -> FilteredView {
        (1..=n).map(TranslationItemId).collect()
    }

    #[test]
    fn test_pages() {
        let page = paginate(&view(25), 3, 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0], TranslationItemId(21));
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        assert_eq!(paginate(&view(25), 9, 10).page, 3);
        assert_eq!(paginate(&view(25), 0, 10).page, 1);
        let empty = paginate(&FilteredView::empty(), 4, 10);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_page_of_item() {
        assert_eq!(page_of(&view(25), TranslationItemId(11), 10), Some(2));
        assert_eq!(page_of(&view(25), TranslationItemId(99), 10), None);
    }
}
