use super::filter_engine::FilteredView;
use crate::domain::a002_translation_item::aggregate::TranslationItemId;
use crate::enums::TranslationStatus;

/// Курсор «текущего элемента» поверх отфильтрованной последовательности.
///
/// Меняет только собственное состояние; элементы и фильтр не трогает.
/// После любого `resync` курсор либо указывает на элемент из `view`, либо
/// `view` пуст и курсор равен `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueNavigator {
    view: FilteredView,
    current: Option<TranslationItemId>,
}

impl QueueNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn current(&self) -> Option<TranslationItemId> {
        self.current
    }

    /// Первое применение фильтра: первый непереведённый элемент, иначе первый
    pub fn enter<F>(&mut self, view: FilteredView, status_of: F) -> Option<TranslationItemId>
    where
        F: Fn(TranslationItemId) -> Option<TranslationStatus>,
    {
        self.current = view
            .iter()
            .find(|id| status_of(*id) == Some(TranslationStatus::Untranslated))
            .or_else(|| view.first());
        self.view = view;
        self.current
    }

    /// Подменить последовательность; курсор сохраняется, если элемент остался
    pub fn resync(&mut self, view: FilteredView) -> Option<TranslationItemId> {
        self.current = match self.current {
            Some(id) if view.contains(id) => Some(id),
            _ => view.first(),
        };
        self.view = view;
        self.current
    }

    /// Прямой выбор; id вне текущей последовательности игнорируется
    pub fn select(&mut self, id: TranslationItemId) -> bool {
        if self.view.contains(id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }

    /// Следующий элемент с переходом с последнего на первый
    pub fn next(&mut self) -> Option<TranslationItemId> {
        self.step(true)
    }

    /// Предыдущий элемент с переходом с первого на последний
    pub fn previous(&mut self) -> Option<TranslationItemId> {
        self.step(false)
    }

    fn step(&mut self, forward: bool) -> Option<TranslationItemId> {
        let len = self.view.len();
        if len <= 1 {
            return self.current;
        }
        let target = match self.current.and_then(|id| self.view.position(id)) {
            Some(pos) if forward => (pos + 1) % len,
            Some(pos) => (pos + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.current = self.view.get(target);
        self.current
    }

    /// Позиция курсора для отображения: (номер с единицы, всего)
    pub fn position(&self) -> Option<(usize, usize)> {
        let id = self.current?;
        self.view.position(id).map(|pos| (pos + 1, self.view.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(ids: &[i64]) -> FilteredView {
        ids.iter().copied().map(TranslationItemId).collect()
    }

    fn nav_at(ids: &[i64], at: i64) -> QueueNavigator {
        let mut nav = QueueNavigator::new();
        nav.resync(view(ids));
        assert!(nav.select(TranslationItemId(at)));
        nav
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut nav = nav_at(&[1, 2, 3], 3);
        assert_eq!(nav.next(), Some(TranslationItemId(1)));
    }

    #[test]
    fn test_previous_wraps_from_first_to_last() {
        let mut nav = nav_at(&[1, 2, 3], 1);
        assert_eq!(nav.previous(), Some(TranslationItemId(3)));
        assert_eq!(nav.previous(), Some(TranslationItemId(2)));
    }

    #[test]
    fn test_stepping_is_noop_for_single_or_empty_view() {
        let mut single = nav_at(&[7], 7);
        assert_eq!(single.next(), Some(TranslationItemId(7)));
        assert_eq!(single.previous(), Some(TranslationItemId(7)));

        let mut empty = QueueNavigator::new();
        empty.resync(FilteredView::empty());
        assert_eq!(empty.next(), None);
        assert_eq!(empty.previous(), None);
    }

    #[test]
    fn test_select_outside_view_is_ignored() {
        let mut nav = nav_at(&[1, 2, 3], 2);
        assert!(!nav.select(TranslationItemId(42)));
        assert_eq!(nav.current(), Some(TranslationItemId(2)));
    }

    #[test]
    fn test_resync_keeps_or_resets_cursor() {
        let mut nav = nav_at(&[1, 2, 3], 2);
        assert_eq!(nav.resync(view(&[2, 3])), Some(TranslationItemId(2)));
        assert_eq!(nav.resync(view(&[3, 4])), Some(TranslationItemId(3)));
        assert_eq!(nav.resync(FilteredView::empty()), None);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn test_cursor_invariant_after_resync() {
        let views = [view(&[1, 2]), view(&[]), view(&[5]), view(&[2, 5, 9])];
        let mut nav = QueueNavigator::new();
        for v in views {
            let current = nav.resync(v.clone());
            match current {
                Some(id) => assert!(v.contains(id)),
                None => assert!(v.is_empty()),
            }
        }
    }

    #[test]
    fn test_enter_prefers_first_untranslated() {
        let mut nav = QueueNavigator::new();
        let status = |id: TranslationItemId| {
            Some(if id.value() == 3 {
                TranslationStatus::Untranslated
            } else {
                TranslationStatus::Translated
            })
        };
        assert_eq!(nav.enter(view(&[1, 2, 3]), status), Some(TranslationItemId(3)));

        let all_done = |_: TranslationItemId| Some(TranslationStatus::Translated);
        assert_eq!(nav.enter(view(&[1, 2, 3]), all_done), Some(TranslationItemId(1)));
        assert_eq!(nav.position(), Some((1, 3)));
    }
}
