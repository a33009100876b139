//! 検索結果のページ送り
//!
//! 現在ページを中心に最大 `2 * PAGE_RANGE + 1` 個のページ番号を並べる。

use std::ops::{Range, RangeInclusive};

/// 1ページあたりの件数
pub const ITEMS_PER_PAGE: usize = 10;
/// 現在ページの前後に出すページ数
pub const PAGE_RANGE: usize = 3;

pub const PREV_LABEL: &str = "上一页";
pub const NEXT_LABEL: &str = "下一页";

/// ページ操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Previous,
    Next,
    Goto(usize),
}

/// ページ送りボタン1個
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub action: PageAction,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

/// ページ送りバー全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub total_pages: usize,
    pub buttons: Vec<PageButton>,
}

impl PaginationView {
    /// 前後ボタンを除いたページ番号ボタン
    pub fn page_buttons(&self) -> impl Iterator<Item = &PageButton> {
        self.buttons
            .iter()
            .filter(|b| matches!(b.action, PageAction::Goto(_)))
    }
}

/// ページ状態
///
/// 件数が1件以上なら `current_page` は常に `1..=total_pages` に収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    items_per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl Pager {
    pub fn new(items_per_page: usize) -> Self {
        Self { current_page: 1, items_per_page: items_per_page.max(1) }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.items_per_page)
    }

    /// 現在ページに表示する範囲（全体配列の添字）
    pub fn slice_range(&self, count: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * self.items_per_page).min(count);
        let end = (start + self.items_per_page).min(count);
        start..end
    }

    /// 表示するページ番号の範囲
    pub fn window(&self, count: usize) -> RangeInclusive<usize> {
        let total = self.total_pages(count).max(1);
        let span = PAGE_RANGE * 2;
        let mut start = self.current_page.saturating_sub(PAGE_RANGE).max(1);
        let end = (start + span).min(total);
        if end - start < span {
            start = end.saturating_sub(span).max(1);
        }
        start..=end
    }

    /// ページ送りバー。1ページ以下なら None
    pub fn view(&self, count: usize) -> Option<PaginationView> {
        let total_pages = self.total_pages(count);
        if total_pages <= 1 {
            return None;
        }

        let mut buttons = Vec::with_capacity(PAGE_RANGE * 2 + 3);
        buttons.push(PageButton {
            action: PageAction::Previous,
            label: PREV_LABEL.to_string(),
            active: false,
            disabled: self.current_page == 1,
        });
        for page in self.window(count) {
            buttons.push(PageButton {
                action: PageAction::Goto(page),
                label: page.to_string(),
                active: page == self.current_page,
                disabled: false,
            });
        }
        buttons.push(PageButton {
            action: PageAction::Next,
            label: NEXT_LABEL.to_string(),
            active: false,
            disabled: self.current_page == total_pages,
        });

        Some(PaginationView { total_pages, buttons })
    }

    /// ページ操作を適用。変化しなければ false
    ///
    /// 現在ページ・無効ボタン・範囲外の番号は何もしない。
    pub fn apply(&mut self, action: PageAction, count: usize) -> bool {
        let total = self.total_pages(count);
        let target = match action {
            PageAction::Previous if self.current_page > 1 => self.current_page - 1,
            PageAction::Next if self.current_page < total => self.current_page + 1,
            PageAction::Goto(page) if (1..=total).contains(&page) => page,
            _ => return false,
        };
        if target == self.current_page {
            return false;
        }
        self.current_page = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager_at(page: usize) -> Pager {
        let mut pager = Pager::default();
        pager.current_page = page;
        pager
    }

    #[test]
    fn test_total_pages() {
        let pager = Pager::default();
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(10), 1);
        assert_eq!(pager.total_pages(11), 2);
    }

    #[test]
    fn test_single_page_has_no_view() {
        assert!(Pager::default().view(0).is_none());
        assert!(Pager::default().view(10).is_none());
    }

    #[test]
    fn test_page_button_count_is_min_of_pages_and_seven() {
        for count in [11usize, 25, 40, 70, 71, 200, 999] {
            let total = count.div_ceil(ITEMS_PER_PAGE);
            for page in 1..=total {
                let view = pager_at(page).view(count).expect("複数ページ");
                assert_eq!(view.page_buttons().count(), total.min(7), "count={count} page={page}");
                assert_eq!(view.buttons.first().unwrap().disabled, page == 1);
                assert_eq!(view.buttons.last().unwrap().disabled, page == total);
                let active: Vec<_> = view.page_buttons().filter(|b| b.active).collect();
                assert_eq!(active.len(), 1);
                assert_eq!(active[0].action, PageAction::Goto(page));
            }
        }
    }

    #[test]
    fn test_window_centers_and_clamps() {
        assert_eq!(pager_at(1).window(200), 1..=7);
        assert_eq!(pager_at(10).window(200), 7..=13);
        assert_eq!(pager_at(20).window(200), 14..=20);
        assert_eq!(pager_at(2).window(30), 1..=3);
    }

    #[test]
    fn test_view_is_idempotent() {
        let pager = pager_at(4);
        assert_eq!(pager.view(95), pager.view(95));
    }

    #[test]
    fn test_slice_range() {
        assert_eq!(pager_at(1).slice_range(25), 0..10);
        assert_eq!(pager_at(3).slice_range(25), 20..25);
        assert_eq!(pager_at(1).slice_range(0), 0..0);
    }

    #[test]
    fn test_apply_actions() {
        let mut pager = Pager::default();
        assert!(!pager.apply(PageAction::Previous, 30));
        assert!(pager.apply(PageAction::Next, 30));
        assert_eq!(pager.current_page(), 2);
        assert!(!pager.apply(PageAction::Goto(2), 30));
        assert!(pager.apply(PageAction::Goto(3), 30));
        assert!(!pager.apply(PageAction::Next, 30));
        assert!(!pager.apply(PageAction::Goto(9), 30));
        assert!(pager.apply(PageAction::Previous, 30));
        assert_eq!(pager.current_page(), 2);
    }
}
