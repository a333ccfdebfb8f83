use chrono::{NaiveDate, Weekday};

use crate::grid::date_math::{add_days, add_months, start_of_month, start_of_week};

/// Months materialized behind and ahead of the window center. Scrolling stays
/// cheap because only this bounded range of grids ever exists at once.
pub const WINDOW_PAST: i32 = 60;
pub const WINDOW_FUTURE: i32 = 60;

/// When focus drifts within this many months of either edge, the window is
/// rebuilt around the focus so the user can keep paging indefinitely.
pub const EDGE_REBUILD_THRESHOLD: usize = 6;

/// Bounded sliding set of month anchors around a focus month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthWindow {
    months: Vec<NaiveDate>,
}

impl MonthWindow {
    pub fn build(center: NaiveDate) -> Self {
        let center = start_of_month(center);
        let months = (-WINDOW_PAST..=WINDOW_FUTURE)
            .map(|offset| add_months(center, offset))
            .collect();
        Self { months }
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Position of `month`'s anchor inside the window, if materialized.
    pub fn index_of(&self, month: NaiveDate) -> Option<usize> {
        let anchor = start_of_month(month);
        self.months.iter().position(|m| *m == anchor)
    }

    fn near_edge(&self, index: usize) -> bool {
        index <= EDGE_REBUILD_THRESHOLD
            || index + EDGE_REBUILD_THRESHOLD >= self.months.len().saturating_sub(1)
    }

    /// Moves focus to `target`'s month and returns its index. The existing
    /// window is reused whenever the target sits safely inside it, so rendered
    /// state survives ordinary paging; a target outside the window or close to
    /// an edge recenters the window on it.
    pub fn focus(&mut self, target: NaiveDate) -> usize {
        let anchor = start_of_month(target);

        if let Some(index) = self.index_of(anchor) {
            if !self.near_edge(index) {
                return index;
            }
        }

        *self = Self::build(anchor);
        WINDOW_PAST as usize
    }
}

/// Index of the anchor week inside a [`week_window`].
pub const WEEK_WINDOW_CENTER: usize = 2;

/// Small sliding set of week anchors around `anchor`, two weeks either side.
/// Week paging rebuilds this on every anchor change; unlike [`MonthWindow`]
/// there is no reuse logic because five pages are cheap to recompute.
pub fn week_window(anchor: NaiveDate, week_start: Weekday) -> [NaiveDate; 5] {
    let base = start_of_week(anchor, week_start);
    [-2i64, -1, 0, 1, 2].map(|i| add_days(base, i * 7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    use crate::grid::date_math::add_months;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn window_spans_past_and_future() {
        let window = MonthWindow::build(date(2026, 1, 15));

        assert_eq!(window.len(), (WINDOW_PAST + WINDOW_FUTURE + 1) as usize);
        assert_eq!(window.months()[0], date(2021, 1, 1));
        assert_eq!(window.months()[WINDOW_PAST as usize], date(2026, 1, 1));
        assert_eq!(window.months()[window.len() - 1], date(2031, 1, 1));
    }

    #[test]
    fn anchors_are_sequential_months() {
        let window = MonthWindow::build(date(2026, 1, 1));
        for pair in window.months().windows(2) {
            assert_eq!(pair[1], add_months(pair[0], 1));
        }
    }

    #[test]
    fn index_of_normalizes_to_month_anchor() {
        let window = MonthWindow::build(date(2026, 1, 1));
        assert_eq!(window.index_of(date(2026, 3, 17)), Some((WINDOW_PAST + 2) as usize));
    }

    #[test]
    fn focus_inside_window_reuses_it() {
        let mut window = MonthWindow::build(date(2026, 1, 1));
        let before = window.clone();

        let index = window.focus(date(2027, 6, 10));

        assert_eq!(window, before);
        assert_eq!(window.months()[index], date(2027, 6, 1));
    }

    #[test]
    fn focus_outside_window_rebuilds_around_target() {
        let mut window = MonthWindow::build(date(2026, 1, 1));

        let index = window.focus(date(2040, 3, 5));

        assert_eq!(window.months()[index], date(2040, 3, 1));
        assert_eq!(index, WINDOW_PAST as usize);
    }

    #[test]
    fn focus_near_edge_recenters() {
        let mut window = MonthWindow::build(date(2026, 1, 1));
        // Within EDGE_REBUILD_THRESHOLD of the future edge.
        let near_edge = add_months(date(2026, 1, 1), WINDOW_FUTURE - 2);

        let index = window.focus(near_edge);

        assert_eq!(window.months()[index], near_edge);
        assert_eq!(index, WINDOW_PAST as usize);
    }

    #[test]
    fn focus_just_inside_threshold_does_not_rebuild() {
        let mut window = MonthWindow::build(date(2026, 1, 1));
        let before = window.clone();
        let safe = add_months(date(2026, 1, 1), WINDOW_FUTURE - (EDGE_REBUILD_THRESHOLD as i32 + 1));

        window.focus(safe);

        assert_eq!(window, before);
    }

    #[test]
    fn week_window_centers_on_anchor_week() {
        // 2026-01-15 is a Thursday; its Sunday-based week starts 2026-01-11.
        let pages = week_window(date(2026, 1, 15), Weekday::Sun);

        assert_eq!(pages[WEEK_WINDOW_CENTER], date(2026, 1, 11));
        assert_eq!(pages[0], date(2025, 12, 28));
        assert_eq!(pages[4], date(2026, 1, 25));
    }

    #[test]
    fn week_window_pages_are_consecutive_weeks() {
        let pages = week_window(date(2026, 1, 15), Weekday::Mon);
        for pair in pages.windows(2) {
            assert_eq!(pair[1], add_days(pair[0], 7));
        }
        assert_eq!(pages[WEEK_WINDOW_CENTER].weekday(), Weekday::Mon);
    }
}
