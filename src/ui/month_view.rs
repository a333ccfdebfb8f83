use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::Event;
use crate::grid::{events_on_day, month_grid, MonthWindow};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub anchor: NaiveDate,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub has_events: bool,
}

/// Fixed per-month item heights, in pixels. Scroll offsets can be computed
/// from index arithmetic alone because every month renders at the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthMetrics {
    pub title_height: f64,
    pub dow_height: f64,
    pub cell_height: f64,
}

impl MonthMetrics {
    pub fn item_height(&self) -> f64 {
        self.title_height + self.dow_height + 6.0 * self.cell_height
    }
}

/// Builds the six-week cell layout for the month containing `anchor`.
/// Out-of-month cells are kept and flagged, never dropped.
pub fn calculate_layout(
    anchor: NaiveDate,
    week_start: Weekday,
    selected: NaiveDate,
    today: NaiveDate,
    events: &[Event],
) -> MonthLayout {
    let grid = month_grid(anchor, week_start);

    let weeks = grid
        .weeks()
        .map(|row| Week {
            days: row
                .iter()
                .map(|&date| DayCell {
                    date,
                    in_month: date.with_day(1) == Some(grid.anchor),
                    is_selected: date == selected,
                    is_today: date == today,
                    has_events: !events_on_day(events, date).is_empty(),
                })
                .collect(),
        })
        .collect();

    MonthLayout {
        anchor: grid.anchor,
        weeks,
    }
}

/// Scroll offset that centers `day`'s grid row in a viewport of
/// `viewport_height`, clamped so the list never scrolls past its top.
/// Returns `None` when the day's month is outside the window; the caller
/// refocuses the window and tries again.
pub fn scroll_offset_for_day(
    window: &MonthWindow,
    day: NaiveDate,
    week_start: Weekday,
    metrics: MonthMetrics,
    viewport_height: f64,
) -> Option<f64> {
    let index = window.index_of(day)?;
    let row = month_grid(day, week_start).row_of(day).unwrap_or(2);

    let month_top = index as f64 * metrics.item_height();
    let grid_top = metrics.title_height + metrics.dow_height;
    let cell_center = month_top + grid_top + row as f64 * metrics.cell_height
        + metrics.cell_height / 2.0;

    Some((cell_center - viewport_height / 2.0).max(0.0))
}
