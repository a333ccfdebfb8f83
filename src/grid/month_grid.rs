use chrono::{NaiveDate, Weekday};

use crate::grid::date_math::{add_days, start_of_month, start_of_week};

/// A month grid is always six full weeks, so views render a stable height.
pub const GRID_CELLS: usize = 42;

/// 42 consecutive days covering the anchor month plus the out-of-month cells
/// needed to fill six week rows. Out-of-month days are kept; views decide how
/// to render them.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub anchor: NaiveDate,
    pub days: Vec<NaiveDate>,
}

pub fn month_grid(anchor: NaiveDate, week_start: Weekday) -> MonthGrid {
    let first = start_of_month(anchor);
    let grid_start = start_of_week(first, week_start);

    let days = (0..GRID_CELLS as i64)
        .map(|i| add_days(grid_start, i))
        .collect();

    MonthGrid { anchor: first, days }
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }

    /// Zero-based week row containing `day`, if the day falls in this grid.
    pub fn row_of(&self, day: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| *d == day).map(|i| i / 7)
    }
}
