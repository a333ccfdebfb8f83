pub mod date_math;
pub mod month_grid;
pub mod bucket;
pub mod window;

pub use date_math::{
    add_days, add_months, is_same_day, is_same_month, minutes_since_start_of_day, snap_minutes,
    start_of_day, start_of_month, start_of_week,
};
pub use month_grid::{month_grid, MonthGrid, GRID_CELLS};
pub use bucket::{bucket_by_month, events_on_day};
pub use window::{
    week_window, MonthWindow, EDGE_REBUILD_THRESHOLD, WEEK_WINDOW_CENTER, WINDOW_FUTURE,
    WINDOW_PAST,
};
