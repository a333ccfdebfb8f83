pub mod month_view;
pub mod week_view;

pub use month_view::{DayCell, MonthLayout, MonthMetrics, Week};
pub use week_view::{DayColumn, EventBlock, WeekLayout};
