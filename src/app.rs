use chrono::{Local, NaiveDate, Weekday};

use crate::calendar::Event;
use crate::grid::{add_months, start_of_month, week_window, MonthWindow};
use crate::store::CalendarStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewType {
    Month,
    Week,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Offline,
    Error(String),
}

/// Client-side application state: the selected day, the focused month with
/// its materialized window, and the demo store. All mutation happens on the
/// UI thread in response to interaction or a completed fetch.
pub struct AppState {
    pub view: ViewType,
    pub selected_date: NaiveDate,
    pub focus_month: NaiveDate,
    pub window: MonthWindow,
    pub store: CalendarStore,
    pub sync_status: SyncStatus,
    pub week_start: Weekday,
}

impl AppState {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            view: ViewType::Month,
            selected_date: today,
            focus_month: start_of_month(today),
            window: MonthWindow::build(today),
            store: CalendarStore::new(),
            sync_status: SyncStatus::Synced,
            week_start: Weekday::Sun,
        }
    }

    pub fn with_store(mut self, store: CalendarStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_date = day;
        self.focus(day);
    }

    /// Moves the focused month to the one containing `target` and returns its
    /// window index. The window only rebuilds near its edges.
    pub fn focus(&mut self, target: NaiveDate) -> usize {
        self.focus_month = start_of_month(target);
        self.window.focus(target)
    }

    pub fn go_today(&mut self) {
        self.select_day(Local::now().date_naive());
    }

    pub fn next_month(&mut self) -> usize {
        let target = add_months(self.focus_month, 1);
        self.focus(target)
    }

    pub fn prev_month(&mut self) -> usize {
        let target = add_months(self.focus_month, -1);
        self.focus(target)
    }

    pub fn events_for_selected_day(&self) -> Vec<&Event> {
        self.store.events_for_day(self.selected_date)
    }

    /// Week anchors surrounding the selected day for week-view paging.
    pub fn week_pages(&self) -> [NaiveDate; 5] {
        week_window(self.selected_date, self.week_start)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
