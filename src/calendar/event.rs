use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A calendar event. Times are local wall-clock values; the engine does no
/// timezone or DST handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub reminder: Option<Reminder>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub minutes_before: u32,
}

impl Event {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Pins the event to a full calendar day when the all-day flag is set.
    /// Timed events pass through unchanged.
    pub fn normalize_all_day(mut self) -> Self {
        if self.all_day {
            let day = self.start.date();
            self.start = day.and_time(NaiveTime::MIN);
            self.end = day.and_hms_opt(23, 59, 0).unwrap_or(self.start);
        }
        self
    }
}
