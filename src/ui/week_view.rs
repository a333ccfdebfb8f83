use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::calendar::Event;
use crate::grid::{add_days, minutes_since_start_of_day, snap_minutes, start_of_week};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub events: Vec<EventBlock>,
}

/// An event placed on the time grid: vertical position comes straight from
/// minutes-since-midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: String,
    pub calendar_id: String,
    pub title: String,
    pub start_minutes: u32,
    pub duration_minutes: i64,
    pub all_day: bool,
}

/// Lays out the week containing `anchor`: seven columns from the week
/// boundary, events filtered to visible calendars and sorted by start.
pub fn calculate_layout(
    anchor: NaiveDate,
    week_start: Weekday,
    selected: NaiveDate,
    today: NaiveDate,
    events: &[Event],
    visible_calendars: &HashSet<String>,
) -> WeekLayout {
    let start = start_of_week(anchor, week_start);

    let days = (0..7)
        .map(|offset| {
            let date = add_days(start, offset);
            let mut blocks: Vec<EventBlock> = events
                .iter()
                .filter(|e| visible_calendars.contains(&e.calendar_id))
                .filter(|e| e.start_date() == date)
                .map(|e| EventBlock {
                    event_id: e.id.clone(),
                    calendar_id: e.calendar_id.clone(),
                    title: e.title.clone(),
                    start_minutes: minutes_since_start_of_day(e.start),
                    duration_minutes: e.duration_minutes(),
                    all_day: e.all_day,
                })
                .collect();
            blocks.sort_by_key(|b| b.start_minutes);

            DayColumn {
                date,
                is_selected: date == selected,
                is_today: date == today,
                events: blocks,
            }
        })
        .collect();

    WeekLayout {
        week_start: start,
        days,
    }
}

/// Maps a pressed pixel offset in a day column to a snapped clock time on
/// that day, for creating an event by tap.
pub fn time_at_offset(day: NaiveDate, y: f64, px_per_hour: f64, step: u32) -> NaiveDateTime {
    let px_per_minute = px_per_hour / 60.0;
    let minutes = snap_minutes(y / px_per_minute, step);
    let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN);
    day.and_time(time)
}
