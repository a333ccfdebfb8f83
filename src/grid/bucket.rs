use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::Event;
use crate::grid::date_math::start_of_month;

/// Groups events by their month anchor so a month view only receives the
/// events it can actually show.
pub fn bucket_by_month<'a>(events: &'a [Event]) -> HashMap<NaiveDate, Vec<&'a Event>> {
    let mut buckets: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();
    for event in events {
        let key = start_of_month(event.start_date());
        buckets.entry(key).or_default().push(event);
    }
    buckets
}

/// Events starting on `day`, sorted by start time.
pub fn events_on_day<'a>(events: &'a [Event], day: NaiveDate) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events
        .iter()
        .filter(|e| e.start_date() == day)
        .collect();
    matching.sort_by_key(|e| e.start);
    matching
}
