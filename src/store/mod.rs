use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::{Calendar, CalendarShare, Event, ShareRole};

const DEFAULT_CALENDAR_NAME: &str = "My Calendar";
const DEMO_OWNER_EMAIL: &str = "demo@crewcal.local";

/// In-memory calendar state for the local demo mode. Single owner of
/// calendars, events and shares; deleting a calendar cascades to both.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    calendars: Vec<Calendar>,
    events: Vec<Event>,
    shares: Vec<CalendarShare>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated the way the demo app ships: a personal and a
    /// shared calendar with a couple of events on the shared one.
    pub fn with_seed_data() -> Self {
        let mut store = Self::new();

        let personal = store.create_calendar("My Calendar", "#3B82F6");
        let shared = store.create_calendar("Shared", "#22C55E");
        store.ensure_owner_share(&personal, DEMO_OWNER_EMAIL);

        for (day, title) in [(8, "Kickoff"), (14, "Crew sync")] {
            if let Some(start) = NaiveDate::from_ymd_opt(2026, 1, day)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
            {
                store.save_event(Event {
                    id: Uuid::new_v4().to_string(),
                    calendar_id: shared.clone(),
                    title: title.to_string(),
                    start,
                    end: start + chrono::Duration::hours(1),
                    all_day: false,
                    reminder: None,
                    notes: None,
                });
            }
        }

        store
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn shares(&self) -> &[CalendarShare] {
        &self.shares
    }

    /// Creates a calendar and returns its id. A blank name falls back to the
    /// default title.
    pub fn create_calendar(&mut self, name: &str, color: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let name = if name.trim().is_empty() {
            DEFAULT_CALENDAR_NAME
        } else {
            name
        };
        self.calendars.push(Calendar::new(id.clone(), name, color));
        id
    }

    pub fn toggle_calendar(&mut self, id: &str) {
        if let Some(calendar) = self.calendars.iter_mut().find(|c| c.id == id) {
            calendar.visible = !calendar.visible;
        }
    }

    pub fn update_calendar_color(&mut self, id: &str, color: &str) {
        if let Some(calendar) = self.calendars.iter_mut().find(|c| c.id == id) {
            calendar.color = color.to_string();
        }
    }

    /// Removes the calendar along with every event and share that belongs to
    /// it.
    pub fn delete_calendar(&mut self, id: &str) {
        self.calendars.retain(|c| c.id != id);
        self.events.retain(|e| e.calendar_id != id);
        self.shares.retain(|s| s.calendar_id != id);
    }

    /// Inserts the event, or replaces an existing one with the same id.
    /// All-day events are pinned to a full calendar day on the way in.
    pub fn save_event(&mut self, event: Event) {
        let event = event.normalize_all_day();
        if let Some(existing) = self.events.iter_mut().find(|e| e.id == event.id) {
            *existing = event;
        } else {
            self.events.push(event);
        }
    }

    pub fn delete_event(&mut self, id: &str) {
        self.events.retain(|e| e.id != id);
    }

    pub fn add_share(&mut self, calendar_id: &str, email: &str, role: ShareRole) -> String {
        let id = Uuid::new_v4().to_string();
        self.shares.push(CalendarShare {
            id: id.clone(),
            calendar_id: calendar_id.to_string(),
            email: email.to_string(),
            role,
            is_owner: false,
        });
        id
    }

    /// Synthesizes the implicit owner row for a calendar the first time its
    /// share list is opened. Subsequent calls are no-ops.
    pub fn ensure_owner_share(&mut self, calendar_id: &str, email: &str) {
        let has_owner = self
            .shares
            .iter()
            .any(|s| s.calendar_id == calendar_id && s.is_owner);
        if has_owner {
            return;
        }
        self.shares.push(CalendarShare {
            id: Uuid::new_v4().to_string(),
            calendar_id: calendar_id.to_string(),
            email: email.to_string(),
            role: ShareRole::Editor,
            is_owner: true,
        });
    }

    pub fn shares_for(&self, calendar_id: &str) -> Vec<&CalendarShare> {
        self.shares
            .iter()
            .filter(|s| s.calendar_id == calendar_id)
            .collect()
    }

    pub fn visible_calendar_ids(&self) -> HashSet<String> {
        self.calendars
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Events starting on `day` from visible calendars, sorted by start time.
    pub fn events_for_day(&self, day: NaiveDate) -> Vec<&Event> {
        let visible = self.visible_calendar_ids();
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| visible.contains(&e.calendar_id))
            .filter(|e| e.start_date() == day)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn event_on(calendar_id: &str, id: &str, start: NaiveDateTime) -> Event {
        Event {
            id: id.to_string(),
            calendar_id: calendar_id.to_string(),
            title: format!("Event {}", id),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
            reminder: None,
            notes: None,
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_calendar_defaults_blank_name() {
        let mut store = CalendarStore::new();
        let id = store.create_calendar("  ", "#3B82F6");

        let calendar = store.calendars().iter().find(|c| c.id == id).unwrap();
        assert_eq!(calendar.name, "My Calendar");
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut store = CalendarStore::new();
        let id = store.create_calendar("Work", "#3B82F6");

        store.toggle_calendar(&id);
        assert!(!store.calendars()[0].visible);

        store.toggle_calendar(&id);
        assert!(store.calendars()[0].visible);
    }

    #[test]
    fn delete_calendar_cascades_to_events_and_shares() {
        let mut store = CalendarStore::new();
        let c1 = store.create_calendar("Doomed", "#3B82F6");
        let keep = store.create_calendar("Keep", "#22C55E");

        store.save_event(event_on(&c1, "e5", at(8, 9)));
        store.save_event(event_on(&keep, "e6", at(8, 10)));
        store.add_share(&c1, "s9@example.com", ShareRole::Viewer);
        store.add_share(&keep, "other@example.com", ShareRole::Editor);

        store.delete_calendar(&c1);

        assert!(store.calendars().iter().all(|c| c.id != c1));
        assert!(store.event("e5").is_none());
        assert!(store.event("e6").is_some());
        assert!(store.shares().iter().all(|s| s.calendar_id != c1));
        assert_eq!(store.shares().len(), 1);
    }

    #[test]
    fn save_event_replaces_existing_id() {
        let mut store = CalendarStore::new();
        let c1 = store.create_calendar("Work", "#3B82F6");

        store.save_event(event_on(&c1, "e1", at(8, 9)));
        let mut updated = event_on(&c1, "e1", at(8, 9));
        updated.title = "Renamed".to_string();
        store.save_event(updated);

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.event("e1").unwrap().title, "Renamed");
    }

    #[test]
    fn save_event_normalizes_all_day() {
        let mut store = CalendarStore::new();
        let c1 = store.create_calendar("Work", "#3B82F6");

        let mut event = event_on(&c1, "e1", at(8, 9));
        event.all_day = true;
        store.save_event(event);

        let stored = store.event("e1").unwrap();
        assert_eq!(stored.start, at(8, 0));
        assert_eq!(stored.end.time(), chrono::NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn ensure_owner_share_is_idempotent() {
        let mut store = CalendarStore::new();
        let c1 = store.create_calendar("Work", "#3B82F6");

        store.ensure_owner_share(&c1, "me@example.com");
        store.ensure_owner_share(&c1, "me@example.com");

        let owners: Vec<_> = store.shares_for(&c1).into_iter().filter(|s| s.is_owner).collect();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].role, ShareRole::Editor);
    }

    #[test]
    fn events_for_day_skips_hidden_calendars() {
        let mut store = CalendarStore::new();
        let shown = store.create_calendar("Shown", "#3B82F6");
        let hidden = store.create_calendar("Hidden", "#22C55E");

        store.save_event(event_on(&shown, "e1", at(8, 9)));
        store.save_event(event_on(&hidden, "e2", at(8, 10)));
        store.toggle_calendar(&hidden);

        let day = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let events = store.events_for_day(day);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1");
    }

    #[test]
    fn events_for_day_sorted_by_start() {
        let mut store = CalendarStore::new();
        let c1 = store.create_calendar("Work", "#3B82F6");

        store.save_event(event_on(&c1, "late", at(8, 15)));
        store.save_event(event_on(&c1, "early", at(8, 9)));

        let day = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let ids: Vec<_> = store.events_for_day(day).iter().map(|e| e.id.clone()).collect();

        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn seed_data_has_owner_share_and_events() {
        let store = CalendarStore::with_seed_data();

        assert_eq!(store.calendars().len(), 2);
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.shares().iter().filter(|s| s.is_owner).count(), 1);
    }
}
