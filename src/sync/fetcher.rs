use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::api::client::{ApiError, CalendarApi};
use crate::api::types::EventItem;
use crate::calendar::Event;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
}

/// Monotonic request-generation counter. Each fetch is tagged at issue time;
/// only the response matching the latest issued generation may update visible
/// state, so a slow older response can never overwrite a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchSequencer {
    issued: u64,
    applied: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn try_commit(&mut self, generation: u64) -> bool {
        if generation == self.issued && generation > self.applied {
            self.applied = generation;
            true
        } else {
            false
        }
    }

    pub fn latest(&self) -> u64 {
        self.issued
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FetchOutcome {
    /// Response was current; visible events were replaced.
    Applied(usize),
    /// A newer fetch was issued meanwhile; this response was dropped.
    Stale,
}

/// Keeps the visible event set in step with the server. Refetched whenever
/// the visible date range or the selected calendar set changes.
pub struct EventFetcher<C: CalendarApi> {
    client: C,
    sequencer: FetchSequencer,
    events: Vec<Event>,
    past_days: u32,
    future_days: u32,
}

impl<C: CalendarApi> EventFetcher<C> {
    pub fn new(client: C, past_days: u32, future_days: u32) -> Self {
        Self {
            client,
            sequencer: FetchSequencer::new(),
            events: Vec::new(),
            past_days,
            future_days,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Tags the next fetch. Exposed separately from [`apply`] so the commit
    /// decision stays checkable without a network in the middle.
    ///
    /// [`apply`]: EventFetcher::apply
    pub fn begin_fetch(&mut self) -> u64 {
        self.sequencer.issue()
    }

    /// Commits a completed fetch, unless a newer one was issued meanwhile.
    pub fn apply(&mut self, generation: u64, items: Vec<EventItem>) -> FetchOutcome {
        if !self.sequencer.try_commit(generation) {
            tracing::debug!("Dropping stale fetch response (generation {})", generation);
            return FetchOutcome::Stale;
        }
        self.events = items.into_iter().map(EventItem::into_event).collect();
        FetchOutcome::Applied(self.events.len())
    }

    pub async fn refetch(
        &mut self,
        calendar_ids: &[i64],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FetchOutcome, SyncError> {
        if calendar_ids.is_empty() {
            let generation = self.begin_fetch();
            return Ok(self.apply(generation, Vec::new()));
        }

        let generation = self.begin_fetch();
        let items = self
            .client
            .list_events(calendar_ids, day_floor(from), day_ceil(to))
            .await?;
        Ok(self.apply(generation, items))
    }

    /// Fetches the configured window of days around `center`.
    pub async fn refetch_around(
        &mut self,
        calendar_ids: &[i64],
        center: NaiveDate,
    ) -> Result<FetchOutcome, SyncError> {
        let from = center
            .checked_sub_days(Days::new(self.past_days as u64))
            .unwrap_or(center);
        let to = center
            .checked_add_days(Days::new(self.future_days as u64))
            .unwrap_or(center);
        self.refetch(calendar_ids, from, to).await
    }
}

fn day_floor(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}

fn day_ceil(d: NaiveDate) -> DateTime<Utc> {
    d.and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| d.and_time(NaiveTime::MIN))
        .and_utc()
}
