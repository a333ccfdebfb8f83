pub mod types;
pub mod client;

pub use client::{ApiError, CalendarApi, CrewCalClient};
pub use types::{
    CalendarSummary, CreatedId, EventItem, EventPatch, InviteInfo, Me, NewEvent, TokenResponse,
};
