use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{Event, Reminder, ShareRole};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub email: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarSummary {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub role: ShareRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCalendarRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChange {
    pub role: ShareRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct InviteRequest {
    pub email: String,
    pub role: ShareRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteToken {
    pub token: String,
}

/// Invite lookup by token, shown to the invitee before they hold any
/// membership. Served without authentication.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteInfo {
    pub calendar_id: i64,
    pub calendar_name: String,
    pub inviter_email: String,
    pub role: ShareRole,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub invitee_email: String,
}

/// Event row as the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: i64,
    pub calendar_id: i64,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub all_day: bool,
    pub note: Option<String>,
    pub reminder_minutes_before: Option<u32>,
}

impl EventItem {
    /// Converts to the domain event. Server instants become local wall-clock
    /// values by dropping the offset, matching the engine's no-timezone policy.
    pub fn into_event(self) -> Event {
        Event {
            id: self.id.to_string(),
            calendar_id: self.calendar_id.to_string(),
            title: self.title,
            start: self.start_at.naive_utc(),
            end: self.end_at.naive_utc(),
            all_day: self.all_day,
            reminder: self
                .reminder_minutes_before
                .map(|minutes_before| Reminder { minutes_before }),
            notes: self.note,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub calendar_id: i64,
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes_before: Option<u32>,
}

/// Partial update; only the present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes_before: Option<u32>,
}
