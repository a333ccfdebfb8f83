use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sharing permission on a calendar. `FreeBusy` exposes only occupied/free
/// status; the server masks titles and notes for those viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShareRole {
    Owner,
    Editor,
    Viewer,
    FreeBusy,
}

impl ShareRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareRole::Owner => "OWNER",
            ShareRole::Editor => "EDITOR",
            ShareRole::Viewer => "VIEWER",
            ShareRole::FreeBusy => "FREEBUSY",
        }
    }
}

/// Demo-side share row. The owner row is synthesized client-side; the
/// server-backed model tracks ownership explicitly via [`Member`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarShare {
    pub id: String,
    pub calendar_id: String,
    pub email: String,
    pub role: ShareRole,
    pub is_owner: bool,
}

/// Active membership as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: ShareRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

/// Pending invitation with its one-time token and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: i64,
    pub calendar_id: i64,
    pub invitee_email: String,
    pub role: ShareRole,
    pub status: InviteStatus,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_role_wire_names_match_server() {
        assert_eq!(serde_json::to_string(&ShareRole::Owner).unwrap(), "\"OWNER\"");
        assert_eq!(serde_json::to_string(&ShareRole::FreeBusy).unwrap(), "\"FREEBUSY\"");
    }

    #[test]
    fn share_role_parses_from_wire_name() {
        let role: ShareRole = serde_json::from_str("\"VIEWER\"").unwrap();
        assert_eq!(role, ShareRole::Viewer);
    }

    #[test]
    fn invite_status_round_trips() {
        let status: InviteStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, InviteStatus::Pending);
    }
}
