use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::api::types::{
    CalendarSummary, CreateCalendarRequest, CreatedId, EventItem, EventPatch, InviteInfo,
    InviteRequest, InviteToken, LoginRequest, Me, NewEvent, RoleChange, SignupRequest,
    TokenResponse,
};
use crate::calendar::{Invite, Member, ShareRole};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// Event operations the fetch coordinator depends on, kept behind a trait so
/// it can be exercised against a test double.
#[async_trait]
pub trait CalendarApi {
    async fn list_events(
        &self,
        calendar_ids: &[i64],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventItem>, ApiError>;

    async fn create_event(&self, event: &NewEvent) -> Result<CreatedId, ApiError>;

    async fn update_event(&self, event_id: i64, patch: &EventPatch) -> Result<(), ApiError>;

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError>;
}

/// Client for the CrewCal REST backend. Carries the bearer token issued by
/// signup/login; unauthenticated calls (invite lookup) skip it.
pub struct CrewCalClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl CrewCalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// OAuth entry point; the caller opens this in a browser.
    pub fn google_login_url(&self) -> String {
        format!("{}/oauth2/authorization/google", self.base_url)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Maps a response to an error the way the server reports failures: the
    /// body text is the message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status == 401 {
            tracing::error!("Request rejected: authentication failed");
            return Err(ApiError::AuthenticationFailed);
        }

        if status == 404 {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Resource not found: {}", body);
            return Err(ApiError::NotFound(body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Request failed. Status: {}, Body: {}", status, body);
            return Err(ApiError::RequestError(body));
        }

        Ok(response)
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<TokenResponse, ApiError> {
        let payload = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        };
        let response = self
            .request(reqwest::Method::POST, "/auth/signup")
            .json(&payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(&payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn me(&self) -> Result<Me, ApiError> {
        let response = self.request(reqwest::Method::GET, "/auth/me").send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn list_calendars(&self) -> Result<Vec<CalendarSummary>, ApiError> {
        let response = self.request(reqwest::Method::GET, "/calendars").send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_calendar(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<CreatedId, ApiError> {
        let payload = CreateCalendarRequest {
            name: name.to_string(),
            color: color.map(str::to_string),
        };
        tracing::info!("Creating calendar: {}", name);
        let response = self
            .request(reqwest::Method::POST, "/calendars")
            .json(&payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_calendar(&self, calendar_id: i64) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/calendars/{}", calendar_id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_members(&self, calendar_id: i64) -> Result<Vec<Member>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/calendars/{}/members", calendar_id))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn change_member_role(
        &self,
        calendar_id: i64,
        user_id: i64,
        role: ShareRole,
    ) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::PATCH,
                &format!("/calendars/{}/members/{}", calendar_id, user_id),
            )
            .json(&RoleChange { role })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn remove_member(&self, calendar_id: i64, user_id: i64) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/calendars/{}/members/{}", calendar_id, user_id),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn list_invites(&self, calendar_id: i64) -> Result<Vec<Invite>, ApiError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/calendars/{}/invites", calendar_id))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Invites `email` with `role`; returns the one-time token the invitee
    /// uses to look the invite up.
    pub async fn invite_user(
        &self,
        calendar_id: i64,
        email: &str,
        role: ShareRole,
    ) -> Result<String, ApiError> {
        let payload = InviteRequest {
            email: email.to_string(),
            role,
        };
        tracing::info!("Inviting {} to calendar {} as {}", email, calendar_id, role.as_str());
        let response = self
            .request(reqwest::Method::POST, &format!("/calendars/{}/invites", calendar_id))
            .json(&payload)
            .send()
            .await?;
        let token: InviteToken = Self::check(response).await?.json().await?;
        Ok(token.token)
    }

    pub async fn revoke_invite(&self, calendar_id: i64, invite_id: i64) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::DELETE,
                &format!("/calendars/{}/invites/{}", calendar_id, invite_id),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Token lookup is the one unauthenticated call: the invitee may not have
    /// an account yet.
    pub async fn invite_info(&self, token: &str) -> Result<InviteInfo, ApiError> {
        let response = self
            .client
            .get(format!("{}/invites/{}", self.base_url, urlencoding::encode(token)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn accept_invite(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/invites/{}/accept", urlencoding::encode(token)),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn decline_invite(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/invites/{}/decline", urlencoding::encode(token)),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CalendarApi for CrewCalClient {
    async fn list_events(
        &self,
        calendar_ids: &[i64],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventItem>, ApiError> {
        let ids = calendar_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        tracing::info!("Fetching events from {} to {} for calendars [{}]", from, to, ids);

        let response = self
            .request(reqwest::Method::GET, "/events")
            .query(&[
                ("calendarIds", ids.as_str()),
                ("from", &from.to_rfc3339()),
                ("to", &to.to_rfc3339()),
            ])
            .send()
            .await?;

        let events: Vec<EventItem> = Self::check(response).await?.json().await?;
        tracing::info!("Fetched {} events", events.len());
        Ok(events)
    }

    async fn create_event(&self, event: &NewEvent) -> Result<CreatedId, ApiError> {
        tracing::info!("Creating event: {} at {}", event.title, event.start_at);
        let response = self
            .request(reqwest::Method::POST, "/events")
            .json(event)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_event(&self, event_id: i64, patch: &EventPatch) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/events/{}", event_id))
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/events/{}", event_id))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
