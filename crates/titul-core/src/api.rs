//! HTTP client for the four backend endpoints.
//!
//! Every remote operation is one method. Calls are fire-and-report: no
//! retries, no backoff. Transport failures and application errors (non-2xx
//! with a server-provided message) are kept distinct so the UI can surface
//! the server's own wording verbatim.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::types::{AdminUser, ChatMessage, EconomyOutcome, ProfileSnapshot, User};

/// Error for a single remote call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The call could not complete (connection, timeout, malformed body).
    #[error("network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status and a message.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Login/register selector for the auth endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    fn as_str(self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Register => "register",
        }
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct MessagesEnvelope {
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<AdminUser>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the ЧикенТитул backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Logs in or registers. Returns the authenticated user on success.
    pub async fn authenticate(
        &self,
        action: AuthAction,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        tracing::debug!(action = action.as_str(), username, "auth request");
        let response = self
            .http
            .post(self.url("auth"))
            .json(&json!({
                "action": action.as_str(),
                "username": username,
                "password": password,
            }))
            .send()
            .await?;
        decode::<UserEnvelope>(response).await.map(|env| env.user)
    }

    /// Fetches the full profile snapshot (user, titles, quests, streak).
    pub async fn fetch_profile(&self, user_id: i64) -> Result<ProfileSnapshot, ApiError> {
        let response = self
            .http
            .get(self.url("api"))
            .query(&[("action", "profile"), ("user_id", &user_id.to_string())])
            .send()
            .await?;
        decode(response).await
    }

    /// Buys a title. The returned `new_coins` is authoritative.
    pub async fn buy_title(&self, user_id: i64, title_id: i64) -> Result<EconomyOutcome, ApiError> {
        self.economy_post(json!({
            "action": "buy_title",
            "user_id": user_id,
            "title_id": title_id,
        }))
        .await
    }

    /// Sells a title. The server rejects the starter title independently.
    pub async fn sell_title(
        &self,
        user_id: i64,
        title_id: i64,
    ) -> Result<EconomyOutcome, ApiError> {
        self.economy_post(json!({
            "action": "sell_title",
            "user_id": user_id,
            "title_id": title_id,
        }))
        .await
    }

    /// Claims the daily reward. Eligibility is entirely server-determined.
    pub async fn claim_daily(&self, user_id: i64) -> Result<EconomyOutcome, ApiError> {
        self.economy_post(json!({
            "action": "claim_daily",
            "user_id": user_id,
        }))
        .await
    }

    async fn economy_post(&self, body: serde_json::Value) -> Result<EconomyOutcome, ApiError> {
        let response = self.http.post(self.url("api")).json(&body).send().await?;
        decode(response).await
    }

    /// Fetches the newest chat messages, oldest first.
    pub async fn fetch_chat(&self, limit: u32) -> Result<Vec<ChatMessage>, ApiError> {
        let response = self
            .http
            .get(self.url("chat"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        decode::<MessagesEnvelope>(response)
            .await
            .map(|env| env.messages)
    }

    /// Posts a chat message. Returns the stored message as echoed back.
    pub async fn send_chat(&self, user_id: i64, message: &str) -> Result<ChatMessage, ApiError> {
        let response = self
            .http
            .post(self.url("chat"))
            .json(&json!({ "user_id": user_id, "message": message }))
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches the user roster. The server re-checks the admin flag.
    pub async fn fetch_roster(&self, admin_id: i64) -> Result<Vec<AdminUser>, ApiError> {
        let response = self
            .http
            .get(self.url("admin"))
            .query(&[("admin_id", admin_id)])
            .send()
            .await?;
        decode::<UsersEnvelope>(response).await.map(|env| env.users)
    }

    /// Grants (or, negative, deducts) coins to a user.
    pub async fn grant_coins(
        &self,
        admin_id: i64,
        user_id: i64,
        coins: i64,
    ) -> Result<EconomyOutcome, ApiError> {
        let response = self
            .http
            .post(self.url("admin"))
            .json(&json!({
                "admin_id": admin_id,
                "user_id": user_id,
                "coins": coins,
            }))
            .send()
            .await?;
        decode(response).await
    }
}

/// Decodes a response: success body on 2xx, server error message otherwise.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid response body: {e}")))
    } else {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        tracing::warn!(status = status.as_u16(), %message, "server error");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:9000///");
        assert_eq!(client.url("auth"), "http://localhost:9000/auth");
    }

    #[test]
    fn api_error_displays_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: "Недостаточно ТитулКоинов".to_string(),
        };
        assert_eq!(err.to_string(), "Недостаточно ТитулКоинов");
    }
}
