//! Wire data model for the four backend endpoints.
//!
//! All shapes mirror what the server returns; the client never derives
//! economy values itself beyond display (`Title::sell_price` is shown in
//! the sell dialog, the actual credit comes back in `EconomyOutcome`).

use serde::{Deserialize, Serialize};

/// Minimum username length accepted before a register call is attempted.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum chat message length accepted before a send call is attempted.
pub const MAX_MESSAGE_LEN: usize = 500;

/// Name of the starter title every account owns. Never sellable.
pub const STARTER_TITLE: &str = "[NEWBIE]";

/// Authenticated user, as returned by the auth and profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub coins: i64,
    #[serde(default)]
    pub is_admin: bool,
}

/// A purchasable cosmetic title from the shop catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub id: i64,
    pub name: String,
    pub price: i64,
    /// Display tag for the title color (server-supplied, e.g. "text-yellow-400").
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_limited: bool,
    #[serde(default)]
    pub owned: bool,
}

impl Title {
    /// True for the starter title, which is excluded from the sell action
    /// at the UI layer (the server independently rejects it too).
    pub fn is_starter(&self) -> bool {
        self.name == STARTER_TITLE
    }

    /// Sell price shown in the confirm dialog. Display only: the credited
    /// amount is whatever `new_coins` the server returns.
    pub fn sell_price(&self) -> i64 {
        self.price / 2
    }
}

/// A server-tracked quest with progress and a one-time coin reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub reward: i64,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub completed: bool,
}

impl Quest {
    /// Progress clamped to 0..=100 for the gauge.
    pub fn progress_percent(&self) -> u16 {
        self.progress.clamp(0, 100) as u16
    }
}

/// A chat message from the append-only feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub message: String,
    pub username: String,
    pub user_id: i64,
    /// ISO-8601 timestamp as sent by the server.
    #[serde(default)]
    pub created_at: String,
}

impl ChatMessage {
    /// Short HH:MM form of `created_at` for display, empty if unparseable.
    pub fn time_short(&self) -> String {
        chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// A roster row visible to admin sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub coins: i64,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub time_spent_minutes: Option<i64>,
}

impl AdminUser {
    /// Short DD.MM HH:MM form of `last_login` for the roster, empty if
    /// absent or unparseable.
    pub fn last_login_short(&self) -> String {
        self.last_login
            .as_deref()
            .and_then(|ts| chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f").ok())
            .map(|t| t.format("%d.%m %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Full profile response: wholesale replaces local title/quest/streak state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileSnapshot {
    pub user: User,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub daily_streak: i64,
    #[serde(default)]
    pub can_claim_daily: bool,
}

/// Success body of an economy-mutating call (buy/sell/claim/grant).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyOutcome {
    pub message: String,
    pub new_coins: i64,
    /// Only present on claim_daily responses.
    #[serde(default)]
    pub day_streak: Option<i64>,
    #[serde(default)]
    pub title_reward: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quest_progress_is_clamped() {
        let mut quest = Quest {
            id: 1,
            title: "Марафонец".to_string(),
            description: String::new(),
            reward: 500,
            progress: 250,
            completed: false,
        };
        assert_eq!(quest.progress_percent(), 100);
        quest.progress = -5;
        assert_eq!(quest.progress_percent(), 0);
        quest.progress = 40;
        assert_eq!(quest.progress_percent(), 40);
    }

    #[test]
    fn starter_title_is_flagged() {
        let title = Title {
            id: 1,
            name: STARTER_TITLE.to_string(),
            price: 0,
            color: "text-gray-400".to_string(),
            is_limited: false,
            owned: true,
        };
        assert!(title.is_starter());
        assert_eq!(title.sell_price(), 0);
    }

    #[test]
    fn sell_price_halves_rounding_down() {
        let title = Title {
            id: 8,
            name: "[CHEATER]".to_string(),
            price: 667,
            color: String::new(),
            is_limited: false,
            owned: true,
        };
        assert_eq!(title.sell_price(), 333);
    }

    #[test]
    fn profile_snapshot_tolerates_missing_fields() {
        let snapshot: ProfileSnapshot = serde_json::from_str(
            r#"{"user": {"id": 1, "username": "Neo", "coins": 50}}"#,
        )
        .unwrap();
        assert!(snapshot.titles.is_empty());
        assert!(!snapshot.can_claim_daily);
        assert!(!snapshot.user.is_admin);
    }

    #[test]
    fn admin_last_login_short_parses_iso() {
        let user = AdminUser {
            id: 8,
            username: "Trinity".to_string(),
            coins: 120,
            is_online: false,
            last_login: Some("2026-08-24T15:04:05.123456".to_string()),
            time_spent_minutes: None,
        };
        assert_eq!(user.last_login_short(), "24.08 15:04");

        let never_seen = AdminUser {
            last_login: None,
            ..user
        };
        assert!(never_seen.last_login_short().is_empty());
    }

    #[test]
    fn chat_time_short_parses_iso() {
        let msg = ChatMessage {
            id: 1,
            message: "привет".to_string(),
            username: "Neo".to_string(),
            user_id: 1,
            created_at: "2026-08-24T15:04:05.123456".to_string(),
        };
        assert_eq!(msg.time_short(), "15:04");
    }
}
