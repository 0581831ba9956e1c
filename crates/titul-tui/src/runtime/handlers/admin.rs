use titul_core::api::ApiClient;

use crate::events::UiEvent;

/// Fetches the admin user roster.
pub async fn fetch_roster(client: ApiClient, admin_id: i64) -> UiEvent {
    UiEvent::RosterFetched(client.fetch_roster(admin_id).await)
}

/// Grants (or deducts) coins to a user.
pub async fn grant_coins(client: ApiClient, admin_id: i64, user_id: i64, amount: i64) -> UiEvent {
    UiEvent::GrantFinished {
        user_id,
        result: client.grant_coins(admin_id, user_id, amount).await,
    }
}
