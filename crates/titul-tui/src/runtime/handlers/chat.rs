use titul_core::api::ApiClient;

use crate::events::UiEvent;

/// Fetches the newest chat messages.
pub async fn fetch_chat(client: ApiClient, limit: u32) -> UiEvent {
    UiEvent::ChatFetched(client.fetch_chat(limit).await)
}

/// Sends a chat message.
pub async fn send_chat(client: ApiClient, user_id: i64, message: String) -> UiEvent {
    UiEvent::ChatSent(client.send_chat(user_id, &message).await)
}
