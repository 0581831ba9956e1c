use titul_core::api::{ApiClient, AuthAction};

use crate::events::UiEvent;

/// Runs the login/register call.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn authenticate(
    client: ApiClient,
    action: AuthAction,
    username: String,
    password: String,
) -> UiEvent {
    let result = client.authenticate(action, &username, &password).await;
    UiEvent::AuthFinished { action, result }
}
