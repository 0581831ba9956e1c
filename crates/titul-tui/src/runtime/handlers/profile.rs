use titul_core::api::ApiClient;

use crate::events::{EconomyOp, UiEvent};

/// Fetches the full profile snapshot.
pub async fn load_profile(client: ApiClient, user_id: i64) -> UiEvent {
    UiEvent::ProfileLoaded(client.fetch_profile(user_id).await)
}

/// Buys a title.
pub async fn buy_title(client: ApiClient, user_id: i64, title_id: i64) -> UiEvent {
    UiEvent::EconomyFinished {
        op: EconomyOp::Buy,
        result: client.buy_title(user_id, title_id).await,
    }
}

/// Sells a title.
pub async fn sell_title(client: ApiClient, user_id: i64, title_id: i64) -> UiEvent {
    UiEvent::EconomyFinished {
        op: EconomyOp::Sell,
        result: client.sell_title(user_id, title_id).await,
    }
}

/// Claims the daily reward.
pub async fn claim_daily(client: ApiClient, user_id: i64) -> UiEvent {
    UiEvent::EconomyFinished {
        op: EconomyOp::ClaimDaily,
        result: client.claim_daily(user_id).await,
    }
}
