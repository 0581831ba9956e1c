//! Effect handler implementations.
//!
//! Handlers are pure async functions: they take owned arguments, perform
//! one remote call, and return the `UiEvent` carrying its result. The
//! runtime spawns them and routes the result through the inbox.

mod admin;
mod auth;
mod chat;
mod profile;

pub use admin::{fetch_roster, grant_coins};
pub use auth::authenticate;
pub use chat::{fetch_chat, send_chat};
pub use profile::{buy_title, claim_daily, load_profile, sell_title};
