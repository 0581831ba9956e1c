//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.
//!
//! Remote effects carry `task: Option<TaskId>`. Overlay and feature key
//! handlers emit them with `None`; the reducer assigns fresh ids from
//! `TaskSeq` before handing effects to the runtime. The runtime skips any
//! remote effect that still has no id.

use titul_core::api::AuthAction;
use titul_core::session::StoredSession;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn the login/register call.
    Authenticate {
        task: Option<TaskId>,
        action: AuthAction,
        username: String,
        password: String,
    },

    /// Fetch the full profile snapshot for the signed-in user.
    LoadProfile { task: Option<TaskId> },

    /// Buy a title.
    BuyTitle {
        task: Option<TaskId>,
        title_id: i64,
    },

    /// Sell a title.
    SellTitle {
        task: Option<TaskId>,
        title_id: i64,
    },

    /// Claim the daily reward.
    ClaimDaily { task: Option<TaskId> },

    /// Fetch the newest chat messages.
    FetchChat { task: Option<TaskId> },

    /// Send a chat message.
    SendChatMessage {
        task: Option<TaskId>,
        message: String,
    },

    /// Fetch the admin user roster.
    FetchRoster { task: Option<TaskId> },

    /// Grant (or deduct, negative amount) coins to a user.
    GrantCoins {
        task: Option<TaskId>,
        user_id: i64,
        amount: i64,
    },

    /// Persist the session record to disk.
    SaveSession { session: StoredSession },

    /// Delete the session record (logout).
    ClearSession,
}

impl UiEffect {
    /// Mutable access to the task slot for remote effects, `None` for the
    /// effects that do not spawn a task.
    pub(crate) fn task_slot(&mut self) -> Option<&mut Option<TaskId>> {
        match self {
            UiEffect::Authenticate { task, .. }
            | UiEffect::LoadProfile { task }
            | UiEffect::BuyTitle { task, .. }
            | UiEffect::SellTitle { task, .. }
            | UiEffect::ClaimDaily { task }
            | UiEffect::FetchChat { task }
            | UiEffect::SendChatMessage { task, .. }
            | UiEffect::FetchRoster { task }
            | UiEffect::GrantCoins { task, .. } => Some(task),
            UiEffect::Quit | UiEffect::SaveSession { .. } | UiEffect::ClearSession => None,
        }
    }
}
