//! UI event types.
//!
//! Everything that can happen arrives here: terminal input, the tick timer,
//! task lifecycle notifications, and the results of remote calls (delivered
//! through the runtime inbox).

use crossterm::event::Event;
use titul_core::api::{ApiError, AuthAction};
use titul_core::types::{AdminUser, ChatMessage, EconomyOutcome, ProfileSnapshot, User};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Economy operations that share the `EconomyOutcome` result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyOp {
    Buy,
    Sell,
    ClaimDaily,
}

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer tick (drives polls, notice expiry, spinner).
    Tick,
    /// Raw terminal event from crossterm.
    Terminal(Event),
    /// An async task was spawned by the runtime.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// An async task finished; the inner event is re-dispatched if the
    /// task is still the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Login/register call finished.
    AuthFinished {
        action: AuthAction,
        result: Result<User, ApiError>,
    },
    /// Profile snapshot fetch finished.
    ProfileLoaded(Result<ProfileSnapshot, ApiError>),
    /// Buy/sell/daily-claim call finished.
    EconomyFinished {
        op: EconomyOp,
        result: Result<EconomyOutcome, ApiError>,
    },
    /// Chat poll finished.
    ChatFetched(Result<Vec<ChatMessage>, ApiError>),
    /// Chat message send finished (echoes the stored message).
    ChatSent(Result<ChatMessage, ApiError>),
    /// Admin roster poll finished.
    RosterFetched(Result<Vec<AdminUser>, ApiError>),
    /// Coin grant finished; `user_id` is the grant target.
    GrantFinished {
        user_id: i64,
        result: Result<EconomyOutcome, ApiError>,
    },
}
