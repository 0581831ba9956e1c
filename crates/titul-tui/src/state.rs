//! Application state.
//!
//! Split-state architecture: `AppState` owns the main `TuiState` plus an
//! optional modal overlay. All mutation happens in the reducer; the runtime
//! and render functions only read.

use std::time::{Duration, Instant};

use titul_core::api::AuthAction;
use titul_core::config::Config;
use titul_core::session::StoredSession;
use titul_core::types::{AdminUser, ChatMessage, ProfileSnapshot};

use crate::common::{TaskSeq, Tasks};
use crate::overlays::Overlay;

/// Chat poll cadence while the chat view is active.
pub const CHAT_POLL: Duration = Duration::from_secs(3);

/// Roster poll cadence while the admin view is active.
pub const ADMIN_POLL: Duration = Duration::from_secs(5);

/// How long a notice stays on screen before auto-expiring.
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// Top-level views behind the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Titles,
    Quests,
    Chat,
    Profile,
    Admin,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Главная",
            Page::Titles => "Титулы",
            Page::Quests => "Задания",
            Page::Chat => "Чат",
            Page::Profile => "Профиль",
            Page::Admin => "Админ",
        }
    }

    /// Pages in nav order, admin last.
    pub fn all() -> [Page; 6] {
        [
            Page::Home,
            Page::Titles,
            Page::Quests,
            Page::Chat,
            Page::Profile,
            Page::Admin,
        ]
    }
}

/// Which auth form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

/// Login/register form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormState {
    pub username: String,
    pub password: String,
    pub focus: AuthField,
    pub mode: AuthAction,
    pub error: Option<String>,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: AuthField::Username,
            mode: AuthAction::Login,
            error: None,
        }
    }
}

/// Title catalog view state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShopState {
    pub cursor: usize,
}

/// Chat view state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    /// Lines scrolled up from the newest message. 0 = follow latest.
    pub scroll_up: usize,
}

impl ChatState {
    pub fn follows_latest(&self) -> bool {
        self.scroll_up == 0
    }
}

/// Admin view state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdminState {
    pub users: Vec<AdminUser>,
    pub cursor: usize,
}

impl AdminState {
    pub fn selected(&self) -> Option<&AdminUser> {
        self.users.get(self.cursor)
    }
}

/// Per-view poll deadlines, driven off `Tick` by the reducer.
///
/// `Some(deadline)` means a fetch fires on the first tick at or past the
/// deadline; `None` means the view is inactive and nothing is scheduled.
/// Entering a view sets its deadline to "now" so the first fetch is
/// immediate; leaving sets it back to `None`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    pub chat_next: Option<Instant>,
    pub admin_next: Option<Instant>,
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot dismissible status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Error)
    }

    fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: Instant::now() + NOTICE_DURATION,
        }
    }
}

/// Main TUI state (everything except the overlay).
#[derive(Debug)]
pub struct TuiState {
    pub config: Config,
    pub should_quit: bool,
    pub page: Page,
    pub session: Option<StoredSession>,
    pub auth: AuthFormState,
    pub profile: Option<ProfileSnapshot>,
    pub shop: ShopState,
    pub chat: ChatState,
    pub admin: AdminState,
    pub poll: PollState,
    pub notice: Option<Notice>,
    pub tasks: Tasks,
    pub task_seq: TaskSeq,
    pub spinner_frame: u8,
}

impl TuiState {
    pub fn new(config: Config, session: Option<StoredSession>) -> Self {
        Self {
            config,
            should_quit: false,
            page: Page::Home,
            session,
            auth: AuthFormState::default(),
            profile: None,
            shop: ShopState::default(),
            chat: ChatState::default(),
            admin: AdminState::default(),
            poll: PollState::default(),
            notice: None,
            tasks: Tasks::default(),
            task_seq: TaskSeq::default(),
            spinner_frame: 0,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_admin)
    }

    pub fn coins(&self) -> i64 {
        self.session.as_ref().map_or(0, |s| s.coins)
    }
}

/// Application state: main TUI state plus an optional modal overlay.
#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, session: Option<StoredSession>) -> Self {
        Self {
            tui: TuiState::new(config, session),
            overlay: None,
        }
    }
}
