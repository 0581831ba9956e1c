//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state,
//! including the per-view poll clocks: chat and roster fetches are
//! scheduled from `Tick` against deadlines in `PollState`, which exist
//! only while their view is active.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use titul_core::api::{ApiError, AuthAction};
use titul_core::session::StoredSession;
use titul_core::types::{AdminUser, ChatMessage, EconomyOutcome, ProfileSnapshot, User};

use crate::effects::UiEffect;
use crate::events::{EconomyOp, UiEvent};
use crate::features::{auth, chat};
use crate::overlays::{ConfirmAction, ConfirmState, GrantState, Overlay, OverlayTransition};
use crate::state::{ADMIN_POLL, AppState, CHAT_POLL, Notice, Page, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => handle_tick(&mut app.tui),
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok {
                // Stale completion: the task was cleared by navigation or
                // logout, or superseded. Result is dropped.
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
        UiEvent::AuthFinished { action, result } => handle_auth_finished(&mut app.tui, action, result),
        UiEvent::ProfileLoaded(result) => handle_profile_loaded(&mut app.tui, result),
        UiEvent::EconomyFinished { op, result } => handle_economy_finished(app, op, result),
        UiEvent::ChatFetched(result) => handle_chat_fetched(&mut app.tui, result),
        UiEvent::ChatSent(result) => handle_chat_sent(&mut app.tui, result),
        UiEvent::RosterFetched(result) => handle_roster_fetched(&mut app.tui, result),
        UiEvent::GrantFinished { user_id, result } => handle_grant_finished(app, user_id, result),
    }
}

/// Effects to run before the first frame: a restored session triggers an
/// immediate profile fetch.
pub fn startup_effects(app: &mut AppState) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if app.tui.session.is_some() {
        effects.push(UiEffect::LoadProfile { task: None });
    }
    assign_task_ids(&mut app.tui, &mut effects);
    effects
}

/// Fills in task ids for remote effects emitted with `task: None`.
fn assign_task_ids(tui: &mut TuiState, effects: &mut [UiEffect]) {
    for effect in effects {
        if let Some(slot) = effect.task_slot()
            && slot.is_none()
        {
            *slot = Some(tui.task_seq.next_id());
        }
    }
}

fn handle_tick(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.spinner_frame = tui.spinner_frame.wrapping_add(1);

    let now = Instant::now();
    if let Some(notice) = &tui.notice
        && notice.expires_at <= now
    {
        tui.notice = None;
    }

    let mut effects = Vec::new();

    if tui.page == Page::Chat
        && tui.session.is_some()
        && let Some(deadline) = tui.poll.chat_next
        && deadline <= now
        && !tui.tasks.chat_fetch.is_running()
    {
        tui.poll.chat_next = Some(now + CHAT_POLL);
        effects.push(UiEffect::FetchChat { task: None });
    }

    if tui.page == Page::Admin
        && tui.is_admin()
        && let Some(deadline) = tui.poll.admin_next
        && deadline <= now
        && !tui.tasks.roster_fetch.is_running()
    {
        tui.poll.admin_next = Some(now + ADMIN_POLL);
        effects.push(UiEffect::FetchRoster { task: None });
    }

    assign_task_ids(tui, &mut effects);
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Any keypress dismisses the current notice.
    app.tui.notice = None;

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if app.overlay.is_some() {
        return handle_overlay_key(app, key);
    }

    if app.tui.session.is_none() {
        let mut effects = auth::handle_key(&mut app.tui.auth, &app.tui.tasks, key);
        assign_task_ids(&mut app.tui, &mut effects);
        return effects;
    }

    match key.code {
        KeyCode::Tab => {
            let next = next_page(app.tui.page, true, app.tui.is_admin());
            switch_page(&mut app.tui, next);
            vec![]
        }
        KeyCode::BackTab => {
            let prev = next_page(app.tui.page, false, app.tui.is_admin());
            switch_page(&mut app.tui, prev);
            vec![]
        }
        _ => {
            let mut effects = match app.tui.page {
                Page::Home | Page::Quests => vec![],
                Page::Titles => handle_titles_key(app, key),
                Page::Chat => handle_chat_key(&mut app.tui, key),
                Page::Profile => handle_profile_key(&mut app.tui, key),
                Page::Admin => handle_admin_key(app, key),
            };
            assign_task_ids(&mut app.tui, &mut effects);
            effects
        }
    }
}

fn handle_overlay_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(overlay) = &mut app.overlay else {
        return vec![];
    };
    let result = overlay.handle_key(&app.tui, key);
    let mut effects = result.effects;
    assign_task_ids(&mut app.tui, &mut effects);
    if matches!(result.transition, OverlayTransition::Close) {
        app.overlay = None;
    }
    effects
}

/// Nav order with Admin skipped for non-admin sessions.
fn next_page(current: Page, forward: bool, is_admin: bool) -> Page {
    let pages: Vec<Page> = Page::all()
        .into_iter()
        .filter(|p| *p != Page::Admin || is_admin)
        .collect();
    let idx = pages.iter().position(|p| *p == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % pages.len()
    } else {
        (idx + pages.len() - 1) % pages.len()
    };
    pages[next]
}

/// Switches views: tears down the old view's poll clock (and clears its
/// in-flight tasks so stale results are dropped), arms the new one for an
/// immediate fetch.
pub(crate) fn switch_page(tui: &mut TuiState, page: Page) {
    if tui.page == page {
        return;
    }

    match tui.page {
        Page::Chat => {
            tui.poll.chat_next = None;
            tui.tasks.chat_fetch.clear();
            tui.tasks.chat_send.clear();
        }
        Page::Admin => {
            tui.poll.admin_next = None;
            tui.tasks.roster_fetch.clear();
        }
        _ => {}
    }

    tui.page = page;

    let now = Instant::now();
    match page {
        Page::Chat => tui.poll.chat_next = Some(now),
        Page::Admin => tui.poll.admin_next = Some(now),
        _ => {}
    }
}

fn handle_titles_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let count = app.tui.profile.as_ref().map_or(0, |p| p.titles.len());
    match key.code {
        KeyCode::Up => {
            app.tui.shop.cursor = app.tui.shop.cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            if count > 0 {
                app.tui.shop.cursor = (app.tui.shop.cursor + 1).min(count - 1);
            }
            vec![]
        }
        KeyCode::Enter => {
            let Some(selected) = app
                .tui
                .profile
                .as_ref()
                .and_then(|p| p.titles.get(app.tui.shop.cursor))
                .cloned()
            else {
                return vec![];
            };

            if selected.owned {
                if selected.is_starter() {
                    app.tui.notice = Some(Notice::error("Стартовый титул нельзя продать"));
                } else {
                    let refund = selected.sell_price();
                    app.overlay = Some(Overlay::Confirm(ConfirmState::open(ConfirmAction::Sell {
                        title_id: selected.id,
                        name: selected.name,
                        refund,
                    })));
                }
            } else if app.tui.coins() < selected.price {
                app.tui.notice = Some(Notice::error("Недостаточно ТитулКоинов"));
            } else {
                app.overlay = Some(Overlay::Confirm(ConfirmState::open(ConfirmAction::Buy {
                    title_id: selected.id,
                    name: selected.name,
                    price: selected.price,
                })));
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_chat_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => {
            let message = tui.chat.input.trim().to_string();
            if message.is_empty() || tui.tasks.chat_send.is_running() {
                return vec![];
            }
            vec![UiEffect::SendChatMessage {
                task: None,
                message,
            }]
        }
        KeyCode::Backspace => {
            tui.chat.input.pop();
            vec![]
        }
        KeyCode::Up => {
            let max = tui.chat.messages.len().saturating_sub(1);
            tui.chat.scroll_up = (tui.chat.scroll_up + 1).min(max);
            vec![]
        }
        KeyCode::Down => {
            tui.chat.scroll_up = tui.chat.scroll_up.saturating_sub(1);
            vec![]
        }
        KeyCode::Esc => {
            tui.chat.scroll_up = 0;
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            chat::push_input_char(&mut tui.chat, c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_profile_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('d') => {
            let can_claim = tui.profile.as_ref().is_some_and(|p| p.can_claim_daily);
            if !can_claim || tui.tasks.daily_claim.is_running() {
                return vec![];
            }
            vec![UiEffect::ClaimDaily { task: None }]
        }
        KeyCode::Char('l') => logout(tui),
        _ => vec![],
    }
}

fn handle_admin_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Up => {
            app.tui.admin.cursor = app.tui.admin.cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            let count = app.tui.admin.users.len();
            if count > 0 {
                app.tui.admin.cursor = (app.tui.admin.cursor + 1).min(count - 1);
            }
            vec![]
        }
        KeyCode::Char('g') | KeyCode::Enter => {
            if let Some(user) = app.tui.admin.selected() {
                app.overlay = Some(Overlay::Grant(GrantState::open(
                    user.id,
                    user.username.clone(),
                )));
            }
            vec![]
        }
        _ => vec![],
    }
}

fn logout(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.session = None;
    tui.profile = None;
    tui.auth = Default::default();
    tui.shop = Default::default();
    tui.chat = Default::default();
    tui.admin = Default::default();
    tui.poll = Default::default();
    tui.tasks = Default::default();
    tui.page = Page::Home;
    tui.notice = Some(Notice::success("Вы вышли из аккаунта"));
    vec![UiEffect::ClearSession]
}

fn handle_auth_finished(
    tui: &mut TuiState,
    action: AuthAction,
    result: Result<User, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(user) => {
            let session = StoredSession::from(&user);
            tui.session = Some(session.clone());
            tui.auth = Default::default();
            tui.page = Page::Home;
            let greeting = match action {
                AuthAction::Login => format!("С возвращением, {}!", user.username),
                AuthAction::Register => format!("Добро пожаловать, {}!", user.username),
            };
            tui.notice = Some(Notice::success(greeting));
            let mut effects = vec![
                UiEffect::SaveSession { session },
                UiEffect::LoadProfile { task: None },
            ];
            assign_task_ids(tui, &mut effects);
            effects
        }
        Err(error) => {
            tui.auth.error = Some(error.to_string());
            vec![]
        }
    }
}

fn handle_profile_loaded(
    tui: &mut TuiState,
    result: Result<ProfileSnapshot, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(snapshot) => {
            let session = StoredSession::from(&snapshot.user);
            let changed = tui.session.as_ref() != Some(&session);
            tui.session = Some(session.clone());

            if !snapshot.titles.is_empty() {
                tui.shop.cursor = tui.shop.cursor.min(snapshot.titles.len() - 1);
            }
            tui.profile = Some(snapshot);

            if tui.page == Page::Admin && !tui.is_admin() {
                switch_page(tui, Page::Home);
            }

            if changed {
                vec![UiEffect::SaveSession { session }]
            } else {
                vec![]
            }
        }
        Err(error) => {
            tui.notice = Some(Notice::error(error.to_string()));
            vec![]
        }
    }
}

fn handle_economy_finished(
    app: &mut AppState,
    op: EconomyOp,
    result: Result<EconomyOutcome, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(outcome) => {
            apply_new_coins(&mut app.tui, outcome.new_coins);
            app.tui.notice = Some(Notice::success(outcome.message));

            if matches!(op, EconomyOp::Buy | EconomyOp::Sell)
                && matches!(app.overlay, Some(Overlay::Confirm(_)))
            {
                app.overlay = None;
            }

            // The coin balance is already authoritative; the full re-fetch
            // keeps titles/quests/streak in sync with whatever the
            // operation changed server-side.
            let mut effects = session_save_effects(&app.tui);
            effects.push(UiEffect::LoadProfile { task: None });
            assign_task_ids(&mut app.tui, &mut effects);
            effects
        }
        Err(error) => {
            match op {
                EconomyOp::Buy | EconomyOp::Sell => {
                    if let Some(Overlay::Confirm(confirm)) = &mut app.overlay {
                        confirm.fail(error.to_string());
                    } else {
                        app.tui.notice = Some(Notice::error(error.to_string()));
                    }
                }
                EconomyOp::ClaimDaily => {
                    app.tui.notice = Some(Notice::error(error.to_string()));
                }
            }
            vec![]
        }
    }
}

fn handle_chat_fetched(
    tui: &mut TuiState,
    result: Result<Vec<ChatMessage>, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(messages) => {
            if tui.page == Page::Chat {
                tui.chat.scroll_up = tui.chat.scroll_up.min(messages.len().saturating_sub(1));
                tui.chat.messages = messages;
            }
            vec![]
        }
        Err(error) => {
            tracing::warn!(%error, "chat poll failed");
            tui.notice = Some(Notice::error(error.to_string()));
            vec![]
        }
    }
}

fn handle_chat_sent(tui: &mut TuiState, result: Result<ChatMessage, ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(message) => {
            tui.chat.input.clear();
            tui.chat.scroll_up = 0;
            tui.chat.messages.push(message);
            // Pull the full window right away instead of waiting out the
            // current poll interval.
            if tui.page == Page::Chat {
                tui.poll.chat_next = Some(Instant::now());
            }
            vec![]
        }
        Err(error) => {
            tui.notice = Some(Notice::error(error.to_string()));
            vec![]
        }
    }
}

fn handle_roster_fetched(
    tui: &mut TuiState,
    result: Result<Vec<AdminUser>, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(users) => {
            if tui.page == Page::Admin {
                if !users.is_empty() {
                    tui.admin.cursor = tui.admin.cursor.min(users.len() - 1);
                }
                tui.admin.users = users;
            }
            vec![]
        }
        Err(error) => {
            tracing::warn!(%error, "roster poll failed");
            tui.notice = Some(Notice::error(error.to_string()));
            vec![]
        }
    }
}

fn handle_grant_finished(
    app: &mut AppState,
    user_id: i64,
    result: Result<EconomyOutcome, ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(outcome) => {
            app.tui.notice = Some(Notice::success(outcome.message));
            if matches!(app.overlay, Some(Overlay::Grant(_))) {
                app.overlay = None;
            }
            if app.tui.page == Page::Admin {
                app.tui.poll.admin_next = Some(Instant::now());
            }

            let mut effects = Vec::new();
            let self_grant = app.tui.session.as_ref().is_some_and(|s| s.id == user_id);
            if self_grant {
                apply_new_coins(&mut app.tui, outcome.new_coins);
                effects.extend(session_save_effects(&app.tui));
                effects.push(UiEffect::LoadProfile { task: None });
            }
            assign_task_ids(&mut app.tui, &mut effects);
            effects
        }
        Err(error) => {
            if let Some(Overlay::Grant(grant)) = &mut app.overlay {
                grant.fail(error.to_string());
            } else {
                app.tui.notice = Some(Notice::error(error.to_string()));
            }
            vec![]
        }
    }
}

/// Applies a server-returned coin balance to the cached session and the
/// profile snapshot (if loaded).
fn apply_new_coins(tui: &mut TuiState, new_coins: i64) {
    if let Some(session) = &mut tui.session {
        session.coins = new_coins;
    }
    if let Some(profile) = &mut tui.profile {
        profile.user.coins = new_coins;
    }
}

fn session_save_effects(tui: &TuiState) -> Vec<UiEffect> {
    match &tui.session {
        Some(session) => vec![UiEffect::SaveSession {
            session: session.clone(),
        }],
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use titul_core::config::Config;
    use titul_core::types::Title;

    use super::*;
    use crate::common::{TaskCompleted, TaskKind, TaskStarted};

    fn session() -> StoredSession {
        StoredSession {
            id: 7,
            username: "Neo".to_string(),
            coins: 450,
            is_admin: false,
        }
    }

    fn admin_session() -> StoredSession {
        StoredSession {
            id: 1,
            username: "Morpheus".to_string(),
            coins: 9000,
            is_admin: true,
        }
    }

    fn snapshot(coins: i64) -> ProfileSnapshot {
        ProfileSnapshot {
            user: User {
                id: 7,
                username: "Neo".to_string(),
                coins,
                is_admin: false,
            },
            titles: vec![
                Title {
                    id: 1,
                    name: "[NEWBIE]".to_string(),
                    price: 0,
                    color: "text-gray-400".to_string(),
                    is_limited: false,
                    owned: true,
                },
                Title {
                    id: 2,
                    name: "[VIP]".to_string(),
                    price: 500,
                    color: "text-yellow-400".to_string(),
                    is_limited: false,
                    owned: false,
                },
            ],
            quests: vec![],
            daily_streak: 3,
            can_claim_daily: true,
        }
    }

    fn signed_in_app() -> AppState {
        let mut app = AppState::new(Config::default(), Some(session()));
        app.tui.profile = Some(snapshot(450));
        app
    }

    fn outcome(message: &str, new_coins: i64) -> EconomyOutcome {
        EconomyOutcome {
            message: message.to_string(),
            new_coins,
            day_streak: None,
            title_reward: None,
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::from(code)))
    }

    fn has_load_profile(effects: &[UiEffect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, UiEffect::LoadProfile { task: Some(_) }))
    }

    #[test]
    fn buy_success_applies_coins_closes_dialog_and_refetches() {
        let mut app = signed_in_app();
        app.overlay = Some(Overlay::Confirm(ConfirmState::open(ConfirmAction::Buy {
            title_id: 2,
            name: "[VIP]".to_string(),
            price: 500,
        })));

        let effects = update(
            &mut app,
            UiEvent::EconomyFinished {
                op: EconomyOp::Buy,
                result: Ok(outcome("Титул [VIP] успешно куплен!", 250)),
            },
        );

        assert_eq!(app.tui.session.as_ref().unwrap().coins, 250);
        assert!(app.overlay.is_none());
        assert!(has_load_profile(&effects));
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::SaveSession { session } if session.coins == 250)));
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn buy_failure_keeps_dialog_open_with_error() {
        let mut app = signed_in_app();
        app.overlay = Some(Overlay::Confirm(ConfirmState::open(ConfirmAction::Buy {
            title_id: 2,
            name: "[VIP]".to_string(),
            price: 500,
        })));
        if let Some(Overlay::Confirm(confirm)) = &mut app.overlay {
            confirm.busy = true;
        }

        let effects = update(
            &mut app,
            UiEvent::EconomyFinished {
                op: EconomyOp::Buy,
                result: Err(ApiError::Server {
                    status: 400,
                    message: "Недостаточно ТитулКоинов".to_string(),
                }),
            },
        );

        assert!(effects.is_empty());
        match &app.overlay {
            Some(Overlay::Confirm(confirm)) => {
                assert!(!confirm.busy);
                assert_eq!(
                    confirm.error.as_deref(),
                    Some("Недостаточно ТитулКоинов")
                );
            }
            other => panic!("expected confirm overlay, got {other:?}"),
        }
        assert_eq!(app.tui.session.as_ref().unwrap().coins, 450);
    }

    #[test]
    fn unaffordable_title_never_opens_dialog() {
        let mut app = signed_in_app();
        app.tui.session.as_mut().unwrap().coins = 100;
        app.tui.page = Page::Titles;
        app.tui.shop.cursor = 1; // [VIP], price 500

        update(&mut app, key(KeyCode::Enter));

        assert!(app.overlay.is_none());
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn starter_title_never_opens_sell_dialog() {
        let mut app = signed_in_app();
        app.tui.page = Page::Titles;
        app.tui.shop.cursor = 0; // [NEWBIE]

        update(&mut app, key(KeyCode::Enter));

        assert!(app.overlay.is_none());
        assert!(app.tui.notice.is_some());
    }

    #[test]
    fn owned_title_opens_sell_with_half_price() {
        let mut app = signed_in_app();
        app.tui.profile.as_mut().unwrap().titles[1].owned = true;
        app.tui.page = Page::Titles;
        app.tui.shop.cursor = 1;

        update(&mut app, key(KeyCode::Enter));

        match &app.overlay {
            Some(Overlay::Confirm(confirm)) => {
                assert_eq!(
                    confirm.action,
                    ConfirmAction::Sell {
                        title_id: 2,
                        name: "[VIP]".to_string(),
                        refund: 250,
                    }
                );
            }
            other => panic!("expected sell confirm, got {other:?}"),
        }
    }

    #[test]
    fn entering_chat_fires_immediate_fetch_and_reschedules() {
        let mut app = signed_in_app();
        switch_page(&mut app.tui, Page::Chat);
        assert!(app.tui.poll.chat_next.is_some());

        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::FetchChat { task: Some(_) })));

        // Rescheduled into the future: the very next tick must not fire again.
        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects.is_empty());
    }

    #[test]
    fn leaving_chat_stops_polls_and_drops_stale_results() {
        let mut app = signed_in_app();
        switch_page(&mut app.tui, Page::Chat);

        let effects = update(&mut app, UiEvent::Tick);
        let task_id = match effects.as_slice() {
            [UiEffect::FetchChat { task: Some(id) }] => *id,
            other => panic!("expected chat fetch, got {other:?}"),
        };
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::ChatFetch,
                started: TaskStarted { id: task_id },
            },
        );

        switch_page(&mut app.tui, Page::Home);
        assert!(app.tui.poll.chat_next.is_none());

        // The in-flight fetch completes after navigation: dropped.
        let stale = ChatMessage {
            id: 1,
            message: "late".to_string(),
            username: "Trinity".to_string(),
            user_id: 8,
            created_at: String::new(),
        };
        update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::ChatFetch,
                completed: TaskCompleted {
                    id: task_id,
                    result: Box::new(UiEvent::ChatFetched(Ok(vec![stale]))),
                },
            },
        );
        assert!(app.tui.chat.messages.is_empty());

        // No further chat polls while off the view.
        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects.is_empty());
    }

    #[test]
    fn admin_page_is_skipped_for_non_admins() {
        let mut app = signed_in_app();
        app.tui.page = Page::Profile;
        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.tui.page, Page::Home);

        let mut admin_app = AppState::new(Config::default(), Some(admin_session()));
        admin_app.tui.page = Page::Profile;
        update(&mut admin_app, key(KeyCode::Tab));
        assert_eq!(admin_app.tui.page, Page::Admin);
    }

    #[test]
    fn admin_poll_fires_on_entry_and_grant_success_refreshes_roster() {
        let mut app = AppState::new(Config::default(), Some(admin_session()));
        switch_page(&mut app.tui, Page::Admin);

        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::FetchRoster { task: Some(_) })));

        app.overlay = Some(Overlay::Grant(GrantState::open(7, "Neo".to_string())));
        update(
            &mut app,
            UiEvent::GrantFinished {
                user_id: 7,
                result: Ok(outcome("Пользователю Neo выдано 200 ТитулКоинов", 650)),
            },
        );
        assert!(app.overlay.is_none());
        assert!(app.tui.notice.is_some());
        // Roster deadline rearmed to "now": next tick refetches.
        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::FetchRoster { task: Some(_) })));
        // Grant to another user never touches own balance.
        assert_eq!(app.tui.session.as_ref().unwrap().coins, 9000);
    }

    #[test]
    fn repeated_profile_loaded_is_a_no_op() {
        let mut app = signed_in_app();

        let first = update(&mut app, UiEvent::ProfileLoaded(Ok(snapshot(450))));
        let session_after_first = app.tui.session.clone();
        let profile_after_first = app.tui.profile.clone();

        let second = update(&mut app, UiEvent::ProfileLoaded(Ok(snapshot(450))));
        assert_eq!(app.tui.session, session_after_first);
        assert_eq!(app.tui.profile, profile_after_first);
        // Identical snapshot: nothing to persist either time beyond the first.
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn auth_success_stores_session_and_loads_profile() {
        let mut app = AppState::new(Config::default(), None);
        app.tui.auth.username = "Neo".to_string();
        app.tui.auth.password = "matrix".to_string();

        let effects = update(
            &mut app,
            UiEvent::AuthFinished {
                action: AuthAction::Login,
                result: Ok(User {
                    id: 7,
                    username: "Neo".to_string(),
                    coins: 450,
                    is_admin: false,
                }),
            },
        );

        assert_eq!(app.tui.session, Some(session()));
        assert_eq!(app.tui.page, Page::Home);
        assert!(app.tui.auth.username.is_empty());
        assert!(has_load_profile(&effects));
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::SaveSession { .. })));
    }

    #[test]
    fn auth_failure_shows_server_message_in_form() {
        let mut app = AppState::new(Config::default(), None);
        update(
            &mut app,
            UiEvent::AuthFinished {
                action: AuthAction::Login,
                result: Err(ApiError::Server {
                    status: 401,
                    message: "Неверное имя или пароль".to_string(),
                }),
            },
        );
        assert_eq!(
            app.tui.auth.error.as_deref(),
            Some("Неверное имя или пароль")
        );
        assert!(app.tui.session.is_none());
    }

    #[test]
    fn logout_clears_session_and_cached_state() {
        let mut app = signed_in_app();
        switch_page(&mut app.tui, Page::Chat);
        app.tui.chat.messages.push(ChatMessage {
            id: 1,
            message: "hi".to_string(),
            username: "Neo".to_string(),
            user_id: 7,
            created_at: String::new(),
        });
        app.tui.page = Page::Profile;

        let effects = update(&mut app, key(KeyCode::Char('l')));

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(app.tui.session.is_none());
        assert!(app.tui.profile.is_none());
        assert!(app.tui.chat.messages.is_empty());
        assert!(app.tui.poll.chat_next.is_none());
    }

    #[test]
    fn daily_claim_requires_eligibility() {
        let mut app = signed_in_app();
        app.tui.page = Page::Profile;
        app.tui.profile.as_mut().unwrap().can_claim_daily = false;

        let effects = update(&mut app, key(KeyCode::Char('d')));
        assert!(effects.is_empty());

        app.tui.profile.as_mut().unwrap().can_claim_daily = true;
        let effects = update(&mut app, key(KeyCode::Char('d')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ClaimDaily { task: Some(_) }]
        ));
    }

    #[test]
    fn chat_send_success_clears_input_and_rearms_poll() {
        let mut app = signed_in_app();
        switch_page(&mut app.tui, Page::Chat);
        update(&mut app, UiEvent::Tick); // consume the entry fetch
        app.tui.chat.input = "gm".to_string();

        update(
            &mut app,
            UiEvent::ChatSent(Ok(ChatMessage {
                id: 3,
                message: "gm".to_string(),
                username: "Neo".to_string(),
                user_id: 7,
                created_at: String::new(),
            })),
        );

        assert!(app.tui.chat.input.is_empty());
        assert_eq!(app.tui.chat.messages.len(), 1);
        // Immediate refresh scheduled.
        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects
            .iter()
            .any(|e| matches!(e, UiEffect::FetchChat { task: Some(_) })));
    }

    #[test]
    fn restored_session_triggers_startup_profile_fetch() {
        let mut app = AppState::new(Config::default(), Some(session()));
        let effects = startup_effects(&mut app);
        assert!(has_load_profile(&effects));

        let mut cold = AppState::new(Config::default(), None);
        assert!(startup_effects(&mut cold).is_empty());
    }
}
