//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (one remote call each)

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use titul_core::api::ApiClient;
use titul_core::config::Config;
use titul_core::session::{self, StoredSession};
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while tasks are in flight (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. The poll clocks only need sub-second
/// resolution, so a longer timeout keeps CPU usage down.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    /// Shared HTTP client, cloned into each spawned handler.
    client: ApiClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (fast tick during interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(config: Config, stored: Option<StoredSession>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let client = ApiClient::new(config.base_url.clone());
        let state = AppState::new(config, stored);

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        // A restored session fetches its profile before the first frame.
        let startup = update::startup_effects(&mut self.state);
        self.execute_effects(startup);

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                    dirty = true;
                }
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (terminal, inbox, tick timer).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast tick while tasks run or the user is interacting; slow
        // otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn session_id(&self) -> Option<i64> {
        self.state.tui.session.as_ref().map(|s| s.id)
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let started = TaskStarted { id };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            UiEffect::Authenticate {
                task,
                action,
                username,
                password,
            } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::Auth, task, move || {
                    handlers::authenticate(client, action, username, password)
                });
            }

            UiEffect::LoadProfile { task } => {
                let (Some(task), Some(user_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::Profile, task, move || {
                    handlers::load_profile(client, user_id)
                });
            }

            UiEffect::BuyTitle { task, title_id } => {
                let (Some(task), Some(user_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::Buy, task, move || {
                    handlers::buy_title(client, user_id, title_id)
                });
            }

            UiEffect::SellTitle { task, title_id } => {
                let (Some(task), Some(user_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::Sell, task, move || {
                    handlers::sell_title(client, user_id, title_id)
                });
            }

            UiEffect::ClaimDaily { task } => {
                let (Some(task), Some(user_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::DailyClaim, task, move || {
                    handlers::claim_daily(client, user_id)
                });
            }

            UiEffect::FetchChat { task } => {
                let Some(task) = task else {
                    return;
                };
                let client = self.client.clone();
                let limit = self.state.tui.config.chat_limit;
                self.spawn_task(TaskKind::ChatFetch, task, move || {
                    handlers::fetch_chat(client, limit)
                });
            }

            UiEffect::SendChatMessage { task, message } => {
                let (Some(task), Some(user_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::ChatSend, task, move || {
                    handlers::send_chat(client, user_id, message)
                });
            }

            UiEffect::FetchRoster { task } => {
                let (Some(task), Some(admin_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::RosterFetch, task, move || {
                    handlers::fetch_roster(client, admin_id)
                });
            }

            UiEffect::GrantCoins {
                task,
                user_id,
                amount,
            } => {
                let (Some(task), Some(admin_id)) = (task, self.session_id()) else {
                    return;
                };
                let client = self.client.clone();
                self.spawn_task(TaskKind::Grant, task, move || {
                    handlers::grant_coins(client, admin_id, user_id, amount)
                });
            }

            UiEffect::SaveSession { session } => {
                if let Err(error) = session::save(&session) {
                    tracing::warn!(%error, "failed to persist session");
                }
            }

            UiEffect::ClearSession => {
                if let Err(error) = session::clear() {
                    tracing::warn!(%error, "failed to clear session");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
