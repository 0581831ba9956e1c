//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard
//! input. Each overlay is self-contained: it owns its state, key handler,
//! and render function.
//!
//! - `confirm.rs`: buy/sell confirmation dialog
//! - `grant.rs`: admin coin grant amount input
//! - `render_utils.rs`: shared rendering utilities for overlays

pub mod confirm;
pub mod grant;
pub mod render_utils;

pub use confirm::{ConfirmAction, ConfirmState};
use crossterm::event::KeyEvent;
pub use grant::GrantState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Confirm(ConfirmState),
    Grant(GrantState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::Confirm(c) => c.render(frame, area),
            Overlay::Grant(g) => g.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Confirm(c) => c.handle_key(tui, key),
            Overlay::Grant(g) => g.handle_key(tui, key),
        }
    }
}
