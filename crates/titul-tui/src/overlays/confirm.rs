//! Buy/sell confirmation dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// What the dialog confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Buy {
        title_id: i64,
        name: String,
        price: i64,
    },
    Sell {
        title_id: i64,
        name: String,
        refund: i64,
    },
}

/// State for the confirmation overlay.
#[derive(Debug)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    /// Set while the buy/sell call is in flight. Blocks re-submit.
    pub busy: bool,
    pub error: Option<String>,
}

impl ConfirmState {
    pub fn open(action: ConfirmAction) -> Self {
        Self {
            action,
            busy: false,
            error: None,
        }
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => {
                if self.busy {
                    return OverlayUpdate::stay();
                }
                self.busy = true;
                self.error = None;
                let effect = match &self.action {
                    ConfirmAction::Buy { title_id, .. } => UiEffect::BuyTitle {
                        task: None,
                        title_id: *title_id,
                    },
                    ConfirmAction::Sell { title_id, .. } => UiEffect::SellTitle {
                        task: None,
                        title_id: *title_id,
                    },
                };
                OverlayUpdate::stay().with_effects(vec![effect])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Called from the reducer when the in-flight call failed: the dialog
    /// stays open showing the server's message.
    pub fn fail(&mut self, error: String) {
        self.busy = false;
        self.error = Some(error);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};

        let (title, question, border_color) = match &self.action {
            ConfirmAction::Buy { name, price, .. } => (
                "Покупка титула",
                format!("Купить {} за {} ТК?", name, price),
                Color::Yellow,
            ),
            ConfirmAction::Sell { name, refund, .. } => (
                "Продажа титула",
                format!("Продать {} за {} ТК?", name, refund),
                Color::Red,
            ),
        };

        let hints = [
            InputHint::new("Enter", "подтвердить"),
            InputHint::new("Esc", "отмена"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title,
                border_color,
                width: 50,
                height: 7,
                hints: &hints,
            },
        );

        let question_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        frame.render_widget(Paragraph::new(Line::from(question)), question_area);

        render_separator(frame, layout.body, 1);

        let (status_text, status_style) = if self.busy {
            ("Выполняется...".to_string(), Style::default().fg(Color::DarkGray))
        } else if let Some(error) = &self.error {
            (error.clone(), Style::default().fg(Color::Red))
        } else {
            (String::new(), Style::default())
        };
        let status_area = Rect::new(layout.body.x, layout.body.y + 2, layout.body.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status_text, status_style))),
            status_area,
        );
    }
}
