//! Admin coin grant overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// State for the grant overlay. Amount may be negative (deduction).
#[derive(Debug)]
pub struct GrantState {
    pub user_id: i64,
    pub username: String,
    pub input: String,
    pub busy: bool,
    pub error: Option<String>,
}

impl GrantState {
    pub fn open(user_id: i64, username: String) -> Self {
        Self {
            user_id,
            username,
            input: String::new(),
            busy: false,
            error: None,
        }
    }

    pub fn handle_key(&mut self, _tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter => {
                if self.busy {
                    return OverlayUpdate::stay();
                }
                match self.input.parse::<i64>() {
                    Ok(0) | Err(_) => {
                        self.error = Some("Введите ненулевое число".to_string());
                        OverlayUpdate::stay()
                    }
                    Ok(amount) => {
                        self.busy = true;
                        OverlayUpdate::stay().with_effects(vec![UiEffect::GrantCoins {
                            task: None,
                            user_id: self.user_id,
                            amount,
                        }])
                    }
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            KeyCode::Char('-') if self.input.is_empty() => {
                self.input.push('-');
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn fail(&mut self, error: String) {
        self.busy = false;
        self.error = Some(error);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use super::render_utils::{
            InputHint, InputLine, OverlayConfig, render_input_line, render_overlay,
            render_separator,
        };

        let hints = [
            InputHint::new("Enter", "выдать"),
            InputHint::new("Esc", "отмена"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Выдача ТитулКоинов",
                border_color: Color::Magenta,
                width: 50,
                height: 8,
                hints: &hints,
            },
        );

        let target_area = Rect::new(layout.body.x, layout.body.y, layout.body.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(format!("Кому: {}", self.username))),
            target_area,
        );

        let input_area = Rect::new(layout.body.x, layout.body.y + 1, layout.body.width, 1);
        render_input_line(
            frame,
            input_area,
            &InputLine {
                value: &self.input,
                placeholder: Some("Сумма (отрицательная — списание)"),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::Magenta,
                placeholder_color: Color::DarkGray,
                cursor_color: Color::Magenta,
            },
        );

        render_separator(frame, layout.body, 2);

        let (status_text, status_style) = if self.busy {
            ("Выполняется...".to_string(), Style::default().fg(Color::DarkGray))
        } else if let Some(error) = &self.error {
            (error.clone(), Style::default().fg(Color::Red))
        } else {
            (String::new(), Style::default())
        };
        let status_area = Rect::new(layout.body.x, layout.body.y + 3, layout.body.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status_text, status_style))),
            status_area,
        );
    }
}
