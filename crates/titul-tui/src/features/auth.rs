//! Login/register form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use titul_core::api::AuthAction;
use titul_core::types::MIN_USERNAME_LEN;

use crate::common::Tasks;
use crate::effects::UiEffect;
use crate::state::{AuthField, AuthFormState};

/// Client-side validation before any network call.
///
/// The server re-validates; this only catches the cases the form can see.
pub fn validate(mode: AuthAction, username: &str, password: &str) -> Result<(), String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Введите имя пользователя".to_string());
    }
    if password.is_empty() {
        return Err("Введите пароль".to_string());
    }
    if mode == AuthAction::Register && username.chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "Имя пользователя: минимум {} символа",
            MIN_USERNAME_LEN
        ));
    }
    Ok(())
}

pub fn handle_key(auth: &mut AuthFormState, tasks: &Tasks, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            auth.focus = match auth.focus {
                AuthField::Username => AuthField::Password,
                AuthField::Password => AuthField::Username,
            };
            vec![]
        }
        KeyCode::Char('r') if ctrl => {
            auth.mode = match auth.mode {
                AuthAction::Login => AuthAction::Register,
                AuthAction::Register => AuthAction::Login,
            };
            auth.error = None;
            vec![]
        }
        KeyCode::Enter => {
            if tasks.auth.is_running() {
                return vec![];
            }
            match validate(auth.mode, &auth.username, &auth.password) {
                Ok(()) => {
                    auth.error = None;
                    vec![UiEffect::Authenticate {
                        task: None,
                        action: auth.mode,
                        username: auth.username.trim().to_string(),
                        password: auth.password.clone(),
                    }]
                }
                Err(message) => {
                    auth.error = Some(message);
                    vec![]
                }
            }
        }
        KeyCode::Backspace => {
            match auth.focus {
                AuthField::Username => auth.username.pop(),
                AuthField::Password => auth.password.pop(),
            };
            auth.error = None;
            vec![]
        }
        KeyCode::Char(c) if !ctrl => {
            match auth.focus {
                AuthField::Username => auth.username.push(c),
                AuthField::Password => auth.password.push(c),
            }
            auth.error = None;
            vec![]
        }
        _ => vec![],
    }
}

pub fn render(frame: &mut Frame, area: Rect, auth: &AuthFormState, busy: bool) {
    let form_width = 46u16.min(area.width.saturating_sub(4));
    let form_height = 10u16.min(area.height.saturating_sub(2));
    let form = Rect::new(
        area.x + (area.width.saturating_sub(form_width)) / 2,
        area.y + (area.height.saturating_sub(form_height)) / 2,
        form_width,
        form_height,
    );

    let mode_label = match auth.mode {
        AuthAction::Login => "Вход",
        AuthAction::Register => "Регистрация",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" ЧикенТитул — {mode_label} "))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Имя",
        &auth.username,
        auth.focus == AuthField::Username,
        false,
    );
    render_field(
        frame,
        rows[2],
        "Пароль",
        &auth.password,
        auth.focus == AuthField::Password,
        true,
    );

    let status_line = if busy {
        Line::from(Span::styled(
            "Подождите...",
            Style::default().fg(Color::DarkGray),
        ))
    } else if let Some(error) = &auth.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status_line), rows[4]);

    let hints = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" отправить • ", Style::default().fg(Color::DarkGray)),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" поле • ", Style::default().fg(Color::DarkGray)),
        Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)),
        Span::styled(" режим", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        rows[6],
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    mask: bool,
) {
    let shown = if mask {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(shown, value_style),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn login_allows_short_usernames() {
        assert!(validate(AuthAction::Login, "ab", "pw").is_ok());
    }

    #[test]
    fn register_requires_three_chars() {
        let err = validate(AuthAction::Register, "ab", "pw").unwrap_err();
        assert!(err.contains("минимум"));
    }

    #[test]
    fn both_fields_required() {
        assert!(validate(AuthAction::Login, "  ", "pw").is_err());
        assert!(validate(AuthAction::Login, "Neo", "").is_err());
    }

    #[test]
    fn enter_with_invalid_form_sets_error_and_no_effect() {
        let mut auth = AuthFormState::default();
        let tasks = Tasks::default();
        let effects = handle_key(&mut auth, &tasks, KeyEvent::from(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(auth.error.is_some());
    }

    #[test]
    fn enter_with_valid_form_emits_authenticate() {
        let mut auth = AuthFormState {
            username: "Neo".to_string(),
            password: "matrix".to_string(),
            ..AuthFormState::default()
        };
        let tasks = Tasks::default();
        let effects = handle_key(&mut auth, &tasks, KeyEvent::from(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Authenticate { action: AuthAction::Login, .. }]
        ));
    }
}
