//! Admin view: live user roster with coin grants.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use titul_core::types::AdminUser;

use crate::state::TuiState;

/// Presence column: online badge, or when the user was last seen.
fn presence_text(user: &AdminUser) -> String {
    if user.is_online {
        "онлайн".to_string()
    } else {
        let seen = user.last_login_short();
        if seen.is_empty() {
            "не в сети".to_string()
        } else {
            format!("был: {seen}")
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    if tui.admin.users.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Загрузка списка пользователей...",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = tui
        .admin
        .users
        .iter()
        .map(|user| {
            let mut spans = vec![
                Span::styled(
                    format!("{:<20}", user.username),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>8} ТК", user.coins),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            let presence_color = if user.is_online {
                Color::Green
            } else {
                Color::DarkGray
            };
            spans.push(Span::styled(
                format!("  {:<18}", presence_text(user)),
                Style::default().fg(presence_color),
            ));
            if let Some(minutes) = user.time_spent_minutes {
                spans.push(Span::styled(
                    format!("  в игре: {minutes} мин"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::Rgb(40, 40, 40)),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(
        tui.admin.cursor.min(tui.admin.users.len().saturating_sub(1)),
    ));
    frame.render_stateful_widget(list, area, &mut list_state);
}
