//! Profile view: account details, daily reward, logout.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::TuiState;

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let Some(session) = &tui.session else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Аккаунт: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.username.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            if session.is_admin {
                Span::styled("  (админ)", Style::default().fg(Color::Magenta))
            } else {
                Span::raw("")
            },
        ]),
        Line::from(vec![
            Span::styled("Баланс: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ТитулКоинов", tui.coins()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::default(),
    ];

    match &tui.profile {
        Some(profile) => {
            lines.push(Line::from(vec![
                Span::styled("Серия входов: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} дн.", profile.daily_streak)),
            ]));
            if profile.can_claim_daily {
                lines.push(Line::from(Span::styled(
                    "Ежедневная награда доступна — нажмите d",
                    Style::default().fg(Color::Green),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Ежедневная награда уже получена",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Загрузка профиля...",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("d", Style::default().fg(Color::Yellow)),
        Span::styled(" награда • ", Style::default().fg(Color::DarkGray)),
        Span::styled("l", Style::default().fg(Color::Yellow)),
        Span::styled(" выйти из аккаунта", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}
